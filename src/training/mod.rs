//! Model training module
//!
//! Random-forest regression of LDL-C on TC, HDL-C and TG:
//! - Regression trees with the squared-error criterion
//! - Bootstrap-aggregated forest, trees built in parallel with rayon
//! - Seeded train/test split
//! - MAE / R² evaluation and a Friedewald baseline
//! - Feature-importance chart

mod config;
mod engine;
mod metrics;
mod report;
mod split;
pub mod decision_tree;
pub mod random_forest;

pub use config::TrainerConfig;
pub use engine::Trainer;
pub use metrics::{mean_absolute_error, RegressionMetrics};
pub use report::{importance_chart, ImportanceBar, TrainingReport};
pub use split::{train_test_split, TrainTestSplit};
pub use decision_tree::{DecisionTree, TreeNode};
pub use random_forest::{MaxFeatures, RandomForest};
