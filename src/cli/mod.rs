//! LipidAI CLI Module
//!
//! Command-line interface for training, serving and one-off predictions.

use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::data::{DatasetLoader, LipidFeatures, LipidUnits, DEFAULT_DATASET_PATH};
use crate::inference::{LdlCategory, LdlPredictor, DEFAULT_ARTIFACT_PATH};
use crate::training::{Trainer, TrainerConfig, TrainingReport};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width
const CHART_WIDTH: usize = 32;

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    let _ = write_step(&mut std::io::stdout().lock(), msg);
}

/// Write a step line without a newline and flush it so it shows before the work starts
fn write_step(out: &mut impl Write, msg: &str) -> std::io::Result<()> {
    write!(out, "  {} {}... ", accent("›"), msg)?;
    out.flush()
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn category_color(category: LdlCategory, text: &str) -> ColoredString {
    match category {
        LdlCategory::Optimal => text.truecolor(100, 210, 120),
        LdlCategory::NearOptimal => text.truecolor(170, 210, 100),
        LdlCategory::BorderlineHigh => text.truecolor(230, 200, 90),
        LdlCategory::High => text.truecolor(240, 150, 80),
        LdlCategory::VeryHigh => text.truecolor(235, 90, 90),
    }
}

/// Parse a single-byte CSV separator
fn parse_separator(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(format!("separator must be a single ASCII character, got {:?}", s)),
    }
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lipidai")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LDL cholesterol estimation from a standard lipid panel")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the LDL-C model on a CSV dataset
    Train {
        /// Training data (CSV with TC, HDL-C, TG, LDL-C columns)
        #[arg(short, long, default_value = DEFAULT_DATASET_PATH)]
        data: PathBuf,

        /// Where to write the model artifact
        #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
        output: PathBuf,

        /// Field separator
        #[arg(long, default_value = ",", value_parser = parse_separator)]
        separator: u8,

        /// Units of the lipid columns (mg-dl, mmol-l)
        #[arg(long, default_value = "mg-dl")]
        units: LipidUnits,
    },

    /// Start the prediction server
    Serve {
        /// Server host [env: API_HOST]
        #[arg(long)]
        host: Option<String>,

        /// Server port [env: API_PORT]
        #[arg(short, long)]
        port: Option<u16>,

        /// Model artifact [env: MODEL_PATH]
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Predict LDL-C for one lipid panel
    Predict {
        /// Model artifact
        #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
        model: PathBuf,

        /// Total cholesterol
        #[arg(long)]
        tc: f64,

        /// HDL cholesterol
        #[arg(long = "hdl-c")]
        hdl_c: f64,

        /// Triglycerides
        #[arg(long)]
        tg: f64,
    },

    /// Summarize the columns of a dataset
    Info {
        /// Input data file
        #[arg(short, long, default_value = DEFAULT_DATASET_PATH)]
        data: PathBuf,

        /// Field separator
        #[arg(long, default_value = ",", value_parser = parse_separator)]
        separator: u8,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data_path: &Path,
    output: &Path,
    separator: u8,
    units: LipidUnits,
) -> anyhow::Result<()> {
    section("Train");

    let config = TrainerConfig::new(data_path)
        .with_artifact_path(output)
        .with_separator(separator)
        .with_units(units);

    step_run(&format!("Training random forest on {}", data_path.display()));
    let start = Instant::now();
    let report = Trainer::new(config).run()?;
    step_done(&format!("{:.2?}", start.elapsed()));

    print_training_report(&report);
    Ok(())
}

fn print_training_report(report: &TrainingReport) {
    let cleaning = &report.cleaning;

    section("Data");
    println!("  {:<18} {}", muted("Rows read"), cleaning.rows_read);
    println!("  {:<18} {}", muted("Rows kept"), cleaning.rows_kept);
    println!("  {:<18} {}", muted("Rows dropped"), cleaning.rows_dropped);
    for col in cleaning.columns.iter().filter(|c| c.missing + c.unparseable > 0) {
        println!(
            "  {:<18} {} missing, {} unparseable",
            dim(&col.name),
            col.missing,
            col.unparseable
        );
    }
    println!("  {:<18} {} / {}", muted("Train / test"), report.n_train, report.n_test);

    section("Evaluation");
    let unit = report.units.label();
    println!("  {:<18} {} {}", muted("MAE"), format!("{:.4}", report.metrics.mae).white().bold(), dim(unit));
    println!("  {:<18} {}", muted("R²"), format!("{:.4}", report.metrics.r2).white().bold());
    println!("  {:<18} {:.4}", muted("RMSE"), report.metrics.rmse);
    println!("  {:<18} {:.4} {}", muted("Friedewald MAE"), report.friedewald_mae, dim(unit));
    println!("  {:<18} {:.3}s", muted("Time"), report.training_time_secs);

    section("Feature importance");
    for bar in report.importance_chart(CHART_WIDTH) {
        println!(
            "  {:<8} {} {}",
            bar.feature,
            accent(&bar.bar()),
            dim(&format!("{:.4}", bar.importance))
        );
    }

    if let Some(path) = &report.artifact_path {
        println!();
        println!("  {} {}", ok("saved"), path.display());
    }
    println!();
}

pub fn cmd_predict(model_path: &Path, tc: f64, hdl_c: f64, tg: f64) -> anyhow::Result<()> {
    let predictor = LdlPredictor::load(model_path)?;
    let units = predictor.artifact().units;
    let ldl_c = predictor.predict(&LipidFeatures::new(tc, hdl_c, tg))?;
    let category = LdlCategory::classify(ldl_c, units);

    section("Predict");
    println!("  {:<12} {} {}", muted("LDL-C"), format!("{:.2}", ldl_c).white().bold(), dim(units.label()));
    println!(
        "  {:<12} {} {}",
        muted("Category"),
        category_color(category, category.label()).bold(),
        dim(&format!("({})", category.range()))
    );
    println!();
    Ok(())
}

pub fn cmd_info(data_path: &Path, separator: u8) -> anyhow::Result<()> {
    section("Data Info");

    let loader = DatasetLoader::new().with_separator(separator);
    let summary = loader.describe(data_path)?;

    println!("  {:<12} {}", muted("File"), data_path.display());
    println!("  {:<12} {}", muted("Columns"), summary.len());
    println!();

    println!(
        "  {:<16} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        muted("Column"), muted("Numeric"), muted("Missing"), muted("Invalid"),
        muted("Min"), muted("Mean"), muted("Max")
    );
    println!("  {}", dim(&"─".repeat(76)));

    for col in &summary {
        println!(
            "  {:<16} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
            col.name,
            col.numeric,
            col.missing,
            col.unparseable,
            fmt_opt(col.min),
            fmt_opt(col.mean),
            fmt_opt(col.max)
        );
    }

    println!();
    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    model: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(model) = model {
        config = config.with_model_path(model);
    }

    let base = format!("http://{}:{}", config.host, config.port);

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "LipidAI".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("API    ", &base));
    line_box(&kv("Predict", &format!("{}/predict", base)));
    line_box(&kv("Model  ", &config.model_path.display().to_string()));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(";"), Ok(b';'));
        assert_eq!(parse_separator("\\t"), Ok(b'\t'));
        assert!(parse_separator(";;").is_err());
        assert!(parse_separator("é").is_err());
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "lipidai", "predict", "--tc", "200", "--hdl-c", "50", "--tg", "150",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict { model, tc, hdl_c, tg } => {
                assert_eq!(model, PathBuf::from("final_lipid_model.bin"));
                assert_eq!((tc, hdl_c, tg), (200.0, 50.0, 150.0));
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_parse_train_options() {
        let cli = Cli::try_parse_from([
            "lipidai", "train", "--data", "panel.csv", "--separator", ";", "--units", "mmol-l",
        ])
        .unwrap();
        match cli.command {
            Commands::Train { data, output, separator, units } => {
                assert_eq!(data, PathBuf::from("panel.csv"));
                assert_eq!(output, PathBuf::from("final_lipid_model.bin"));
                assert_eq!(separator, b';');
                assert_eq!(units, LipidUnits::MmolL);
            }
            _ => panic!("expected train"),
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        buf: Vec<u8>,
        flushed_len: usize,
    }

    impl Write for RecordingWriter {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed_len = self.buf.len();
            Ok(())
        }
    }

    #[test]
    fn test_step_line_is_flushed_without_newline() {
        let mut out = RecordingWriter::default();
        write_step(&mut out, "Training random forest on panel.csv").unwrap();

        let text = strip_ansi(&String::from_utf8(out.buf.clone()).unwrap());
        assert!(text.ends_with("Training random forest on panel.csv... "));
        assert!(!text.contains('\n'));
        assert_eq!(out.flushed_len, out.buf.len());
    }

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}", "x".red());
        assert_eq!(strip_ansi(&colored), "x");
    }
}
