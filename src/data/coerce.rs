//! Text-to-number coercion for dataset cells

use std::borrow::Cow;

/// Coerce one text cell to a number.
///
/// A comma is read as the decimal separator; a cell that already uses a
/// decimal point is accepted as well. Blank, unparseable and non-finite
/// cells yield `None` instead of an error.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized: Cow<'_, str> = if trimmed.contains(',') {
        Cow::Owned(trimmed.replacen(',', ".", 1))
    } else {
        Cow::Borrowed(trimmed)
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
