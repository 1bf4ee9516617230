use std::fmt;

use crate::foundation::error::{StyleError, StyleResult};

pub use kurbo::Point;

/// A `#RRGGBB` color as typed by the caller.
///
/// Digits keep the caller's letter case so emitted text matches what was entered; the
/// short `#RGB` form is expanded on parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    digits: String,
}

impl HexColor {
    pub fn parse(s: &str) -> StyleResult<Self> {
        let raw = s.trim();
        let Some(body) = raw.strip_prefix('#') else {
            return Err(StyleError::validation(format!(
                "color '{raw}' must start with '#'"
            )));
        };
        if !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StyleError::validation(format!(
                "color '{raw}' contains non-hex digits"
            )));
        }
        let digits = match body.len() {
            6 => body.to_string(),
            3 => body.chars().flat_map(|c| [c, c]).collect(),
            _ => {
                return Err(StyleError::validation(format!(
                    "color '{raw}' must have 3 or 6 hex digits"
                )));
            }
        };
        Ok(Self { digits })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits)
    }
}

/// Largest magnitude any emitted number may have.
pub const MAX_MAGNITUDE: f64 = 1e12;

/// Rounds to two decimals, ties away from zero. Shared by every emitter.
fn round_hundredths(v: f64) -> f64 {
    let scaled = v * 100.0;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / 100.0
}

/// Shortest decimal form with at most two fractional digits (`1.5`, `12`, `-0.25`).
pub fn format_number(v: f64) -> String {
    let r = round_hundredths(v);
    if r == 0.0 {
        return "0".to_string();
    }
    let s = format!("{r:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Fixed two-decimal form used for path coordinates, so digit count never depends on value.
pub fn format_fixed(v: f64) -> String {
    let r = round_hundredths(v);
    if r == 0.0 {
        return "0.00".to_string();
    }
    format!("{r:.2}")
}

pub fn px(v: f64) -> String {
    format!("{}px", format_number(v))
}

pub fn ensure_finite(name: &str, v: f64) -> StyleResult<f64> {
    if !v.is_finite() {
        return Err(StyleError::validation(format!("{name} must be finite")));
    }
    if v.abs() > MAX_MAGNITUDE {
        return Err(StyleError::validation(format!(
            "{name} is out of range (|{name}| <= {MAX_MAGNITUDE:e})"
        )));
    }
    Ok(v)
}

pub fn ensure_non_negative(name: &str, v: f64) -> StyleResult<f64> {
    let v = ensure_finite(name, v)?;
    if v < 0.0 {
        return Err(StyleError::validation(format!("{name} must be >= 0")));
    }
    Ok(v)
}
