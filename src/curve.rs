use std::sync::LazyLock;

use kurbo::{CubicBez, ParamCurve as _};
use regex::Regex;

use crate::foundation::{
    core::{Point, ensure_finite, format_number},
    error::{StyleError, StyleResult},
};

/// Cubic timing curve in unit space from `(0,0)` to `(1,1)`.
///
/// `x1`/`x2` must lie in `[0, 1]` as CSS requires; `y1`/`y2` may overshoot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BezierSpec {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BezierSpec {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn validate(&self) -> StyleResult<()> {
        for (name, v) in [
            ("x1", self.x1),
            ("y1", self.y1),
            ("x2", self.x2),
            ("y2", self.y2),
        ] {
            ensure_finite(name, v)?;
        }
        if !(0.0..=1.0).contains(&self.x1) || !(0.0..=1.0).contains(&self.x2) {
            return Err(StyleError::curve("x1 and x2 must lie in [0, 1]"));
        }
        Ok(())
    }

    pub fn timing_function(&self) -> StyleResult<String> {
        self.validate()?;
        Ok(format!(
            "cubic-bezier({}, {}, {}, {})",
            format_number(self.x1),
            format_number(self.y1),
            format_number(self.x2),
            format_number(self.y2)
        ))
    }

    fn unit_curve(&self) -> CubicBez {
        CubicBez::new(
            (0.0, 0.0),
            (self.x1, self.y1),
            (self.x2, self.y2),
            (1.0, 1.0),
        )
    }

    /// Point on the curve at parameter `t` (not at progress `x`), in unit space.
    pub fn sample(&self, t: f64) -> Point {
        self.unit_curve().eval(t.clamp(0.0, 1.0))
    }

    /// Eased output for an input progress in `[0, 1]`, i.e. `y` where the curve's `x` equals
    /// `progress`.
    pub fn ease_at(&self, progress: f64) -> StyleResult<f64> {
        self.validate()?;
        let x = ensure_finite("progress", progress)?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x >= 1.0 {
            return Ok(1.0);
        }
        let curve = self.unit_curve();

        // x(t) is monotonic when x1, x2 are in [0, 1].
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..64 {
            let mid = 0.5 * (lo + hi);
            if curve.eval(mid).x < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(curve.eval(0.5 * (lo + hi)).y)
    }

    /// SVG path for the curve drawn in a `width × height` box with the origin at the top left.
    pub fn to_svg_path(&self, width: f64, height: f64) -> StyleResult<String> {
        self.validate()?;
        let (w, h) = checked_box(width, height)?;
        Ok(format!(
            "M0,{} C{},{} {},{} {},0",
            format_number(h),
            format_number(self.x1 * w),
            format_number(h - self.y1 * h),
            format_number(self.x2 * w),
            format_number(h - self.y2 * h),
            format_number(w)
        ))
    }

    /// Standalone preview document: the curve plus its two control handles.
    pub fn preview_svg(&self, width: f64, height: f64) -> StyleResult<String> {
        let d = self.to_svg_path(width, height)?;
        let (w, h) = checked_box(width, height)?;
        let (c1x, c1y) = (self.x1 * w, h - self.y1 * h);
        let (c2x, c2y) = (self.x2 * w, h - self.y2 * h);
        let n = format_number;
        Ok([
            format!(
                r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
                n(w),
                n(h)
            ),
            format!(
                r##"  <line x1="0" y1="{}" x2="{}" y2="{}" stroke="#94a3b8" stroke-width="1"/>"##,
                n(h),
                n(c1x),
                n(c1y)
            ),
            format!(
                r##"  <line x1="{}" y1="0" x2="{}" y2="{}" stroke="#94a3b8" stroke-width="1"/>"##,
                n(w),
                n(c2x),
                n(c2y)
            ),
            format!(r##"  <path d="{d}" fill="none" stroke="#3b82f6" stroke-width="2"/>"##),
            "</svg>".to_string(),
        ]
        .join("\n"))
    }
}

fn checked_box(width: f64, height: f64) -> StyleResult<(f64, f64)> {
    let w = ensure_finite("width", width)?;
    let h = ensure_finite("height", height)?;
    if w <= 0.0 || h <= 0.0 {
        return Err(StyleError::curve("width and height must be > 0"));
    }
    Ok((w, h))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingPreset {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
}

impl EasingPreset {
    pub const ALL: [Self; 20] = [
        Self::Linear,
        Self::Ease,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::EaseInSine,
        Self::EaseOutSine,
        Self::EaseInOutSine,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInExpo,
        Self::EaseOutExpo,
        Self::EaseInOutExpo,
        Self::EaseInCirc,
        Self::EaseOutCirc,
        Self::EaseInOutCirc,
        Self::EaseInBack,
        Self::EaseOutBack,
        Self::EaseInOutBack,
    ];

    pub fn spec(self) -> BezierSpec {
        match self {
            Self::Linear => BezierSpec::new(0.0, 0.0, 1.0, 1.0),
            Self::Ease => BezierSpec::new(0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => BezierSpec::new(0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => BezierSpec::new(0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => BezierSpec::new(0.42, 0.0, 0.58, 1.0),
            Self::EaseInSine => BezierSpec::new(0.12, 0.0, 0.39, 0.0),
            Self::EaseOutSine => BezierSpec::new(0.61, 1.0, 0.88, 1.0),
            Self::EaseInOutSine => BezierSpec::new(0.37, 0.0, 0.63, 1.0),
            Self::EaseInCubic => BezierSpec::new(0.32, 0.0, 0.67, 0.0),
            Self::EaseOutCubic => BezierSpec::new(0.33, 1.0, 0.68, 1.0),
            Self::EaseInOutCubic => BezierSpec::new(0.65, 0.0, 0.35, 1.0),
            Self::EaseInExpo => BezierSpec::new(0.7, 0.0, 0.84, 0.0),
            Self::EaseOutExpo => BezierSpec::new(0.16, 1.0, 0.3, 1.0),
            Self::EaseInOutExpo => BezierSpec::new(0.87, 0.0, 0.13, 1.0),
            Self::EaseInCirc => BezierSpec::new(0.55, 0.0, 1.0, 0.45),
            Self::EaseOutCirc => BezierSpec::new(0.0, 0.55, 0.45, 1.0),
            Self::EaseInOutCirc => BezierSpec::new(0.85, 0.0, 0.15, 1.0),
            Self::EaseInBack => BezierSpec::new(0.36, 0.0, 0.66, -0.56),
            Self::EaseOutBack => BezierSpec::new(0.34, 1.56, 0.64, 1.0),
            Self::EaseInOutBack => BezierSpec::new(0.68, -0.6, 0.32, 1.6),
        }
    }

    /// CSS keyword for the five built-in curves.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Linear => Some("linear"),
            Self::Ease => Some("ease"),
            Self::EaseIn => Some("ease-in"),
            Self::EaseOut => Some("ease-out"),
            Self::EaseInOut => Some("ease-in-out"),
            _ => None,
        }
    }

    pub fn timing_function(self) -> StyleResult<String> {
        match self.keyword() {
            Some(k) => Ok(k.to_string()),
            None => self.spec().timing_function(),
        }
    }
}

/// Either a named preset or explicit control points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Timing {
    Preset(EasingPreset),
    Custom(BezierSpec),
}

impl Timing {
    pub fn spec(self) -> BezierSpec {
        match self {
            Self::Preset(p) => p.spec(),
            Self::Custom(s) => s,
        }
    }

    pub fn timing_function(self) -> StyleResult<String> {
        match self {
            Self::Preset(p) => p.timing_function(),
            Self::Custom(s) => s.timing_function(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::Preset(EasingPreset::Ease)
    }
}

/// Coordinate pairs scanned out of path text, for drawing markers near vertices.
///
/// This is a two-number scan, not a path grammar. A number pairs only with the next one
/// when nothing but whitespace or commas sits between them, so any command letter breaks a
/// pair. Relative and absolute pairs are mixed, an `H`/`V` argument pairs with a bare number
/// that follows it, and arc flags can be read as coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PathPointSet {
    pub points: Vec<Point>,
}

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d*\.?\d+)[\s,]+(-?\d*\.?\d+)").expect("valid coordinate pair regex")
});

pub fn extract_points(path: &str) -> PathPointSet {
    let points = PAIR_RE
        .captures_iter(path)
        .filter_map(|c| {
            let x = c[1].parse::<f64>().ok()?;
            let y = c[2].parse::<f64>().ok()?;
            Some(Point::new(x, y))
        })
        .collect();
    PathPointSet { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_path_flips_y_axis() {
        let spec = BezierSpec::new(0.25, 0.1, 0.25, 1.0);
        assert_eq!(
            spec.to_svg_path(200.0, 100.0).unwrap(),
            "M0,100 C50,90 50,0 200,0"
        );
    }

    #[test]
    fn overshoot_goes_above_the_box() {
        let d = EasingPreset::EaseOutBack
            .spec()
            .to_svg_path(100.0, 100.0)
            .unwrap();
        assert_eq!(d, "M0,100 C34,-56 64,0 100,0");
    }

    #[test]
    fn rejects_x_out_of_unit_range() {
        let spec = BezierSpec::new(1.2, 0.0, 0.5, 1.0);
        assert!(spec.timing_function().is_err());
        assert!(spec.to_svg_path(100.0, 100.0).is_err());
        assert!(
            BezierSpec::new(0.5, f64::NAN, 0.5, 1.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn timing_function_text() {
        assert_eq!(
            EasingPreset::EaseInOutBack.timing_function().unwrap(),
            "cubic-bezier(0.68, -0.6, 0.32, 1.6)"
        );
        assert_eq!(EasingPreset::EaseIn.timing_function().unwrap(), "ease-in");
    }

    #[test]
    fn timing_deserializes_from_name_or_points() {
        let t: Timing = serde_json::from_str(r#""ease-out-back""#).unwrap();
        assert_eq!(t, Timing::Preset(EasingPreset::EaseOutBack));
        let t: Timing =
            serde_json::from_str(r#"{"x1":0.1,"y1":0.7,"x2":1.0,"y2":0.1}"#).unwrap();
        assert_eq!(
            t.timing_function().unwrap(),
            "cubic-bezier(0.1, 0.7, 1, 0.1)"
        );
    }

    #[test]
    fn ease_at_endpoints_and_linear() {
        for preset in EasingPreset::ALL {
            let spec = preset.spec();
            assert!(spec.ease_at(0.0).unwrap().abs() < 1e-9, "{preset:?}");
            assert!((spec.ease_at(1.0).unwrap() - 1.0).abs() < 1e-9, "{preset:?}");
        }
        let linear = EasingPreset::Linear.spec();
        assert!((linear.ease_at(0.3).unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn ease_out_back_overshoots() {
        let spec = EasingPreset::EaseOutBack.spec();
        let peak = (1..100)
            .map(|i| spec.ease_at(f64::from(i) / 100.0).unwrap())
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn sample_hits_endpoints() {
        let spec = EasingPreset::Ease.spec();
        assert_eq!(spec.sample(0.0), Point::new(0.0, 0.0));
        assert_eq!(spec.sample(1.0), Point::new(1.0, 1.0));
    }

    #[test]
    fn extract_points_is_a_loose_scan() {
        let set = extract_points("M10,20 Q 30 40, 50.5 -60 Z");
        assert_eq!(
            set.points,
            vec![
                Point::new(10.0, 20.0),
                Point::new(30.0, 40.0),
                Point::new(50.5, -60.0)
            ]
        );
        assert!(extract_points("not a path").points.is_empty());
        // A command letter between two numbers breaks the pair.
        let hv = extract_points("M0 0 H 10 V 20");
        assert_eq!(hv.points, vec![Point::new(0.0, 0.0)]);
        // A repeated H argument is a bare number, so it pairs.
        let repeated = extract_points("M 0 0 H 10 20");
        assert_eq!(
            repeated.points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)]
        );
    }
}
