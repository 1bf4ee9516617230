use crate::{
    emit::svg_data_url,
    foundation::{
        core::{Point, ensure_finite, format_fixed, format_number},
        error::{StyleError, StyleResult},
    },
    gradient::{GradientConfig, GradientKind, Stop},
    rng::SeededRng,
};

pub const MIN_COMPLEXITY: u32 = 3;
pub const MAX_COMPLEXITY: u32 = 12;

const CENTER: f64 = 50.0;
const BASE_RADIUS: f64 = 0.5;
const RADIUS_VARIANCE: f64 = 0.3;
const POINT_SCALE: f64 = 50.0;
// Controls sit further out than anchors; that mismatch is what bulges each segment.
const CONTROL_SCALE: f64 = 55.0;

pub const GRADIENT_ID: &str = "blob-gradient";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlobFill {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub kind: GradientKind,
    #[serde(default = "default_fill_angle")]
    pub angle_degrees: f64,
}

fn default_fill_angle() -> f64 {
    135.0
}

impl BlobFill {
    pub fn gradient(&self) -> GradientConfig {
        let stops = vec![Stop::new(&self.from, 0.0), Stop::new(&self.to, 100.0)];
        GradientConfig {
            kind: self.kind,
            angle_degrees: self.angle_degrees,
            stops,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlobConfig {
    pub complexity: u32, // anchor count, 3..=12
    pub contrast: f64,   // radius variance factor, (0, 1]
    pub seed: u32,
    pub fill: BlobFill,
    #[serde(default = "default_size")]
    pub size: f64, // rendered width/height in px
}

fn default_size() -> f64 {
    400.0
}

/// Anchors and quadratic controls of a blob in the `100 × 100` unit box.
///
/// `controls[i]` shapes the segment from `anchors[i]` to `anchors[(i + 1) % n]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobGeometry {
    pub anchors: Vec<Point>,
    pub controls: Vec<Point>,
}

impl BlobGeometry {
    pub fn build(complexity: u32, contrast: f64, seed: u32) -> StyleResult<Self> {
        if !(MIN_COMPLEXITY..=MAX_COMPLEXITY).contains(&complexity) {
            return Err(StyleError::validation(format!(
                "blob complexity must be in {MIN_COMPLEXITY}..={MAX_COMPLEXITY}, got {complexity}"
            )));
        }
        let contrast = ensure_finite("blob contrast", contrast)?;
        if contrast <= 0.0 || contrast > 1.0 {
            return Err(StyleError::validation("blob contrast must be in (0, 1]"));
        }

        let n = complexity as usize;
        let mut rng = SeededRng::new(seed);
        let radii: Vec<f64> = (0..n)
            .map(|_| BASE_RADIUS + (rng.next_f64() - 0.5) * contrast * RADIUS_VARIANCE)
            .collect();

        let step = 360.0 / f64::from(complexity);
        let polar = |angle_deg: f64, r: f64| {
            let a = angle_deg.to_radians();
            Point::new(CENTER + a.cos() * r, CENTER + a.sin() * r)
        };

        let mut anchors = Vec::with_capacity(n);
        let mut controls = Vec::with_capacity(n);
        for i in 0..n {
            let angle = i as f64 * step - 90.0;
            let next = (i + 1) % n;
            anchors.push(polar(angle, radii[i] * POINT_SCALE));
            let control_r = (radii[i] + radii[next]) / 2.0 * CONTROL_SCALE;
            controls.push(polar(angle + step / 2.0, control_r));
        }

        Ok(Self { anchors, controls })
    }

    pub fn to_path(&self) -> String {
        let n = self.anchors.len();
        let xy = |p: Point| format!("{},{}", format_fixed(p.x), format_fixed(p.y));

        let mut parts = Vec::with_capacity(n + 2);
        parts.push(format!("M{}", xy(self.anchors[0])));
        for i in 0..n {
            let end = self.anchors[(i + 1) % n];
            parts.push(format!("Q{} {}", xy(self.controls[i]), xy(end)));
        }
        parts.push("Z".to_string());
        parts.join(" ")
    }
}

/// Path data for a seeded blob. Identical inputs give byte-identical output.
pub fn blob_path(complexity: u32, contrast: f64, seed: u32) -> StyleResult<String> {
    Ok(BlobGeometry::build(complexity, contrast, seed)?.to_path())
}

#[tracing::instrument(skip(config), fields(seed = config.seed, complexity = config.complexity))]
pub fn blob_svg(config: &BlobConfig) -> StyleResult<String> {
    let size = ensure_finite("blob size", config.size)?;
    if size <= 0.0 {
        return Err(StyleError::validation("blob size must be > 0"));
    }
    let d = blob_path(config.complexity, config.contrast, config.seed)?;
    let defs = config
        .fill
        .gradient()
        .svg_definition(GRADIENT_ID)?
        .lines()
        .map(|l| format!("    {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    let size = format_number(size);

    Ok([
        format!(
            r#"<svg viewBox="0 0 100 100" width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg">"#
        ),
        "  <defs>".to_string(),
        defs,
        "  </defs>".to_string(),
        format!(r#"  <path d="{d}" fill="url(#{GRADIENT_ID})"/>"#),
        "</svg>".to_string(),
    ]
    .join("\n"))
}

pub fn blob_data_url(config: &BlobConfig) -> StyleResult<String> {
    Ok(svg_data_url(&blob_svg(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BlobConfig {
        BlobConfig {
            complexity: 6,
            contrast: 0.8,
            seed: 1234,
            fill: BlobFill {
                from: "#8b5cf6".to_string(),
                to: "#ec4899".to_string(),
                kind: GradientKind::Linear,
                angle_degrees: 135.0,
            },
            size: 300.0,
        }
    }

    #[test]
    fn same_inputs_same_bytes() {
        let a = blob_path(7, 0.5, 99).unwrap();
        let b = blob_path(7, 0.5, 99).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, blob_path(7, 0.5, 100).unwrap());
    }

    #[test]
    fn segment_count_matches_complexity() {
        for n in [MIN_COMPLEXITY, MAX_COMPLEXITY] {
            let d = blob_path(n, 1.0, 7).unwrap();
            assert!(d.starts_with('M'));
            assert!(d.ends_with(" Z"));
            assert_eq!(d.matches('Q').count(), n as usize);
            assert_eq!(d.matches('M').count(), 1);
        }
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert!(blob_path(2, 0.5, 1).is_err());
        assert!(blob_path(13, 0.5, 1).is_err());
        assert!(blob_path(5, 0.0, 1).is_err());
        assert!(blob_path(5, 1.5, 1).is_err());
        assert!(blob_path(5, f64::NAN, 1).is_err());
    }

    #[test]
    fn first_anchor_is_at_twelve_o_clock() {
        let g = BlobGeometry::build(4, 0.5, 1).unwrap();
        assert!((g.anchors[0].x - 50.0).abs() < 1e-9);
        assert!(g.anchors[0].y < 50.0);
        // Second anchor sits to the right: clockwise in screen space.
        assert!(g.anchors[1].x > 50.0);
        assert!((g.anchors[1].y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn radii_stay_within_variance_band() {
        let g = BlobGeometry::build(12, 1.0, 42).unwrap();
        let center = Point::new(50.0, 50.0);
        for p in &g.anchors {
            let r = p.distance(center) / 50.0;
            assert!((0.35..=0.65).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn controls_bulge_past_anchor_scale() {
        // With zero variance every anchor sits at 25 and every control at 27.5.
        let g = BlobGeometry::build(5, 1e-12, 3).unwrap();
        let center = Point::new(50.0, 50.0);
        for (a, c) in g.anchors.iter().zip(&g.controls) {
            assert!((a.distance(center) - 25.0).abs() < 1e-6);
            assert!((c.distance(center) - 27.5).abs() < 1e-6);
        }
    }

    #[test]
    fn svg_document_embeds_gradient_and_path() {
        let svg = blob_svg(&config()).unwrap();
        assert!(svg.starts_with(r#"<svg viewBox="0 0 100 100" width="300" height="300""#));
        assert!(svg.contains(r#"<linearGradient id="blob-gradient""#));
        assert!(svg.contains(r##"stop-color="#8b5cf6""##));
        assert!(svg.contains(r#"fill="url(#blob-gradient)""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn data_url_decodes_to_svg() {
        let cfg = config();
        let url = blob_data_url(&cfg).unwrap();
        let back = crate::emit::decode_svg_data_url(&url).unwrap();
        assert_eq!(back, blob_svg(&cfg).unwrap());
    }

    #[test]
    fn bad_size_is_rejected() {
        let mut cfg = config();
        cfg.size = 0.0;
        assert!(blob_svg(&cfg).is_err());
    }
}
