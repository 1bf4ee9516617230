use crate::foundation::{
    core::{Point, ensure_finite, format_number},
    error::{StyleError, StyleResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stop {
    pub color: String,
    pub position_percent: f64,
}

impl Stop {
    pub fn new(color: impl Into<String>, position_percent: f64) -> Self {
        Self {
            color: color.into(),
            position_percent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientConfig {
    #[serde(default)]
    pub kind: GradientKind,
    #[serde(default = "default_angle")]
    pub angle_degrees: f64, // linear only
    pub stops: Vec<Stop>,
}

fn default_angle() -> f64 {
    90.0
}

impl GradientConfig {
    pub fn linear(angle_degrees: f64, stops: Vec<Stop>) -> Self {
        Self {
            kind: GradientKind::Linear,
            angle_degrees,
            stops,
        }
    }

    pub fn radial(stops: Vec<Stop>) -> Self {
        Self {
            kind: GradientKind::Radial,
            angle_degrees: default_angle(),
            stops,
        }
    }

    /// Stops ordered by position; caller order only breaks ties.
    pub fn sorted_stops(&self) -> StyleResult<Vec<Stop>> {
        if self.stops.is_empty() {
            return Err(StyleError::validation("gradient needs at least one stop"));
        }
        let mut stops = Vec::with_capacity(self.stops.len());
        for s in &self.stops {
            let color = s.color.trim();
            if color.is_empty() {
                return Err(StyleError::validation("gradient stop color must be non-empty"));
            }
            if color.contains(['"', '<', '>', ';']) {
                return Err(StyleError::validation(format!(
                    "gradient stop color '{color}' contains markup characters"
                )));
            }
            let pos = ensure_finite("stop position", s.position_percent)?.clamp(0.0, 100.0);
            stops.push(Stop::new(color, pos));
        }
        stops.sort_by(|a, b| a.position_percent.total_cmp(&b.position_percent));
        Ok(stops)
    }

    pub fn to_css(&self) -> StyleResult<String> {
        let stops = self
            .sorted_stops()?
            .iter()
            .map(|s| format!("{} {}%", s.color, format_number(s.position_percent)))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            GradientKind::Linear => {
                let angle = ensure_finite("gradient angle", self.angle_degrees)?;
                Ok(format!(
                    "linear-gradient({}deg, {stops})",
                    format_number(angle)
                ))
            }
            GradientKind::Radial => Ok(format!("radial-gradient(circle, {stops})")),
        }
    }

    /// `<linearGradient>` / `<radialGradient>` element for an SVG `<defs>` block.
    pub fn svg_definition(&self, id: &str) -> StyleResult<String> {
        let stops = self.sorted_stops()?;
        let open = match self.kind {
            GradientKind::Linear => {
                let (start, end) = linear_endpoints(self.angle_degrees)?;
                format!(
                    r#"<linearGradient id="{id}" x1="{}%" y1="{}%" x2="{}%" y2="{}%">"#,
                    format_number(start.x),
                    format_number(start.y),
                    format_number(end.x),
                    format_number(end.y)
                )
            }
            GradientKind::Radial => {
                format!(r#"<radialGradient id="{id}" cx="50%" cy="50%" r="50%">"#)
            }
        };
        let close = match self.kind {
            GradientKind::Linear => "</linearGradient>",
            GradientKind::Radial => "</radialGradient>",
        };

        let mut lines = vec![open];
        for s in &stops {
            lines.push(format!(
                r#"  <stop offset="{}%" stop-color="{}"/>"#,
                format_number(s.position_percent),
                s.color
            ));
        }
        lines.push(close.to_string());
        Ok(lines.join("\n"))
    }
}

/// Start/end of a CSS-style angle (0deg points up, 90deg left-to-right) as percentages of the
/// bounding box, symmetric about its center.
pub fn linear_endpoints(angle_degrees: f64) -> StyleResult<(Point, Point)> {
    let angle = ensure_finite("gradient angle", angle_degrees)?;
    let rad = (angle - 90.0).to_radians();
    let (dx, dy) = (rad.cos() * 50.0, rad.sin() * 50.0);
    Ok((
        Point::new(50.0 - dx, 50.0 - dy),
        Point::new(50.0 + dx, 50.0 + dy),
    ))
}
