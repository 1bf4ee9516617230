use crate::{
    curve::Timing,
    foundation::{
        core::{ensure_finite, format_number},
        error::{StyleError, StyleResult},
    },
    layers::{Layer, compose},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeStep {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub percent: f64,
    pub properties: Vec<Declaration>,
}

fn default_true() -> bool {
    true
}

impl KeyframeStep {
    pub fn new(percent: f64, properties: Vec<Declaration>) -> Self {
        Self {
            enabled: true,
            percent,
            properties,
        }
    }

    fn checked_percent(&self) -> StyleResult<f64> {
        let p = ensure_finite("keyframe percent", self.percent)?;
        if !(0.0..=100.0).contains(&p) {
            return Err(StyleError::validation(format!(
                "keyframe percent must be in [0, 100], got {p}"
            )));
        }
        Ok(p)
    }
}

impl Layer for KeyframeStep {
    const SEPARATOR: &'static str = "\n";

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn render(&self) -> StyleResult<Option<String>> {
        let percent = self.checked_percent()?;
        if self.properties.is_empty() {
            return Ok(None);
        }
        let mut lines = vec![format!("  {}% {{", format_number(percent))];
        for d in &self.properties {
            let (p, v) = (d.property.trim(), d.value.trim());
            if p.is_empty() || v.is_empty() {
                return Err(StyleError::validation(
                    "keyframe declarations need a property and a value",
                ));
            }
            lines.push(format!("    {p}: {v};"));
        }
        lines.push("  }".to_string());
        Ok(Some(lines.join("\n")))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframesConfig {
    pub name: String,
    pub steps: Vec<KeyframeStep>,
}

impl KeyframesConfig {
    /// `@keyframes` rule with steps sorted by percentage; insertion order only breaks ties.
    pub fn to_css(&self) -> StyleResult<String> {
        validate_ident(&self.name)?;
        let mut steps: Vec<KeyframeStep> = Vec::with_capacity(self.steps.len());
        for s in self.steps.iter().filter(|s| s.enabled) {
            s.checked_percent()?;
            steps.push(s.clone());
        }
        steps.sort_by(|a, b| a.percent.total_cmp(&b.percent));
        if steps.iter().all(|s| s.properties.is_empty()) {
            return Err(StyleError::validation(format!(
                "keyframes '{}' has no active steps",
                self.name
            )));
        }
        let body = compose(&steps)?;
        Ok(format!("@keyframes {} {{\n{body}\n}}", self.name))
    }
}

/// Parameters for the `animation` shorthand that plays a keyframes rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    pub duration_ms: f64,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub delay_ms: f64,
    /// `None` repeats forever.
    #[serde(default)]
    pub iterations: Option<u32>,
}

impl AnimationSpec {
    pub fn shorthand(&self, name: &str) -> StyleResult<String> {
        validate_ident(name)?;
        let duration = ensure_finite("animation duration", self.duration_ms)?;
        if duration <= 0.0 {
            return Err(StyleError::validation("animation duration must be > 0"));
        }
        let delay = ensure_finite("animation delay", self.delay_ms)?;
        let iterations = match self.iterations {
            None => "infinite".to_string(),
            Some(0) => {
                return Err(StyleError::validation(
                    "animation iterations must be > 0",
                ));
            }
            Some(n) => n.to_string(),
        };

        let mut parts = vec![
            name.to_string(),
            format!("{}ms", format_number(duration)),
            self.timing.timing_function()?,
        ];
        if delay != 0.0 {
            parts.push(format!("{}ms", format_number(delay)));
        }
        parts.push(iterations);
        Ok(parts.join(" "))
    }
}

fn validate_ident(name: &str) -> StyleResult<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    };
    if !ok {
        return Err(StyleError::validation(format!(
            "'{name}' is not a valid animation name"
        )));
    }
    Ok(())
}
