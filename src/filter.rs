use crate::{
    foundation::{
        core::{ensure_finite, format_number},
        error::{StyleError, StyleResult},
    },
    layers::Layer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterFunction {
    Blur,
    Brightness,
    Contrast,
    Grayscale,
    HueRotate,
    Invert,
    Opacity,
    Saturate,
    Sepia,
}

impl FilterFunction {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Grayscale => "grayscale",
            Self::HueRotate => "hue-rotate",
            Self::Invert => "invert",
            Self::Opacity => "opacity",
            Self::Saturate => "saturate",
            Self::Sepia => "sepia",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Blur => "px",
            Self::HueRotate => "deg",
            _ => "%",
        }
    }

    /// Argument at which the function leaves the image unchanged.
    pub fn identity(self) -> f64 {
        match self {
            Self::Brightness | Self::Contrast | Self::Opacity | Self::Saturate => 100.0,
            Self::Blur | Self::Grayscale | Self::HueRotate | Self::Invert | Self::Sepia => 0.0,
        }
    }

    /// Upper bound past which CSS saturates the effect anyway.
    fn max(self) -> Option<f64> {
        match self {
            Self::Grayscale | Self::Invert | Self::Opacity | Self::Sepia => Some(100.0),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterTerm {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub function: FilterFunction,
    pub value: f64,
}

fn default_true() -> bool {
    true
}

impl FilterTerm {
    pub fn new(function: FilterFunction, value: f64) -> Self {
        Self {
            enabled: true,
            function,
            value,
        }
    }

    fn checked_value(&self) -> StyleResult<f64> {
        let name = self.function.css_name();
        let v = ensure_finite(name, self.value)?;
        if v < 0.0 && self.function != FilterFunction::HueRotate {
            return Err(StyleError::validation(format!("{name} must be >= 0")));
        }
        Ok(match self.function.max() {
            Some(max) => v.min(max),
            None => v,
        })
    }
}

impl Layer for FilterTerm {
    const SEPARATOR: &'static str = " ";

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn render(&self) -> StyleResult<Option<String>> {
        let v = self.checked_value()?;
        if v == self.function.identity() {
            tracing::debug!(function = self.function.css_name(), "dropping identity filter term");
            return Ok(None);
        }
        Ok(Some(format!(
            "{}({}{})",
            self.function.css_name(),
            format_number(v),
            self.function.unit()
        )))
    }
}
