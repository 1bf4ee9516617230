use crate::{
    emit::color_with_alpha,
    foundation::{
        core::{ensure_finite, ensure_non_negative, px},
        error::StyleResult,
    },
    layers::Layer,
};

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    100.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxShadowLayer {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub inset: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64, // >= 0
    #[serde(default)]
    pub spread: f64,
    pub color: String, // #RRGGBB
    #[serde(default = "default_opacity")]
    pub opacity: f64, // percent
}

impl Layer for BoxShadowLayer {
    const SEPARATOR: &'static str = ", ";

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn render(&self) -> StyleResult<Option<String>> {
        let x = ensure_finite("box-shadow offset_x", self.offset_x)?;
        let y = ensure_finite("box-shadow offset_y", self.offset_y)?;
        let blur = ensure_non_negative("box-shadow blur", self.blur)?;
        let spread = ensure_finite("box-shadow spread", self.spread)?;
        let color = color_with_alpha(&self.color, self.opacity)?;
        let inset = if self.inset { "inset " } else { "" };
        Ok(Some(format!(
            "{inset}{} {} {} {} {color}",
            px(x),
            px(y),
            px(blur),
            px(spread)
        )))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadowLayer {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Layer for TextShadowLayer {
    const SEPARATOR: &'static str = ", ";

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn render(&self) -> StyleResult<Option<String>> {
        let x = ensure_finite("text-shadow offset_x", self.offset_x)?;
        let y = ensure_finite("text-shadow offset_y", self.offset_y)?;
        let blur = ensure_non_negative("text-shadow blur", self.blur)?;
        let color = color_with_alpha(&self.color, self.opacity)?;
        Ok(Some(format!("{} {} {} {color}", px(x), px(y), px(blur))))
    }
}
