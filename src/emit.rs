use base64::Engine as _;

use crate::foundation::{
    core::{HexColor, ensure_finite},
    error::{StyleError, StyleResult},
};

pub const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Appends an alpha byte to a hex color: `opacity` is a percentage, clamped to `[0, 100]`.
pub fn color_with_alpha(color: &str, opacity_percent: f64) -> StyleResult<String> {
    let color = HexColor::parse(color)?;
    let opacity = ensure_finite("opacity", opacity_percent)?.clamp(0.0, 100.0);
    let alpha = (opacity / 100.0 * 255.0).round() as u8;
    Ok(format!("{color}{alpha:02x}"))
}

pub fn svg_data_url(svg: &str) -> String {
    let body = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    format!("{SVG_DATA_URL_PREFIX}{body}")
}

pub fn decode_svg_data_url(url: &str) -> StyleResult<String> {
    let Some(body) = url.strip_prefix(SVG_DATA_URL_PREFIX) else {
        return Err(StyleError::encoding(
            "expected a base64 image/svg+xml data URL",
        ));
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body)
        .map_err(|e| StyleError::encoding(format!("invalid base64 payload: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| StyleError::encoding(format!("payload is not UTF-8: {e}")))
}

/// Ordered `property: value;` lines, optionally headed by a comment.
///
/// Declarations render in insertion order; each tool pushes them in its own fixed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssBlock {
    comment: Option<String>,
    declarations: Vec<(String, String)>,
}

impl CssBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            declarations: Vec::new(),
        }
    }

    pub fn push(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn declarations(&self) -> &[(String, String)] {
        &self.declarations
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.declarations.len() + 1);
        if let Some(c) = &self.comment {
            lines.push(format!("/* {c} */"));
        }
        for (p, v) in &self.declarations {
            lines.push(format!("{p}: {v};"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_appended_with_half_up_rounding() {
        assert_eq!(color_with_alpha("#3B82F6", 50.0).unwrap(), "#3B82F680");
        assert!(color_with_alpha("#123456", 100.0).unwrap().ends_with("ff"));
        assert!(color_with_alpha("#123456", 0.0).unwrap().ends_with("00"));
        assert_eq!(color_with_alpha("#000000", 20.0).unwrap(), "#00000033");
    }

    #[test]
    fn alpha_clamps_and_rejects_nan() {
        assert_eq!(color_with_alpha("#000000", 150.0).unwrap(), "#000000ff");
        assert_eq!(color_with_alpha("#000000", -5.0).unwrap(), "#00000000");
        assert!(color_with_alpha("#000000", f64::NAN).is_err());
        assert!(color_with_alpha("red", 50.0).is_err());
    }

    #[test]
    fn data_url_round_trips() {
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\"><path d=\"M0 0\"/></svg>";
        let url = svg_data_url(svg);
        assert!(url.starts_with(SVG_DATA_URL_PREFIX));
        assert!(!url.contains('%'));
        assert_eq!(decode_svg_data_url(&url).unwrap(), svg);
    }

    #[test]
    fn decode_rejects_foreign_urls() {
        assert!(decode_svg_data_url("data:image/png;base64,AAAA").is_err());
        assert!(decode_svg_data_url("data:image/svg+xml;base64,@@@").is_err());
    }

    #[test]
    fn block_keeps_insertion_order() {
        let block = CssBlock::with_comment("Box shadow")
            .push("box-shadow", "none")
            .push("border-radius", "8px");
        assert_eq!(
            block.render(),
            "/* Box shadow */\nbox-shadow: none;\nborder-radius: 8px;"
        );
        assert_eq!(block.get("border-radius"), Some("8px"));
    }
}
