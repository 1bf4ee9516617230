//! Per-tool configurations and their CSS output.
//!
//! Each tool pushes declarations in a fixed order so the generated snippet reads the same
//! for every config of the same shape.

use crate::{
    blob::{BlobConfig, blob_data_url, blob_svg},
    curve::Timing,
    emit::{CssBlock, color_with_alpha},
    filter::{FilterFunction, FilterTerm},
    foundation::{
        core::{ensure_finite, ensure_non_negative, format_number, px},
        error::{StyleError, StyleResult},
    },
    gradient::GradientConfig,
    keyframes::{AnimationSpec, KeyframesConfig},
    layers::compose,
    shadow::{BoxShadowLayer, TextShadowLayer},
    sink::OutputSink,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxShadowConfig {
    pub layers: Vec<BoxShadowLayer>,
}

impl BoxShadowConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        Ok(CssBlock::with_comment("Box Shadow").push("box-shadow", compose(&self.layers)?))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadowConfig {
    pub layers: Vec<TextShadowLayer>,
}

impl TextShadowConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        Ok(CssBlock::with_comment("Text Shadow").push("text-shadow", compose(&self.layers)?))
    }
}

pub fn gradient_css_block(config: &GradientConfig) -> StyleResult<CssBlock> {
    Ok(CssBlock::with_comment("Gradient").push("background", config.to_css()?))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterConfig {
    pub terms: Vec<FilterTerm>,
    /// Emit `backdrop-filter` instead of `filter`.
    #[serde(default)]
    pub backdrop: bool,
}

impl FilterConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        let property = if self.backdrop {
            "backdrop-filter"
        } else {
            "filter"
        };
        Ok(CssBlock::with_comment("Filter").push(property, compose(&self.terms)?))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlassConfig {
    pub color: String,
    pub transparency: f64, // background opacity, percent
    pub blur: f64,
    #[serde(default = "default_saturation")]
    pub saturation: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "default_border_opacity")]
    pub border_opacity: f64,
}

fn default_saturation() -> f64 {
    100.0
}

fn default_border_opacity() -> f64 {
    18.0
}

impl GlassConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        let backdrop = compose(&[
            FilterTerm::new(FilterFunction::Blur, self.blur),
            FilterTerm::new(FilterFunction::Saturate, self.saturation),
        ])?;
        let radius = ensure_non_negative("glass radius", self.radius)?;
        Ok(CssBlock::with_comment("Glassmorphism")
            .push("background", color_with_alpha(&self.color, self.transparency)?)
            .push("backdrop-filter", backdrop.clone())
            .push("-webkit-backdrop-filter", backdrop)
            .push("border-radius", px(radius))
            .push(
                "border",
                format!(
                    "1px solid {}",
                    color_with_alpha("#ffffff", self.border_opacity)?
                ),
            ))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionConfig {
    #[serde(default)]
    pub timing: Timing,
    pub duration_ms: f64,
    #[serde(default = "default_transition_property")]
    pub property: String,
    #[serde(default = "default_preview_size")]
    pub preview_size: f64,
}

fn default_transition_property() -> String {
    "all".to_string()
}

fn default_preview_size() -> f64 {
    200.0
}

impl TransitionConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        let timing = self.timing.timing_function()?;
        let duration = ensure_finite("transition duration", self.duration_ms)?;
        if duration <= 0.0 {
            return Err(StyleError::validation("transition duration must be > 0"));
        }
        let property = self.property.trim();
        if property.is_empty() {
            return Err(StyleError::validation(
                "transition property must be non-empty",
            ));
        }
        Ok(CssBlock::with_comment("Easing")
            .push("transition-timing-function", timing.clone())
            .push(
                "transition",
                format!("{property} {}ms {timing}", format_number(duration)),
            ))
    }

    pub fn preview_svg(&self) -> StyleResult<String> {
        self.timing
            .spec()
            .preview_svg(self.preview_size, self.preview_size)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    pub keyframes: KeyframesConfig,
    pub animation: AnimationSpec,
}

impl AnimationConfig {
    pub fn css_block(&self) -> StyleResult<CssBlock> {
        Ok(CssBlock::with_comment("Animation").push(
            "animation",
            self.animation.shorthand(&self.keyframes.name)?,
        ))
    }

    /// The `@keyframes` rule followed by the block that plays it.
    pub fn css(&self) -> StyleResult<String> {
        Ok(format!(
            "{}\n\n{}",
            self.keyframes.to_css()?,
            self.css_block()?.render()
        ))
    }
}

pub fn blob_css_block(config: &BlobConfig) -> StyleResult<CssBlock> {
    Ok(CssBlock::with_comment("Blob")
        .push(
            "background-image",
            format!("url(\"{}\")", blob_data_url(config)?),
        )
        .push("background-size", "contain")
        .push("background-repeat", "no-repeat"))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "tool", rename_all = "kebab-case")]
pub enum ToolConfig {
    BoxShadow(BoxShadowConfig),
    TextShadow(TextShadowConfig),
    Gradient(GradientConfig),
    Filter(FilterConfig),
    Glass(GlassConfig),
    Transition(TransitionConfig),
    Keyframes(AnimationConfig),
    Blob(BlobConfig),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgFile {
    pub filename: String,
    pub document: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    pub css: String,
    pub svg: Option<SvgFile>,
}

impl ToolOutput {
    /// Copies the CSS and hands any SVG document to the sink as a file.
    pub fn deliver(&self, sink: &mut dyn OutputSink) -> StyleResult<()> {
        sink.copy_text(&self.css)?;
        if let Some(svg) = &self.svg {
            sink.emit_file(svg.document.as_bytes(), &svg.filename)?;
        }
        Ok(())
    }
}

impl ToolConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoxShadow(_) => "box-shadow",
            Self::TextShadow(_) => "text-shadow",
            Self::Gradient(_) => "gradient",
            Self::Filter(_) => "filter",
            Self::Glass(_) => "glass",
            Self::Transition(_) => "transition",
            Self::Keyframes(_) => "keyframes",
            Self::Blob(_) => "blob",
        }
    }

    #[tracing::instrument(skip(self), fields(tool = self.name()))]
    pub fn generate(&self) -> StyleResult<ToolOutput> {
        let css_only = |block: CssBlock| ToolOutput {
            css: block.render(),
            svg: None,
        };
        let out = match self {
            Self::BoxShadow(c) => css_only(c.css_block()?),
            Self::TextShadow(c) => css_only(c.css_block()?),
            Self::Gradient(c) => css_only(gradient_css_block(c)?),
            Self::Filter(c) => css_only(c.css_block()?),
            Self::Glass(c) => css_only(c.css_block()?),
            Self::Transition(c) => ToolOutput {
                css: c.css_block()?.render(),
                svg: Some(SvgFile {
                    filename: "easing-curve.svg".to_string(),
                    document: c.preview_svg()?,
                }),
            },
            Self::Keyframes(c) => ToolOutput {
                css: c.css()?,
                svg: None,
            },
            Self::Blob(c) => ToolOutput {
                css: blob_css_block(c)?.render(),
                svg: Some(SvgFile {
                    filename: format!("blob-{}.svg", c.seed),
                    document: blob_svg(c)?,
                }),
            },
        };
        tracing::debug!(bytes = out.css.len(), "generated css");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{curve::EasingPreset, sink::MemorySink};

    #[test]
    fn empty_box_shadow_is_explicit_none() {
        let cfg = BoxShadowConfig { layers: vec![] };
        assert_eq!(
            cfg.css_block().unwrap().render(),
            "/* Box Shadow */\nbox-shadow: none;"
        );
    }

    #[test]
    fn backdrop_filter_switches_property() {
        let cfg = FilterConfig {
            terms: vec![FilterTerm::new(FilterFunction::Blur, 8.0)],
            backdrop: true,
        };
        let block = cfg.css_block().unwrap();
        assert_eq!(block.get("backdrop-filter"), Some("blur(8px)"));
        assert_eq!(block.get("filter"), None);
    }

    #[test]
    fn glass_declaration_order() {
        let cfg = GlassConfig {
            color: "#ffffff".to_string(),
            transparency: 20.0,
            blur: 12.0,
            saturation: 100.0,
            radius: 16.0,
            border_opacity: 18.0,
        };
        assert_eq!(
            cfg.css_block().unwrap().render(),
            "/* Glassmorphism */\n\
             background: #ffffff33;\n\
             backdrop-filter: blur(12px);\n\
             -webkit-backdrop-filter: blur(12px);\n\
             border-radius: 16px;\n\
             border: 1px solid #ffffff2e;"
        );
    }

    #[test]
    fn transition_block_and_preview() {
        let cfg = TransitionConfig {
            timing: Timing::Preset(EasingPreset::EaseOutBack),
            duration_ms: 300.0,
            property: "transform".to_string(),
            preview_size: 200.0,
        };
        let out = ToolConfig::Transition(cfg).generate().unwrap();
        assert_eq!(
            out.css,
            "/* Easing */\n\
             transition-timing-function: cubic-bezier(0.34, 1.56, 0.64, 1);\n\
             transition: transform 300ms cubic-bezier(0.34, 1.56, 0.64, 1);"
        );
        let svg = out.svg.unwrap();
        assert_eq!(svg.filename, "easing-curve.svg");
        assert!(svg.document.contains(r#"d="M0,200 C68,-112 128,0 200,0""#));
    }

    #[test]
    fn blob_output_goes_to_sink() {
        let cfg: ToolConfig = serde_json::from_str(
            r##"{"tool":"blob","complexity":5,"contrast":0.6,"seed":7,
                 "fill":{"from":"#22d3ee","to":"#6366f1","kind":"radial"}}"##,
        )
        .unwrap();
        let out = cfg.generate().unwrap();
        assert!(out.css.contains("background-image: url(\"data:image/svg+xml;base64,"));

        let mut sink = MemorySink::new();
        out.deliver(&mut sink).unwrap();
        assert_eq!(sink.clipboard.as_deref(), Some(out.css.as_str()));
        assert_eq!(sink.files[0].filename, "blob-7.svg");
        assert!(
            String::from_utf8(sink.files[0].bytes.clone())
                .unwrap()
                .contains("<radialGradient")
        );
    }

    #[test]
    fn invalid_layers_surface_as_errors() {
        let cfg = ToolConfig::TextShadow(TextShadowConfig {
            layers: vec![TextShadowLayer {
                enabled: true,
                offset_x: 0.0,
                offset_y: 0.0,
                blur: -1.0,
                color: "#000000".to_string(),
                opacity: 100.0,
            }],
        });
        assert!(cfg.generate().is_err());
    }
}
