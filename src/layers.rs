//! Merging ordered, individually toggled layers into one CSS value.

use crate::foundation::error::StyleResult;

/// Value emitted when no layer contributes anything.
pub const NONE: &str = "none";

pub trait Layer {
    /// Joins rendered layers: `", "` for shadow lists, `" "` for filter chains.
    const SEPARATOR: &'static str;

    fn enabled(&self) -> bool;

    /// Text for one layer, or `None` when the layer is an identity term.
    fn render(&self) -> StyleResult<Option<String>>;
}

/// Renders enabled layers in list order. Any invalid enabled layer fails the whole value.
pub fn compose<L: Layer>(layers: &[L]) -> StyleResult<String> {
    let mut parts = Vec::with_capacity(layers.len());
    for layer in layers.iter().filter(|l| l.enabled()) {
        if let Some(text) = layer.render()? {
            parts.push(text);
        }
    }
    if parts.is_empty() {
        tracing::debug!(total = layers.len(), "no active layers; emitting none");
        return Ok(NONE.to_string());
    }
    Ok(parts.join(L::SEPARATOR))
}
