//! Stylegen turns small typed configurations into CSS and SVG text.
//!
//! Every generator is a pure function: the same configuration always yields the same bytes,
//! nothing is cached and nothing touches the host platform.
//!
//! # Pieces
//!
//! - **Seeded sequence** ([`SeededRng`]): the LCG that makes blob shapes reproducible from a seed.
//! - **Curves** ([`BezierSpec`], [`extract_points`]): cubic timing curves, their SVG preview
//!   paths, and a loose coordinate scan over path text.
//! - **Blobs** ([`BlobGeometry`], [`blob_svg`]): seeded organic shapes with a gradient fill.
//! - **Layers** ([`compose`]): shadow lists, filter chains and keyframe steps merged into
//!   one value, with `none` when nothing is active.
//! - **Emitters** ([`color_with_alpha`], [`svg_data_url`], [`CssBlock`]): the final text.
//! - **Tools** ([`ToolConfig`]): one entry point per generator, with fixed declaration order.
//!
//! Clipboard and file downloads stay with the host behind [`OutputSink`].
#![forbid(unsafe_code)]

mod foundation {
    pub mod core;
    pub mod error;
}

pub mod blob;
pub mod curve;
pub mod emit;
pub mod filter;
pub mod gradient;
pub mod keyframes;
pub mod layers;
pub mod rng;
pub mod shadow;
pub mod sink;
pub mod tools;

pub use blob::{BlobConfig, BlobFill, BlobGeometry, blob_data_url, blob_path, blob_svg};
pub use curve::{BezierSpec, EasingPreset, PathPointSet, Timing, extract_points};
pub use emit::{CssBlock, color_with_alpha, decode_svg_data_url, svg_data_url};
pub use filter::{FilterFunction, FilterTerm};
pub use foundation::core::{HexColor, Point, format_fixed, format_number, px};
pub use foundation::error::{StyleError, StyleResult};
pub use gradient::{GradientConfig, GradientKind, Stop, linear_endpoints};
pub use keyframes::{AnimationSpec, Declaration, KeyframeStep, KeyframesConfig};
pub use layers::{Layer, NONE, compose};
pub use rng::{SeededRng, lcg_step};
pub use shadow::{BoxShadowLayer, TextShadowLayer};
pub use sink::{EmittedFile, MemorySink, OutputSink};
pub use tools::{
    AnimationConfig, BoxShadowConfig, FilterConfig, GlassConfig, SvgFile, TextShadowConfig,
    ToolConfig, ToolOutput, TransitionConfig,
};
