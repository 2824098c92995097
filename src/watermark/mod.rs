//! Watermark module for stamping images with a logo or a line of text.
//!
//! # Features
//!
//! - **Image watermarks** loaded from a file, with opaque pure green
//!   treated as transparent and a 1-10 transparency level
//! - **Text watermarks** drawn twice (white shadow, black text) with any
//!   TrueType/OpenType font
//! - **9 anchors** plus `None`, placed 1% in from the edges or centred
//!
//! Output is always JPEG at the requested quality, falling back to the
//! format of the file extension when JPEG encoding fails.

pub mod compositor;
pub mod error;
pub mod position;
pub mod processor;
pub mod text_renderer;

pub use compositor::{apply_layer, opacity_for_level, remove_chroma_key, WatermarkLayer};
pub use error::WatermarkError;
pub use position::{image_anchor_offset, text_anchor_offset, Anchor, PlacementPosition};
pub use processor::{image_watermark, text_watermark};
pub use text_renderer::{draw_text, measure_text, Color, FontSpec, WatermarkFont};
