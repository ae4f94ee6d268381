//! Export formats for rastext
//!
//! One format for now: PNG via the `image` crate. The canvas arrives as
//! straight-alpha RGBA8 and is written once, in full; there is no partial
//! or streaming emission.

mod png;

pub use png::{encode_canvas_to_png, PngExporter};
