//! Packager module for the adaptive-bitrate ladder.
//!
//! Runs one encoder invocation per ladder rung, then emits a master
//! playlist referencing every rung. Packaging is all-or-nothing per
//! attempt: if any rendition fails, no master manifest is written.

mod error;
mod hls;

pub use error::PackagingError;
pub use hls::{render_master_playlist, HlsPackage, HlsPackager};
