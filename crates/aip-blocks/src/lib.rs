//! Marker block editing for aiphelper.
//!
//! A marker block is the region of a text file between two sentinel lines:
//!
//! ```text
//! ### AIPHELPER_MARKER_START ###
//! generated content
//! ### AIPHELPER_MARKER_END ###
//! ```
//!
//! The tool owns that region and rewrites it on every run. Everything
//! outside it belongs to the user and is preserved line for line.
//!
//! - [`editor`] is the pure text transformation: replace the block in place,
//!   or append it when the file has no (well-formed) block yet.
//! - [`materialize`] wraps the editor with the filesystem side: create the
//!   file if missing, read, edit, write back atomically.

pub mod editor;
pub mod error;
pub mod marker;
pub mod materialize;

pub use editor::{BlockSpan, Edited, Placement, edit, locate_block, replace_block};
pub use error::{Error, Result};
pub use marker::{DEFAULT_MARKER, Marker};
pub use materialize::{ensure_and_replace, preview};
