//! berd_core: Core utilities shared by every stage of the berd pipeline.
//!
//! Provides source positions (byte spans) and the line map used to turn
//! byte offsets into human-readable locations for diagnostics.

pub mod text;

pub use text::{LineAndColumn, LineMap, TextPos, TextSpan};
