//! # Z-Order Encoding for Spatial Indexes
//!
//! This module turns 2-D points and bounding boxes into ordered
//! one-dimensional index keys along the Z-order (Morton) curve. The
//! pipeline:
//!
//! ```text
//! f64 coordinate ──lex_float──> order-preserving u64 code
//! (x, y) codes   ──interleave──> 128-bit ZVal (two words)
//! ZVal + level   ──z_mask─────> 17-byte Cell (index key)
//! bounding box   ──split_z_ranges──> continuous ZRanges (scan windows)
//! ```
//!
//! A `ZVal` orders points so that nearby coordinates tend to be nearby in
//! key space; a `Cell` is a level-tagged prefix covering a square of side
//! `2^level` in Z-space; `split_z_ranges` decomposes an arbitrary
//! bounding-box range into sub-ranges whose 1-D intervals correspond
//! exactly to rectangles, so each can be scanned without false positives
//! between the curve's discontinuities.
//!
//! Everything here is a pure function over value types and safe to call
//! from any thread.
//!
//! ## Module Structure
//!
//! - `lex`: order-preserving float codes and bit interleaving
//! - `geom`: points, bounding boxes, geometries
//! - `cell`: `ZVal`, `Cell`, level masking, cover selection
//! - `split`: `ZRange` decomposition into continuous sub-ranges

mod cell;
mod geom;
mod lex;
mod split;

pub use cell::{un_z_value, z_cell, z_mask, z_value, Cell, ZVal, CELL_SIZE};
pub use geom::{BoundingBox, Geometry, Point};
pub use lex::{interleave_u64, lex_float, uninterleave_u64, unlex_float};
pub use split::{split_z_ranges, ZRange};
