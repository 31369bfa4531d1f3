//! # TessDB Core - Ordered-Tuple Storage and Z-Order Indexing
//!
//! TessDB's core is the storage and indexing substrate of a versioned SQL
//! database: an ordered map of fixed-schema tuples backing tables and
//! secondary indexes, plus the geometric encoding that turns 2-D points and
//! bounding boxes into ordered one-dimensional index keys. This crate
//! prioritizes:
//!
//! - **Zero-copy data access**: tuples and leaf cells are slices into page
//!   memory, no intermediate buffers
//! - **Pure, thread-safe computation**: comparison, range evaluation, and
//!   Z-encoding are side-effect-free over immutable values
//! - **Byte-exact index keys**: Z-cells are big-endian and memcmp-ordered so
//!   they interoperate with fixed-width integer keys
//!
//! ## Quick Start
//!
//! ```ignore
//! use tessdb::tuple::{Encoding, FieldType, TupleBuilder, TupleDescriptor};
//! use tessdb::range::Range;
//! use tessdb::map::{ScanContext, TupleMap};
//!
//! let desc = TupleDescriptor::new(vec![
//!     FieldType::nullable(Encoding::Int32),
//!     FieldType::nullable(Encoding::Int32),
//! ]);
//!
//! // c0 > 1
//! let one = 1i32.to_le_bytes();
//! let range = Range::new(
//!     &desc,
//!     Some(smallvec![RangeCut::at(desc.fields()[0], &one, false)]),
//!     None,
//! );
//!
//! let ctx = ScanContext::new();
//! let mut iter = map.iter_range(&ctx, &range)?;
//! while let Some((key, value)) = iter.next(&ctx)? {
//!     // tuples arrive in ascending key order
//! }
//! ```
//!
//! ## Architecture
//!
//! The core sits below SQL execution and above the chunk store:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   SQL Execution / Spatial Operators  │   (external)
//! ├───────────────────┬─────────────────┤
//! │  TupleMap + Range │    Z-Encoding    │
//! │  (map, range)     │    (zorder)      │
//! ├───────────────────┴─────────────────┤
//! │     Tuple Serialization (tuple)      │
//! ├─────────────────────────────────────┤
//! │   Leaf Pages + ChunkSource (storage) │
//! ├─────────────────────────────────────┤
//! │    Chunk Store (S3 / filesystem)     │   (external)
//! └─────────────────────────────────────┘
//! ```
//!
//! A query supplies a [`range::Range`] over a [`tuple::TupleDescriptor`];
//! [`map::TupleMap::iter_range`] locates the bounds inside a sorted leaf and
//! yields matching tuples in key order. Spatial queries build a bounding-box
//! [`zorder::ZRange`], decompose it with [`zorder::split_z_ranges`] into
//! continuous sub-ranges, and issue one map scan per sub-range against an
//! index keyed by [`zorder::Cell`]s.
//!
//! ## Module Overview
//!
//! - [`storage`]: page layout and the chunk-source seam
//! - [`tuple`]: fixed-schema tuples, descriptors, and the build pool
//! - [`range`]: multi-column range predicates
//! - [`map`]: sorted leaves, range search, and the scan iterator
//! - [`zorder`]: lex-float codes, Morton interleaving, cells, range splits

pub mod map;
pub mod range;
pub mod storage;
pub mod tuple;
pub mod zorder;

pub use map::{RangeIter, ScanContext, TupleMap};
pub use range::{Range, RangeCut};
pub use tuple::{Encoding, FieldType, Tuple, TupleBuilder, TupleDescriptor};
pub use zorder::{split_z_ranges, z_cell, z_value, Cell, ZRange, ZVal};
