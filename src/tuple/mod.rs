//! # Tuple Serialization with O(1) Field Access
//!
//! This module provides the fixed-schema row representation used for every
//! key and value in the map. A tuple is an immutable byte sequence whose
//! layout is fixed by a companion [`TupleDescriptor`]; NULL-ness is encoded
//! inside the tuple, so a tuple plus its descriptor is self-describing.
//!
//! ## Tuple Binary Layout
//!
//! ```text
//! +------------------+---------------------------+
//! | Null Bitmap      | Fixed-Width Field Section |
//! | [u8; (N+7)/8]    | [u8; total_fixed_size]    |
//! +------------------+---------------------------+
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | **Null Bitmap** | 1 bit per field. `1` = NULL, `0` = has data |
//! | **Field Section** | Fields at descriptor-precomputed offsets |
//!
//! NULL fields keep their slot in the field section (zeroed), so every row
//! of a schema shares one offset table and field access is a direct index.
//!
//! ## Comparison
//!
//! Tuples compare field-by-field under the descriptor: NULL sorts before
//! any non-NULL value of the same column, otherwise the field encoding's
//! comparator decides. Integer fields are little-endian on disk and decoded
//! before comparing, which is why leaf order is the descriptor's typed
//! order rather than memcmp order.
//!
//! ## Module Structure
//!
//! - `types`: `Encoding` tags and `FieldType`
//! - `descriptor`: `TupleDescriptor` with precomputed offsets
//! - `view`: zero-copy `Tuple` reads
//! - `builder`: arena-pooled `TupleBuilder`

mod builder;
mod descriptor;
mod types;
mod view;

pub use builder::TupleBuilder;
pub use descriptor::TupleDescriptor;
pub use types::{Encoding, FieldType};
pub use view::Tuple;
