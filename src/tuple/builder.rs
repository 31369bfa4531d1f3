//! # TupleBuilder - Tuple Construction
//!
//! `TupleBuilder` assembles a tuple with type-checked setters and copies the
//! finished layout into a `bumpalo` pool. The builder pre-allocates from the
//! schema and supports `reset` for reuse across rows, so steady-state
//! construction does not allocate outside the pool.
//!
//! ## Usage
//!
//! ```ignore
//! let pool = Bump::new();
//! let mut tb = TupleBuilder::new(&desc);
//! tb.put_int32(0, 42)?;
//! let tuple = tb.build(&pool)?;
//!
//! tb.reset();
//! tb.put_int32(0, 43)?;
//! ```
//!
//! Unset nullable fields become NULL; building with an unset non-nullable
//! field is an error.

use bumpalo::Bump;
use eyre::{ensure, Result};

use crate::tuple::descriptor::TupleDescriptor;
use crate::tuple::types::Encoding;
use crate::tuple::view::Tuple;

pub struct TupleBuilder<'d> {
    desc: &'d TupleDescriptor,
    buf: Vec<u8>,
}

impl<'d> TupleBuilder<'d> {
    pub fn new(desc: &'d TupleDescriptor) -> Self {
        let mut buf = vec![0u8; desc.tuple_size()];
        set_all_null(&mut buf, desc.field_count());
        Self { desc, buf }
    }

    pub fn reset(&mut self) {
        self.buf.fill(0);
        set_all_null(&mut self.buf, self.desc.field_count());
    }

    pub fn put_null(&mut self, idx: usize) -> Result<()> {
        ensure!(idx < self.desc.field_count(), "field {} out of range", idx);
        ensure!(
            self.desc.fields()[idx].nullable,
            "field {} is not nullable",
            idx
        );
        let width = self.desc.fields()[idx].encoding.byte_size();
        let start = self.field_start(idx);
        self.buf[start..start + width].fill(0);
        self.buf[idx / 8] |= 1 << (idx % 8);
        Ok(())
    }

    pub fn put_bool(&mut self, idx: usize, value: bool) -> Result<()> {
        self.put_fixed(idx, Encoding::Bool, &[value as u8])
    }

    pub fn put_int16(&mut self, idx: usize, value: i16) -> Result<()> {
        self.put_fixed(idx, Encoding::Int16, &value.to_le_bytes())
    }

    pub fn put_int32(&mut self, idx: usize, value: i32) -> Result<()> {
        self.put_fixed(idx, Encoding::Int32, &value.to_le_bytes())
    }

    pub fn put_int64(&mut self, idx: usize, value: i64) -> Result<()> {
        self.put_fixed(idx, Encoding::Int64, &value.to_le_bytes())
    }

    pub fn put_float32(&mut self, idx: usize, value: f32) -> Result<()> {
        self.put_fixed(idx, Encoding::Float32, &value.to_le_bytes())
    }

    pub fn put_float64(&mut self, idx: usize, value: f64) -> Result<()> {
        self.put_fixed(idx, Encoding::Float64, &value.to_le_bytes())
    }

    /// Copies the finished tuple into `pool` and returns a view of it.
    pub fn build<'p>(&self, pool: &'p Bump) -> Result<Tuple<'p>> {
        for (idx, field) in self.desc.fields().iter().enumerate() {
            if !field.nullable {
                ensure!(
                    self.buf[idx / 8] & (1 << (idx % 8)) == 0,
                    "non-nullable field {} was not set",
                    idx
                );
            }
        }
        let data = pool.alloc_slice_copy(&self.buf);
        Ok(Tuple::new(data))
    }

    fn put_fixed(&mut self, idx: usize, expected: Encoding, bytes: &[u8]) -> Result<()> {
        ensure!(idx < self.desc.field_count(), "field {} out of range", idx);
        let field = self.desc.fields()[idx];
        ensure!(
            field.encoding == expected,
            "field {} is {:?}, not {:?}",
            idx,
            field.encoding,
            expected
        );
        let start = self.field_start(idx);
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.buf[idx / 8] &= !(1 << (idx % 8));
        Ok(())
    }

    fn field_start(&self, idx: usize) -> usize {
        TupleDescriptor::null_bitmap_size(self.desc.field_count()) + self.desc.fixed_offset(idx)
    }
}

fn set_all_null(buf: &mut [u8], field_count: usize) {
    for idx in 0..field_count {
        buf[idx / 8] |= 1 << (idx % 8);
    }
}
