//! # Tuple - Zero-Copy Row Access
//!
//! `Tuple` is an immutable view over serialized row bytes. All accessors
//! return data borrowed from the underlying buffer, so reading a field
//! never copies. Multiple views over the same bytes can be read
//! concurrently.

use crate::tuple::descriptor::TupleDescriptor;
use crate::tuple::types::Encoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple<'a> {
    data: &'a [u8],
}

impl<'a> Tuple<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn is_null(&self, desc: &TupleDescriptor, idx: usize) -> bool {
        debug_assert!(idx < desc.field_count());
        debug_assert_eq!(self.data.len(), desc.tuple_size());
        let byte_idx = idx / 8;
        let bit_idx = idx % 8;
        (self.data[byte_idx] & (1 << bit_idx)) != 0
    }

    /// Raw bytes of field `idx`, or `None` when the field is NULL.
    pub fn field_bytes(&self, desc: &TupleDescriptor, idx: usize) -> Option<&'a [u8]> {
        if self.is_null(desc, idx) {
            return None;
        }
        let bitmap_size = TupleDescriptor::null_bitmap_size(desc.field_count());
        let start = bitmap_size + desc.fixed_offset(idx);
        let width = desc.fields()[idx].encoding.byte_size();
        Some(&self.data[start..start + width])
    }

    pub fn get_bool(&self, desc: &TupleDescriptor, idx: usize) -> Option<bool> {
        self.typed_bytes(desc, idx, Encoding::Bool).map(|b| b[0] != 0)
    }

    pub fn get_int16(&self, desc: &TupleDescriptor, idx: usize) -> Option<i16> {
        self.typed_bytes(desc, idx, Encoding::Int16)
            .map(|b| i16::from_le_bytes(b.try_into().unwrap()))
    }

    pub fn get_int32(&self, desc: &TupleDescriptor, idx: usize) -> Option<i32> {
        self.typed_bytes(desc, idx, Encoding::Int32)
            .map(|b| i32::from_le_bytes(b.try_into().unwrap()))
    }

    pub fn get_int64(&self, desc: &TupleDescriptor, idx: usize) -> Option<i64> {
        self.typed_bytes(desc, idx, Encoding::Int64)
            .map(|b| i64::from_le_bytes(b.try_into().unwrap()))
    }

    pub fn get_float32(&self, desc: &TupleDescriptor, idx: usize) -> Option<f32> {
        self.typed_bytes(desc, idx, Encoding::Float32)
            .map(|b| f32::from_le_bytes(b.try_into().unwrap()))
    }

    pub fn get_float64(&self, desc: &TupleDescriptor, idx: usize) -> Option<f64> {
        self.typed_bytes(desc, idx, Encoding::Float64)
            .map(|b| f64::from_le_bytes(b.try_into().unwrap()))
    }

    fn typed_bytes(
        &self,
        desc: &TupleDescriptor,
        idx: usize,
        expected: Encoding,
    ) -> Option<&'a [u8]> {
        debug_assert_eq!(desc.fields()[idx].encoding, expected);
        self.field_bytes(desc, idx)
    }
}
