//! # Tuple Descriptors
//!
//! A `TupleDescriptor` is the schema of a tuple: an ordered sequence of
//! field types with precomputed byte offsets for O(1) field access. The
//! descriptor owns all comparison logic; tuples themselves are untyped
//! bytes.

use std::cmp::Ordering;

use crate::tuple::types::FieldType;
use crate::tuple::view::Tuple;

#[derive(Debug, Clone)]
pub struct TupleDescriptor {
    fields: Vec<FieldType>,
    fixed_offsets: Vec<usize>,
    total_fixed_size: usize,
}

impl TupleDescriptor {
    pub fn new(fields: Vec<FieldType>) -> Self {
        let mut fixed_offsets = Vec::with_capacity(fields.len());
        let mut offset = 0;

        for field in &fields {
            fixed_offsets.push(offset);
            offset += field.encoding.byte_size();
        }

        Self {
            fields,
            fixed_offsets,
            total_fixed_size: offset,
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, idx: usize) -> Option<&FieldType> {
        self.fields.get(idx)
    }

    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    /// Byte offset of field `idx` within the fixed section.
    pub fn fixed_offset(&self, idx: usize) -> usize {
        self.fixed_offsets[idx]
    }

    pub fn total_fixed_size(&self) -> usize {
        self.total_fixed_size
    }

    pub fn null_bitmap_size(field_count: usize) -> usize {
        field_count.div_ceil(8)
    }

    /// Total serialized size of a tuple with this schema.
    pub fn tuple_size(&self) -> usize {
        Self::null_bitmap_size(self.fields.len()) + self.total_fixed_size
    }

    /// Lexicographic comparison of two tuples, field by field. NULL sorts
    /// before any non-NULL value of the same column.
    pub fn compare(&self, a: Tuple<'_>, b: Tuple<'_>) -> Ordering {
        for i in 0..self.fields.len() {
            let av = a.field_bytes(self, i);
            let bv = b.field_bytes(self, i);

            let ord = match (av, bv) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => self.fields[i].encoding.compare(x, y),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Compares a raw field value against field `idx` of `t`. The caller
    /// must have checked that the tuple field is non-NULL.
    pub fn compare_field(&self, value: &[u8], idx: usize, t: Tuple<'_>) -> Ordering {
        let field = t
            .field_bytes(self, idx)
            .unwrap_or_else(|| panic!("compare_field on NULL field {idx}"));
        self.fields[idx].encoding.compare(value, field)
    }

    /// Human-readable rendering of a tuple, for diagnostics only.
    pub fn format(&self, t: Tuple<'_>) -> String {
        let mut out = String::from("(");
        for i in 0..self.fields.len() {
            if i > 0 {
                out.push_str(", ");
            }
            match t.field_bytes(self, i) {
                None => out.push_str("NULL"),
                Some(bytes) => self.fields[i].encoding.format_value(bytes, &mut out),
            }
        }
        out.push(')');
        out
    }
}
