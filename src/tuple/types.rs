//! # Field Encodings
//!
//! `Encoding` is a tagged variant over the supported field encodings. Each
//! tag carries the capability set the rest of the crate dispatches on: byte
//! width, a typed comparator, and a diagnostic formatter. New encodings are
//! added by extending the tag set; there is no open inheritance.
//!
//! All encodings here are fixed-width. Integer fields are stored
//! little-endian; floats are IEEE-754 bits compared with `total_cmp`.

use std::cmp::Ordering;
use std::fmt::Write;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Bool = 0,
    Int16 = 1,
    Int32 = 2,
    Int64 = 3,
    Float32 = 4,
    Float64 = 5,
}

impl Encoding {
    pub fn byte_size(&self) -> usize {
        match self {
            Encoding::Bool => 1,
            Encoding::Int16 => 2,
            Encoding::Int32 => 4,
            Encoding::Int64 => 8,
            Encoding::Float32 => 4,
            Encoding::Float64 => 8,
        }
    }

    /// Compares two non-NULL field values of this encoding. Both slices
    /// must be exactly `byte_size` long; the descriptor guarantees this for
    /// slices it hands out.
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        match self {
            Encoding::Bool => a[0].cmp(&b[0]),
            Encoding::Int16 => {
                let a = i16::from_le_bytes(a.try_into().unwrap());
                let b = i16::from_le_bytes(b.try_into().unwrap());
                a.cmp(&b)
            }
            Encoding::Int32 => {
                let a = i32::from_le_bytes(a.try_into().unwrap());
                let b = i32::from_le_bytes(b.try_into().unwrap());
                a.cmp(&b)
            }
            Encoding::Int64 => {
                let a = i64::from_le_bytes(a.try_into().unwrap());
                let b = i64::from_le_bytes(b.try_into().unwrap());
                a.cmp(&b)
            }
            Encoding::Float32 => {
                let a = f32::from_le_bytes(a.try_into().unwrap());
                let b = f32::from_le_bytes(b.try_into().unwrap());
                a.total_cmp(&b)
            }
            Encoding::Float64 => {
                let a = f64::from_le_bytes(a.try_into().unwrap());
                let b = f64::from_le_bytes(b.try_into().unwrap());
                a.total_cmp(&b)
            }
        }
    }

    /// Renders a non-NULL field value for diagnostics.
    pub fn format_value(&self, bytes: &[u8], out: &mut String) {
        match self {
            Encoding::Bool => {
                let _ = write!(out, "{}", bytes[0] != 0);
            }
            Encoding::Int16 => {
                let _ = write!(out, "{}", i16::from_le_bytes(bytes.try_into().unwrap()));
            }
            Encoding::Int32 => {
                let _ = write!(out, "{}", i32::from_le_bytes(bytes.try_into().unwrap()));
            }
            Encoding::Int64 => {
                let _ = write!(out, "{}", i64::from_le_bytes(bytes.try_into().unwrap()));
            }
            Encoding::Float32 => {
                let _ = write!(out, "{}", f32::from_le_bytes(bytes.try_into().unwrap()));
            }
            Encoding::Float64 => {
                let _ = write!(out, "{}", f64::from_le_bytes(bytes.try_into().unwrap()));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub encoding: Encoding,
    pub nullable: bool,
}

impl FieldType {
    pub fn new(encoding: Encoding, nullable: bool) -> Self {
        Self { encoding, nullable }
    }

    pub fn nullable(encoding: Encoding) -> Self {
        Self::new(encoding, true)
    }

    pub fn required(encoding: Encoding) -> Self {
        Self::new(encoding, false)
    }
}
