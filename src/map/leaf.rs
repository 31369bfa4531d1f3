//! # Leaf Pages
//!
//! A leaf stores key/value tuple pairs in ascending key order within a
//! single page, and links to the next leaf in key order. Leaves are
//! immutable after construction.
//!
//! ## Slot Array Architecture
//!
//! The slot array grows down from the page header while cell content grows
//! up from the end of the page:
//!
//! ```text
//! Slot (6 bytes):
//! +--------+--------+--------+--------+--------+--------+
//! | offset (2B)     | key_len (2B)    | val_len (2B)    |
//! +--------+--------+--------+--------+--------+--------+
//!
//! Cell:
//! +------------------+------------------+
//! | key (key_len B)  | value (val_len B)|
//! +------------------+------------------+
//! ```
//!
//! Both lengths live in the slot, so locating a key or value is pure
//! arithmetic and all reads return slices into the page.
//!
//! Keys here are tuples ordered by their descriptor's typed comparison
//! (integer fields are little-endian), so searches compare decoded fields
//! rather than raw bytes.
//!
//! ## Zero-Copy Guarantees
//!
//! `LeafNode` borrows the page with lifetime `'a` and `key_at`/`value_at`
//! return `Tuple<'a>` views directly into it. External synchronization (if
//! any) is the caller's concern; this layer never mutates a built page.

use std::cmp::Ordering;

use eyre::{bail, ensure, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::storage::{PageHeader, PageType, PAGE_HEADER_SIZE, PAGE_SIZE};
use crate::tuple::{Tuple, TupleDescriptor};

pub const SLOT_SIZE: usize = 6;
pub const LEAF_CONTENT_START: usize = PAGE_HEADER_SIZE;

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Eq)]
pub struct Slot {
    pub offset: u16,
    pub key_len: u16,
    pub val_len: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    Found(usize),
    NotFound(usize),
}

/// Immutable view of a leaf page.
#[derive(Debug, Clone, Copy)]
pub struct LeafNode<'a> {
    data: &'a [u8],
}

impl<'a> LeafNode<'a> {
    pub fn from_page(data: &'a [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );
        let header = PageHeader::from_bytes(data)?;
        ensure!(
            header.page_type() == PageType::Leaf,
            "expected Leaf page, got {:?}",
            header.page_type()
        );
        Ok(Self { data })
    }

    pub fn count(&self) -> usize {
        let header = PageHeader::from_bytes(self.data).unwrap();
        header.cell_count() as usize
    }

    pub fn next_leaf(&self) -> u32 {
        let header = PageHeader::from_bytes(self.data).unwrap();
        header.next_leaf()
    }

    fn slot_offset(&self, index: usize) -> usize {
        LEAF_CONTENT_START + index * SLOT_SIZE
    }

    pub fn slot_at(&self, index: usize) -> Result<&'a Slot> {
        ensure!(
            index < self.count(),
            "slot index {} out of bounds (count={})",
            index,
            self.count()
        );
        let offset = self.slot_offset(index);
        Slot::ref_from_bytes(&self.data[offset..offset + SLOT_SIZE])
            .map_err(|e| eyre::eyre!("failed to read slot at index {}: {:?}", index, e))
    }

    pub fn key_at(&self, index: usize) -> Result<Tuple<'a>> {
        let slot = self.slot_at(index)?;
        let start = slot.offset as usize;
        let end = start + slot.key_len as usize;
        ensure!(end <= PAGE_SIZE, "key extends beyond page boundary");
        Ok(Tuple::new(&self.data[start..end]))
    }

    pub fn value_at(&self, index: usize) -> Result<Tuple<'a>> {
        let slot = self.slot_at(index)?;
        let start = slot.offset as usize + slot.key_len as usize;
        let end = start + slot.val_len as usize;
        ensure!(end <= PAGE_SIZE, "value extends beyond page boundary");
        Ok(Tuple::new(&self.data[start..end]))
    }

    /// Binary search for `key` under `desc`'s typed ordering.
    pub fn find_key(&self, desc: &TupleDescriptor, key: Tuple<'_>) -> SearchResult {
        let mut lo = 0;
        let mut hi = self.count();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let probe = match self.key_at(mid) {
                Ok(t) => t,
                Err(_) => return SearchResult::NotFound(mid),
            };
            match desc.compare(probe, key) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return SearchResult::Found(mid),
            }
        }
        SearchResult::NotFound(lo)
    }
}

/// Writes a leaf page from pre-ordered key/value pairs.
pub struct LeafBuilder<'a> {
    data: &'a mut [u8],
}

impl<'a> LeafBuilder<'a> {
    pub fn init(data: &'a mut [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );

        let header = PageHeader::from_bytes_mut(data)?;
        header.set_page_type(PageType::Leaf);
        header.set_cell_count(0);
        header.set_free_start(LEAF_CONTENT_START as u16);
        header.set_free_end(PAGE_SIZE as u16);
        header.set_next_leaf(0);

        Ok(Self { data })
    }

    pub fn count(&self) -> usize {
        let header = PageHeader::from_bytes(self.data).unwrap();
        header.cell_count() as usize
    }

    pub fn free_space(&self) -> usize {
        let header = PageHeader::from_bytes(self.data).unwrap();
        header.free_space() as usize
    }

    /// Appends a pair after all existing pairs. The caller supplies pairs
    /// in ascending key order.
    pub fn push(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let cell_size = key.len() + value.len();
        let space_needed = cell_size + SLOT_SIZE;

        if self.free_space() < space_needed {
            bail!(
                "not enough free space: need {}, have {}",
                space_needed,
                self.free_space()
            );
        }

        let header = PageHeader::from_bytes(self.data)?;
        let cell_count = header.cell_count() as usize;
        let free_start = header.free_start() as usize;
        let new_free_end = header.free_end() as usize - cell_size;

        self.data[new_free_end..new_free_end + key.len()].copy_from_slice(key);
        self.data[new_free_end + key.len()..new_free_end + cell_size].copy_from_slice(value);

        let slot = Slot {
            offset: new_free_end as u16,
            key_len: key.len() as u16,
            val_len: value.len() as u16,
        };
        self.data[free_start..free_start + SLOT_SIZE].copy_from_slice(slot.as_bytes());

        let header = PageHeader::from_bytes_mut(self.data)?;
        header.set_cell_count(cell_count as u16 + 1);
        header.set_free_start((free_start + SLOT_SIZE) as u16);
        header.set_free_end(new_free_end as u16);

        Ok(())
    }

    pub fn set_next_leaf(&mut self, page_no: u32) -> Result<()> {
        let header = PageHeader::from_bytes_mut(self.data)?;
        header.set_next_leaf(page_no);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use super::*;
    use crate::tuple::{Encoding, FieldType, TupleBuilder};

    fn make_page() -> Vec<u8> {
        vec![0u8; PAGE_SIZE]
    }

    fn one_int32() -> TupleDescriptor {
        TupleDescriptor::new(vec![FieldType::nullable(Encoding::Int32)])
    }

    fn int_key<'p>(desc: &TupleDescriptor, pool: &'p Bump, v: i32) -> Tuple<'p> {
        let mut tb = TupleBuilder::new(desc);
        tb.put_int32(0, v).unwrap();
        tb.build(pool).unwrap()
    }

    #[test]
    fn slot_is_6_bytes() {
        assert_eq!(size_of::<Slot>(), SLOT_SIZE);
    }

    #[test]
    fn init_produces_empty_leaf() {
        let mut page = make_page();
        LeafBuilder::init(&mut page).unwrap();

        let node = LeafNode::from_page(&page).unwrap();
        assert_eq!(node.count(), 0);
        assert_eq!(node.next_leaf(), 0);
    }

    #[test]
    fn push_and_read_back_pairs() {
        let desc = one_int32();
        let pool = Bump::new();
        let mut page = make_page();

        {
            let mut builder = LeafBuilder::init(&mut page).unwrap();
            for v in [10, 20, 30] {
                let key = int_key(&desc, &pool, v);
                builder.push(key.data(), &[]).unwrap();
            }
        }

        let node = LeafNode::from_page(&page).unwrap();
        assert_eq!(node.count(), 3);
        assert_eq!(node.key_at(0).unwrap().get_int32(&desc, 0), Some(10));
        assert_eq!(node.key_at(1).unwrap().get_int32(&desc, 0), Some(20));
        assert_eq!(node.key_at(2).unwrap().get_int32(&desc, 0), Some(30));
        assert_eq!(node.value_at(1).unwrap().data().len(), 0);
    }

    #[test]
    fn keys_and_values_are_zero_copy() {
        let desc = one_int32();
        let pool = Bump::new();
        let mut page = make_page();

        {
            let mut builder = LeafBuilder::init(&mut page).unwrap();
            let key = int_key(&desc, &pool, 5);
            builder.push(key.data(), b"payload").unwrap();
        }

        let node = LeafNode::from_page(&page).unwrap();
        let key = node.key_at(0).unwrap();
        let value = node.value_at(0).unwrap();
        let page_range = page.as_ptr_range();

        assert!(page_range.contains(&key.data().as_ptr()));
        assert!(page_range.contains(&value.data().as_ptr()));
        assert_eq!(value.data(), b"payload");
    }

    #[test]
    fn find_key_locates_typed_order() {
        let desc = one_int32();
        let pool = Bump::new();
        let mut page = make_page();

        // 300 vs byte-wise order: little-endian encoding would memcmp-sort
        // 300 (0x2C 0x01 ...) before 2 (0x02 ...); typed search must not.
        {
            let mut builder = LeafBuilder::init(&mut page).unwrap();
            for v in [2, 300, 70_000] {
                let key = int_key(&desc, &pool, v);
                builder.push(key.data(), &[]).unwrap();
            }
        }

        let node = LeafNode::from_page(&page).unwrap();
        let probe = int_key(&desc, &pool, 300);
        assert_eq!(node.find_key(&desc, probe), SearchResult::Found(1));

        let missing = int_key(&desc, &pool, 500);
        assert_eq!(node.find_key(&desc, missing), SearchResult::NotFound(2));

        let below = int_key(&desc, &pool, 1);
        assert_eq!(node.find_key(&desc, below), SearchResult::NotFound(0));
    }

    #[test]
    fn push_fails_when_page_is_full() {
        let mut page = make_page();
        let mut builder = LeafBuilder::init(&mut page).unwrap();

        let big = vec![0xAB; 8000];
        builder.push(&big, &big).unwrap();
        let result = builder.push(&big, &big);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not enough free space"));
    }

    #[test]
    fn from_page_validates_page_type() {
        let mut page = make_page();
        PageHeader::new(PageType::Overflow).write_to(&mut page).unwrap();

        let result = LeafNode::from_page(&page);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Leaf"));
    }

    #[test]
    fn next_leaf_link_roundtrips() {
        let mut page = make_page();
        let mut builder = LeafBuilder::init(&mut page).unwrap();
        builder.set_next_leaf(9).unwrap();

        let node = LeafNode::from_page(&page).unwrap();
        assert_eq!(node.next_leaf(), 9);
    }
}
