//! # TupleMap - Ordered Map over Leaf Chains
//!
//! `TupleMap` is the read surface the SQL layer scans: an ordered map of
//! key/value tuple pairs stored across a chain of sorted leaf pages fetched
//! through a [`ChunkSource`]. The map itself holds no mutable state; leaves
//! are immutable after construction, so any number of concurrent scans
//! observe identical sequences.
//!
//! ## Scan Path
//!
//! ```text
//! Range ──> range_start_search ──┐
//!                                ├──> [lo, hi) ──> RangeIter
//! Leaf  ──> range_stop_search  ──┘
//! ```
//!
//! Locating the bounds is O(log n) over a leaf for prefix-bound ranges;
//! iteration is O(hi - lo) plus one chunk-source fetch per crossed leaf.
//!
//! ## Module Structure
//!
//! - `leaf`: page-backed sorted leaves
//! - `search`: range bound location
//! - `iter`: the scan iterator and cancellation context

mod iter;
mod leaf;
mod search;

pub use iter::{Cancelled, RangeIter, ScanContext};
pub use leaf::{LeafBuilder, LeafNode, SearchResult, SLOT_SIZE};
pub use search::{range_start_search, range_stop_search};

use std::cmp::Ordering;

use eyre::Result;

use crate::range::Range;
use crate::storage::{ChunkSource, NO_PAGE};
use crate::tuple::{Tuple, TupleDescriptor};

pub struct TupleMap<S: ChunkSource> {
    source: S,
    root: u32,
    key_desc: TupleDescriptor,
    val_desc: TupleDescriptor,
}

impl<S: ChunkSource> TupleMap<S> {
    /// A map over the leaf chain starting at page `root`.
    pub fn new(source: S, root: u32, key_desc: TupleDescriptor, val_desc: TupleDescriptor) -> Self {
        Self {
            source,
            root,
            key_desc,
            val_desc,
        }
    }

    pub fn root(&self) -> u32 {
        self.root
    }

    pub fn key_desc(&self) -> &TupleDescriptor {
        &self.key_desc
    }

    pub fn val_desc(&self) -> &TupleDescriptor {
        &self.val_desc
    }

    pub(crate) fn fetch_leaf(&self, page_no: u32) -> Result<LeafNode<'_>> {
        LeafNode::from_page(self.source.fetch(page_no)?)
    }

    /// Point lookup: the value stored under `key`, if any.
    pub fn get(&self, key: Tuple<'_>) -> Result<Option<Tuple<'_>>> {
        let mut page_no = self.root;
        loop {
            let leaf = self.fetch_leaf(page_no)?;
            let count = leaf.count();

            if count > 0 {
                let last = leaf.key_at(count - 1)?;
                if self.key_desc.compare(key, last) != Ordering::Greater {
                    return match leaf.find_key(&self.key_desc, key) {
                        SearchResult::Found(i) => Ok(Some(leaf.value_at(i)?)),
                        SearchResult::NotFound(_) => Ok(None),
                    };
                }
            }

            page_no = leaf.next_leaf();
            if page_no == NO_PAGE {
                return Ok(None);
            }
        }
    }

    /// An iterator over the pairs of `range`, in ascending key order.
    pub fn iter_range<'m, 'r>(
        &'m self,
        ctx: &ScanContext,
        range: &Range<'r>,
    ) -> Result<RangeIter<'m, 'r, S>> {
        if ctx.is_cancelled() {
            return Err(Cancelled.into());
        }
        RangeIter::new(self, range.clone())
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use super::*;
    use crate::storage::{MemorySource, PAGE_SIZE};
    use crate::tuple::{Encoding, FieldType, TupleBuilder};

    fn one_int32() -> TupleDescriptor {
        TupleDescriptor::new(vec![FieldType::nullable(Encoding::Int32)])
    }

    fn empty_desc() -> TupleDescriptor {
        TupleDescriptor::new(vec![])
    }

    fn int_key<'p>(desc: &TupleDescriptor, pool: &'p Bump, v: i32) -> Tuple<'p> {
        let mut tb = TupleBuilder::new(desc);
        tb.put_int32(0, v).unwrap();
        tb.build(pool).unwrap()
    }

    /// Builds a chain of leaves holding `keys_per_leaf`-sized runs of the
    /// given keys, each paired with an empty value. Pages are numbered
    /// sequentially from 1, so leaf `i` links to page `i + 2`.
    fn chain_map(keys: &[i32], keys_per_leaf: usize) -> TupleMap<MemorySource> {
        let desc = one_int32();
        let pool = Bump::new();
        let mut source = MemorySource::new();

        let chunks: Vec<_> = keys.chunks(keys_per_leaf).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            let mut page = vec![0u8; PAGE_SIZE];
            {
                let mut builder = LeafBuilder::init(&mut page).unwrap();
                for &v in *chunk {
                    let key = int_key(&desc, &pool, v);
                    builder.push(key.data(), &[]).unwrap();
                }
                if i + 1 < chunks.len() {
                    builder.set_next_leaf(i as u32 + 2).unwrap();
                }
            }
            source.push_page(page.into()).unwrap();
        }

        TupleMap::new(source, 1, desc, empty_desc())
    }

    #[test]
    fn get_finds_keys_across_the_chain() {
        let map = chain_map(&[1, 3, 5, 7, 9, 11], 2);
        let pool = Bump::new();

        for v in [1, 5, 11] {
            let key = int_key(map.key_desc(), &pool, v);
            assert!(map.get(key).unwrap().is_some(), "key {} should exist", v);
        }
    }

    #[test]
    fn get_misses_between_and_beyond_keys() {
        let map = chain_map(&[1, 3, 5, 7], 2);
        let pool = Bump::new();

        for v in [0, 2, 6, 8] {
            let key = int_key(map.key_desc(), &pool, v);
            assert!(map.get(key).unwrap().is_none(), "key {} should miss", v);
        }
    }

    #[test]
    fn iter_range_crosses_leaf_boundaries() {
        let map = chain_map(&[1, 2, 3, 4, 5, 6, 7], 3);
        let ctx = ScanContext::new();

        let range = Range::all(map.key_desc());
        let mut iter = map.iter_range(&ctx, &range).unwrap();

        let mut seen = Vec::new();
        while let Some((key, _)) = iter.next(&ctx).unwrap() {
            seen.push(key.get_int32(map.key_desc(), 0).unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);

        // exhausted iterators keep reporting end-of-stream
        assert!(iter.next(&ctx).unwrap().is_none());
    }

    #[test]
    fn cancellation_surfaces_on_next_call() {
        let map = chain_map(&[1, 2, 3], 3);
        let ctx = ScanContext::new();

        let range = Range::all(map.key_desc());
        let mut iter = map.iter_range(&ctx, &range).unwrap();
        assert!(iter.next(&ctx).unwrap().is_some());

        ctx.cancel();
        let err = iter.next(&ctx).unwrap_err();
        assert!(err.downcast_ref::<Cancelled>().is_some());
    }

    #[test]
    fn concurrent_iterators_observe_identical_sequences() {
        let map = chain_map(&[1, 2, 3, 4, 5], 2);
        let ctx = ScanContext::new();
        let range = Range::all(map.key_desc());

        let mut a = map.iter_range(&ctx, &range).unwrap();
        let mut b = map.iter_range(&ctx, &range).unwrap();

        loop {
            let next_a = a.next(&ctx).unwrap().map(|(k, _)| k.data().to_vec());
            let next_b = b.next(&ctx).unwrap().map(|(k, _)| k.data().to_vec());
            assert_eq!(next_a, next_b);
            if next_a.is_none() {
                break;
            }
        }
    }

    #[test]
    fn broken_leaf_chain_surfaces_read_error_mid_scan() {
        let desc = one_int32();
        let pool = Bump::new();
        let mut source = MemorySource::new();

        let mut page = vec![0u8; PAGE_SIZE];
        {
            let mut builder = LeafBuilder::init(&mut page).unwrap();
            let key = int_key(&desc, &pool, 1);
            builder.push(key.data(), &[]).unwrap();
            builder.set_next_leaf(99).unwrap(); // dangling link
        }
        source.push_page(page.into()).unwrap();

        let map = TupleMap::new(source, 1, desc, empty_desc());
        let ctx = ScanContext::new();
        let range = Range::all(map.key_desc());

        let mut iter = map.iter_range(&ctx, &range).unwrap();
        assert!(iter.next(&ctx).unwrap().is_some());
        assert!(iter.next(&ctx).is_err());
    }

    #[test]
    fn missing_chunk_surfaces_as_error() {
        let desc = one_int32();
        let map = TupleMap::new(MemorySource::new(), 1, desc, empty_desc());
        let ctx = ScanContext::new();

        let range = Range::all(map.key_desc());
        assert!(map.iter_range(&ctx, &range).is_err());
    }
}
