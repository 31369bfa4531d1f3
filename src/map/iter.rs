//! # Range Scan Iterator
//!
//! `RangeIter` yields the key/value pairs of a range scan in ascending key
//! order, crossing leaf boundaries through the map's chunk source. The
//! iterator is forward-only and finite; exhaustion is signalled by
//! `Ok(None)`, distinct from every error.
//!
//! Cancellation is cooperative: each `next` call first checks the scan
//! context's token and surfaces [`Cancelled`] once it fires. Chunk-source
//! read failures while hopping to the next leaf propagate verbatim.

use eyre::Result;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::map::leaf::LeafNode;
use crate::map::search::{range_start_search, range_stop_search};
use crate::map::TupleMap;
use crate::range::Range;
use crate::storage::{ChunkSource, NO_PAGE};
use crate::tuple::Tuple;

/// The scan was cancelled through its [`ScanContext`].
#[derive(Debug, Error)]
#[error("scan cancelled")]
pub struct Cancelled;

/// Cancellation handle carried through a scan. Cloning shares the
/// underlying token, so any clone can cancel the scan.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    cancel: CancellationToken,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

pub struct RangeIter<'m, 'r, S: ChunkSource> {
    map: &'m TupleMap<S>,
    range: Range<'r>,
    leaf: LeafNode<'m>,
    idx: usize,
    end: usize,
    /// Set once the scan has located its first in-range tuple; until then
    /// each leaf hop re-evaluates the start bound.
    started: bool,
    done: bool,
}

impl<'m, 'r, S: ChunkSource> RangeIter<'m, 'r, S> {
    pub(crate) fn new(map: &'m TupleMap<S>, range: Range<'r>) -> Result<Self> {
        let leaf = map.fetch_leaf(map.root())?;
        let lo = range_start_search(&range, &leaf)?;
        let hi = range_stop_search(&range, &leaf)?;
        log::debug!(
            "range scan bounds on root leaf: lo={} hi={} count={}",
            lo,
            hi,
            leaf.count()
        );

        Ok(Self {
            map,
            range,
            leaf,
            idx: lo,
            end: hi,
            started: lo < hi,
            done: false,
        })
    }

    /// Yields the next pair, `Ok(None)` at end of stream.
    pub fn next(&mut self, ctx: &ScanContext) -> Result<Option<(Tuple<'m>, Tuple<'m>)>> {
        if ctx.is_cancelled() {
            log::debug!("range scan observed cancellation");
            self.done = true;
            return Err(Cancelled.into());
        }

        loop {
            if self.done {
                return Ok(None);
            }

            if self.idx < self.end {
                let key = self.leaf.key_at(self.idx)?;
                let value = self.leaf.value_at(self.idx)?;
                self.idx += 1;
                self.started = true;
                return Ok(Some((key, value)));
            }

            // Current leaf exhausted. A stop bound inside this leaf ends
            // the scan; otherwise follow the leaf chain.
            if self.end < self.leaf.count() {
                self.done = true;
                return Ok(None);
            }

            let next = self.leaf.next_leaf();
            if next == NO_PAGE {
                self.done = true;
                return Ok(None);
            }

            self.leaf = self.map.fetch_leaf(next)?;
            self.idx = if self.started {
                0
            } else {
                range_start_search(&self.range, &self.leaf)?
            };
            self.end = range_stop_search(&self.range, &self.leaf)?;
            log::trace!(
                "range scan hopped to leaf {}: lo={} hi={}",
                next,
                self.idx,
                self.end
            );
        }
    }
}
