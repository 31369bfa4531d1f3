//! # Range Bound Search
//!
//! Locates a range's bounds inside a sorted leaf: the smallest index
//! at-or-above the Start bound and the smallest index not below the Stop
//! bound. Together they delimit the half-open scan window `[lo, hi)`.
//!
//! When a bound list constrains a contiguous prefix of columns, its
//! predicate is monotone over a sorted leaf and a binary search finds the
//! boundary in O(log n). A bound list with an unconstrained leading column
//! (e.g. `c1 > 1` with `c0` free) is not monotone in leaf order, so those
//! bounds fall back to a forward scan for the leftmost satisfying index.

use eyre::Result;

use crate::map::leaf::LeafNode;
use crate::range::{CutList, Range};
use crate::tuple::Tuple;

/// Smallest index `i` in `[0, count]` such that `i == count` or
/// `range.above_start(key(i))`.
pub fn range_start_search(range: &Range<'_>, leaf: &LeafNode<'_>) -> Result<usize> {
    if prefix_bound(&range.start) {
        binary_search(leaf, |t| range.above_start(t))
    } else {
        forward_search(leaf, |t| range.above_start(t))
    }
}

/// Smallest index `i` in `[0, count]` such that `i == count` or
/// `!range.below_stop(key(i))`.
pub fn range_stop_search(range: &Range<'_>, leaf: &LeafNode<'_>) -> Result<usize> {
    if prefix_bound(&range.stop) {
        binary_search(leaf, |t| !range.below_stop(t))
    } else {
        forward_search(leaf, |t| !range.below_stop(t))
    }
}

/// True when every binding cut precedes every non-binding cut, i.e. the
/// bound constrains a contiguous column prefix.
fn prefix_bound(cuts: &Option<CutList<'_>>) -> bool {
    let Some(cuts) = cuts else {
        return true;
    };
    let mut gap = false;
    for cut in cuts {
        if cut.is_binding() {
            if gap {
                return false;
            }
        } else {
            gap = true;
        }
    }
    true
}

fn binary_search<F>(leaf: &LeafNode<'_>, pred: F) -> Result<usize>
where
    F: Fn(Tuple<'_>) -> bool,
{
    let mut lo = 0;
    let mut hi = leaf.count();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if pred(leaf.key_at(mid)?) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

fn forward_search<F>(leaf: &LeafNode<'_>, pred: F) -> Result<usize>
where
    F: Fn(Tuple<'_>) -> bool,
{
    let count = leaf.count();
    for i in 0..count {
        if pred(leaf.key_at(i)?) {
            return Ok(i);
        }
    }
    Ok(count)
}
