//! # Range Predicates over Tuples
//!
//! A `Range` is a multi-column predicate with independent Start and Stop
//! bounds, evaluated against tuples under a [`TupleDescriptor`]. Each bound
//! is an ordered list of [`RangeCut`]s, one per leading column; a cut can
//! constrain its column with a value (inclusive or exclusive), pin it to
//! NULL, or leave it unconstrained.
//!
//! ## Bound Evaluation
//!
//! `above_start` and `below_stop` walk the cut list column by column:
//!
//! - an unconstrained cut skips its column (Start side) or excludes NULL
//!   fields (Stop side: NULL keys order after every non-NULL key, so no
//!   finite stop admits them);
//! - a NULL cut matches exactly the NULL value;
//! - a value cut never matches a NULL field, and on equality defers to the
//!   next column, with the final column's inclusivity deciding ties.
//!
//! Membership is the conjunction: `t ∈ range ⇔ above_start(t) && below_stop(t)`.
//!
//! Ranges are built per query and not retained; all evaluation is pure and
//! total on well-formed inputs.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::tuple::{FieldType, Tuple, TupleDescriptor};

/// One bound on one column of a range.
#[derive(Debug, Clone, Copy)]
pub struct RangeCut<'a> {
    /// Raw field bytes interpreted under `field`; absent when the cut does
    /// not constrain this column.
    pub value: Option<&'a [u8]>,
    pub field: FieldType,
    /// Whether the cut value itself is inside the range.
    pub inclusive: bool,
    /// Sentinel: this cut matches the NULL value exclusively.
    pub null: bool,
}

impl<'a> RangeCut<'a> {
    pub fn unbound(field: FieldType) -> Self {
        Self {
            value: None,
            field,
            inclusive: false,
            null: false,
        }
    }

    pub fn at(field: FieldType, value: &'a [u8], inclusive: bool) -> Self {
        Self {
            value: Some(value),
            field,
            inclusive,
            null: false,
        }
    }

    pub fn null(field: FieldType) -> Self {
        Self {
            value: None,
            field,
            inclusive: false,
            null: true,
        }
    }

    /// A binding cut actually constrains its column.
    pub fn is_binding(&self) -> bool {
        self.null || self.value.is_some()
    }
}

pub type CutList<'a> = SmallVec<[RangeCut<'a>; 4]>;

#[derive(Debug, Clone)]
pub struct Range<'a> {
    /// Lower bound; `None` is unbounded below.
    pub start: Option<CutList<'a>>,
    /// Upper bound; `None` is unbounded above.
    pub stop: Option<CutList<'a>>,
    pub desc: &'a TupleDescriptor,
}

impl<'a> Range<'a> {
    /// The unbounded range over `desc`.
    pub fn all(desc: &'a TupleDescriptor) -> Self {
        Self {
            start: None,
            stop: None,
            desc,
        }
    }

    pub fn new(
        desc: &'a TupleDescriptor,
        start: Option<CutList<'a>>,
        stop: Option<CutList<'a>>,
    ) -> Self {
        debug_assert!(start.as_ref().map_or(true, |c| c.len() <= desc.field_count()));
        debug_assert!(stop.as_ref().map_or(true, |c| c.len() <= desc.field_count()));
        Self { desc, start, stop }
    }

    /// True iff `t` is at-or-above the Start bound.
    pub fn above_start(&self, t: Tuple<'_>) -> bool {
        let Some(cuts) = &self.start else {
            return true;
        };
        if cuts.is_empty() {
            return true;
        }

        let last = cuts.len() - 1;
        for (i, cut) in cuts.iter().enumerate() {
            let field = t.field_bytes(self.desc, i);

            if cut.null {
                match field {
                    // NULL matched; later cuts may still discriminate.
                    None => continue,
                    Some(_) => return false,
                }
            }

            let Some(value) = cut.value else {
                // Unconstrained column; anything is above an open floor.
                continue;
            };

            if field.is_none() {
                // A value cut never admits NULL.
                return false;
            }

            match self.desc.compare_field(value, i, t) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal if i == last => return cut.inclusive,
                Ordering::Equal => continue,
            }
        }
        true
    }

    /// True iff `t` is at-or-below the Stop bound.
    pub fn below_stop(&self, t: Tuple<'_>) -> bool {
        let Some(cuts) = &self.stop else {
            return true;
        };
        if cuts.is_empty() {
            return true;
        }

        let last = cuts.len() - 1;
        for (i, cut) in cuts.iter().enumerate() {
            let field = t.field_bytes(self.desc, i);

            if cut.null {
                match field {
                    None => continue,
                    // NULL keys order last, so every value is below a
                    // NULL stop.
                    Some(_) => return true,
                }
            }

            let Some(value) = cut.value else {
                // An unconstrained stop column admits any value but NULL,
                // which orders above all of them.
                match field {
                    None => return false,
                    Some(_) => continue,
                }
            };

            if field.is_none() {
                return false;
            }

            match self.desc.compare_field(value, i, t) {
                Ordering::Greater => return true,
                Ordering::Less => return false,
                Ordering::Equal if i == last => return cut.inclusive,
                Ordering::Equal => continue,
            }
        }
        true
    }

    pub fn contains(&self, t: Tuple<'_>) -> bool {
        self.above_start(t) && self.below_stop(t)
    }

    /// Diagnostic rendering of the range's bounds.
    pub fn format(&self) -> String {
        fn side(cuts: &Option<CutList<'_>>, out: &mut String) {
            match cuts {
                None => out.push('∞'),
                Some(cuts) => {
                    out.push('(');
                    for (i, cut) in cuts.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        if cut.null {
                            out.push_str("NULL");
                        } else if cut.value.is_some() {
                            out.push_str(if cut.inclusive { "=[..]" } else { "<[..]>" });
                        } else {
                            out.push('_');
                        }
                    }
                    out.push(')');
                }
            }
        }

        let mut out = String::from("Range[");
        side(&self.start, &mut out);
        out.push_str(" .. ");
        side(&self.stop, &mut out);
        out.push(']');
        out
    }
}
