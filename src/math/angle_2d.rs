use std::cmp::Ordering;

use super::{cross_2d, Vector2, TOLERANCE};

/// Which part of the sweep around `reference` a direction falls into.
///
/// The sweep covers `(0, 2π]`; a direction aligned with `reference` is
/// reached last, after a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SweepHalf {
    /// `(0, π]`
    Upper,
    /// `(π, 2π)`
    Lower,
    /// Exactly `2π` (same direction as the reference).
    Aligned,
}

fn sweep_half(reference: &Vector2, d: &Vector2) -> SweepHalf {
    let c = cross_2d(reference, d);
    let scale = reference.norm() * d.norm();
    if c.abs() <= TOLERANCE * scale {
        if reference.dot(d) < 0.0 {
            SweepHalf::Upper
        } else {
            SweepHalf::Aligned
        }
    } else if c > 0.0 {
        SweepHalf::Upper
    } else {
        SweepHalf::Lower
    }
}

/// Orders `a` and `b` by the counter-clockwise angle swept from `reference`.
///
/// Only cross-product signs are used; no angle is ever materialized. The
/// angle is taken in `(0, 2π]`, so a direction identical to `reference` sorts
/// after every other direction.
#[must_use]
pub fn ccw_sweep_cmp(reference: &Vector2, a: &Vector2, b: &Vector2) -> Ordering {
    let ha = sweep_half(reference, a);
    let hb = sweep_half(reference, b);
    if ha != hb {
        return ha.cmp(&hb);
    }
    if ha == SweepHalf::Aligned {
        return Ordering::Equal;
    }
    let c = cross_2d(a, b);
    if c.abs() <= TOLERANCE * a.norm() * b.norm() {
        Ordering::Equal
    } else if c > 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Orders `a` and `b` by the clockwise angle swept from `reference`.
#[must_use]
pub fn cw_sweep_cmp(reference: &Vector2, a: &Vector2, b: &Vector2) -> Ordering {
    let mirror = |v: &Vector2| Vector2::new(v.x, -v.y);
    ccw_sweep_cmp(&mirror(reference), &mirror(a), &mirror(b))
}
