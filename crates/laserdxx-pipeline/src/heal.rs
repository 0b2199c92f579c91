//! Gap healing
//!
//! CAD exports often break one intended contour into many abutting
//! open segments. Healing splices open chains whose endpoints touch
//! (within a tolerance) back into longer chains and closes the ones
//! that come back around to their own start.
//!
//! Passes repeat until one of them merges nothing, so a chain built
//! late in pass N can still pick up a partner in pass N + 1. Every
//! merge removes a chain, which bounds the number of passes.

use laserdxx_core::{Point, Polyline};
use tracing::debug;

/// How an absorbed chain attaches to the growing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joint {
    /// Our end meets their start
    EndToStart,
    /// Our end meets their end: append reversed
    EndToEnd,
    /// Our start meets their end: prepend
    StartToEnd,
    /// Our start meets their start: prepend reversed
    StartToStart,
}

/// Heal a set of chains until no further merge is possible
///
/// Closed chains pass through untouched. The chain that absorbs others
/// keeps its id. Running `heal` on its own output changes nothing.
pub fn heal(polylines: Vec<Polyline>, tolerance: f64) -> Vec<Polyline> {
    let mut chains = polylines;
    let mut passes = 0usize;
    loop {
        let before = chains.len();
        chains = heal_pass(chains, tolerance);
        passes += 1;
        if chains.len() >= before {
            break;
        }
    }
    debug!(chains = chains.len(), passes, "healing reached a fixpoint");
    chains
}

/// One sweep over the chains, extending each open chain as far as it goes
fn heal_pass(chains: Vec<Polyline>, tolerance: f64) -> Vec<Polyline> {
    let mut slots: Vec<Option<Polyline>> = chains.into_iter().map(Some).collect();
    let mut healed = Vec::with_capacity(slots.len());

    for i in 0..slots.len() {
        let Some(mut current) = slots[i].take() else {
            continue;
        };

        if !current.closed {
            loop {
                if close_if_touching(&mut current, tolerance) {
                    break;
                }
                let Some((j, joint)) = find_partner(&current, &slots, tolerance) else {
                    break;
                };
                if let Some(other) = slots[j].take() {
                    splice(&mut current, other, joint);
                }
            }
        }

        current.refresh_geometry();
        healed.push(current);
    }

    healed
}

/// First open chain with an endpoint within `tolerance` of ours
fn find_partner(
    current: &Polyline,
    slots: &[Option<Polyline>],
    tolerance: f64,
) -> Option<(usize, Joint)> {
    let (start, end) = (current.start()?, current.end()?);
    let near = |a: Point, b: Option<Point>| b.is_some_and(|b| a.distance_to(&b) <= tolerance);

    slots.iter().enumerate().find_map(|(j, slot)| {
        let other = slot.as_ref().filter(|o| !o.closed)?;
        let (other_start, other_end) = (other.start(), other.end());
        if near(end, other_start) {
            Some((j, Joint::EndToStart))
        } else if near(end, other_end) {
            Some((j, Joint::EndToEnd))
        } else if near(start, other_end) {
            Some((j, Joint::StartToEnd))
        } else if near(start, other_start) {
            Some((j, Joint::StartToStart))
        } else {
            None
        }
    })
}

/// Join `other` onto `current`, dropping the duplicated shared vertex
fn splice(current: &mut Polyline, other: Polyline, joint: Joint) {
    let mut theirs = other.points;
    match joint {
        Joint::EndToStart => {
            current.points.extend(theirs.into_iter().skip(1));
        }
        Joint::EndToEnd => {
            theirs.reverse();
            current.points.extend(theirs.into_iter().skip(1));
        }
        Joint::StartToEnd => {
            theirs.pop();
            theirs.append(&mut current.points);
            current.points = theirs;
        }
        Joint::StartToStart => {
            theirs.reverse();
            theirs.pop();
            theirs.append(&mut current.points);
            current.points = theirs;
        }
    }
}

/// Close a chain of three or more points whose ends touch
///
/// The end point is replaced by an exact copy of the start.
fn close_if_touching(current: &mut Polyline, tolerance: f64) -> bool {
    if current.points.len() < 3 {
        return false;
    }
    let (Some(start), Some(end)) = (current.start(), current.end()) else {
        return false;
    };
    if start.distance_to(&end) > tolerance {
        return false;
    }
    let last_index = current.points.len() - 1;
    current.points[last_index] = start;
    current.closed = true;
    true
}
