use log::trace;
use unordered_pair::UnorderedPair;

use crate::affiliation::Targets;
use crate::frontier::Frontier;
use crate::mate::{Mate, MateMap};
use crate::puzzle::Coverage;
use crate::Vertex;

/// Whether excluding `edge` rules out every completion of `mates`.
///
/// Only endpoints retiring on this step are checked, since this is their last chance to change.
/// Such an endpoint must not be left untouched (unless it is a non-terminus and [`Coverage::Partial`] applies),
/// and a non-terminus must not be left as the open end of a fragment.
pub(crate) fn is_zero_incompatible<N: Vertex>(
    edge: UnorderedPair<N>,
    mates: &MateMap<N>,
    targets: &Targets<N>,
    frontier: &Frontier<N>,
    coverage: Coverage,
) -> bool {
    let UnorderedPair(u, v) = edge;

    [u, v].into_iter()
        .filter(|w| !frontier.is_active(*w))
        .any(|w| {
            let terminus = targets.is_terminus(w);
            let rejected = match mates.get(w).unwrap_or(Mate::Vertex(w)) {
                Mate::Closed => false,
                Mate::Vertex(x) if x == w => terminus || coverage == Coverage::Complete,
                Mate::Vertex(_) => !terminus,
            };

            if rejected {
                trace!("excluding {:?} strands {:?}", edge, w);
            }
            rejected
        })
}

/// Whether including `edge` rules out every completion of `mates`.
///
/// Rejects when an endpoint would reach degree 3 or more, when a terminus would reach degree 2,
/// when the edge would close a fragment into a cycle, and when the two fragment ends joined by the edge
/// can no longer move (termini, or vertices already retired) yet are not one of the target pairs.
pub(crate) fn is_one_incompatible<N: Vertex>(
    edge: UnorderedPair<N>,
    mates: &MateMap<N>,
    targets: &Targets<N>,
    frontier: &Frontier<N>,
) -> bool {
    let UnorderedPair(u, v) = edge;
    let mate_of = |w: N| mates.get(w).unwrap_or(Mate::Vertex(w));

    for (w, opposite) in [(u, v), (v, u)] {
        let rejected = match mate_of(w) {
            Mate::Closed => true,
            Mate::Vertex(x) if x == opposite => true,
            Mate::Vertex(x) => x != w && targets.is_terminus(w),
        };

        if rejected {
            trace!("including {:?} overloads {:?}", edge, w);
            return true;
        }
    }

    // both mates are vertices at this point
    let (Some(a), Some(b)) = (mate_of(u).vertex(), mate_of(v).vertex()) else {
        return true;
    };
    let settled = |x: N| targets.is_terminus(x) || frontier.is_retired(x);

    let rejected = settled(a) && settled(b) && !targets.is_pair(a, b);
    if rejected {
        trace!("including {:?} joins {:?} to {:?}", edge, a, b);
    }
    rejected
}
