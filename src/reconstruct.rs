use std::collections::{BTreeMap, HashSet};
use std::num::NonZero;

use log::trace;
use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::affiliation::{AffiliationID, Targets};
use crate::cell::{Cell, Coloring};
use crate::paths::Solution;
use crate::Vertex;

/// Reasons an edge selection cannot be turned into a [`Coloring`].
///
/// Selections enumerated from a [`Diagram`](crate::Diagram) never fail this way; if one does,
/// diagram construction is at fault, not the puzzle.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ReconstructionFailure<N: Vertex> {
    /// The walk for a pair ran out of edges before reaching the pair's other terminus.
    #[error("path {affiliation} ends at {vertex:?} without reaching its other terminus")]
    Dangling { affiliation: NonZero<AffiliationID>, vertex: N },
    /// The walk for a pair found more than one way to continue.
    #[error("path {affiliation} branches at {vertex:?}")]
    Branching { affiliation: NonZero<AffiliationID>, vertex: N },
    /// The walk for a pair took more steps than there are vertices.
    #[error("path {affiliation} from {start:?} did not terminate within {bound} steps")]
    StepBoundExceeded { affiliation: NonZero<AffiliationID>, start: N, bound: usize },
    /// The walk for a pair reached a vertex already claimed by a path or terminus.
    #[error("path {attempted} runs into {vertex:?}, which already belongs to {existing}")]
    ColoringConflict { vertex: N, existing: AffiliationID, attempted: NonZero<AffiliationID> },
    /// An edge references a vertex the puzzle does not have.
    #[error("{vertex:?} is not a vertex of this puzzle")]
    UnknownVertex { vertex: N },
    /// An edge of the selection lies on no pair's path.
    #[error("edge {edge:?} is not on any path")]
    StrayEdge { edge: UnorderedPair<N> },
}

/// Walk every pair's path through `solution`, stamping each visited vertex with the pair's number.
pub(crate) fn reconstruct<N: Vertex>(
    vertices: impl Iterator<Item = N>,
    targets: &Targets<N>,
    solution: &Solution<N>,
) -> Result<Coloring<N>, ReconstructionFailure<N>> {
    let mut cells: BTreeMap<N, Cell> = vertices.map(|v| (v, Cell::Empty)).collect();
    let bound = cells.len();

    let mut graph: UnGraphMap<N, ()> = UnGraphMap::with_capacity(solution.len() + 1, solution.len());
    for UnorderedPair(u, v) in solution {
        for vertex in [*u, *v] {
            if !cells.contains_key(&vertex) {
                return Err(ReconstructionFailure::UnknownVertex { vertex });
            }
        }
        graph.add_edge(*u, *v, ());
    }

    let mut traversed = HashSet::with_capacity(solution.len());

    for termini in targets.termini() {
        let (start, end) = termini.endpoints();
        let affiliation = termini.affiliation();

        stamp(&mut cells, start, Cell::Terminus { affiliation })?;

        let mut walked = HashSet::new();
        let mut current = start;
        let mut steps = 0;
        while current != end {
            if steps >= bound {
                return Err(ReconstructionFailure::StepBoundExceeded { affiliation, start, bound });
            }

            let mut exits = if graph.contains_node(current) {
                graph.neighbors(current)
                    .map(|neighbor| UnorderedPair(current, neighbor))
                    .filter(|edge| !walked.contains(edge))
                    .collect::<Vec<_>>()
            } else {
                Vec::new()
            };
            let edge = match exits.len() {
                0 => return Err(ReconstructionFailure::Dangling { affiliation, vertex: current }),
                1 => exits.remove(0),
                _ => return Err(ReconstructionFailure::Branching { affiliation, vertex: current }),
            };

            walked.insert(edge);
            current = edge.1;
            steps += 1;

            if current == end {
                stamp(&mut cells, current, Cell::Terminus { affiliation })?;
            } else if let Some(existing) = targets.affiliation_of(current) {
                // passing through someone else's terminus
                return Err(ReconstructionFailure::ColoringConflict {
                    vertex: current,
                    existing: existing.get(),
                    attempted: affiliation,
                });
            } else {
                stamp(&mut cells, current, Cell::Path { affiliation })?;
            }
        }

        trace!("path {} from {:?} to {:?} takes {} steps", affiliation, start, end, steps);
        traversed.extend(walked);
    }

    if let Some(edge) = solution.edges().iter().find(|edge| !traversed.contains(*edge)) {
        return Err(ReconstructionFailure::StrayEdge { edge: *edge });
    }

    Ok(Coloring { cells })
}

fn stamp<N: Vertex>(
    cells: &mut BTreeMap<N, Cell>,
    vertex: N,
    cell: Cell,
) -> Result<(), ReconstructionFailure<N>> {
    let slot = cells.get_mut(&vertex).ok_or(ReconstructionFailure::UnknownVertex { vertex })?;

    match (*slot, cell) {
        (Cell::Empty, _) => {
            *slot = cell;
            Ok(())
        }
        (existing, Cell::Terminus { affiliation } | Cell::Path { affiliation }) => Err(ReconstructionFailure::ColoringConflict {
            vertex,
            existing: existing.affiliation(),
            attempted: affiliation,
        }),
        (_, Cell::Empty) => Ok(()),
    }
}
