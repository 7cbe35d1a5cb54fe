use std::collections::HashMap;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use strum::VariantArray;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::config::SolverConfig;
use crate::diagram::{Branch, Child, DecisionNode, Diagram, NodeId};
use crate::frontier::Frontier;
use crate::logic::{is_one_incompatible, is_zero_incompatible};
use crate::mate::MateMap;
use crate::puzzle::{Coverage, Puzzle};
use crate::reconstruct::ReconstructionFailure;
use crate::Vertex;

/// Reasons a [`GraphSolver`] may fail.
///
/// An unsatisfiable puzzle is not a failure; its diagram simply has no solutions.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SolverFailure<N: Vertex> {
    /// Construction needed more decision nodes than [`SolverConfig::node_limit`] allows.
    #[error("diagram construction exceeded {limit} nodes at level {level}")]
    NodeLimitExceeded {
        /// The configured limit.
        limit: usize,
        /// The level whose expansion hit the limit.
        level: usize,
    },
    /// A solution taken from the diagram could not be reconstructed.
    /// This should never happen.
    #[error(transparent)]
    Inconsistent(#[from] ReconstructionFailure<N>),
}

/// Builds the decision diagram of a [`Puzzle`], one level per edge of its processing order.
///
/// # Construction
/// Each level holds the distinct mate maps reachable after deciding the edges before it.
/// For every node at a level, both decisions on the level's edge are tried:
/// feasibility rules send hopeless decisions to [`Reject`](Child::Reject),
/// and the remaining ones lead to a node at the next level keyed by the resulting mate map, restricted to the vertices still active.
/// Nodes with equal maps at the same level behave identically, so each level keeps a cache from map to node
/// which is dropped once the level is expanded.
/// Past the last edge, surviving decisions lead to [`Accept`](Child::Accept).
pub struct GraphSolver<'a, N: Vertex> {
    puzzle: &'a Puzzle<N>,
    config: SolverConfig,
}

impl<'a, N: Vertex> GraphSolver<'a, N> {
    /// A solver for `puzzle` bound by the limits in `config`.
    pub fn new(puzzle: &'a Puzzle<N>, config: SolverConfig) -> Self {
        Self { puzzle, config }
    }

    /// A vertex incident to no edge that the coverage rule requires to be on a path.
    fn stranded_vertex(&self) -> Option<N> {
        self.puzzle.graph.nodes()
            .filter(|v| self.puzzle.graph.neighbors(*v).next().is_none())
            .find(|v| self.puzzle.targets.is_terminus(*v) || self.puzzle.coverage == Coverage::Complete)
    }

    /// The mates following `branch` on `edge`, or [`None`] if that decision can never lead to a solution.
    ///
    /// `frontier` must already have consumed `edge`.
    fn decide(&self, branch: Branch, edge: UnorderedPair<N>, mates: &MateMap<N>, frontier: &Frontier<N>) -> Option<MateMap<N>> {
        let targets = &self.puzzle.targets;

        match branch {
            Branch::Exclude => {
                if is_zero_incompatible(edge, mates, targets, frontier, self.puzzle.coverage) {
                    return None;
                }
                Some(mates.restrict(frontier.active()))
            }
            Branch::Include => {
                if is_one_incompatible(edge, mates, targets, frontier) {
                    return None;
                }
                Some(mates.include(edge).restrict(frontier.active()))
            }
        }
    }

    /// Construct and reduce the diagram.
    pub fn build(&self) -> Result<Diagram<N>, SolverFailure<N>> {
        let started = Instant::now();
        let order = self.puzzle.order.as_slice();

        if let Some(vertex) = self.stranded_vertex() {
            info!("{:?} has no edges but must lie on a path; puzzle is unsatisfiable", vertex);
            return Ok(Diagram::sink(Child::Reject, order.len()));
        }

        let mut frontier = Frontier::new(order);
        let Some(first) = frontier.edge() else {
            info!("puzzle has no edges; accepting the empty selection");
            return Ok(Diagram::sink(Child::Accept, 0));
        };

        let mut nodes = vec![DecisionNode::new(0, first, MateMap::identity(frontier.active().iter().copied()))];
        let mut current: Vec<NodeId> = vec![0];

        while let Some(step) = frontier.advance() {
            let level = frontier.level() - 1;
            let next_edge = frontier.edge();
            let mut cache: HashMap<MateMap<N>, NodeId> = HashMap::with_capacity(current.len() * 2);
            let mut upcoming = Vec::with_capacity(current.len() * 2);

            for id in current {
                let outcomes = Branch::VARIANTS.iter()
                    .map(|branch| self.decide(*branch, step.edge, &nodes[id].mates, &frontier))
                    .collect_vec();

                for (branch, outcome) in Branch::VARIANTS.iter().zip(outcomes) {
                    let child = match (outcome, next_edge) {
                        (None, _) => Child::Reject,
                        (Some(_), None) => Child::Accept,
                        (Some(mates), Some(edge)) => match cache.get(&mates) {
                            Some(existing) => Child::Node(*existing),
                            None => {
                                if let Some(limit) = self.config.node_limit {
                                    if nodes.len() >= limit {
                                        return Err(SolverFailure::NodeLimitExceeded { limit, level: level + 1 });
                                    }
                                }

                                let created = nodes.len();
                                nodes.push(DecisionNode::new(level + 1, edge, mates.clone()));
                                cache.insert(mates, created);
                                upcoming.push(created);
                                Child::Node(created)
                            }
                        },
                    };
                    nodes[id].children[*branch as usize] = child;
                }
            }

            debug!("level {} decided {:?}: retired {:?}, admitted {:?}, {} active; {} nodes next, {} total",
                level, step.edge, step.retiring, step.entering, frontier.active().len(), upcoming.len(), nodes.len());
            current = upcoming;
        }

        let built = nodes.len();
        let diagram = Diagram::reduced(nodes, Child::Node(0), order.len());
        info!("built diagram over {} edges: {} nodes, {} after reduction, in {:?}",
            order.len(), built, diagram.len(), started.elapsed());

        Ok(diagram)
    }
}
