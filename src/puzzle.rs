use std::collections::BTreeMap;

use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::affiliation::{AffiliationID, Targets, Termini};
use crate::cell::Coloring;
use crate::config::SolverConfig;
use crate::diagram::Diagram;
use crate::frontier::Frontier;
use crate::paths::Solution;
use crate::reconstruct::{reconstruct, ReconstructionFailure};
use crate::solver::{GraphSolver, SolverFailure};
use crate::Vertex;

/// Which non-terminal vertices a solution must pass through.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, strum::Display, VariantArray)]
pub enum Coverage {
    /// Every vertex lies on some path, as in classic Numberlink.
    #[default]
    Complete,
    /// Non-terminal vertices may be left untouched.
    Partial,
}

/// A validated Numberlink instance on an arbitrary graph.
///
/// [`Puzzle`]s should be built using a [`PuzzleBuilder`](crate::PuzzleBuilder).
#[derive(Clone, Debug)]
pub struct Puzzle<N: Vertex> {
    pub(crate) graph: UnGraphMap<N, ()>,
    // processing order; fixed for the life of the puzzle
    pub(crate) order: Vec<UnorderedPair<N>>,
    pub(crate) targets: Targets<N>,
    pub(crate) coverage: Coverage,
}

impl<N: Vertex> Puzzle<N> {
    /// Every declared vertex, including those incident to no edge.
    pub fn vertices(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    /// The edges in the order they are decided.
    pub fn edges(&self) -> &[UnorderedPair<N>] {
        &self.order
    }

    /// The target pairs, numbered from 1 in the order they were added.
    pub fn termini(&self) -> &[Termini<N>] {
        self.targets.termini()
    }

    /// Which vertices solutions must pass through.
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Most vertices a mate map carries at once along the edge order.
    ///
    /// Diagram size grows exponentially in this number, so it is worth checking before building large puzzles.
    pub fn frontier_width(&self) -> usize {
        Frontier::width(&self.order)
    }

    /// Build the decision diagram with no limits.
    pub fn diagram(&self) -> Result<Diagram<N>, SolverFailure<N>> {
        self.diagram_with(&SolverConfig::default())
    }

    /// Build the decision diagram, deferring to a [`GraphSolver`].
    pub fn diagram_with(&self, config: &SolverConfig) -> Result<Diagram<N>, SolverFailure<N>> {
        GraphSolver::new(self, *config).build()
    }

    /// Find one solution and color the graph accordingly.
    ///
    /// Returns [`None`] if the puzzle has no solution.
    pub fn solve(&self) -> Result<Option<Coloring<N>>, SolverFailure<N>> {
        let diagram = self.diagram()?;
        let first = self.colorings(&diagram).next().transpose();
        first
    }

    /// Color the graph following `solution`.
    pub fn reconstruct(&self, solution: &Solution<N>) -> Result<Coloring<N>, ReconstructionFailure<N>> {
        reconstruct(self.vertices(), &self.targets, solution)
    }

    /// Lazily reconstruct every solution of `diagram`, which must have been built from this puzzle.
    pub fn colorings<'a>(&'a self, diagram: &'a Diagram<N>) -> impl Iterator<Item = Result<Coloring<N>, SolverFailure<N>>> + 'a {
        diagram.solutions().map(move |solution| self.reconstruct(&solution).map_err(SolverFailure::from))
    }

    /// Whether `numbers`, giving the number drawn on each vertex (0 for none), matches some solution.
    ///
    /// Vertices missing from `numbers` count as 0.
    pub fn is_solved_by(&self, numbers: &BTreeMap<N, AffiliationID>) -> Result<bool, SolverFailure<N>> {
        if numbers.keys().any(|v| !self.graph.contains_node(*v)) {
            return Ok(false);
        }

        let diagram = self.diagram()?;
        for coloring in self.colorings(&diagram) {
            let coloring = coloring?;
            if coloring.iter().all(|(v, cell)| numbers.get(&v).copied().unwrap_or(0) == cell.affiliation()) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
