use std::collections::BTreeMap;
use std::num::NonZero;

use crate::affiliation::AffiliationID;
use crate::Vertex;

/// What a vertex holds in a reconstructed solution.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// One end of the path numbered `affiliation`.
    Terminus { affiliation: NonZero<AffiliationID> },
    /// An interior vertex of the path numbered `affiliation`.
    Path { affiliation: NonZero<AffiliationID> },
    /// On no path.
    #[default]
    Empty,
}

impl Cell {
    /// The number drawn on this cell; 0 if it is empty.
    pub fn affiliation(&self) -> AffiliationID {
        match self {
            Self::Terminus { affiliation } | Self::Path { affiliation } => affiliation.get(),
            Self::Empty => 0,
        }
    }
}

/// A complete vertex to [`Cell`] map, as produced by reconstructing a solution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coloring<N: Vertex> {
    pub(crate) cells: BTreeMap<N, Cell>,
}

impl<N: Vertex> Coloring<N> {
    /// The cell at `vertex`, or [`None`] if it is not a vertex of the puzzle.
    pub fn get(&self, vertex: N) -> Option<Cell> {
        self.cells.get(&vertex).copied()
    }

    /// The number drawn on `vertex`, 0 if it lies on no path.
    pub fn number(&self, vertex: N) -> Option<AffiliationID> {
        self.get(vertex).map(|cell| cell.affiliation())
    }

    /// Every vertex with its number, in vertex order.
    pub fn numbers(&self) -> BTreeMap<N, AffiliationID> {
        self.cells.iter().map(|(v, cell)| (*v, cell.affiliation())).collect()
    }

    /// Every vertex with its cell, in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (N, Cell)> + '_ {
        self.cells.iter().map(|(v, cell)| (*v, *cell))
    }

    /// Number of vertices colored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the puzzle has no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
