#![warn(missing_docs)]

//! # `chromate`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) on arbitrary graphs, such as the triangular grids
//! where square-grid tricks stop applying.
//! Begin by describing the graph and its numbered pairs of termini with a [`PuzzleBuilder`].
//! Build it into a [`Puzzle`], then call [`diagram()`](Puzzle::diagram) to get every solution at once as a [`Diagram`],
//! or [`solve()`](Puzzle::solve) to color the graph with the first one.
//!
//! Vertices can be any type implementing [`Vertex`], which is every `Copy + Ord + Hash + Debug` type petgraph accepts as a node.
//!
//! # Internals
//! Rather than search for one solution, this crate builds a zero-suppressed decision diagram whose root-to-accept paths are exactly the solutions,
//! following the frontier-based construction popularized by Knuth's `simpath`.
//!
//! A high level overview is as follows:
//!
//! Fix an order on the edges of the graph. Deciding edges one at a time in that order, a vertex is *active* from the first edge touching it
//! until its last edge is decided, after which it is *retired* and never looked at again.
//! All that matters about the partial selection for the future is, per active vertex, its *mate*:
//! 1. itself, if no selected edge touches it yet,
//! 2. closed, if two selected edges already pass through it,
//! 3. otherwise the vertex at the far end of the path fragment it ends.
//!
//! Each level of the diagram holds the distinct mate maps reachable after deciding the edges before it.
//! Decisions that can no longer lead to a valid selection (a terminus with two edges, a fragment joining the wrong termini,
//! a vertex retiring half connected) go straight to the reject sink, and nodes with equal mate maps are shared.
//! The diagram therefore grows with the number of distinct frontier states, which stays small when the edge order keeps
//! the frontier narrow, rather than with the number of solutions.
//!
//! Solutions are then read back as edge sets by walking the diagram and turned into colorings by following each pair's path.

use std::fmt::Debug;

use petgraph::graphmap::NodeTrait;

pub use affiliation::{AffiliationID, Termini};
pub use builder::{BuilderInvalidReason, PuzzleBuilder};
pub use cell::{Cell, Coloring};
pub use config::SolverConfig;
pub use diagram::{Branch, Child, DecisionNode, Diagram, NodeId};
pub use mate::{Mate, MateMap};
pub use paths::{Solution, Solutions};
pub use puzzle::{Coverage, Puzzle};
pub use reconstruct::ReconstructionFailure;
pub use solver::{GraphSolver, SolverFailure};

pub(crate) mod affiliation;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod config;
pub mod diagram;
pub(crate) mod dot;
pub(crate) mod frontier;
pub(crate) mod logic;
pub(crate) mod mate;
pub(crate) mod paths;
pub(crate) mod puzzle;
pub(crate) mod reconstruct;
pub(crate) mod solver;

/// Constraint on vertex types, on top of the constraints [`GraphMap`](petgraph::graphmap::GraphMap) puts on nodes.
pub trait Vertex: NodeTrait + Debug + 'static {}

impl<T: NodeTrait + Debug + 'static> Vertex for T {}
