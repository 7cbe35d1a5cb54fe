use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::affiliation::{Targets, Termini};
use crate::puzzle::{Coverage, Puzzle};
use crate::Vertex;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BuilderInvalidReason<N: Vertex> {
    /// An edge was added with an endpoint that was never declared as a vertex.
    #[error("edge {edge:?} has an endpoint outside the vertex set")]
    EdgeOutsideVertexSet { edge: UnorderedPair<N> },
    /// An edge was added from a vertex to itself.
    #[error("edge from {vertex:?} to itself")]
    LoopEdge { vertex: N },
    /// The same edge was added twice, in either orientation.
    #[error("edge {edge:?} was already added")]
    DuplicateEdge { edge: UnorderedPair<N> },
    /// A terminus was placed on a vertex that was never declared.
    #[error("terminus {vertex:?} is outside the vertex set")]
    TerminusOutsideVertexSet { vertex: N },
    /// Both termini of a pair were placed on the same vertex.
    #[error("both termini of a pair are {vertex:?}")]
    DegeneratePair { vertex: N },
    /// A terminus was placed on a vertex that already belongs to another pair.
    #[error("{vertex:?} is already a terminus")]
    TerminusInMultiplePairs { vertex: N },
}

/// A builder for [`Puzzle`]s on arbitrary graphs.
///
/// Mutators return `&mut Self` so calls can be chained.
/// The first problem found is recorded as a [`BuilderInvalidReason`] and every mutator after it does nothing,
/// so a chain can be checked once at the end with [`Self::is_valid`] or [`Self::build`].
/// Builders can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder<N: Vertex> {
    graph: UnGraphMap<N, ()>,
    // edges in the order they were added, which is the order they are decided in
    order: Vec<UnorderedPair<N>>,
    termini: Vec<UnorderedPair<N>>,
    coverage: Coverage,
    invalid_reasons: Vec<BuilderInvalidReason<N>>,
}

impl<N: Vertex> Default for PuzzleBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Vertex> PuzzleBuilder<N> {
    /// An empty builder with no vertices, edges or termini and [`Coverage::Complete`].
    pub fn new() -> Self {
        Self {
            graph: UnGraphMap::new(),
            order: Vec::new(),
            termini: Vec::new(),
            coverage: Coverage::default(),
            invalid_reasons: Vec::new(),
        }
    }

    /// Start from every node and edge of `graph`, with edges in the graph's own iteration order.
    ///
    /// Edge weights are ignored. A self-loop in `graph` leaves the builder invalid.
    pub fn from_graph<E>(graph: &UnGraphMap<N, E>) -> Self {
        let mut builder = Self::new();
        builder.add_vertices(graph.nodes());
        for (a, b, _) in graph.all_edges() {
            builder.add_edge((a, b));
        }
        builder
    }

    /// Declare `vertex`. Declaring a vertex twice has no effect.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_vertex(&mut self, vertex: N) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.graph.add_node(vertex);
        self
    }

    /// Shorthand for multiple calls to [`Self::add_vertex`].
    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = N>) -> &mut Self {
        for vertex in vertices {
            self.add_vertex(vertex);
        }

        self
    }

    /// Append an edge between two declared vertices to the processing order.
    ///
    /// May cause the builder to enter an [`EdgeOutsideVertexSet`](BuilderInvalidReason::EdgeOutsideVertexSet),
    /// [`LoopEdge`](BuilderInvalidReason::LoopEdge) or [`DuplicateEdge`](BuilderInvalidReason::DuplicateEdge) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_edge(&mut self, endpoints: (N, N)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let edge = UnorderedPair::from(endpoints);
        let (a, b) = endpoints;

        if !self.graph.contains_node(a) || !self.graph.contains_node(b) {
            self.invalid_reasons.push(BuilderInvalidReason::EdgeOutsideVertexSet { edge });
            return self;
        }

        if a == b {
            self.invalid_reasons.push(BuilderInvalidReason::LoopEdge { vertex: a });
            return self;
        }

        if self.graph.contains_edge(a, b) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateEdge { edge });
            return self;
        }

        self.graph.add_edge(a, b, ());
        self.order.push(edge);
        self
    }

    /// Add a pair of termini. Pairs are numbered from 1 in the order they are added.
    /// The order of the two vertices is kept: reconstruction walks from the first to the second.
    ///
    /// May cause the builder to enter a [`TerminusOutsideVertexSet`](BuilderInvalidReason::TerminusOutsideVertexSet),
    /// [`DegeneratePair`](BuilderInvalidReason::DegeneratePair) or
    /// [`TerminusInMultiplePairs`](BuilderInvalidReason::TerminusInMultiplePairs) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, vertices: (N, N)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for vertex in [vertices.0, vertices.1] {
            if !self.graph.contains_node(vertex) {
                self.invalid_reasons.push(BuilderInvalidReason::TerminusOutsideVertexSet { vertex });
                return self;
            }
        }

        if vertices.0 == vertices.1 {
            self.invalid_reasons.push(BuilderInvalidReason::DegeneratePair { vertex: vertices.0 });
            return self;
        }

        for vertex in [vertices.0, vertices.1] {
            if self.termini.iter().any(|UnorderedPair(a, b)| *a == vertex || *b == vertex) {
                self.invalid_reasons.push(BuilderInvalidReason::TerminusInMultiplePairs { vertex });
                return self;
            }
        }

        self.termini.push(UnorderedPair::from(vertices));
        self
    }

    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.termini.pop();
        self
    }

    /// Choose which vertices solutions must pass through.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn coverage(&mut self, coverage: Coverage) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.coverage = coverage;
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason<N>>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Puzzle<N>, &Vec<BuilderInvalidReason<N>>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        // non-null affiliation IDs start at 1
        let termini = self.termini.iter()
            .zip(1..)
            .filter_map(|(pair, affiliation)| NonZero::new(affiliation).map(|affiliation| Termini { affiliation, pair: *pair }))
            .collect();

        Ok(Puzzle {
            graph: self.graph.clone(),
            order: self.order.clone(),
            targets: Targets::new(termini),
            coverage: self.coverage,
        })
    }
}
