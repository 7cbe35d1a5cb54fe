use std::collections::{HashMap, HashSet};
use std::num::NonZero;

use unordered_pair::UnorderedPair;

use crate::Vertex;

/// Numbers shared by the two termini of a pair and every vertex on the path between them.
/// Affiliation 0 is the null affiliation.
pub type AffiliationID = usize;

/// One pair of termini and the number it is drawn with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Termini<N> {
    pub(crate) affiliation: NonZero<AffiliationID>,
    // the reconstructor walks from .0 to .1
    pub(crate) pair: UnorderedPair<N>,
}

impl<N: Vertex> Termini<N> {
    /// The number this pair is drawn with.
    pub fn affiliation(&self) -> NonZero<AffiliationID> {
        self.affiliation
    }

    /// The two terminal vertices, in the order they were added.
    pub fn endpoints(&self) -> (N, N) {
        (self.pair.0, self.pair.1)
    }
}

/// The target specification: which vertices are termini and how they pair up.
#[derive(Clone, Debug)]
pub(crate) struct Targets<N: Vertex> {
    termini: Vec<Termini<N>>,
    affiliations: HashMap<N, NonZero<AffiliationID>>,
    pairs: HashSet<UnorderedPair<N>>,
}

impl<N: Vertex> Targets<N> {
    pub(crate) fn new(termini: Vec<Termini<N>>) -> Self {
        let mut affiliations = HashMap::with_capacity(termini.len() * 2);
        let mut pairs = HashSet::with_capacity(termini.len());

        for termini in &termini {
            affiliations.insert(termini.pair.0, termini.affiliation);
            affiliations.insert(termini.pair.1, termini.affiliation);
            pairs.insert(termini.pair);
        }

        Self { termini, affiliations, pairs }
    }

    #[inline]
    pub(crate) fn is_terminus(&self, vertex: N) -> bool {
        self.affiliations.contains_key(&vertex)
    }

    #[inline]
    pub(crate) fn is_pair(&self, a: N, b: N) -> bool {
        self.pairs.contains(&UnorderedPair(a, b))
    }

    pub(crate) fn affiliation_of(&self, vertex: N) -> Option<NonZero<AffiliationID>> {
        self.affiliations.get(&vertex).copied()
    }

    pub(crate) fn termini(&self) -> &[Termini<N>] {
        &self.termini
    }
}
