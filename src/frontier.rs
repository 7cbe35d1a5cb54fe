use std::collections::{BTreeSet, HashMap, HashSet};

use unordered_pair::UnorderedPair;

use crate::Vertex;

/// Which vertices are active (seen on a decided or current edge and still referenced by a later one) as the edge order is consumed.
///
/// A vertex retires on the step that consumes its last incident edge and never becomes active again.
#[derive(Clone, Debug)]
pub(crate) struct Frontier<'a, N: Vertex> {
    order: &'a [UnorderedPair<N>],
    // index of the last edge referencing each vertex
    last_use: HashMap<N, usize>,
    // index of the edge about to be consumed
    level: usize,
    active: BTreeSet<N>,
    retired: HashSet<N>,
}

/// What a single [`Frontier::advance`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Advance<N> {
    pub(crate) edge: UnorderedPair<N>,
    pub(crate) retiring: Vec<N>,
    pub(crate) entering: Vec<N>,
}

impl<'a, N: Vertex> Frontier<'a, N> {
    /// Start before the first edge of `order`, whose endpoints are already active.
    pub(crate) fn new(order: &'a [UnorderedPair<N>]) -> Self {
        let mut last_use = HashMap::new();
        for (index, UnorderedPair(u, v)) in order.iter().enumerate() {
            last_use.insert(*u, index);
            last_use.insert(*v, index);
        }

        let active = order.first()
            .map(|UnorderedPair(u, v)| BTreeSet::from([*u, *v]))
            .unwrap_or_default();

        Self {
            order,
            last_use,
            level: 0,
            active,
            retired: HashSet::new(),
        }
    }

    /// The edge about to be consumed, if any remain.
    pub(crate) fn edge(&self) -> Option<UnorderedPair<N>> {
        self.order.get(self.level).copied()
    }

    /// The next edge after the one about to be consumed.
    pub(crate) fn next_edge(&self) -> Option<UnorderedPair<N>> {
        self.order.get(self.level + 1).copied()
    }

    pub(crate) fn level(&self) -> usize {
        self.level
    }

    /// Consume the current edge: retire its endpoints that no remaining edge references,
    /// then admit the endpoints of the next edge that were never seen before.
    pub(crate) fn advance(&mut self) -> Option<Advance<N>> {
        let edge = self.edge()?;
        let UnorderedPair(u, v) = edge;

        let mut retiring = Vec::with_capacity(2);
        for w in [u, v] {
            if self.last_use.get(&w) == Some(&self.level) && self.active.remove(&w) {
                self.retired.insert(w);
                retiring.push(w);
            }
        }

        let mut entering = Vec::with_capacity(2);
        if let Some(UnorderedPair(x, y)) = self.next_edge() {
            for w in [x, y] {
                if !self.retired.contains(&w) && self.active.insert(w) {
                    entering.push(w);
                }
            }
        }

        self.level += 1;
        Some(Advance { edge, retiring, entering })
    }

    /// Vertices a mate map must carry at this point.
    pub(crate) fn active(&self) -> &BTreeSet<N> {
        &self.active
    }

    #[inline]
    pub(crate) fn is_active(&self, vertex: N) -> bool {
        self.active.contains(&vertex)
    }

    #[inline]
    pub(crate) fn is_retired(&self, vertex: N) -> bool {
        self.retired.contains(&vertex)
    }

    /// Largest active set seen over the whole order; a cheap proxy for the pathwidth of the order.
    pub(crate) fn width(order: &[UnorderedPair<N>]) -> usize {
        let mut frontier = Frontier::new(order);
        let mut width = frontier.active.len();
        while frontier.advance().is_some() {
            width = width.max(frontier.active.len());
        }
        width
    }
}
