use std::collections::BTreeMap;

use unordered_pair::UnorderedPair;

use crate::Vertex;

/// Partial-connectivity summary of a single active vertex.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Mate<N> {
    /// The vertex is interior to a path; it accepts no further edges.
    Closed,
    /// The far open end of the path fragment ending here.
    /// A vertex whose mate is itself has not been touched by any included edge.
    Vertex(N),
}

impl<N: Vertex> Mate<N> {
    /// The vertex this mate points to, if it is not [`Closed`](Mate::Closed).
    #[inline]
    pub fn vertex(&self) -> Option<N> {
        match self {
            Self::Closed => None,
            Self::Vertex(v) => Some(*v),
        }
    }
}

/// Mates of every active vertex at one point of the edge order.
///
/// Maps are never mutated once a node owns them; both children of a node derive fresh maps from the same parent.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MateMap<N: Vertex> {
    mates: BTreeMap<N, Mate<N>>,
}

impl<N: Vertex> MateMap<N> {
    /// Every vertex in `domain` starts out as its own mate.
    pub(crate) fn identity(domain: impl IntoIterator<Item = N>) -> Self {
        Self {
            mates: domain.into_iter().map(|v| (v, Mate::Vertex(v))).collect(),
        }
    }

    /// The mate of `vertex`, or [`None`] if it is not active here.
    #[inline]
    pub fn get(&self, vertex: N) -> Option<Mate<N>> {
        self.mates.get(&vertex).copied()
    }

    /// Active vertices and their mates, in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (N, Mate<N>)> + '_ {
        self.mates.iter().map(|(v, m)| (*v, *m))
    }

    /// Number of active vertices.
    pub fn len(&self) -> usize {
        self.mates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mates.is_empty()
    }

    /// Keep only vertices in `domain`; vertices new to this map enter as their own mate.
    pub(crate) fn restrict<'a>(&self, domain: impl IntoIterator<Item = &'a N>) -> Self
    where
        N: 'a,
    {
        Self {
            mates: domain.into_iter()
                .map(|v| (*v, self.get(*v).unwrap_or(Mate::Vertex(*v))))
                .collect(),
        }
    }

    /// The map produced by including `edge`, which joins the fragments ending at its two endpoints.
    ///
    /// An endpoint that was already a fragment end becomes [`Closed`](Mate::Closed).
    /// A vertex whose partner is one endpoint takes over the mate of the other endpoint.
    pub(crate) fn include(&self, edge: UnorderedPair<N>) -> Self {
        let UnorderedPair(u, v) = edge;
        let opposite = |w: N| if w == u { v } else { u };
        // an endpoint missing from the map has not been touched yet
        let mate_of = |w: N| self.get(w).unwrap_or(Mate::Vertex(w));

        let mates = self.mates.iter()
            .map(|(&w, &mate)| {
                let next = match mate {
                    Mate::Vertex(partner) if (w == u || w == v) && partner != w => Mate::Closed,
                    Mate::Vertex(partner) if partner == u || partner == v => mate_of(opposite(partner)),
                    _ => mate,
                };
                (w, next)
            })
            .collect();

        Self { mates }
    }

    /// Whether the mate relation is symmetric among active, open, non-self entries.
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(a, mate)| match mate {
            Mate::Vertex(b) if b != a => match self.get(b) {
                None | Some(Mate::Closed) => true,
                Some(Mate::Vertex(c)) => c == a,
            },
            _ => true,
        })
    }
}
