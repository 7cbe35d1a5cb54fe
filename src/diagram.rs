use num_bigint::BigUint;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::mate::MateMap;
use crate::paths::Solutions;
use crate::Vertex;

/// Index of a [`DecisionNode`] within its [`Diagram`].
pub type NodeId = usize;

/// The two decisions made for every edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, VariantArray)]
pub enum Branch {
    /// The edge is left out of the selection.
    Exclude,
    /// The edge is part of the selection.
    Include,
}

/// Where a branch of a [`DecisionNode`] leads.
///
/// The two sinks carry no state and compare structurally.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Child {
    /// No selection continuing this way is valid.
    Reject,
    /// Every edge has been decided and the selection is valid.
    Accept,
    /// Another decision node of the same diagram.
    Node(NodeId),
}

/// A decision on one edge, given the mates of the active vertices at that point.
#[derive(Clone, Debug)]
pub struct DecisionNode<N: Vertex> {
    pub(crate) level: usize,
    pub(crate) edge: UnorderedPair<N>,
    pub(crate) mates: MateMap<N>,
    // indexed by Branch
    pub(crate) children: [Child; 2],
}

impl<N: Vertex> DecisionNode<N> {
    pub(crate) fn new(level: usize, edge: UnorderedPair<N>, mates: MateMap<N>) -> Self {
        Self {
            level,
            edge,
            mates,
            children: [Child::Reject; 2],
        }
    }

    /// Position of [`Self::edge`] in the processing order.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The edge decided here.
    pub fn edge(&self) -> UnorderedPair<N> {
        self.edge
    }

    /// Mates of the vertices active when [`Self::edge`] is decided.
    pub fn mates(&self) -> &MateMap<N> {
        &self.mates
    }

    /// Where deciding [`Self::edge`] as `branch` leads.
    pub fn child(&self, branch: Branch) -> Child {
        self.children[branch as usize]
    }
}

/// A reduced decision diagram whose root-to-[`Accept`](Child::Accept) paths are exactly the solutions of a puzzle.
///
/// Every node kept in the diagram lies on at least one such path.
#[derive(Clone, Debug)]
pub struct Diagram<N: Vertex> {
    pub(crate) nodes: Vec<DecisionNode<N>>,
    pub(crate) root: Child,
    pub(crate) levels: usize,
}

impl<N: Vertex> Diagram<N> {
    /// A diagram without decision nodes.
    pub(crate) fn sink(root: Child, levels: usize) -> Self {
        Self { nodes: Vec::new(), root, levels }
    }

    /// Collapse every node whose branches both lead to [`Reject`](Child::Reject), then drop the nodes no longer reachable.
    ///
    /// Relies on children always being indexed after their parents.
    pub(crate) fn reduced(nodes: Vec<DecisionNode<N>>, root: Child, levels: usize) -> Self {
        let mut resolved = vec![Child::Reject; nodes.len()];
        let mut nodes = nodes;

        for id in (0..nodes.len()).rev() {
            let children = nodes[id].children.map(|child| resolve(child, &resolved));
            nodes[id].children = children;
            if children.iter().any(|child| *child != Child::Reject) {
                resolved[id] = Child::Node(id);
            }
        }

        // survivors keep their relative order, so renumbering is a prefix count
        let mut renumbered = vec![None; nodes.len()];
        let mut next = 0;
        for (id, resolution) in resolved.iter().enumerate() {
            if *resolution != Child::Reject {
                renumbered[id] = Some(next);
                next += 1;
            }
        }

        let kept = nodes.into_iter()
            .enumerate()
            .filter(|(id, _)| renumbered[*id].is_some())
            .map(|(_, mut node)| {
                node.children = node.children.map(|child| renumber(child, &renumbered));
                node
            })
            .collect();

        let root = renumber(resolve(root, &resolved), &renumbered);

        Self { nodes: kept, root, levels }
    }

    /// Where the first decision starts; a sink if the puzzle was decided without any.
    pub fn root(&self) -> Child {
        self.root
    }

    /// # Panics
    /// If `id` does not belong to this diagram.
    pub fn node(&self, id: NodeId) -> &DecisionNode<N> {
        &self.nodes[id]
    }

    /// Every decision node with its id. Children always come after their parents.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DecisionNode<N>)> {
        self.nodes.iter().enumerate()
    }

    /// Number of decision nodes, not counting the sinks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges decided along every root-to-sink path.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Whether no solution exists.
    pub fn is_unsatisfiable(&self) -> bool {
        self.root == Child::Reject
    }

    /// Lazily enumerate every solution, exclude branches first.
    ///
    /// Each call starts a fresh traversal; the order is the same every time.
    pub fn solutions(&self) -> Solutions<'_, N> {
        Solutions::new(self)
    }

    /// Number of solutions, computed without enumerating them.
    pub fn count(&self) -> BigUint {
        let mut counts = vec![BigUint::ZERO; self.nodes.len()];

        let count_of = |child: Child, counts: &[BigUint]| match child {
            Child::Reject => BigUint::ZERO,
            Child::Accept => BigUint::from(1u8),
            Child::Node(id) => counts[id].clone(),
        };

        // children come after parents, so fill from the back
        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            let total: BigUint = Branch::VARIANTS.iter()
                .map(|branch| count_of(node.child(*branch), &counts))
                .sum();
            counts[id] = total;
        }

        count_of(self.root, &counts)
    }
}

fn resolve(child: Child, resolved: &[Child]) -> Child {
    match child {
        Child::Node(id) => resolved[id],
        sink => sink,
    }
}

fn renumber(child: Child, renumbered: &[Option<NodeId>]) -> Child {
    match child {
        Child::Node(id) => renumbered[id].map_or(Child::Reject, Child::Node),
        sink => sink,
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn node(level: usize, children: [Child; 2]) -> DecisionNode<char> {
        let mut node = DecisionNode::new(level, UnorderedPair('a', 'b'), MateMap::identity(['a', 'b']));
        node.children = children;
        node
    }

    #[test]
    fn reduction_collapses_dead_subtrees() {
        let nodes = vec![
            node(0, [Child::Node(1), Child::Node(2)]),
            node(1, [Child::Reject, Child::Reject]),
            node(1, [Child::Node(3), Child::Reject]),
            node(2, [Child::Reject, Child::Accept]),
        ];
        let diagram = Diagram::reduced(nodes, Child::Node(0), 3);

        assert_eq!(diagram.len(), 3);
        assert_eq!(diagram.root(), Child::Node(0));
        assert_eq!(diagram.node(0).child(Branch::Exclude), Child::Reject);
        assert_eq!(diagram.node(0).child(Branch::Include), Child::Node(1));
        assert_eq!(diagram.node(1).child(Branch::Exclude), Child::Node(2));
        assert_eq!(diagram.count(), BigUint::from(1u8));
    }

    #[test]
    fn reduction_propagates_to_root() {
        let nodes = vec![
            node(0, [Child::Node(1), Child::Reject]),
            node(1, [Child::Reject, Child::Reject]),
        ];
        let diagram = Diagram::reduced(nodes, Child::Node(0), 2);

        assert!(diagram.is_empty());
        assert!(diagram.is_unsatisfiable());
        assert_eq!(diagram.count(), BigUint::ZERO);
        assert_eq!(diagram.solutions().count(), 0);
    }

    #[test]
    fn shared_nodes_are_counted_per_path() {
        let nodes = vec![
            node(0, [Child::Node(1), Child::Node(1)]),
            node(1, [Child::Accept, Child::Accept]),
        ];
        let diagram = Diagram::reduced(nodes, Child::Node(0), 2);

        assert_eq!(diagram.len(), 2);
        assert_eq!(diagram.count(), BigUint::from(4u8));
        assert_eq!(diagram.solutions().count(), 4);
    }

    #[test]
    fn sink_diagram() {
        let accept = Diagram::<char>::sink(Child::Accept, 0);
        assert_eq!(accept.count(), BigUint::from(1u8));
        assert_eq!(accept.solutions().collect::<Vec<_>>().len(), 1);
    }
}
