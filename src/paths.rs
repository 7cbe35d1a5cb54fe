use unordered_pair::UnorderedPair;

use crate::diagram::{Branch, Child, Diagram};
use crate::Vertex;

/// The edges selected along one root-to-[`Accept`](Child::Accept) path, in processing order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution<N> {
    edges: Vec<UnorderedPair<N>>,
}

impl<N: Vertex> Solution<N> {
    /// The selected edges, in processing order.
    pub fn edges(&self) -> &[UnorderedPair<N>] {
        &self.edges
    }

    pub fn contains(&self, edge: UnorderedPair<N>) -> bool {
        self.edges.contains(&edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<N> From<Vec<UnorderedPair<N>>> for Solution<N> {
    fn from(edges: Vec<UnorderedPair<N>>) -> Self {
        Self { edges }
    }
}

impl<'a, N> IntoIterator for &'a Solution<N> {
    type Item = &'a UnorderedPair<N>;
    type IntoIter = std::slice::Iter<'a, UnorderedPair<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    child: Child,
    // next branch to descend into; None once both are done
    next: Option<Branch>,
    // whether entering this frame pushed an edge onto the current path
    included: bool,
}

/// Depth-first iterator over the solutions of a [`Diagram`].
///
/// Created by [`Diagram::solutions`]. Only the current path is kept, so pulling the first few solutions
/// of a diagram with very many costs no more than the walks to reach them.
#[derive(Clone, Debug)]
pub struct Solutions<'a, N: Vertex> {
    diagram: &'a Diagram<N>,
    stack: Vec<Frame>,
    current: Vec<UnorderedPair<N>>,
}

impl<'a, N: Vertex> Solutions<'a, N> {
    pub(crate) fn new(diagram: &'a Diagram<N>) -> Self {
        Self {
            diagram,
            stack: vec![Frame { child: diagram.root(), next: Some(Branch::Exclude), included: false }],
            current: Vec::with_capacity(diagram.levels()),
        }
    }

    fn backtrack(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if frame.included {
                self.current.pop();
            }
        }
    }
}

impl<N: Vertex> Iterator for Solutions<'_, N> {
    type Item = Solution<N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (child, next) = (frame.child, frame.next);

            let id = match child {
                Child::Accept => {
                    let solution = Solution::from(self.current.clone());
                    self.backtrack();
                    return Some(solution);
                }
                Child::Reject => {
                    self.backtrack();
                    continue;
                }
                Child::Node(id) => id,
            };

            let node = self.diagram.node(id);
            match next {
                Some(Branch::Exclude) => {
                    frame.next = Some(Branch::Include);
                    self.stack.push(Frame {
                        child: node.child(Branch::Exclude),
                        next: Some(Branch::Exclude),
                        included: false,
                    });
                }
                Some(Branch::Include) => {
                    frame.next = None;
                    self.current.push(node.edge());
                    self.stack.push(Frame {
                        child: node.child(Branch::Include),
                        next: Some(Branch::Exclude),
                        included: true,
                    });
                }
                None => self.backtrack(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::diagram::DecisionNode;
    use crate::mate::MateMap;

    fn node(level: usize, edge: (char, char), children: [Child; 2]) -> DecisionNode<char> {
        let mut node = DecisionNode::new(level, UnorderedPair::from(edge), MateMap::identity([edge.0, edge.1]));
        node.children = children;
        node
    }

    fn diagram() -> Diagram<char> {
        // solutions {bc}, {ab} and {ab, bc}
        Diagram::reduced(vec![
            node(0, ('a', 'b'), [Child::Node(1), Child::Node(2)]),
            node(1, ('b', 'c'), [Child::Reject, Child::Accept]),
            node(1, ('b', 'c'), [Child::Accept, Child::Accept]),
        ], Child::Node(0), 2)
    }

    #[test]
    fn enumerates_exclude_first() {
        let solutions = diagram().solutions().collect::<Vec<_>>();

        assert_eq!(solutions, vec![
            Solution::from(vec![UnorderedPair('b', 'c')]),
            Solution::from(vec![UnorderedPair('a', 'b')]),
            Solution::from(vec![UnorderedPair('a', 'b'), UnorderedPair('b', 'c')]),
        ]);
    }

    #[test]
    fn restarts_identically() {
        let diagram = diagram();

        assert_eq!(diagram.solutions().collect::<Vec<_>>(), diagram.solutions().collect::<Vec<_>>());
    }

    #[test]
    fn stops_early() {
        let diagram = diagram();
        let mut solutions = diagram.solutions();

        assert_eq!(solutions.next(), Some(Solution::from(vec![UnorderedPair('b', 'c')])));
        let rest = solutions.clone().count();
        assert_eq!(rest, 2);
        assert_eq!(solutions.count(), 2);
    }

    #[test]
    fn rejecting_root_yields_nothing() {
        let diagram = Diagram::<char>::sink(Child::Reject, 3);

        assert_eq!(diagram.solutions().next(), None);
    }
}
