/// Limits applied while a [`Diagram`](crate::Diagram) is constructed.
///
/// The default config places no limits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolverConfig {
    /// Most decision nodes construction may create before giving up with
    /// [`NodeLimitExceeded`](crate::SolverFailure::NodeLimitExceeded). Counted before reduction.
    pub node_limit: Option<usize>,
}

impl SolverConfig {
    /// Cap the number of decision nodes at `limit`.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }
}
