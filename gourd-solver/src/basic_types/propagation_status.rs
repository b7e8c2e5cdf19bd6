use crate::engine::variables::VariableId;
use crate::engine::EmptyDomain;

/// The status of running a propagator. Failure is signalled through [`EmptyDomain`] so that
/// propagators can bail out with `?` as soon as a domain is wiped out.
pub(crate) type PropagationStatus = Result<(), EmptyDomain>;

/// The observable outcome of propagating a single constraint on a set of domains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagationResult {
    /// No domain was changed.
    Unchanged,
    /// The domains of these variables were narrowed, in the order they were first touched.
    Narrowed(Vec<VariableId>),
    /// A domain became empty.
    Failed,
}

impl PropagationResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, PropagationResult::Failed)
    }
}
