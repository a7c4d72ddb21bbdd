use std::fmt::Display;
use std::fmt::Formatter;

/// A handle to an integer variable in the [`Assignments`](crate::engine::cp::Assignments).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

impl DomainId {
    pub(crate) fn new(id: u32) -> Self {
        DomainId { id }
    }

    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
