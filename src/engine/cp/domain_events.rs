use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// The kinds of changes that can happen to the domain of an integer variable.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// The domain became a single value.
    Assign,
    LowerBound,
    UpperBound,
    /// At least one value was removed.
    Removal,
}

/// The set of events a propagator subscribes to for a variable.
#[derive(Debug, Copy, Clone)]
pub struct DomainEvents {
    int_events: EnumSet<IntDomainEvent>,
}

impl DomainEvents {
    /// Lower and upper bound tightening.
    pub const BOUNDS: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::LowerBound | IntDomainEvent::UpperBound
    ));
    /// Every change to the domain.
    pub const ANY_INT: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::Assign
            | IntDomainEvent::LowerBound
            | IntDomainEvent::UpperBound
            | IntDomainEvent::Removal
    ));
    /// Only assigning to a single value.
    pub const ASSIGN: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::Assign));

    pub(crate) const fn create_with_int_events(int_events: EnumSet<IntDomainEvent>) -> Self {
        DomainEvents { int_events }
    }

    pub(crate) fn get_int_events(&self) -> EnumSet<IntDomainEvent> {
        self.int_events
    }
}
