use super::ComponentId;

/// The operator of a [`PlacementRule::Cardinality`] rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn holds(&self, lhs: u32, rhs: u32) -> bool {
        match self {
            Comparison::Equal => lhs == rhs,
            Comparison::AtLeast => lhs >= rhs,
            Comparison::AtMost => lhs <= rhs,
        }
    }
}

/// The structural rules of an application topology. These are data: the solver turns each of them
/// into one or more constraints over the deployment counts or the per-slot assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementRule {
    /// The combined deployment count of `components` compared with `bound`.
    Cardinality {
        components: Vec<ComponentId>,
        comparison: Comparison,
        bound: u32,
    },
    /// `component` never shares a slot with any of `conflicting`.
    Conflict {
        component: ComponentId,
        conflicting: Vec<ComponentId>,
    },
    /// `consumer_ratio * count(consumer) <= provider_ratio * count(provider)`.
    RequireProvide {
        consumer: ComponentId,
        consumer_ratio: u32,
        provider: ComponentId,
        provider_ratio: u32,
    },
    /// If `antecedent` is deployed at least once, `consequent` is deployed at least `required`
    /// times.
    Implication {
        antecedent: ComponentId,
        consequent: ComponentId,
        required: u32,
    },
    /// On every slot, `dependent` is present exactly as often as the primaries together.
    Colocation {
        dependent: ComponentId,
        primaries: Vec<ComponentId>,
    },
}

impl PlacementRule {
    /// One instance of `provider` serves at most `consumers_per_provider` instances of `consumer`.
    pub fn provide(
        provider: ComponentId,
        consumer: ComponentId,
        consumers_per_provider: u32,
    ) -> PlacementRule {
        PlacementRule::RequireProvide {
            consumer,
            consumer_ratio: 1,
            provider,
            provider_ratio: consumers_per_provider,
        }
    }

    /// If `antecedent` is deployed, so is `consequent`.
    pub fn requires(antecedent: ComponentId, consequent: ComponentId) -> PlacementRule {
        PlacementRule::Implication {
            antecedent,
            consequent,
            required: 1,
        }
    }

    /// The components mentioned by this rule.
    pub fn components(&self) -> Vec<ComponentId> {
        match self {
            PlacementRule::Cardinality { components, .. } => components.clone(),
            PlacementRule::Conflict {
                component,
                conflicting,
            } => std::iter::once(*component)
                .chain(conflicting.iter().copied())
                .collect(),
            PlacementRule::RequireProvide {
                consumer, provider, ..
            } => vec![*consumer, *provider],
            PlacementRule::Implication {
                antecedent,
                consequent,
                ..
            } => vec![*antecedent, *consequent],
            PlacementRule::Colocation {
                dependent,
                primaries,
            } => std::iter::once(*dependent)
                .chain(primaries.iter().copied())
                .collect(),
        }
    }
}
