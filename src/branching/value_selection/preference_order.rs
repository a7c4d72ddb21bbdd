use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::placement_assert_simple;

/// [`ValueSelector`] which picks the first value of a fixed preference list that is still in the
/// domain. Used to try the type of a slot in the order "unused" and then offers from cheap to
/// expensive.
#[derive(Clone, Debug)]
pub struct PreferenceOrder {
    preferred: Box<[i32]>,
}

impl PreferenceOrder {
    pub fn new(preferred: impl Into<Box<[i32]>>) -> Self {
        PreferenceOrder {
            preferred: preferred.into(),
        }
    }
}

impl ValueSelector for PreferenceOrder {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: DomainId) -> i32 {
        let value = self
            .preferred
            .iter()
            .copied()
            .find(|&value| context.contains(decision_variable, value));

        placement_assert_simple!(
            value.is_some(),
            "the domain of {decision_variable} contains no preferred value"
        );
        value.unwrap_or_else(|| context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cp::Assignments;

    #[test]
    fn first_preferred_value_in_domain_is_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 3);
        let _ = assignments.remove_value(x, 0);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = PreferenceOrder::new(vec![0, 2, 3, 1]);
        let mut context = SelectionContext::new(&assignments, &mut rng);

        assert_eq!(2, selector.select_value(&mut context, x));
    }
}
