use log::warn;

use crate::branching::SelectionContext;
use crate::branching::VariableSelector;
use crate::engine::variables::DomainId;

/// How [`FirstFail`] chooses between variables with equally small domains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreaking {
    /// The variable which comes first in the input order.
    #[default]
    InputOrder,
    /// A uniformly random variable among the tied ones.
    Random,
}

/// A [`VariableSelector`] which selects the unfixed variable with the fewest values in its
/// domain.
#[derive(Clone, Debug)]
pub struct FirstFail {
    variables: Vec<DomainId>,
    tie_breaking: TieBreaking,
}

impl FirstFail {
    pub fn new(variables: &[DomainId], tie_breaking: TieBreaking) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
            tie_breaking,
        }
    }
}

impl VariableSelector for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        let smallest = self
            .variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(**variable))
            .map(|variable| context.get_size_of_domain(*variable))
            .min()?;

        let mut tied = self.variables.iter().copied().filter(|variable| {
            !context.is_integer_fixed(*variable) && context.get_size_of_domain(*variable) == smallest
        });

        match self.tie_breaking {
            TieBreaking::InputOrder => tied.next(),
            TieBreaking::Random => {
                let tied = tied.collect::<Vec<_>>();
                let idx = context.random_index(tied.len());
                Some(tied[idx])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cp::Assignments;

    #[test]
    fn smallest_domain_is_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);
        let y = assignments.grow(0, 3);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = FirstFail::new(&[x, y], TieBreaking::InputOrder);
        let mut context = SelectionContext::new(&assignments, &mut rng);
        assert_eq!(Some(y), selector.select_variable(&mut context));

        let _ = assignments.tighten_lower_bound(x, 9);
        let mut context = SelectionContext::new(&assignments, &mut rng);
        assert_eq!(Some(x), selector.select_variable(&mut context));
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 1);
        let y = assignments.grow(0, 1);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = FirstFail::new(&[y, x], TieBreaking::InputOrder);
        let mut context = SelectionContext::new(&assignments, &mut rng);
        assert_eq!(Some(y), selector.select_variable(&mut context));
    }

    #[test]
    fn random_ties_only_pick_tied_variables() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 1);
        let y = assignments.grow(0, 1);
        let z = assignments.grow(0, 5);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = FirstFail::new(&[x, y, z], TieBreaking::Random);
        for _ in 0..20 {
            let mut context = SelectionContext::new(&assignments, &mut rng);
            let selected = selector.select_variable(&mut context);
            assert!(selected == Some(x) || selected == Some(y));
        }
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(10, 10);
        let y = assignments.grow(20, 20);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = FirstFail::new(&[x, y], TieBreaking::InputOrder);
        let mut context = SelectionContext::new(&assignments, &mut rng);
        assert_eq!(None, selector.select_variable(&mut context));
    }
}
