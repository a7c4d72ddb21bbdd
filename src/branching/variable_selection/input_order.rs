use log::warn;

use crate::branching::SelectionContext;
use crate::branching::VariableSelector;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the first variable which is not fixed given the order in
/// the provided list.
#[derive(Clone, Debug)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .find(|variable| !context.is_integer_fixed(**variable))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::cp::Assignments;

    #[test]
    fn fixed_variables_are_skipped() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(3, 3);
        let y = assignments.grow(0, 1);
        let mut rng = SmallRng::seed_from_u64(42);

        let mut selector = InputOrder::new(&[x, y]);
        let mut context = SelectionContext::new(&assignments, &mut rng);

        assert_eq!(Some(y), selector.select_variable(&mut context));
    }
}
