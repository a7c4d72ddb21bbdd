use super::boolean_count::count_bounds;
use super::boolean_count::fix_unfixed;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::Satisfaction;
use crate::engine::cp::DomainEvents;
use crate::engine::variables::DomainId;

/// Propagator for `\sum antecedents >= 1 -> \sum consequents >= required`.
#[derive(Clone, Debug)]
pub(crate) struct ImplicationPropagator {
    antecedents: Box<[DomainId]>,
    consequents: Box<[DomainId]>,
    required: i64,
}

impl ImplicationPropagator {
    pub(crate) fn new(
        antecedents: Box<[DomainId]>,
        consequents: Box<[DomainId]>,
        required: u32,
    ) -> Self {
        ImplicationPropagator {
            antecedents,
            consequents,
            required: i64::from(required),
        }
    }
}

impl Propagator for ImplicationPropagator {
    fn name(&self) -> &str {
        "Implication"
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &bit in self.antecedents.iter().chain(self.consequents.iter()) {
            let _ = context.register(bit, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (min_antecedents, _) = count_bounds(&context, &self.antecedents);
        let (_, max_consequents) = count_bounds(&context, &self.consequents);

        if max_consequents < self.required {
            // The consequent can no longer be met, so the antecedent may not be deployed.
            if min_antecedents >= 1 {
                return Err(Inconsistency::Violated);
            }
            fix_unfixed(&mut context, &self.antecedents, 0)?;
        } else if min_antecedents >= 1 && max_consequents == self.required {
            fix_unfixed(&mut context, &self.consequents, 1)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (min_antecedents, max_antecedents) = count_bounds(&context, &self.antecedents);
        let (min_consequents, max_consequents) = count_bounds(&context, &self.consequents);

        if min_antecedents >= 1 && max_consequents < self.required {
            Satisfaction::Violated
        } else if max_antecedents == 0 || min_consequents >= self.required {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
