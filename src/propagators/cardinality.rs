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
use crate::instance::Comparison;

/// Propagator for `\sum bits (=|>=|<=) bound` over 0/1 variables. Used to bound the total
/// deployment count of a group of components.
#[derive(Clone, Debug)]
pub(crate) struct CardinalityPropagator {
    bits: Box<[DomainId]>,
    comparison: Comparison,
    bound: i64,
}

impl CardinalityPropagator {
    pub(crate) fn new(bits: Box<[DomainId]>, comparison: Comparison, bound: u32) -> Self {
        CardinalityPropagator {
            bits,
            comparison,
            bound: i64::from(bound),
        }
    }

    fn may_be_too_small(&self) -> bool {
        matches!(self.comparison, Comparison::Equal | Comparison::AtLeast)
    }

    fn may_be_too_large(&self) -> bool {
        matches!(self.comparison, Comparison::Equal | Comparison::AtMost)
    }
}

impl Propagator for CardinalityPropagator {
    fn name(&self) -> &str {
        "Cardinality"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for &bit in self.bits.iter() {
            let _ = context.register(bit, DomainEvents::ASSIGN);
        }

        if self.check(context.as_readonly()) == Satisfaction::Violated {
            return Err(Inconsistency::Violated);
        }
        Ok(())
    }

    fn propagate(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let (ones, possible) = count_bounds(&context, &self.bits);

        if self.may_be_too_large() && ones > self.bound {
            return Err(Inconsistency::Violated);
        }
        if self.may_be_too_small() && possible < self.bound {
            return Err(Inconsistency::Violated);
        }

        if self.may_be_too_large() && ones == self.bound {
            fix_unfixed(&mut context, &self.bits, 0)?;
        } else if self.may_be_too_small() && possible == self.bound {
            fix_unfixed(&mut context, &self.bits, 1)?;
        }

        Ok(())
    }

    fn check(&self, context: PropagationContext) -> Satisfaction {
        let (ones, possible) = count_bounds(&context, &self.bits);

        let violated = (self.may_be_too_large() && ones > self.bound)
            || (self.may_be_too_small() && possible < self.bound);
        let satisfied = (!self.may_be_too_large() || possible <= self.bound)
            && (!self.may_be_too_small() || ones >= self.bound);

        if violated {
            Satisfaction::Violated
        } else if satisfied {
            Satisfaction::Satisfied
        } else {
            Satisfaction::Undetermined
        }
    }
}
