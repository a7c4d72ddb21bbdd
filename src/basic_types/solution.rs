use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;
use crate::placement_assert_simple;

/// A full assignment of every variable known to the solver, taken from a store in which every
/// domain is fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: Box<[i32]>,
}

impl Solution {
    pub(crate) fn from_assignments(assignments: &Assignments) -> Solution {
        let values = assignments
            .get_domains()
            .map(|domain| {
                placement_assert_simple!(
                    assignments.is_fixed(domain),
                    "a solution can only be taken from a fully assigned store"
                );
                assignments.get_lower_bound(domain)
            })
            .collect();

        Solution { values }
    }

    /// The value assigned to the given domain.
    pub fn get_integer_value(&self, domain: DomainId) -> i32 {
        self.values[domain.index()]
    }

    pub fn num_domains(&self) -> usize {
        self.values.len()
    }
}
