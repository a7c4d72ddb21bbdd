//! Helpers for propagators over 0/1 variables.

use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::EmptyDomain;
use crate::engine::variables::DomainId;

/// The number of variables fixed to 1 and the number of variables which can still be 1.
pub(super) fn count_bounds(context: &impl ReadDomains, bits: &[DomainId]) -> (i64, i64) {
    bits.iter().fold((0, 0), |(ones, possible), &bit| {
        (
            ones + i64::from(context.lower_bound(bit) >= 1),
            possible + i64::from(context.upper_bound(bit) >= 1),
        )
    })
}

/// Fix every unfixed variable in `bits` to `value`.
pub(super) fn fix_unfixed(
    context: &mut PropagationContextMut,
    bits: &[DomainId],
    value: i32,
) -> Result<(), EmptyDomain> {
    for &bit in bits {
        if !context.is_fixed(bit) {
            context.assign(bit, value)?;
        }
    }
    Ok(())
}
