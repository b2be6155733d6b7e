/// Ansoff Engine — Allocation Validation
///
/// Pure. Safe to call on every slider change; never touches engine state.

use crate::domain::{Allocation, Move};
use crate::error::{AllocationFault, EngineError};

/// Accept `allocation` iff every slot is non-negative and the slots sum
/// to `budget`.
pub fn validate_allocation(allocation: &Allocation, budget: i64) -> Result<(), EngineError> {
    for slot in Move::ALL {
        let points = allocation.points(slot);
        if points < 0 {
            return Err(AllocationFault::NegativeComponent { slot, points }.into());
        }
    }

    let total = allocation
        .total()
        .ok_or(AllocationFault::TotalOverflow { budget })?;
    if total == 0 {
        return Err(AllocationFault::NothingAllocated.into());
    }
    if total != budget {
        return Err(AllocationFault::SumMismatch { total, budget }.into());
    }
    Ok(())
}

/// Points still unassigned. Negative when over budget; `None` when the
/// slots are too large to total.
pub fn remaining_points(allocation: &Allocation, budget: i64) -> Option<i64> {
    budget.checked_sub(allocation.total()?)
}
