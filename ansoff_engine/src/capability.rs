/// Ansoff Engine — Capability Model
///
/// Each move builds a different mix of capabilities. A quarter's gain for
/// a capability is its weight row dotted with the allocation fractions.

use crate::arithmetic::{clamp, fraction};
use crate::domain::{Allocation, Capability, CapabilityState, Move};

/// Gain per unit of budget share, rows in `Capability::ALL` order,
/// columns in `Move::ALL` order.
pub const CAPABILITY_WEIGHTS: [[f64; 4]; 6] = [
    // A    B    C    D
    [6.0, 2.0, 3.0, 1.0], // Brand
    [1.0, 2.0, 7.0, 4.0], // R&D
    [4.0, 2.0, 1.0, 2.0], // Supply Chain
    [4.0, 7.0, 1.0, 1.0], // Retail & Carrier Channels
    [1.0, 2.0, 6.0, 5.0], // Software & Services
    [0.0, 1.0, 2.0, 8.0], // Enterprise Sales
];

/// Allocation as budget shares `[a, b, c, d]`.
pub fn allocation_fractions(allocation: &Allocation, budget: i64) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, slot) in Move::ALL.into_iter().enumerate() {
        out[i] = fraction(allocation.points(slot), budget);
    }
    out
}

/// Unclamped gain for one capability.
pub fn capability_gain(cap: Capability, fractions: &[f64; 4]) -> f64 {
    CAPABILITY_WEIGHTS[cap.index()]
        .iter()
        .zip(fractions.iter())
        .map(|(w, f)| w * f)
        .sum()
}

/// Return the capabilities after one quarter of `allocation`.
/// Input is not mutated.
pub fn apply_allocation(
    capabilities: &CapabilityState,
    allocation: &Allocation,
    budget: i64,
) -> CapabilityState {
    let fractions = allocation_fractions(allocation, budget);
    let mut next = capabilities.clone();
    for cap in Capability::ALL {
        let raised = capabilities.get(cap) + capability_gain(cap, &fractions);
        next.set(cap, clamp(raised, Capability::MIN, Capability::MAX));
    }
    next
}
