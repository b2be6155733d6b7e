/// Ansoff Engine — Arithmetic Primitives
///
/// All model values are f64. Every write into a capability or KPI
/// goes through one of these helpers so the bounds hold by construction.

/// Clamp `val` into `[lo, hi]`.
pub fn clamp(val: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(val))
}

/// Raise `val` to at least `lo`. No ceiling.
pub fn floor_at(val: f64, lo: f64) -> f64 {
    lo.max(val)
}

/// Share of the budget assigned to one slot.
///
/// Callers must have checked `budget > 0` (config validation does).
pub fn fraction(points: i64, budget: i64) -> f64 {
    points as f64 / budget as f64
}

/// Multiplicative percentage step: `old * (1 + delta_pct / 100)`.
pub fn grow_by_percent(old: f64, delta_pct: f64) -> f64 {
    old * (1.0 + delta_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(50.0, 0.0, 100.0), 50.0);
        assert_eq!(clamp(-3.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(140.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_floor_at_has_no_ceiling() {
        assert_eq!(floor_at(10.0, 40.0), 40.0);
        assert_eq!(floor_at(1_000.0, 40.0), 1_000.0);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(25, 100), 0.25);
        assert_eq!(fraction(0, 100), 0.0);
        assert_eq!(fraction(50, 200), 0.25);
    }

    #[test]
    fn test_grow_by_percent() {
        assert!((grow_by_percent(100.0, 5.0) - 105.0).abs() < 1e-12);
        assert!((grow_by_percent(80.0, -10.0) - 72.0).abs() < 1e-12);
    }
}
