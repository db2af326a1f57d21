//! Mathematical utility functions

use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Uniform random decimal in `[-1, 1)`.
pub fn unit_jitter() -> Decimal {
    let r: f64 = rand::rng().random_range(-1.0..1.0);
    Decimal::from_f64(r).unwrap_or_default()
}

/// `base * (1 + half_width * u)` for uniform `u` in `[-1, 1)`.
pub fn jittered(base: Decimal, half_width: Decimal) -> Decimal {
    base * (dec!(1) + half_width * unit_jitter())
}

/// Uniform random decimal in `[lo, hi)`.
pub fn uniform_between(lo: Decimal, hi: Decimal) -> Decimal {
    let r: f64 = rand::rng().random_range(0.0..1.0);
    lo + (hi - lo) * Decimal::from_f64(r).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_in_band() {
        for _ in 0..1000 {
            let u = unit_jitter();
            assert!(u >= dec!(-1) && u < dec!(1));
        }
    }

    #[test]
    fn jittered_stays_within_half_width() {
        let base = dec!(1000);
        let hw = dec!(0.005);
        for _ in 0..1000 {
            let v = jittered(base, hw);
            assert!(v >= base * (dec!(1) - hw));
            assert!(v <= base * (dec!(1) + hw));
        }
    }

    #[test]
    fn uniform_between_respects_bounds() {
        for _ in 0..1000 {
            let v = uniform_between(dec!(5), dec!(9));
            assert!(v >= dec!(5) && v < dec!(9));
        }
    }
}
