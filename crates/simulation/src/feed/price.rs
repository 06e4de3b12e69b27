//! Portfolio value ticker

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Random walk of the dashboard's total value, at most 0.5% per tick
pub struct PriceTicker {
    value: Decimal,
    rng: StdRng,
}

impl PriceTicker {
    pub fn new(initial: Decimal) -> Self {
        Self {
            value: initial,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(initial: Decimal, seed: u64) -> Self {
        Self {
            value: initial,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Restart the walk from `value`
    pub fn reset(&mut self, value: Decimal) {
        self.value = value;
    }

    /// Multiply the value by a factor drawn from [0.995, 1.005]
    pub fn tick(&mut self) -> Decimal {
        let change: f64 = self.rng.gen_range(-0.005..=0.005);
        let factor = Decimal::from_f64(1.0 + change)
            .map(|f| f.round_dp(6))
            .unwrap_or(Decimal::ONE);
        self.value = (self.value * factor).round_dp(2);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_moves_within_band() {
        let mut ticker = PriceTicker::with_seed(dec!(12450.80), 9);
        for _ in 0..500 {
            let before = ticker.value();
            let after = ticker.tick();
            let ratio = after / before;
            assert!(ratio >= dec!(0.9949) && ratio <= dec!(1.0051), "ratio {}", ratio);
        }
    }

    #[test]
    fn test_seeded_tickers_agree() {
        let mut a = PriceTicker::with_seed(dec!(100), 1);
        let mut b = PriceTicker::with_seed(dec!(100), 1);
        for _ in 0..10 {
            assert_eq!(a.tick(), b.tick());
        }
    }
}
