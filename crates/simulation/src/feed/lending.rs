//! Lending market ticker of the DeFi protocols page

use rand::SeedableRng;
use rand::rngs::StdRng;
use umbra_core::LendingMarket;

use crate::generators::generate_lending_markets;

/// Redraws the whole lending table on every tick
pub struct LendingMarketTicker {
    markets: Vec<LendingMarket>,
    rng: StdRng,
}

impl LendingMarketTicker {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let markets = generate_lending_markets(&mut rng);
        Self { markets, rng }
    }

    pub fn tick(&mut self) -> &[LendingMarket] {
        self.markets = generate_lending_markets(&mut self.rng);
        &self.markets
    }

    pub fn markets(&self) -> &[LendingMarket] {
        &self.markets
    }
}

impl Default for LendingMarketTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_redraws_table() {
        let mut ticker = LendingMarketTicker::with_seed(12);
        let before = ticker.markets().to_vec();

        let after = ticker.tick().to_vec();

        assert_eq!(after.len(), 3);
        assert_ne!(before, after);
        assert_eq!(
            after.iter().map(|m| m.asset.as_str()).collect::<Vec<_>>(),
            vec!["ETH", "USDC", "WBTC"]
        );
    }
}
