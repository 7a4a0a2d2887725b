//! Handle to the time weighted average price oracle. The oracle itself lives
//! on chain, the seller only consumes its averages.

use {
    alloy::primitives::{Address, U256},
    std::time::Duration,
};

/// Age range of the oracle observations an average may be computed from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObservationWindow {
    pub min_age: Duration,
    pub max_age: Duration,
}

impl Default for ObservationWindow {
    fn default() -> Self {
        Self {
            min_age: Duration::from_secs(30 * 60),
            max_age: Duration::from_secs(2 * 24 * 60 * 60),
        }
    }
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait PriceOracle {
    /// Time weighted average value of `amount` of `token` in ETH.
    ///
    /// Fails when the oracle has no observation inside the window.
    fn average_eth_for_tokens(
        &self,
        token: Address,
        amount: U256,
        window: ObservationWindow,
    ) -> anyhow::Result<U256>;
}

pub mod test_util {
    use {
        super::{ObservationWindow, PriceOracle},
        alloy::primitives::{Address, U256, utils::Unit},
        anyhow::{Context, Result},
        std::collections::HashMap,
    };

    /// Oracle with fixed averages, in wei per whole (1e18) token.
    #[derive(Clone, Debug, Default)]
    pub struct FakePriceOracle(pub HashMap<Address, U256>);

    impl FakePriceOracle {
        pub fn set_price(&mut self, token: Address, wei_per_token: U256) {
            self.0.insert(token, wei_per_token);
        }
    }

    impl PriceOracle for FakePriceOracle {
        fn average_eth_for_tokens(
            &self,
            token: Address,
            amount: U256,
            _: ObservationWindow,
        ) -> Result<U256> {
            let price = self
                .0
                .get(&token)
                .context("no price found in provided range")?;
            amount
                .checked_mul(*price)
                .map(|value| value / Unit::ETHER.wei())
                .context("average value overflows")
        }
    }
}
