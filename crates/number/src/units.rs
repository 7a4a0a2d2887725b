use alloy::primitives::{U256, utils::Unit};

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }

    /// Scales the amount by `10^decimals`. Returns `None` on overflow.
    fn checked_units(self, decimals: u8) -> Option<U256> {
        U256::from(10)
            .checked_pow(U256::from(decimals))?
            .checked_mul(self.wei())
    }

    /// Scales the amount by `10^decimals`, so `1.units(17)` is 0.1 of an 18
    /// decimals token.
    ///
    /// # Panics
    ///
    /// Panics if the result does not fit into 256 bits.
    fn units(self, decimals: u8) -> U256 {
        self.checked_units(decimals)
            .expect("token amount does not fit into 256 bits")
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}
