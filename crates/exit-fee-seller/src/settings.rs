use {
    alloy::primitives::U256,
    number::u256_ext::{BIPS_DENOMINATOR, U256Ext},
};

pub const DEFAULT_TWAP_DISCOUNT_BIPS: u16 = 500;
pub const MAX_TWAP_DISCOUNT_BIPS: u16 = 1_000;
pub const DEFAULT_ETH_TO_TREASURY_BIPS: u16 = 4_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("can not set discount above 10% ({0} bips)")]
    DiscountTooHigh(u16),
    #[error("can not set treasury share above 100% ({0} bips)")]
    TreasuryShareTooHigh(u16),
}

/// Owner controlled parameters of the seller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    twap_discount_bips: u16,
    eth_to_treasury_bips: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            twap_discount_bips: DEFAULT_TWAP_DISCOUNT_BIPS,
            eth_to_treasury_bips: DEFAULT_ETH_TO_TREASURY_BIPS,
        }
    }
}

/// How WETH proceeds are split.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Distribution {
    pub treasury: U256,
    pub dividends: U256,
}

impl Settings {
    pub fn new(twap_discount_bips: u16, eth_to_treasury_bips: u16) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.set_twap_discount_bips(twap_discount_bips)?;
        settings.set_eth_to_treasury_bips(eth_to_treasury_bips)?;
        Ok(settings)
    }

    pub fn twap_discount_bips(&self) -> u16 {
        self.twap_discount_bips
    }

    pub fn eth_to_treasury_bips(&self) -> u16 {
        self.eth_to_treasury_bips
    }

    pub fn set_twap_discount_bips(&mut self, bips: u16) -> Result<(), SettingsError> {
        if bips > MAX_TWAP_DISCOUNT_BIPS {
            return Err(SettingsError::DiscountTooHigh(bips));
        }
        self.twap_discount_bips = bips;
        Ok(())
    }

    pub fn set_eth_to_treasury_bips(&mut self, bips: u16) -> Result<(), SettingsError> {
        if bips > BIPS_DENOMINATOR {
            return Err(SettingsError::TreasuryShareTooHigh(bips));
        }
        self.eth_to_treasury_bips = bips;
        Ok(())
    }

    /// The lowest output accepted for a sale whose oracle value is
    /// `average`.
    pub fn minimum_amount_out(&self, average: U256) -> Option<U256> {
        average.checked_sub_bips(self.twap_discount_bips)
    }

    /// Treasury share rounds down, the dividends receive the rest.
    pub fn split(&self, total: U256) -> Option<Distribution> {
        let treasury = total.checked_mul_bips(self.eth_to_treasury_bips)?;
        Some(Distribution {
            treasury,
            dividends: total - treasury,
        })
    }
}
