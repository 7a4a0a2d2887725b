//! Extension trait for U256 arithmetic operations.

use alloy::primitives::U256;

/// Denominator of basis point values, 10_000 bips are 100%.
pub const BIPS_DENOMINATOR: u16 = 10_000;

/// Extension trait for U256 to add utility methods.
pub trait U256Ext: Sized {
    /// The `bips` share of `self`, rounded down.
    fn checked_mul_bips(&self, bips: u16) -> Option<Self>;

    /// `self` reduced by its `bips` share. The subtracted share is rounded
    /// down, so the result is rounded up.
    fn checked_sub_bips(&self, bips: u16) -> Option<Self>;
}

impl U256Ext for U256 {
    fn checked_mul_bips(&self, bips: u16) -> Option<Self> {
        self.checked_mul(U256::from(bips))?
            .checked_div(U256::from(BIPS_DENOMINATOR))
    }

    fn checked_sub_bips(&self, bips: u16) -> Option<Self> {
        self.checked_sub(self.checked_mul_bips(bips)?)
    }
}
