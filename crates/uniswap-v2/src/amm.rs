//! Constant product pricing with a proportional fee, as implemented by the
//! `UniswapV2Library` of the periphery contracts.

use {alloy::primitives::U256, num::rational::Ratio};

/// The 0.3% fee charged by Uniswap V2 and SushiSwap pairs.
pub const UNISWAP_FEE: Ratio<u32> = Ratio::new_raw(3, 1000);

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("pool has no liquidity")]
    NoLiquidity,
    #[error("pool reserves are insufficient for the requested output")]
    InsufficientReserves,
    #[error("fee must be a fraction smaller than one")]
    InvalidFee,
    #[error("arithmetic overflow")]
    Overflow,
}

/// Given an input amount, returns the output amount a pool with the Uniswap
/// fee returns for the given reserves.
///
/// https://github.com/Uniswap/uniswap-v2-periphery/blob/master/contracts/libraries/UniswapV2Library.sol#L43
pub fn quote_output(
    reserve_in: U256,
    reserve_out: U256,
    amount_in: U256,
) -> Result<U256, QuoteError> {
    amount_out(reserve_in, reserve_out, amount_in, UNISWAP_FEE)
}

/// Given an output amount, returns the minimal input amount a pool with the
/// Uniswap fee requires for the given reserves.
///
/// https://github.com/Uniswap/uniswap-v2-periphery/blob/master/contracts/libraries/UniswapV2Library.sol#L53
pub fn quote_input(
    reserve_in: U256,
    reserve_out: U256,
    amount_out: U256,
) -> Result<U256, QuoteError> {
    amount_in(reserve_in, reserve_out, amount_out, UNISWAP_FEE)
}

/// Output amount for an arbitrary proportional `fee`. The fee is deducted
/// from the input before pricing and every division rounds down.
pub fn amount_out(
    reserve_in: U256,
    reserve_out: U256,
    amount_in: U256,
    fee: Ratio<u32>,
) -> Result<U256, QuoteError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::NoLiquidity);
    }
    if amount_in.is_zero() {
        return Ok(U256::ZERO);
    }
    let (multiplier, denominator) = fee_factors(fee)?;

    let amount_in_with_fee = amount_in
        .checked_mul(multiplier)
        .ok_or(QuoteError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(QuoteError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(denominator)
        .and_then(|value| value.checked_add(amount_in_with_fee))
        .ok_or(QuoteError::Overflow)?;
    Ok(numerator / denominator)
}

/// Input amount for an arbitrary proportional `fee`. Rounds up so that
/// selling the returned amount yields at least `amount_out`.
pub fn amount_in(
    reserve_in: U256,
    reserve_out: U256,
    amount_out: U256,
    fee: Ratio<u32>,
) -> Result<U256, QuoteError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::NoLiquidity);
    }
    if amount_out.is_zero() {
        return Ok(U256::ZERO);
    }
    if amount_out >= reserve_out {
        return Err(QuoteError::InsufficientReserves);
    }
    let (multiplier, denominator) = fee_factors(fee)?;

    let numerator = reserve_in
        .checked_mul(amount_out)
        .and_then(|value| value.checked_mul(denominator))
        .ok_or(QuoteError::Overflow)?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(multiplier)
        .ok_or(QuoteError::Overflow)?;
    if denominator.is_zero() {
        return Err(QuoteError::InvalidFee);
    }
    (numerator / denominator)
        .checked_add(U256::ONE)
        .ok_or(QuoteError::Overflow)
}

/// Splits the fee into the input multiplier (`denom - numer`) and the
/// denominator used by the formula.
fn fee_factors(fee: Ratio<u32>) -> Result<(U256, U256), QuoteError> {
    let multiplier = fee
        .denom()
        .checked_sub(*fee.numer())
        .ok_or(QuoteError::InvalidFee)?;
    Ok((U256::from(multiplier), U256::from(*fee.denom())))
}
