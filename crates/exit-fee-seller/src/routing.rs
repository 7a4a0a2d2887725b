//! Picks the pair that pays the most for a sale.

use {
    alloy::primitives::{Address, U256},
    tracing::instrument,
    uniswap_v2::{Direction, PairModel, QuoteError},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Route {
    /// Index of the chosen pair in the candidate list.
    pub index: usize,
    pub pair: Address,
    pub direction: Direction,
    pub amount_out: U256,
}

/// Quotes selling `amount_in` of `token_in` for `token_out` on every candidate
/// trading that pair and returns the one with the highest output.
///
/// Candidates without liquidity are skipped. Ties go to the candidate listed
/// first. Returns `None` if no candidate can quote the trade.
#[instrument(skip_all, fields(%token_in, %token_out, %amount_in))]
pub fn best_pair(
    candidates: &[PairModel],
    token_in: Address,
    token_out: Address,
    amount_in: U256,
) -> Result<Option<Route>, QuoteError> {
    let mut best: Option<Route> = None;
    for (index, pair) in candidates.iter().enumerate() {
        let direction = if (pair.base_token, pair.quote_token) == (token_in, token_out) {
            Direction::BaseToQuote
        } else if (pair.base_token, pair.quote_token) == (token_out, token_in) {
            Direction::QuoteToBase
        } else {
            continue;
        };
        let amount_out = match pair.quote(direction, amount_in) {
            Ok(amount_out) => amount_out,
            Err(QuoteError::NoLiquidity) => {
                tracing::debug!(pair = ?pair.address, "skipping pair without liquidity");
                continue;
            }
            Err(err) => return Err(err),
        };
        if best.is_none_or(|best| amount_out > best.amount_out) {
            best = Some(Route {
                index,
                pair: pair.address,
                direction,
                amount_out,
            });
        }
    }
    Ok(best)
}
