//! Reserve bookkeeping for a single pair. Used to predict what a real pair
//! returns before the trade is submitted against a chain.

use {
    crate::{
        amm::{self, QuoteError, UNISWAP_FEE},
        exchange::Exchange,
    },
    alloy::primitives::{Address, U256},
    num::rational::Ratio,
    std::sync::LazyLock,
};

/// Pairs store their reserves as `uint112`.
static POOL_MAX_RESERVES: LazyLock<U256> = LazyLock::new(|| U256::from((1u128 << 112) - 1));

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reserves {
    pub base: U256,
    pub quote: U256,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Sell the base token for the quote token.
    BaseToQuote,
    /// Sell the quote token for the base token.
    QuoteToBase,
}

impl Direction {
    /// Returns `(reserve_in, reserve_out)` for a trade in this direction.
    fn relative(self, reserves: &Reserves) -> (U256, U256) {
        match self {
            Self::BaseToQuote => (reserves.base, reserves.quote),
            Self::QuoteToBase => (reserves.quote, reserves.base),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PairError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("reserves exceed the capacity of the pair")]
    ReserveOverflow,
}

/// Simulated state of one pair between a base token and a quote token.
///
/// The model has no notion of the chain it mirrors. When a scenario forgets to
/// replay an operation the model diverges silently and the mismatch only shows
/// up in the scenario's assertions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairModel {
    pub address: Address,
    pub base_token: Address,
    pub quote_token: Address,
    reserves: Reserves,
    fee: Ratio<u32>,
}

impl PairModel {
    /// A pair without any liquidity charging the Uniswap fee.
    pub fn new(address: Address, base_token: Address, quote_token: Address) -> Self {
        Self {
            address,
            base_token,
            quote_token,
            reserves: Reserves::default(),
            fee: UNISWAP_FEE,
        }
    }

    /// The empty pair `exchange` deploys for the two tokens.
    pub fn for_exchange(exchange: &Exchange, base_token: Address, quote_token: Address) -> Self {
        Self::new(
            exchange.pair_address(base_token, quote_token),
            base_token,
            quote_token,
        )
    }

    pub fn with_fee(mut self, fee: Ratio<u32>) -> Self {
        self.fee = fee;
        self
    }

    pub fn reserves(&self) -> Reserves {
        self.reserves
    }

    pub fn has_liquidity(&self) -> bool {
        !self.reserves.base.is_zero() && !self.reserves.quote.is_zero()
    }

    /// Deposits both tokens into the pair. No fee is charged and nothing is
    /// paid out.
    pub fn add_liquidity(&mut self, amount_base: U256, amount_quote: U256) -> Result<(), PairError> {
        let reserves = Reserves {
            base: checked_reserve_add(self.reserves.base, amount_base)?,
            quote: checked_reserve_add(self.reserves.quote, amount_quote)?,
        };
        tracing::trace!(pair = ?self.address, %amount_base, %amount_quote, "added liquidity");
        self.reserves = reserves;
        Ok(())
    }

    /// Output of a trade at the current reserves. Does not change the state.
    pub fn quote(&self, direction: Direction, amount_in: U256) -> Result<U256, QuoteError> {
        let (reserve_in, reserve_out) = direction.relative(&self.reserves);
        amm::amount_out(reserve_in, reserve_out, amount_in, self.fee)
    }

    pub fn quote_base_to_quote(&self, amount_in: U256) -> Result<U256, QuoteError> {
        self.quote(Direction::BaseToQuote, amount_in)
    }

    pub fn quote_quote_to_base(&self, amount_in: U256) -> Result<U256, QuoteError> {
        self.quote(Direction::QuoteToBase, amount_in)
    }

    /// Executes a trade against the simulated reserves and returns its
    /// output. The full input, fee included, stays in the pair.
    pub fn apply_trade(&mut self, direction: Direction, amount_in: U256) -> Result<U256, PairError> {
        let amount_out = self.quote(direction, amount_in)?;
        let (reserve_in, reserve_out) = direction.relative(&self.reserves);
        let final_reserve_in = checked_reserve_add(reserve_in, amount_in)?;
        let final_reserve_out = reserve_out
            .checked_sub(amount_out)
            .ok_or(QuoteError::InsufficientReserves)?;

        self.reserves = match direction {
            Direction::BaseToQuote => Reserves {
                base: final_reserve_in,
                quote: final_reserve_out,
            },
            Direction::QuoteToBase => Reserves {
                base: final_reserve_out,
                quote: final_reserve_in,
            },
        };
        tracing::debug!(
            pair = ?self.address,
            ?direction,
            %amount_in,
            %amount_out,
            "applied trade"
        );
        Ok(amount_out)
    }
}

fn checked_reserve_add(reserve: U256, amount: U256) -> Result<U256, PairError> {
    reserve
        .checked_add(amount)
        .filter(|reserve| *reserve <= *POOL_MAX_RESERVES)
        .ok_or(PairError::ReserveOverflow)
}
