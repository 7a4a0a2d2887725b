//! Offline tooling for Uniswap V2 like pairs: the constant product quoting
//! formula, deterministic pair addresses and a reserve tracking pair model.

pub mod amm;
pub mod exchange;
pub mod pair;
pub mod pair_provider;

pub use {
    amm::{QuoteError, UNISWAP_FEE, quote_input, quote_output},
    exchange::Exchange,
    pair::{Direction, PairError, PairModel, Reserves},
    pair_provider::{PairProvider, derive_pool_address},
};
