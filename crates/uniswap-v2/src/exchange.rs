//! Uniswap V2 compatible exchanges the exit fee seller can route through.

use {
    crate::pair_provider::{PairProvider, derive_pool_address},
    alloy::primitives::{Address, B256, address, b256},
    model::TokenPair,
};

pub const UNISWAP_FACTORY: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
pub const UNISWAP_ROUTER: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
pub const UNISWAP_INIT: B256 =
    b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

pub const SUSHISWAP_FACTORY: Address = address!("C0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac");
pub const SUSHISWAP_ROUTER: Address = address!("d9e1cE17f2641f24aE83637ab66a2cca9C378B9F");
pub const SUSHISWAP_INIT: B256 =
    b256!("e18a34eb0e04b04f7a0ac29a6e80748dca96319b42c54d679cb821dca90c6303");

/// Uniswap V2 (and Uniswap V2 clone) deployment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Exchange {
    /// Human readable name used in logs and on the command line.
    pub name: String,
    /// The address of the factory deploying the pairs.
    pub factory: Address,
    /// The digest of the pair initialization code. This digest is used for
    /// computing the deterministic pair addresses per token pair.
    pub init_code_digest: B256,
    /// The address of the router contract swaps are submitted to.
    pub router: Address,
}

impl Exchange {
    pub fn uniswap_v2() -> Self {
        Self {
            name: "uniswap-v2".to_string(),
            factory: UNISWAP_FACTORY,
            init_code_digest: UNISWAP_INIT,
            router: UNISWAP_ROUTER,
        }
    }

    pub fn sushiswap() -> Self {
        Self {
            name: "sushiswap".to_string(),
            factory: SUSHISWAP_FACTORY,
            init_code_digest: SUSHISWAP_INIT,
            router: SUSHISWAP_ROUTER,
        }
    }

    pub fn pair_provider(&self) -> PairProvider {
        PairProvider {
            factory: self.factory,
            init_code_digest: self.init_code_digest,
        }
    }

    /// Address of this exchange's pair for the two tokens.
    pub fn pair_address(&self, token_a: Address, token_b: Address) -> Address {
        derive_pool_address(token_a, token_b, self.factory, self.init_code_digest)
    }

    pub fn token_pair_address(&self, pair: &TokenPair) -> Address {
        self.pair_provider().pair_address(pair)
    }
}
