//! Contracts the seller interacts with. Passed explicitly to everything that
//! needs them instead of living in globals.

use {
    alloy::primitives::{Address, address},
    uniswap_v2::{Exchange, PairModel},
};

pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const TREASURY: Address = address!("78a3eF33cF033381FEB43ba4212f2Af5A5A0a2EA");
/// The dividends distributing token (DNDX).
pub const DIVIDENDS: Address = address!("262cd9ADCE436B6827C01291B84f1871FB8b95A3");

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deployment {
    pub weth: Address,
    pub treasury: Address,
    pub dividends: Address,
    /// Exchanges in routing priority. On equal output the earlier exchange
    /// wins.
    pub exchanges: Vec<Exchange>,
}

impl Deployment {
    pub fn mainnet() -> Self {
        Self {
            weth: WETH,
            treasury: TREASURY,
            dividends: DIVIDENDS,
            exchanges: vec![Exchange::uniswap_v2(), Exchange::sushiswap()],
        }
    }

    pub fn exchange(&self, name: &str) -> Option<&Exchange> {
        self.exchanges
            .iter()
            .find(|exchange| exchange.name.eq_ignore_ascii_case(name))
    }

    /// Empty `token`/WETH pair models on every exchange, in routing priority.
    pub fn weth_pairs(&self, token: Address) -> Vec<PairModel> {
        self.exchanges
            .iter()
            .map(|exchange| PairModel::for_exchange(exchange, token, self.weth))
            .collect()
    }
}
