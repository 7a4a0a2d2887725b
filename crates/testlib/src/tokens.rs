//! Mainnet addresses of commonly used tokens.

use alloy::primitives::{Address, address};

/// Address for the `WETH` token.
pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// Address for the `GNO` token.
pub const GNO: Address = address!("6810e776880C02933D47DB1b9fc05908e5386b96");

/// Address for the `DAI` token.
pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

/// Address for the `USDC` token.
pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// Index pool tokens that pay their exit fees to the seller.
pub const INDEX_TOKENS: [Address; 7] = [
    address!("126c121f99e1e211df2e5f8de2d96fa36647c855"),
    address!("fa6de2697d59e88ed7fc4dfe5a33dac43565ea41"),
    address!("17ac188e09a7890a1844e5e65471fe8b0ccfadf3"),
    address!("68bb81b3f67f7aab5fd1390ecb0b8e1a806f2465"),
    address!("d3deff001ef67e39212f4973b617c2e684fa436c"),
    address!("abafa52d3d5a2c18a4c1ae24480d22b831fc0413"),
    address!("d6cb2adf47655b1babddc214d79257348cbc39a7"),
];
