//! TOML configuration. Every field is optional; an empty file describes the
//! mainnet deployment with the default settings.
//!
//! ```toml
//! twap-discount-bips = 500
//! eth-to-treasury-bips = 4000
//!
//! [[exchange]]
//! preset = "uniswap-v2"
//!
//! [[exchange]]
//! name = "fork"
//! factory = "0x..."
//! init-code-digest = "0x..."
//! router = "0x..."
//! ```

use {
    crate::{
        deployment::Deployment,
        settings::{self, Settings},
    },
    alloy::primitives::{Address, B256},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::path::Path,
    uniswap_v2::Exchange,
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_twap_discount_bips")]
    pub twap_discount_bips: u16,

    #[serde(default = "default_eth_to_treasury_bips")]
    pub eth_to_treasury_bips: u16,

    /// Overrides for the mainnet contract addresses.
    pub weth: Option<Address>,
    pub treasury: Option<Address>,
    pub dividends: Option<Address>,

    /// Exchanges in routing priority. Uniswap V2 and SushiSwap when empty.
    #[serde(default, rename = "exchange")]
    pub exchanges: Vec<ExchangeConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged, deny_unknown_fields)]
pub enum ExchangeConfig {
    #[serde(rename_all = "kebab-case")]
    Preset { preset: ExchangePreset },

    #[serde(rename_all = "kebab-case")]
    Manual {
        name: String,

        /// The Uniswap V2 compatible factory creating the pairs.
        factory: Address,

        /// The digest of the pair initialization code.
        init_code_digest: B256,

        router: Address,
    },
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ExchangePreset {
    UniswapV2,
    Sushiswap,
}

fn default_twap_discount_bips() -> u16 {
    settings::DEFAULT_TWAP_DISCOUNT_BIPS
}

fn default_eth_to_treasury_bips() -> u16 {
    settings::DEFAULT_ETH_TO_TREASURY_BIPS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            twap_discount_bips: default_twap_discount_bips(),
            eth_to_treasury_bips: default_eth_to_treasury_bips(),
            weth: None,
            treasury: None,
            dividends: None,
            exchanges: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("I/O error while reading {path:?}"))?;
        Self::from_toml(&data).with_context(|| format!("invalid config file {path:?}"))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let config: Self = toml::de::from_str(data)?;
        // Surface out of range settings at load time.
        config.settings()?;
        Ok(config)
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings::new(
            self.twap_discount_bips,
            self.eth_to_treasury_bips,
        )?)
    }

    pub fn deployment(&self) -> Deployment {
        let mainnet = Deployment::mainnet();
        let exchanges = if self.exchanges.is_empty() {
            mainnet.exchanges
        } else {
            self.exchanges.iter().map(ExchangeConfig::exchange).collect()
        };
        Deployment {
            weth: self.weth.unwrap_or(mainnet.weth),
            treasury: self.treasury.unwrap_or(mainnet.treasury),
            dividends: self.dividends.unwrap_or(mainnet.dividends),
            exchanges,
        }
    }
}

impl ExchangeConfig {
    fn exchange(&self) -> Exchange {
        match self {
            Self::Preset {
                preset: ExchangePreset::UniswapV2,
            } => Exchange::uniswap_v2(),
            Self::Preset {
                preset: ExchangePreset::Sushiswap,
            } => Exchange::sushiswap(),
            Self::Manual {
                name,
                factory,
                init_code_digest,
                router,
            } => Exchange {
                name: name.clone(),
                factory: *factory,
                init_code_digest: *init_code_digest,
                router: *router,
            },
        }
    }
}
