use {
    alloy::primitives::{Address, U256},
    std::path::PathBuf,
    tracing::level_filters::LevelFilter,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(long, env, default_value = "warn,exit_fee_seller=info,uniswap_v2=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,

    /// Path to a TOML file overriding the mainnet deployment and the default
    /// settings.
    #[clap(long, env)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Prints the deterministic pair address of two tokens on every
    /// configured exchange.
    PairAddress {
        #[clap(long)]
        token_a: Address,

        #[clap(long)]
        token_b: Address,

        /// Only print the address on the exchange with this name.
        #[clap(long)]
        exchange: Option<String>,
    },

    /// Quotes a constant product swap with the Uniswap V2 fee.
    Quote {
        #[clap(long)]
        reserve_in: U256,

        #[clap(long)]
        reserve_out: U256,

        /// Exact amount sold, prints the amount bought.
        #[clap(long, required_unless_present = "amount_out", conflicts_with = "amount_out")]
        amount_in: Option<U256>,

        /// Exact amount bought, prints the amount that needs to be sold.
        #[clap(long)]
        amount_out: Option<U256>,
    },

    /// Prints how ETH and WETH proceeds are split between the treasury and
    /// the dividends distributor.
    Distribute {
        #[clap(long, default_value = "0")]
        eth: U256,

        #[clap(long, default_value = "0")]
        weth: U256,
    },
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
            config,
            command,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "config: {config:?}")?;
        writeln!(f, "command: {command:?}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser, testlib::tokens::{GNO, WETH}};

    #[test]
    fn parses_pair_address() {
        let args = Arguments::try_parse_from([
            "exit-fee-seller",
            "pair-address",
            "--token-a",
            GNO.to_string().as_str(),
            "--token-b",
            WETH.to_string().as_str(),
            "--exchange",
            "sushiswap",
        ])
        .unwrap();
        assert_eq!(args.log_stderr_threshold, LevelFilter::ERROR);
        assert!(!args.use_json_logs);
        assert_eq!(
            args.command,
            Command::PairAddress {
                token_a: GNO,
                token_b: WETH,
                exchange: Some("sushiswap".to_string()),
            }
        );
    }

    #[test]
    fn quote_needs_exactly_one_amount() {
        let base = ["exit-fee-seller", "quote", "--reserve-in", "10", "--reserve-out", "20"];
        assert!(Arguments::try_parse_from(base).is_err());

        let both = base
            .into_iter()
            .chain(["--amount-in", "1", "--amount-out", "1"]);
        assert!(Arguments::try_parse_from(both).is_err());

        let args =
            Arguments::try_parse_from(base.into_iter().chain(["--amount-out", "1"])).unwrap();
        assert_eq!(
            args.command,
            Command::Quote {
                reserve_in: U256::from(10),
                reserve_out: U256::from(20),
                amount_in: None,
                amount_out: Some(U256::from(1)),
            }
        );
    }

    #[test]
    fn distribute_defaults_to_zero() {
        let args = Arguments::try_parse_from([
            "exit-fee-seller",
            "--config",
            "seller.toml",
            "distribute",
            "--weth",
            "5",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("seller.toml")));
        assert_eq!(
            args.command,
            Command::Distribute {
                eth: U256::ZERO,
                weth: U256::from(5),
            }
        );
    }
}
