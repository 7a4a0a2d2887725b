use {
    crate::{
        arguments::{Arguments, Command},
        config::Config,
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result, anyhow},
    model::TokenPair,
    uniswap_v2::amm,
};

pub fn run(args: Arguments) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    match args.command {
        Command::PairAddress {
            token_a,
            token_b,
            exchange,
        } => pair_address(&config, token_a, token_b, exchange.as_deref()),
        Command::Quote {
            reserve_in,
            reserve_out,
            amount_in,
            amount_out,
        } => {
            let amount = match (amount_in, amount_out) {
                (Some(amount_in), _) => amm::quote_output(reserve_in, reserve_out, amount_in)?,
                (None, Some(amount_out)) => amm::quote_input(reserve_in, reserve_out, amount_out)?,
                (None, None) => return Err(anyhow!("missing amount to quote")),
            };
            println!("{amount}");
            Ok(())
        }
        Command::Distribute { eth, weth } => distribute(&config, eth, weth),
    }
}

fn pair_address(
    config: &Config,
    token_a: Address,
    token_b: Address,
    exchange: Option<&str>,
) -> Result<()> {
    let pair = TokenPair::new(token_a, token_b).context("pair of identical tokens")?;
    let deployment = config.deployment();
    let exchanges = match exchange {
        Some(name) => vec![
            deployment
                .exchange(name)
                .with_context(|| format!("unknown exchange {name:?}"))?,
        ],
        None => deployment.exchanges.iter().collect(),
    };
    for exchange in exchanges {
        println!(
            "{}: {:?} (router {:?})",
            exchange.name,
            exchange.token_pair_address(&pair),
            exchange.router
        );
    }
    Ok(())
}

fn distribute(config: &Config, eth: U256, weth: U256) -> Result<()> {
    let deployment = config.deployment();
    let total = eth.checked_add(weth).context("total proceeds overflow")?;
    let distribution = config
        .settings()?
        .split(total)
        .context("proceeds too large to split")?;
    tracing::debug!(%eth, %weth, "splitting proceeds");
    println!("treasury {:?}: {}", deployment.treasury, distribution.treasury);
    println!(
        "dividends {:?}: {}",
        deployment.dividends, distribution.dividends
    );
    Ok(())
}
