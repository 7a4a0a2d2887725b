use {
    crate::{
        oracle::{ObservationWindow, PriceOracle},
        routing::{self, Route},
        settings::{Distribution, Settings, SettingsError},
    },
    alloy::primitives::{Address, U256},
    std::collections::HashMap,
    tracing::instrument,
    uniswap_v2::{PairError, PairModel},
};

#[derive(Debug, thiserror::Error)]
pub enum SellError {
    #[error("caller {0} is not the owner")]
    NotOwner(Address),
    #[error("can not sell WETH")]
    CannotSellWeth,
    #[error("nothing to sell")]
    ZeroAmount,
    #[error("insufficient balance: {balance} held, {requested} requested")]
    InsufficientBalance { balance: U256, requested: U256 },
    #[error("no pair with liquidity for {0}")]
    NoLiquidity(Address),
    #[error("insufficient output: {amount_out} is below the minimum of {minimum}")]
    InsufficientOutput { amount_out: U256, minimum: U256 },
    #[error("price oracle: {0:#}")]
    Oracle(anyhow::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pair(#[from] PairError),
    #[error("arithmetic overflow")]
    Overflow,
}

/// A completed sale of a collected exit fee.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sale {
    pub pair: Address,
    pub token: Address,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// Result of distributing the WETH held by the seller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Proceeds {
    /// ETH that was wrapped before distributing.
    pub wrapped: U256,
    pub distribution: Distribution,
}

/// Token balances keyed by token, `Address::ZERO` standing for ETH.
#[derive(Clone, Debug, Default)]
struct Balances(HashMap<Address, U256>);

impl Balances {
    fn get(&self, token: Address) -> U256 {
        self.0.get(&token).copied().unwrap_or_default()
    }

    fn set(&mut self, token: Address, amount: U256) {
        if amount.is_zero() {
            self.0.remove(&token);
        } else {
            self.0.insert(token, amount);
        }
    }

    fn checked_credit(&self, token: Address, amount: U256) -> Result<U256, SellError> {
        self.get(token)
            .checked_add(amount)
            .ok_or(SellError::Overflow)
    }
}

/// Book keeping model of the exit fee seller contract and its owner.
///
/// Pairs are owned by the calling scenario and handed in per call so that
/// trades from other actors can be replayed on them in between. Every
/// operation either commits all of its state changes or none.
pub struct ExitFeeSeller<O> {
    owner: Address,
    weth: Address,
    oracle: O,
    window: ObservationWindow,
    settings: Settings,
    balances: Balances,
    owner_balances: Balances,
}

impl<O: PriceOracle> ExitFeeSeller<O> {
    pub fn new(owner: Address, weth: Address, oracle: O, settings: Settings) -> Self {
        Self {
            owner,
            weth,
            oracle,
            window: ObservationWindow::default(),
            settings,
            balances: Balances::default(),
            owner_balances: Balances::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_twap_discount_bips(&mut self, caller: Address, bips: u16) -> Result<(), SellError> {
        self.ensure_owner(caller)?;
        Ok(self.settings.set_twap_discount_bips(bips)?)
    }

    pub fn set_eth_to_treasury_bips(
        &mut self,
        caller: Address,
        bips: u16,
    ) -> Result<(), SellError> {
        self.ensure_owner(caller)?;
        Ok(self.settings.set_eth_to_treasury_bips(bips)?)
    }

    pub fn balance(&self, token: Address) -> U256 {
        self.balances.get(token)
    }

    pub fn owner_balance(&self, token: Address) -> U256 {
        self.owner_balances.get(token)
    }

    /// Credits a transfer to the seller. Exit fees arrive this way.
    pub fn receive(&mut self, token: Address, amount: U256) -> Result<(), SellError> {
        let balance = self.balances.checked_credit(token, amount)?;
        self.balances.set(token, balance);
        Ok(())
    }

    /// Credits a transfer to the owner's account.
    pub fn receive_by_owner(&mut self, token: Address, amount: U256) -> Result<(), SellError> {
        let balance = self.owner_balances.checked_credit(token, amount)?;
        self.owner_balances.set(token, balance);
        Ok(())
    }

    /// Moves the owner's whole balance of each token to the seller. Returns
    /// the moved amounts, tokens the owner does not hold are left out.
    pub fn take_tokens_from_owner(
        &mut self,
        caller: Address,
        tokens: &[Address],
    ) -> Result<Vec<(Address, U256)>, SellError> {
        self.ensure_owner(caller)?;
        let moved = Self::move_balances(&mut self.owner_balances, &mut self.balances, tokens)?;
        tracing::debug!(?moved, "took tokens from owner");
        Ok(moved)
    }

    /// Moves the seller's whole balance of each token back to the owner.
    pub fn return_tokens(
        &mut self,
        caller: Address,
        tokens: &[Address],
    ) -> Result<Vec<(Address, U256)>, SellError> {
        self.ensure_owner(caller)?;
        let moved = Self::move_balances(&mut self.balances, &mut self.owner_balances, tokens)?;
        tracing::debug!(?moved, "returned tokens to owner");
        Ok(moved)
    }

    /// Oracle value of `amount` reduced by the configured discount.
    pub fn minimum_amount_out(&self, token: Address, amount: U256) -> Result<U256, SellError> {
        let average = self
            .oracle
            .average_eth_for_tokens(token, amount, self.window)
            .map_err(SellError::Oracle)?;
        self.settings
            .minimum_amount_out(average)
            .ok_or(SellError::Overflow)
    }

    /// Pair paying the most WETH for `amount` of `token`.
    pub fn best_pair(
        &self,
        pairs: &[PairModel],
        token: Address,
        amount: U256,
    ) -> Result<Route, SellError> {
        routing::best_pair(pairs, token, self.weth, amount)
            .map_err(PairError::from)?
            .ok_or(SellError::NoLiquidity(token))
    }

    /// Sells `amount` of `token` for WETH on the best pair, refusing to sell
    /// below the oracle based minimum.
    #[instrument(skip(self, pairs))]
    pub fn sell(
        &mut self,
        pairs: &mut [PairModel],
        token: Address,
        amount: U256,
    ) -> Result<Sale, SellError> {
        if token == self.weth {
            return Err(SellError::CannotSellWeth);
        }
        if amount.is_zero() {
            return Err(SellError::ZeroAmount);
        }
        let balance = self.balance(token);
        if amount > balance {
            return Err(SellError::InsufficientBalance {
                balance,
                requested: amount,
            });
        }

        let minimum = self.minimum_amount_out(token, amount)?;
        let route = self.best_pair(pairs, token, amount)?;
        if route.amount_out < minimum {
            return Err(SellError::InsufficientOutput {
                amount_out: route.amount_out,
                minimum,
            });
        }
        let weth_balance = self.balances.checked_credit(self.weth, route.amount_out)?;

        let amount_out = pairs[route.index].apply_trade(route.direction, amount)?;
        debug_assert_eq!(amount_out, route.amount_out);
        self.balances.set(token, balance - amount);
        self.balances.set(self.weth, weth_balance);
        tracing::info!(pair = ?route.pair, %amount_out, %minimum, "sold exit fee");
        Ok(Sale {
            pair: route.pair,
            token,
            amount_in: amount,
            amount_out,
        })
    }

    /// Sells the seller's entire balance of `token`.
    pub fn sell_all(&mut self, pairs: &mut [PairModel], token: Address) -> Result<Sale, SellError> {
        if token == self.weth {
            return Err(SellError::CannotSellWeth);
        }
        let amount = self.balance(token);
        self.sell(pairs, token, amount)
    }

    /// Wraps all ETH and splits the WETH balance between the treasury and the
    /// dividends distributor.
    #[instrument(skip(self))]
    pub fn distribute(&mut self) -> Result<Proceeds, SellError> {
        let wrapped = self.balance(Address::ZERO);
        let total = self.balances.checked_credit(self.weth, wrapped)?;
        let distribution = self.settings.split(total).ok_or(SellError::Overflow)?;

        self.balances.set(Address::ZERO, U256::ZERO);
        self.balances.set(self.weth, U256::ZERO);
        tracing::info!(
            %wrapped,
            treasury = %distribution.treasury,
            dividends = %distribution.dividends,
            "distributed proceeds"
        );
        Ok(Proceeds {
            wrapped,
            distribution,
        })
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), SellError> {
        if caller != self.owner {
            return Err(SellError::NotOwner(caller));
        }
        Ok(())
    }

    /// Moves whole balances from `from` to `to`. Nothing moves if any credit
    /// overflows.
    fn move_balances(
        from: &mut Balances,
        to: &mut Balances,
        tokens: &[Address],
    ) -> Result<Vec<(Address, U256)>, SellError> {
        let mut moved = Vec::new();
        let mut credited = Vec::new();
        for &token in tokens {
            let amount = from.get(token);
            if amount.is_zero() || moved.iter().any(|(seen, _)| *seen == token) {
                continue;
            }
            credited.push(to.checked_credit(token, amount)?);
            moved.push((token, amount));
        }
        for (&(token, _), balance) in moved.iter().zip(credited) {
            from.set(token, U256::ZERO);
            to.set(token, balance);
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::oracle::MockPriceOracle,
        mockall::predicate::{always, eq},
    };

    const OWNER: Address = Address::with_last_byte(0xaa);
    const STRANGER: Address = Address::with_last_byte(0xbb);
    const TOKEN: Address = Address::with_last_byte(1);
    const WETH: Address = Address::with_last_byte(2);

    fn seller(oracle: MockPriceOracle) -> ExitFeeSeller<MockPriceOracle> {
        ExitFeeSeller::new(OWNER, WETH, oracle, Settings::default())
    }

    fn pairs() -> Vec<PairModel> {
        [10, 11]
            .into_iter()
            .map(|address| {
                let mut pair = PairModel::new(Address::with_last_byte(address), TOKEN, WETH);
                pair.add_liquidity(U256::from(1_000_000), U256::from(1_000_000))
                    .unwrap();
                pair
            })
            .collect()
    }

    fn oracle_valuing(amount: u64, value: u64) -> MockPriceOracle {
        let mut oracle = MockPriceOracle::new();
        oracle
            .expect_average_eth_for_tokens()
            .with(eq(TOKEN), eq(U256::from(amount)), always())
            .returning(move |_, _, _| Ok(U256::from(value)));
        oracle
    }

    #[test]
    fn refuses_to_sell_weth() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive(WETH, U256::from(10)).unwrap();
        assert!(matches!(
            seller.sell(&mut pairs(), WETH, U256::from(10)),
            Err(SellError::CannotSellWeth)
        ));
        assert!(matches!(
            seller.sell_all(&mut pairs(), WETH),
            Err(SellError::CannotSellWeth)
        ));
    }

    #[test]
    fn sells_on_best_pair() {
        let mut seller = seller(oracle_valuing(1000, 1000));
        seller.receive(TOKEN, U256::from(1000)).unwrap();
        let mut pairs = pairs();
        pairs[0]
            .apply_trade(uniswap_v2::Direction::BaseToQuote, U256::from(10_000))
            .unwrap();
        let expected = pairs[1].quote_base_to_quote(U256::from(1000)).unwrap();

        let sale = seller.sell(&mut pairs, TOKEN, U256::from(1000)).unwrap();
        assert_eq!(sale.pair, Address::with_last_byte(11));
        assert_eq!(sale.amount_out, expected);
        assert_eq!(seller.balance(TOKEN), U256::ZERO);
        assert_eq!(seller.balance(WETH), expected);
        assert_eq!(pairs[1].reserves().base, U256::from(1_001_000));
    }

    #[test]
    fn enforces_minimum_output() {
        // 1000 tokens are worth 1100 wei according to the oracle, the pair
        // only pays 996 which is below 95% of that.
        let mut seller = seller(oracle_valuing(1000, 1100));
        seller.receive(TOKEN, U256::from(1000)).unwrap();
        let mut pairs = pairs();
        let before = pairs.clone();
        let err = seller.sell(&mut pairs, TOKEN, U256::from(1000)).unwrap_err();
        assert!(matches!(
            err,
            SellError::InsufficientOutput { amount_out, minimum }
                if amount_out == U256::from(996) && minimum == U256::from(1045)
        ));
        assert_eq!(pairs, before);
        assert_eq!(seller.balance(TOKEN), U256::from(1000));
    }

    #[test]
    fn failed_sale_changes_nothing() {
        let mut seller = seller(oracle_valuing(1000, 1000));
        seller.receive(TOKEN, U256::from(1000)).unwrap();
        seller.receive(WETH, U256::MAX).unwrap();
        let mut pairs = pairs();
        let before = pairs.clone();

        assert!(matches!(
            seller.sell(&mut pairs, TOKEN, U256::from(1000)),
            Err(SellError::Overflow)
        ));
        assert_eq!(pairs, before);
        assert_eq!(seller.balance(TOKEN), U256::from(1000));
        assert_eq!(seller.balance(WETH), U256::MAX);
    }

    #[test]
    fn forwards_oracle_errors() {
        let mut oracle = MockPriceOracle::new();
        oracle
            .expect_average_eth_for_tokens()
            .returning(|_, _, _| Err(anyhow::anyhow!("no price found in provided range")));
        let seller = seller(oracle);
        assert!(matches!(
            seller.minimum_amount_out(TOKEN, U256::from(1)),
            Err(SellError::Oracle(_))
        ));
    }

    #[test]
    fn checks_balance() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive(TOKEN, U256::from(5)).unwrap();
        assert!(matches!(
            seller.sell(&mut pairs(), TOKEN, U256::from(6)),
            Err(SellError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            seller.sell_all(&mut pairs(), Address::with_last_byte(3)),
            Err(SellError::ZeroAmount)
        ));
    }

    #[test]
    fn no_liquidity() {
        let mut seller = seller(oracle_valuing(10, 1));
        seller.receive(TOKEN, U256::from(10)).unwrap();
        let mut pairs = vec![PairModel::new(Address::with_last_byte(10), TOKEN, WETH)];
        assert!(matches!(
            seller.sell(&mut pairs, TOKEN, U256::from(10)),
            Err(SellError::NoLiquidity(TOKEN))
        ));
    }

    #[test]
    fn settings_are_owner_only() {
        let mut seller = seller(MockPriceOracle::new());
        assert!(matches!(
            seller.set_twap_discount_bips(STRANGER, 1),
            Err(SellError::NotOwner(STRANGER))
        ));
        assert!(matches!(
            seller.set_eth_to_treasury_bips(STRANGER, 1),
            Err(SellError::NotOwner(STRANGER))
        ));
        assert_eq!(seller.settings(), &Settings::default());

        assert!(matches!(
            seller.set_twap_discount_bips(OWNER, 1001),
            Err(SellError::Settings(SettingsError::DiscountTooHigh(1001)))
        ));
        seller.set_twap_discount_bips(OWNER, 1000).unwrap();
        seller.set_eth_to_treasury_bips(OWNER, 5000).unwrap();
        assert_eq!(seller.settings().twap_discount_bips(), 1000);
        assert_eq!(seller.settings().eth_to_treasury_bips(), 5000);
    }

    #[test]
    fn takes_whole_owner_balances() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive_by_owner(TOKEN, U256::from(5)).unwrap();
        seller.receive(TOKEN, U256::from(1)).unwrap();

        assert!(matches!(
            seller.take_tokens_from_owner(STRANGER, &[TOKEN]),
            Err(SellError::NotOwner(STRANGER))
        ));
        assert_eq!(
            seller.take_tokens_from_owner(OWNER, &[TOKEN, WETH]).unwrap(),
            vec![(TOKEN, U256::from(5))]
        );
        assert_eq!(seller.owner_balance(TOKEN), U256::ZERO);
        assert_eq!(seller.balance(TOKEN), U256::from(6));

        // Owner holds nothing anymore.
        assert!(
            seller
                .take_tokens_from_owner(OWNER, &[TOKEN])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn returns_tokens_to_owner() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive(TOKEN, U256::from(5)).unwrap();
        seller.receive(Address::ZERO, U256::from(7)).unwrap();

        assert!(matches!(
            seller.return_tokens(STRANGER, &[TOKEN]),
            Err(SellError::NotOwner(STRANGER))
        ));
        assert_eq!(seller.balance(TOKEN), U256::from(5));

        assert_eq!(
            seller
                .return_tokens(OWNER, &[TOKEN, Address::ZERO, WETH, TOKEN])
                .unwrap(),
            vec![(TOKEN, U256::from(5)), (Address::ZERO, U256::from(7))]
        );
        assert_eq!(seller.balance(TOKEN), U256::ZERO);
        assert_eq!(seller.owner_balance(TOKEN), U256::from(5));
        assert_eq!(seller.owner_balance(Address::ZERO), U256::from(7));
        assert!(seller.return_tokens(OWNER, &[TOKEN]).unwrap().is_empty());
    }

    #[test]
    fn overflowing_return_moves_nothing() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive(TOKEN, U256::from(5)).unwrap();
        seller.receive(WETH, U256::from(1)).unwrap();
        seller.receive_by_owner(WETH, U256::MAX).unwrap();

        assert!(matches!(
            seller.return_tokens(OWNER, &[TOKEN, WETH]),
            Err(SellError::Overflow)
        ));
        assert_eq!(seller.balance(TOKEN), U256::from(5));
        assert_eq!(seller.owner_balance(TOKEN), U256::ZERO);
    }

    #[test]
    fn distributes_without_balance() {
        let mut seller = seller(MockPriceOracle::new());
        assert_eq!(
            seller.distribute().unwrap(),
            Proceeds {
                wrapped: U256::ZERO,
                distribution: Distribution {
                    treasury: U256::ZERO,
                    dividends: U256::ZERO,
                },
            }
        );
    }

    #[test]
    fn failed_distribution_keeps_balances() {
        let mut seller = seller(MockPriceOracle::new());
        seller.receive(Address::ZERO, U256::from(1)).unwrap();
        seller.receive(WETH, U256::MAX).unwrap();

        assert!(matches!(seller.distribute(), Err(SellError::Overflow)));
        assert_eq!(seller.balance(Address::ZERO), U256::from(1));
        assert_eq!(seller.balance(WETH), U256::MAX);
    }
}
