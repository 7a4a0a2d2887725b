//! Contains models that are shared between the pair tooling and the exit fee
//! seller.

use {alloy::primitives::Address, std::cmp::Ordering};

/// Erc20 token pair specified by two contract addresses.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TokenPair(Address, Address);

impl TokenPair {
    /// Create a new token pair from two addresses.
    /// The addresses must not be the equal.
    pub fn new(token_a: Address, token_b: Address) -> Option<Self> {
        match token_a.cmp(&token_b) {
            Ordering::Less => Some(Self(token_a, token_b)),
            Ordering::Equal => None,
            Ordering::Greater => Some(Self(token_b, token_a)),
        }
    }

    /// The first address is always the lower one.
    /// The addresses are never equal.
    pub fn get(&self) -> (Address, Address) {
        (self.0, self.1)
    }
}
