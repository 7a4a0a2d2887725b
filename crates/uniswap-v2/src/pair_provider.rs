use {
    alloy::primitives::{Address, B256, keccak256},
    model::TokenPair,
    tracing::instrument,
};

/// Computes pair addresses of a Uniswap V2 like factory without talking to a
/// node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairProvider {
    pub factory: Address,
    pub init_code_digest: B256,
}

impl PairProvider {
    #[instrument(skip_all)]
    pub fn pair_address(&self, pair: &TokenPair) -> Address {
        let (token0, token1) = pair.get();
        sorted_pair_address(token0, token1, self.factory, self.init_code_digest)
    }
}

/// The address at which `factory` deploys the pair for `token_a` and
/// `token_b`. The token order does not matter.
///
/// Identical tokens are not rejected here, factories refuse to deploy such a
/// pair so the returned address is never occupied.
pub fn derive_pool_address(
    token_a: Address,
    token_b: Address,
    factory: Address,
    init_code_digest: B256,
) -> Address {
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    sorted_pair_address(token0, token1, factory, init_code_digest)
}

fn sorted_pair_address(
    token0: Address,
    token1: Address,
    factory: Address,
    init_code_digest: B256,
) -> Address {
    // https://docs.uniswap.org/contracts/v2/guides/smart-contract-integration/getting-pair-addresses
    let salt = {
        let mut buffer = [0u8; 40];
        buffer[0..20].copy_from_slice(token0.as_slice());
        buffer[20..40].copy_from_slice(token1.as_slice());
        keccak256(buffer)
    };
    create2_target_address(factory, &salt, &init_code_digest)
}

fn create2_target_address(creator: Address, salt: &B256, init_code_digest: &B256) -> Address {
    let mut preimage = [0xff; 85];
    preimage[1..21].copy_from_slice(creator.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..85].copy_from_slice(init_code_digest.as_slice());
    Address::from_slice(&keccak256(preimage)[12..])
}
