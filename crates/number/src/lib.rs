pub mod u256_ext;
pub mod units;
