//! Offline models of the exit fee seller: which pair it sells a collected
//! exit fee on, the minimum output it accepts and how the proceeds are split
//! between the treasury and the dividends distributor.

pub mod arguments;
pub mod config;
pub mod deployment;
pub mod oracle;
pub mod routing;
pub mod seller;
pub mod settings;

mod run;

pub use run::run;
