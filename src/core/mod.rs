//! Foundational types: currencies and FX rates, accounts, the ledger,
//! transfer requests and the transaction log.

pub mod account;
pub mod currency;
pub mod journal;
pub mod ledger;
pub mod transaction;
