//! Transfer processing: validation, conversion, atomic commit, and the
//! scheduler for future-dated transfers.

pub mod scheduler;
pub mod state;
pub mod transfer;
