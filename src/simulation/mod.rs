//! Running a treasury over time: the clock, the `Treasury` facade and
//! random workload generation.

pub mod clock;
pub mod treasury;
pub mod workload;
