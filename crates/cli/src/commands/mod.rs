//! Command implementations for the hydroctl CLI

pub mod faults;
pub mod run;
pub mod train;
