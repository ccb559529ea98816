//! CLI command implementations.

pub mod config;
pub mod credential;
pub mod expenses;
pub mod purchase;
pub mod reset;
pub mod scan;
pub mod status;
pub mod tier;
