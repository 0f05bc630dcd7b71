//! Command implementations for the jobscope CLI
//!
//! Each subcommand lives in its own module with an `Args` struct and an
//! `execute` function.

pub mod config;
pub mod explore;
pub mod extract;
pub mod query;
pub mod skills;
