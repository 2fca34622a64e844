//! MonocleCli
//!
//! Command line access to the chains configured in `~/.monocle/config.toml`: keys, balances
//! across chains and simple bank transfers.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod application;
pub mod commands;
pub mod config;
pub mod error;
pub mod prelude;
