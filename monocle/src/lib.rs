//! Client layer for Cosmos SDK chains: per chain endpoints with their own keyring and transport,
//! IBC denom resolution, balance aggregation across chains, and a sign and broadcast pipeline.
pub use chain::{
    config::ChainClientConfig,
    endpoint::ChainEndpoint,
    registry::ChainRegistry,
    transport::{ChainTransport, GrpcTransport},
};
pub use error::ChainClientError;

pub mod account;
pub mod address;
pub mod aggregator;
pub mod chain;
pub mod coin;
pub mod denom;
pub mod error;
pub mod keyring;
pub mod node;
pub mod tx;
mod utils;
