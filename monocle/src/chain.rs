pub mod config;
pub mod endpoint;
pub mod registry;
pub mod transport;
