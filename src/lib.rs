pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod policy;
pub mod pools;
pub mod resolver;
pub mod rng;
pub mod types;
