pub mod algorithm;
pub mod codec;
pub mod config;
pub mod registry;
pub mod request;
