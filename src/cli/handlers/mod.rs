pub mod config;
pub mod decode;
pub mod encode;
pub mod history;
