pub mod cache;
pub mod chain;
pub mod error;
pub mod providers;
pub mod registry;
