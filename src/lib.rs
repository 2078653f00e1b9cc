pub mod bot;
pub mod config;
pub mod context;
pub mod error;
pub mod grok;
pub mod handler;
pub mod history;
pub mod identity;
pub mod mention;
pub mod snippet;

pub use bot::run;
