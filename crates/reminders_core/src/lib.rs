pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod scheduler;
pub mod shell;
pub mod store;
pub mod timefmt;
