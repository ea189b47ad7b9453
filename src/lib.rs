pub mod config;
pub mod coordinator;
pub mod provider;
pub mod snapshot;
pub mod tui;
pub mod views;
