//! Library surface for the gazetop client, re-exported for integration tests.

pub mod app;
pub mod chart;
pub mod demo;
pub mod error;
pub mod feed;
pub mod history;
pub mod logging;
pub mod mqtt;
pub mod profiles;
pub mod types;
pub mod ui;
