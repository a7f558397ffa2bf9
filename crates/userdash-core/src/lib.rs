//! Core userdash library (API client, state store, flows, config).

pub mod api;
pub mod config;
pub mod flows;
pub mod logging;
pub mod router;
pub mod storage;
pub mod store;
