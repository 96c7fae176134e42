//! TTN Coverage Sync
//!
//! Mirrors gateway coverage alphashapes from the public TTNMapper service
//! into resource files on a CKAN data catalog.

pub mod ckan;
pub mod config;
pub mod error;
pub mod gateway;
pub mod sync;
pub mod ttnmapper;

pub use ckan::CkanClient;
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{Gateway, GatewaySource};
pub use sync::RunSummary;
pub use ttnmapper::TtnMapperClient;
