pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::defaults::osmo_sip_connector;
pub use config::registry_file::RegistryFile;
pub use crate::core::{
    registry::AppRegistry, AppCatalog, AppConfigEntry, AppDescriptor, LaunchSpec, VtyEndpoint,
};
pub use utils::error::{AppDescError, Result};
