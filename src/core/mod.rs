pub mod registry;

pub use crate::domain::model::{AppConfigEntry, AppDescriptor, LaunchSpec, VtyEndpoint};
pub use crate::domain::ports::AppCatalog;
pub use crate::utils::error::Result;
