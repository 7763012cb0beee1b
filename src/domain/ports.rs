use crate::domain::model::{AppDescriptor, LaunchSpec};
use crate::utils::error::Result;

/// Read-only view a test harness uses to discover what to launch.
pub trait AppCatalog: Send + Sync {
    fn config_paths(&self, app_name: &str) -> Result<&[String]>;
    fn list_applications(&self) -> &[AppDescriptor];
    fn primary_app(&self) -> Result<&AppDescriptor>;
    fn build_launch_spec(&self, descriptor: &AppDescriptor) -> Result<LaunchSpec>;
}
