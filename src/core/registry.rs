use crate::core::AppCatalog;
use crate::domain::model::{
    AppConfigEntry, AppDescriptor, LaunchSpec, VtyEndpoint, CONFIG_FLAG, DEFAULT_VTY_BIND_ADDR,
};
use crate::utils::error::{AppDescError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_port, validate_unique,
};
use serde::Serialize;
use std::net::IpAddr;

/// Immutable set of applications a harness may launch.
///
/// Built once through [`RegistryBuilder`], which rejects descriptors pointing
/// at unknown config keys, so every lookup after construction only has to
/// deal with names supplied by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AppRegistry {
    app_configs: Vec<AppConfigEntry>,
    apps: Vec<AppDescriptor>,
    #[serde(skip)]
    primary: Option<usize>,
    vty_command: Option<LaunchSpec>,
    vty_bind_addr: IpAddr,
}

impl AppRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with no entries and no primary app.
    pub fn empty() -> Self {
        Self {
            app_configs: Vec::new(),
            apps: Vec::new(),
            primary: None,
            vty_command: None,
            vty_bind_addr: DEFAULT_VTY_BIND_ADDR,
        }
    }

    pub fn config_entries(&self) -> &[AppConfigEntry] {
        &self.app_configs
    }

    fn config_entry(&self, app_name: &str) -> Result<&AppConfigEntry> {
        self.app_configs
            .iter()
            .find(|entry| entry.name == app_name)
            .ok_or_else(|| AppDescError::unknown(app_name))
    }

    /// Finds a descriptor by its config name, falling back to its label.
    pub fn descriptor(&self, name: &str) -> Result<&AppDescriptor> {
        self.apps
            .iter()
            .find(|app| app.config_name == name)
            .or_else(|| self.apps.iter().find(|app| app.label == name))
            .ok_or_else(|| AppDescError::unknown(name))
    }

    /// Command for interactive sessions: the explicit override when declared,
    /// otherwise the primary app's launch spec.
    pub fn vty_command(&self) -> Result<LaunchSpec> {
        if let Some(cmd) = &self.vty_command {
            return Ok(cmd.clone());
        }
        let primary = self.primary_app()?;
        self.build_launch_spec(primary)
    }

    pub fn vty_bind_addr(&self) -> IpAddr {
        self.vty_bind_addr
    }

    pub fn vty_endpoint(&self, descriptor: &AppDescriptor) -> VtyEndpoint {
        VtyEndpoint {
            bind_addr: self.vty_bind_addr,
            port: descriptor.port,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Dump<'a> {
            #[serde(flatten)]
            registry: &'a AppRegistry,
            primary: Option<&'a str>,
        }

        let dump = Dump {
            registry: self,
            primary: self.primary_app().ok().map(|app| app.config_name.as_str()),
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }
}

impl AppCatalog for AppRegistry {
    fn config_paths(&self, app_name: &str) -> Result<&[String]> {
        Ok(&self.config_entry(app_name)?.paths)
    }

    fn list_applications(&self) -> &[AppDescriptor] {
        &self.apps
    }

    fn primary_app(&self) -> Result<&AppDescriptor> {
        self.primary
            .and_then(|idx| self.apps.get(idx))
            .ok_or(AppDescError::NoPrimaryConfigured)
    }

    fn build_launch_spec(&self, descriptor: &AppDescriptor) -> Result<LaunchSpec> {
        let entry = self.config_entry(&descriptor.config_name)?;
        let config_path = entry
            .first_path()
            .ok_or_else(|| AppDescError::MissingConfigPath {
                app: entry.name.clone(),
            })?;

        Ok(LaunchSpec::new(vec![
            descriptor.executable_path.clone(),
            CONFIG_FLAG.to_string(),
            config_path.to_string(),
        ]))
    }
}

/// Collects declarations and validates them in [`RegistryBuilder::build`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    app_configs: Vec<AppConfigEntry>,
    apps: Vec<AppDescriptor>,
    primary: Option<String>,
    vty_command: Option<LaunchSpec>,
    vty_bind_addr: Option<IpAddr>,
}

impl RegistryBuilder {
    pub fn app_config<I, S>(mut self, name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.app_configs.push(AppConfigEntry::new(name, paths));
        self
    }

    pub fn app(mut self, descriptor: AppDescriptor) -> Self {
        self.apps.push(descriptor);
        self
    }

    /// Names the primary app by config name or label. Defaults to the first app.
    pub fn primary(mut self, name: impl Into<String>) -> Self {
        self.primary = Some(name.into());
        self
    }

    pub fn vty_command(mut self, command: LaunchSpec) -> Self {
        self.vty_command = Some(command);
        self
    }

    pub fn vty_bind_addr(mut self, addr: IpAddr) -> Self {
        self.vty_bind_addr = Some(addr);
        self
    }

    pub fn build(self) -> Result<AppRegistry> {
        validate_unique(
            "app_configs",
            self.app_configs.iter().map(|entry| entry.name.as_str()),
        )?;

        for entry in &self.app_configs {
            validate_non_empty_string("app_configs", &entry.name)?;
            if entry.paths.is_empty() {
                tracing::warn!("Application '{}' declares no config paths", entry.name);
            }
            for path in &entry.paths {
                validate_path(&format!("app_configs.{}", entry.name), path)?;
            }
        }

        for app in &self.apps {
            validate_port("apps.port", app.port)?;
            validate_path("apps.executable", &app.executable_path)?;
            validate_non_empty_string("apps.label", &app.label)?;
            if !self.app_configs.iter().any(|entry| entry.name == app.config_name) {
                return Err(AppDescError::unknown(&app.config_name));
            }
        }

        if let Some(cmd) = &self.vty_command {
            match cmd.program() {
                Some(program) => validate_path("vty_command", program)?,
                None => {
                    return Err(AppDescError::InvalidConfigValue {
                        field: "vty_command".to_string(),
                        value: String::new(),
                        reason: "Command cannot be empty".to_string(),
                    })
                }
            }
        }

        let primary = match &self.primary {
            Some(name) => Some(
                self.apps
                    .iter()
                    .position(|app| app.config_name == *name)
                    .or_else(|| self.apps.iter().position(|app| app.label == *name))
                    .ok_or_else(|| AppDescError::unknown(name))?,
            ),
            None if self.apps.is_empty() => None,
            None => Some(0),
        };

        tracing::debug!(
            "Built registry with {} config entries, {} apps, primary {:?}",
            self.app_configs.len(),
            self.apps.len(),
            primary.map(|idx| &self.apps[idx].label)
        );

        Ok(AppRegistry {
            app_configs: self.app_configs,
            apps: self.apps,
            primary,
            vty_command: self.vty_command,
            vty_bind_addr: self.vty_bind_addr.unwrap_or(DEFAULT_VTY_BIND_ADDR),
        })
    }
}
