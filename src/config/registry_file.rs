use crate::core::registry::AppRegistry;
use crate::domain::model::{AppDescriptor, LaunchSpec};
use crate::utils::error::{AppDescError, Result};
use crate::utils::validation::{validate_bind_addr, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk registry declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    pub primary: Option<String>,
    pub vty_bind_addr: Option<String>,
    pub vty_command: Option<Vec<String>>,
    #[serde(default)]
    pub app_configs: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEntry {
    pub port: u16,
    pub executable: String,
    pub label: String,
    pub config: String,
}

impl RegistryFile {
    /// Loads a registry declaration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppDescError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppDescError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppDescError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Builds the registry. Descriptors keep file order; config entries are
    /// keyed and therefore sorted by name.
    pub fn into_registry(self) -> Result<AppRegistry> {
        let mut builder = AppRegistry::builder();
        for (name, paths) in self.app_configs {
            builder = builder.app_config(name, paths);
        }
        for app in self.apps {
            builder = builder.app(AppDescriptor::new(
                app.port,
                app.executable,
                app.label,
                app.config,
            ));
        }
        if let Some(primary) = self.primary {
            builder = builder.primary(primary);
        }
        if let Some(cmd) = self.vty_command {
            builder = builder.vty_command(LaunchSpec::new(cmd));
        }
        if let Some(addr) = self.vty_bind_addr.as_deref() {
            builder = builder.vty_bind_addr(validate_bind_addr("vty_bind_addr", addr)?);
        }
        builder.build()
    }
}

impl Validate for RegistryFile {
    /// Checks what only the file format carries; descriptor rules are enforced by the builder.
    fn validate(&self) -> Result<()> {
        if let Some(addr) = &self.vty_bind_addr {
            validate_bind_addr("vty_bind_addr", addr)?;
        }
        Ok(())
    }
}

impl AppRegistry {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading registry from {}", path.display());
        RegistryFile::from_file(path)?.into_registry()
    }
}
