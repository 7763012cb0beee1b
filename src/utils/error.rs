use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppDescError {
    #[error("Unknown application: {name}")]
    UnknownApplication { name: String },

    #[error("No primary application configured")]
    NoPrimaryConfigured,

    #[error("Application '{app}' has no config paths")]
    MissingConfigPath { app: String },

    #[error("Application '{name}' registered more than once in {field}")]
    DuplicateApplication { field: String, name: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Registry file error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Registry,
    Io,
}

impl AppDescError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownApplication { name: name.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownApplication { .. } => ErrorCategory::Lookup,
            Self::NoPrimaryConfigured
            | Self::MissingConfigPath { .. }
            | Self::DuplicateApplication { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigParse { .. } => ErrorCategory::Registry,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::Io,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::UnknownApplication { name } => format!(
                "Check the spelling of '{}' or run `appdesc list` to see registered applications",
                name
            ),
            Self::NoPrimaryConfigured => {
                "Declare at least one entry under [[apps]] or set `primary`".to_string()
            }
            Self::MissingConfigPath { app } => {
                format!("Add at least one path to app_configs.{}", app)
            }
            Self::DuplicateApplication { field, name } => {
                format!("Remove the duplicate '{}' entry from {}", name, field)
            }
            Self::InvalidConfigValue { field, .. } => format!("Fix the value of `{}`", field),
            Self::ConfigParse { .. } => "Make sure the registry file is valid TOML".to_string(),
            Self::Io(_) => "Make sure the file exists and is readable".to_string(),
            Self::Serialization(_) => "Report this as a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Lookup => format!("Lookup failed: {}", self),
            ErrorCategory::Registry => format!("Registry is misconfigured: {}", self),
            ErrorCategory::Io => format!("Could not read registry: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppDescError>;
