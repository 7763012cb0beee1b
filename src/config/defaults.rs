use crate::core::registry::AppRegistry;
use crate::domain::model::{AppDescriptor, LaunchSpec};
use crate::utils::error::Result;

pub const SIP_CONNECTOR: &str = "osmo-sip-connector";
pub const SIP_CONNECTOR_CONFIG: &str = "doc/examples/osmo-sip-connector.cfg";
pub const SIP_CONNECTOR_EXECUTABLE: &str = "src/osmo-sip-connector";
pub const SIP_CONNECTOR_LABEL: &str = "OsmoSIPcon";
pub const SIP_CONNECTOR_VTY_PORT: u16 = 4256;

/// Registry for the SIP connector run from its source tree.
pub fn osmo_sip_connector() -> Result<AppRegistry> {
    AppRegistry::builder()
        .app_config(SIP_CONNECTOR, [SIP_CONNECTOR_CONFIG])
        .app(AppDescriptor::new(
            SIP_CONNECTOR_VTY_PORT,
            SIP_CONNECTOR_EXECUTABLE,
            SIP_CONNECTOR_LABEL,
            SIP_CONNECTOR,
        ))
        .primary(SIP_CONNECTOR)
        .vty_command(LaunchSpec::new(vec![
            format!("./{}", SIP_CONNECTOR_EXECUTABLE),
            "-c".to_string(),
            SIP_CONNECTOR_CONFIG.to_string(),
        ]))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppCatalog;

    #[test]
    fn test_builtin_registry() {
        let registry = osmo_sip_connector().unwrap();
        let app = registry.primary_app().unwrap();
        assert_eq!(app.port, 4256);
        assert_eq!(app.label, "OsmoSIPcon");
        assert_eq!(
            registry.build_launch_spec(app).unwrap(),
            ["src/osmo-sip-connector", "-c", "doc/examples/osmo-sip-connector.cfg"]
        );
        assert_eq!(
            registry.vty_command().unwrap(),
            ["./src/osmo-sip-connector", "-c", "doc/examples/osmo-sip-connector.cfg"]
        );
    }
}
