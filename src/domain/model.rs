use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::process::Command;

/// Flag the application under test takes its config file with.
pub const CONFIG_FLAG: &str = "-c";

/// Address the application binds its VTY to unless told otherwise.
pub const DEFAULT_VTY_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Ordered config file paths for one application. Only the first is used
/// when launching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfigEntry {
    pub name: String,
    pub paths: Vec<String>,
}

impl AppConfigEntry {
    pub fn new<I, S>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn first_path(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }
}

/// One launchable application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub port: u16,
    pub executable_path: String,
    pub label: String,
    /// Key into the registry's config table.
    pub config_name: String,
}

impl AppDescriptor {
    pub fn new(
        port: u16,
        executable_path: impl Into<String>,
        label: impl Into<String>,
        config_name: impl Into<String>,
    ) -> Self {
        Self {
            port,
            executable_path: executable_path.into(),
            label: label.into(),
            config_name: config_name.into(),
        }
    }
}

/// Command line used to start an application: program first, then arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchSpec(Vec<String>);

impl LaunchSpec {
    pub fn new(argv: Vec<String>) -> Self {
        Self(argv)
    }

    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Argument following the config flag, if any.
    pub fn config_path(&self) -> Option<&str> {
        self.0
            .iter()
            .position(|arg| arg == CONFIG_FLAG)
            .and_then(|idx| self.0.get(idx + 1))
            .map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Builds a `Command` rooted at `workdir`. The command is not spawned.
    pub fn to_command(&self, workdir: impl AsRef<Path>) -> Option<Command> {
        let program = self.program()?;
        let mut cmd = Command::new(program);
        cmd.args(self.args()).current_dir(workdir);
        Some(cmd)
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arg in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if needs_quoting(arg) {
                write!(f, "'{}'", arg.replace('\'', r"'\''"))?;
            } else {
                f.write_str(arg)?;
            }
        }
        Ok(())
    }
}

/// Anything outside this set is a shell metacharacter or whitespace.
fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || !arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c))
}

impl From<Vec<String>> for LaunchSpec {
    fn from(argv: Vec<String>) -> Self {
        Self(argv)
    }
}

impl PartialEq<[&str]> for LaunchSpec {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for LaunchSpec {
    fn eq(&self, other: &[&str; N]) -> bool {
        self == &other[..]
    }
}

/// Where a harness connects for a VTY session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtyEndpoint {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl VtyEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl fmt::Display for VtyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LaunchSpec {
        LaunchSpec::new(vec![
            "src/osmo-sip-connector".to_string(),
            "-c".to_string(),
            "doc/examples/osmo-sip-connector.cfg".to_string(),
        ])
    }

    #[test]
    fn test_launch_spec_accessors() {
        let spec = spec();
        assert_eq!(spec.program(), Some("src/osmo-sip-connector"));
        assert_eq!(spec.args().len(), 2);
        assert_eq!(spec.config_path(), Some("doc/examples/osmo-sip-connector.cfg"));
        assert_eq!(
            spec,
            ["src/osmo-sip-connector", "-c", "doc/examples/osmo-sip-connector.cfg"]
        );
    }

    #[test]
    fn test_empty_launch_spec() {
        let spec = LaunchSpec::new(Vec::new());
        assert_eq!(spec.program(), None);
        assert!(spec.args().is_empty());
        assert!(spec.to_command(".").is_none());
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let spec = LaunchSpec::new(vec![
            "./app".to_string(),
            "-c".to_string(),
            "my config.cfg".to_string(),
        ]);
        assert_eq!(spec.to_string(), "./app -c 'my config.cfg'");
        assert_eq!(
            self::spec().to_string(),
            "src/osmo-sip-connector -c doc/examples/osmo-sip-connector.cfg"
        );
    }

    #[test]
    fn test_display_quotes_shell_metacharacters() {
        let spec = LaunchSpec::new(
            ["./app", "$HOME/a.cfg", "a;b", r#"say"hi""#, r"c:\x", "it's", ""]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        assert_eq!(
            spec.to_string(),
            r#"./app '$HOME/a.cfg' 'a;b' 'say"hi"' 'c:\x' 'it'\''s' ''"#
        );
    }

    #[test]
    fn test_to_command_sets_program_and_args() {
        let cmd = spec().to_command("/tmp").unwrap();
        assert_eq!(cmd.get_program(), "src/osmo-sip-connector");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["-c", "doc/examples/osmo-sip-connector.cfg"]);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&spec()).unwrap();
        assert_eq!(
            json,
            r#"["src/osmo-sip-connector","-c","doc/examples/osmo-sip-connector.cfg"]"#
        );
    }

    #[test]
    fn test_vty_endpoint() {
        let endpoint = VtyEndpoint {
            bind_addr: DEFAULT_VTY_BIND_ADDR,
            port: 4256,
        };
        assert_eq!(endpoint.to_string(), "127.0.0.1:4256");
    }
}
