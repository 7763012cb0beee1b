use assert_cmd::Command;
use serde_json::Value;
use std::io::Write;
use std::process::Output;
use tempfile::NamedTempFile;

fn appdesc(args: &[&str]) -> Output {
    Command::cargo_bin("appdesc")
        .unwrap()
        .env_remove("APPDESC_REGISTRY")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run appdesc")
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).unwrap()
}

fn two_app_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[app_configs]
osmo-sip-connector = ["doc/examples/osmo-sip-connector.cfg"]
osmo-msc = ["doc/examples/osmo-msc.cfg"]

[[apps]]
port = 4256
executable = "src/osmo-sip-connector"
label = "OsmoSIPcon"
config = "osmo-sip-connector"

[[apps]]
port = 4254
executable = "src/osmo-msc"
label = "OsmoMSC"
config = "osmo-msc"
"#,
    )
    .unwrap();
    file
}

#[test]
fn test_launch_primary_from_builtin_registry() {
    let out = appdesc(&["launch"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "src/osmo-sip-connector -c doc/examples/osmo-sip-connector.cfg\n"
    );
}

#[test]
fn test_paths_of_unknown_app_fails() {
    let out = appdesc(&["paths", "nonexistent"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());

    let err = stderr(&out);
    assert!(err.contains("Unknown application: nonexistent"), "stderr: {}", err);
    assert!(err.contains("Suggestion:"), "stderr: {}", err);
    assert!(err.contains("appdesc list"), "stderr: {}", err);
}

#[test]
fn test_json_vty_command() {
    let out = appdesc(&["--json", "vty-command"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            "./src/osmo-sip-connector",
            "-c",
            "doc/examples/osmo-sip-connector.cfg"
        ])
    );
}

#[test]
fn test_paths_lists_one_per_line() {
    let out = appdesc(&["paths", "osmo-sip-connector"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "doc/examples/osmo-sip-connector.cfg\n");
}

#[test]
fn test_launch_named_app_from_registry_file() {
    let file = two_app_file();
    let path = file.path().to_str().unwrap();

    let out = appdesc(&["--registry", path, "launch", "OsmoMSC"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "src/osmo-msc -c doc/examples/osmo-msc.cfg\n");
}

#[test]
fn test_json_list_dumps_registry() {
    let file = two_app_file();
    let path = file.path().to_str().unwrap();

    let out = appdesc(&["--registry", path, "--json", "list"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["primary"], "osmo-sip-connector");
    assert_eq!(value["apps"].as_array().unwrap().len(), 2);
    assert_eq!(value["apps"][1]["label"], "OsmoMSC");
}

#[test]
fn test_missing_registry_file_fails() {
    let out = appdesc(&["--registry", "/nonexistent/registry.toml", "list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Could not read registry"));
}
