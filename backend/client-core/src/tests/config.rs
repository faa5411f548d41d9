use crate::config::{
    ClientConfig, ENV_HOST, ENV_PASSWORD, ENV_PORT, ENV_SECURE, ENV_TIMEOUT_SECS, ENV_USERNAME,
};
use crate::error::config::ConfigError;

use std::path::Path;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

const ALL_ENV: [&str; 6] = [
    ENV_HOST,
    ENV_PORT,
    ENV_SECURE,
    ENV_USERNAME,
    ENV_PASSWORD,
    ENV_TIMEOUT_SECS,
];

fn clear_env() {
    for name in ALL_ENV {
        // SAFETY: env tests are #[serial]; no other thread reads the environment meanwhile.
        unsafe { std::env::remove_var(name) };
    }
}

fn set_env(name: &str, value: &str) {
    // SAFETY: see clear_env.
    unsafe { std::env::set_var(name, value) };
}

fn parse(contents: &str) -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::parse(contents, Path::new("test.toml"))?;
    config.validate()?;
    Ok(config)
}

/// **VALUE**: Verifies a first run with no config file still produces a usable client.
///
/// **WHY THIS MATTERS**: Most users never write a config file; the client should talk to
/// `localhost:9091` out of the box.
///
/// **BUG THIS CATCHES**: Would catch a missing file being reported as a read error.
#[test]
fn given_missing_file_when_loaded_then_defaults_returned() {
    // GIVEN: An empty directory
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tremote.toml");

    // WHEN: Loading
    let config = ClientConfig::load(&path).unwrap();

    // THEN: Stock daemon address
    let connection = config.connection_config().unwrap();
    assert_eq!(connection.endpoint_url(), "http://localhost:9091/transmission/rpc");
    assert_eq!(connection.credentials, None);
}

#[test]
fn given_toml_file_when_loaded_then_values_applied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tremote.toml");
    std::fs::write(
        &path,
        r#"
[daemon]
host = "nas.lan"
port = 443
secure = true
rpc_path = "/rpc"
username = "admin"
password = "hunter2"
timeout_secs = 30

[logging]
directory = "/tmp/tremote-logs"
"#,
    )
    .unwrap();

    let config = ClientConfig::load(&path).unwrap();
    let connection = config.connection_config().unwrap();

    assert_eq!(connection.endpoint_url(), "https://nas.lan:443/rpc");
    assert_eq!(connection.timeout, Duration::from_secs(30));
    let credentials = connection.credentials.unwrap();
    assert_eq!(credentials.username, "admin");
    assert_eq!(credentials.password.expose(), "hunter2");
    assert_eq!(
        config.logging.directory.as_deref(),
        Some(Path::new("/tmp/tremote-logs"))
    );
}

#[test]
fn given_partial_daemon_section_when_parsed_then_rest_defaulted() {
    let config = parse("[daemon]\nport = 9999\n").unwrap();

    assert_eq!(config.daemon.host, "localhost");
    assert_eq!(config.daemon.port, 9999);
    assert_eq!(config.daemon.rpc_path, "/transmission/rpc");
}

#[test]
fn given_malformed_toml_when_loaded_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tremote.toml");
    std::fs::write(&path, "[daemon\nhost = ").unwrap();

    let error = ClientConfig::load(&path).unwrap_err();

    assert!(matches!(error, ConfigError::ParseError { .. }));
    assert!(error.to_string().contains("tremote.toml"));
}

/// **VALUE**: Verifies out-of-range values are rejected before any connection attempt.
///
/// **BUG THIS CATCHES**: Would catch a zero timeout (every request fails instantly) or a
/// relative RPC path (malformed URL) slipping through.
#[test]
fn given_invalid_values_when_validated_then_validation_error() {
    let cases = [
        "[daemon]\nhost = \"  \"\n",
        "[daemon]\nport = 0\n",
        "[daemon]\nrpc_path = \"transmission/rpc\"\n",
        "[daemon]\ntimeout_secs = 0\n",
        "[daemon]\ntimeout_secs = 601\n",
        "[daemon]\npassword = \"orphan\"\n",
    ];

    for contents in cases {
        let result = parse(contents);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "accepted: {contents}"
        );
    }
}

#[test]
fn given_password_in_config_when_debug_printed_then_redacted() {
    let config = parse("[daemon]\nusername = \"admin\"\npassword = \"hunter2\"\n").unwrap();

    let printed = format!("{config:?}");

    assert!(!printed.contains("hunter2"));
}

/// **VALUE**: Verifies environment variables override the file.
///
/// **WHY THIS MATTERS**: Scripts and containers set the daemon address through the
/// environment without touching the user's config file.
///
/// **BUG THIS CATCHES**: Would catch an override being ignored or a blank variable
/// wiping a configured value.
#[test]
#[serial]
fn given_env_overrides_when_applied_then_file_values_replaced() {
    // GIVEN: A file config plus overrides, one of them blank
    clear_env();
    let mut config = parse("[daemon]\nhost = \"file.lan\"\nport = 9091\n").unwrap();
    set_env(ENV_HOST, "env.lan");
    set_env(ENV_SECURE, "yes");
    set_env(ENV_USERNAME, "ops");
    set_env(ENV_PASSWORD, "s3cret");
    set_env(ENV_PORT, "  ");

    // WHEN: Applying the environment
    let result = config.apply_env();
    clear_env();

    // THEN: Set variables win, the blank one is ignored
    result.unwrap();
    assert_eq!(config.daemon.host, "env.lan");
    assert_eq!(config.daemon.port, 9091);
    assert!(config.daemon.secure);
    let connection = config.connection_config().unwrap();
    assert_eq!(connection.credentials.unwrap().password.expose(), "s3cret");
}

#[test]
#[serial]
fn given_unparseable_env_value_when_applied_then_environment_error_names_variable() {
    clear_env();
    let mut config = ClientConfig::default();
    set_env(ENV_PORT, "ninety");

    let result = config.apply_env();
    clear_env();

    match result {
        Err(ConfigError::EnvironmentError { variable, .. }) => assert_eq!(variable, ENV_PORT),
        other => panic!("Expected EnvironmentError, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_missing_file_and_env_host_when_loaded_with_env_then_env_applied() {
    clear_env();
    let dir = TempDir::new().unwrap();
    set_env(ENV_HOST, "seedbox.example");
    set_env(ENV_TIMEOUT_SECS, "5");

    let result = ClientConfig::load_with_env(Some(&dir.path().join("absent.toml")));
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.daemon.host, "seedbox.example");
    assert_eq!(config.daemon.timeout_secs, 5);
}
