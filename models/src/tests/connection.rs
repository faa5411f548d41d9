use crate::{ConnectionConfigBuilder, Credentials, ModelError};

use std::time::Duration;

/// **VALUE**: Verifies builder defaults match the daemon's documented defaults.
///
/// **WHY THIS MATTERS**: Most users only type a host name. If defaults drift, every fresh
/// connection points at the wrong port or path and fails with a confusing 404/421.
///
/// **BUG THIS CATCHES**: Would catch a changed default port, path, scheme or timeout.
#[test]
fn given_only_host_when_building_then_uses_daemon_defaults() {
    let config = ConnectionConfigBuilder::default()
        .with_host("example.local")
        .build()
        .unwrap();

    assert_eq!(config.port, 9091);
    assert!(!config.secure);
    assert_eq!(config.rpc_path, "/transmission/rpc");
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.endpoint_url(), "http://example.local:9091/transmission/rpc");
}

#[test]
fn given_ipv6_host_when_building_url_then_brackets_literal() {
    let config = ConnectionConfigBuilder::default()
        .with_host("::1")
        .with_secure(true)
        .build()
        .unwrap();

    assert_eq!(config.endpoint_url(), "https://[::1]:9091/transmission/rpc");
}

/// **VALUE**: Verifies malformed hosts are rejected before any request is made.
///
/// **BUG THIS CATCHES**: Would catch a pasted URL ("http://host:9091") being accepted as a
/// host name and producing "http://http://host:9091:9091/...".
#[test]
fn given_url_as_host_when_building_then_returns_validation_error() {
    let result = ConnectionConfigBuilder::default()
        .with_host("http://example.local:9091")
        .build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_missing_or_empty_host_when_building_then_returns_validation_error() {
    assert!(ConnectionConfigBuilder::default().build().is_err());
    assert!(
        ConnectionConfigBuilder::default()
            .with_host("  ")
            .build()
            .is_err()
    );
}

#[test]
fn given_empty_username_when_building_then_returns_validation_error() {
    let result = ConnectionConfigBuilder::default()
        .with_host("nas")
        .with_credentials(Credentials::new("", "pw"))
        .build();

    assert!(result.is_err());
}

/// **VALUE**: Verifies `same_address` ignores credentials and timeout.
///
/// **WHY THIS MATTERS**: Re-configuring only the password must not throw away an open
/// session; changing the port must.
#[test]
fn given_configs_differing_only_in_credentials_when_compared_then_same_address() {
    let base = ConnectionConfigBuilder::default()
        .with_host("NAS")
        .build()
        .unwrap();
    let with_auth = ConnectionConfigBuilder::default()
        .with_host("nas")
        .with_credentials(Credentials::new("admin", "pw"))
        .with_timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    let other_port = ConnectionConfigBuilder::default()
        .with_host("nas")
        .with_port(9092)
        .build()
        .unwrap();

    assert!(base.same_address(&with_auth));
    assert!(!base.same_address(&other_port));
}
