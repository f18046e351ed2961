//! Address splitting
//!
//! Turns the first token of a server block (`example.com:80`,
//! `https://example.com`, `[::1]:8080`, `:2015`, ...) into a host and a port.

use sitefile_core::Settings;
use sitefile_core::config::{DEFAULT_HOST, DEFAULT_PORT};

/// Values substituted for missing address parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDefaults {
    pub host: String,
    pub port: String,
}

impl Default for AddressDefaults {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
        }
    }
}

impl From<&Settings> for AddressDefaults {
    fn from(settings: &Settings) -> Self {
        Self {
            host: settings.default_host.clone(),
            port: settings.default_port.clone(),
        }
    }
}

/// Split an address into `(host, port)`. Never fails.
pub fn split_address(address: &str, defaults: &AddressDefaults) -> (String, String) {
    let (scheme_port, rest) = if let Some(rest) = address.strip_prefix("https://") {
        (Some("443"), rest)
    } else if let Some(rest) = address.strip_prefix("http://") {
        (Some("80"), rest)
    } else {
        (None, address)
    };
    let fallback_port = scheme_port.unwrap_or(defaults.port.as_str());

    let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
        // [v6] or [v6]:port
        match bracketed.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (rest, None),
        }
    } else if rest.matches(':').count() > 1 {
        // bare IPv6 without a port
        (rest, None)
    } else {
        match rest.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (rest, None),
        }
    };

    let host = if host.is_empty() { defaults.host.as_str() } else { host };
    let port = match port {
        Some(port) if !port.is_empty() => port,
        _ => fallback_port,
    };

    (host.to_string(), port.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(address: &str) -> (String, String) {
        split_address(address, &AddressDefaults::default())
    }

    fn pair(host: &str, port: &str) -> (String, String) {
        (host.to_string(), port.to_string())
    }

    #[test]
    fn test_host_and_port() {
        assert_eq!(split("localhost:8080"), pair("localhost", "8080"));
        assert_eq!(split("example.com:80"), pair("example.com", "80"));
    }

    #[test]
    fn test_missing_parts_use_defaults() {
        assert_eq!(split("example.com"), pair("example.com", "8080"));
        assert_eq!(split(":2015"), pair("localhost", "2015"));
        assert_eq!(split("example.com:"), pair("example.com", "8080"));
    }

    #[test]
    fn test_scheme_sets_default_port() {
        assert_eq!(split("https://example.com"), pair("example.com", "443"));
        assert_eq!(split("http://example.com"), pair("example.com", "80"));
        assert_eq!(split("https://example.com:8443"), pair("example.com", "8443"));
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(split("[::1]:9000"), pair("::1", "9000"));
        assert_eq!(split("[::1]"), pair("::1", "8080"));
        assert_eq!(split("::1"), pair("::1", "8080"));
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = AddressDefaults {
            host: "0.0.0.0".to_string(),
            port: "2015".to_string(),
        };
        assert_eq!(split_address(":", &defaults), pair("0.0.0.0", "2015"));
    }
}
