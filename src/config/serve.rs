//! `[serve]` section configuration.
//!
//! Contains JSON API server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in folio.toml - JSON API server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// watch = true           # Reload content on file changes
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 5277).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Reload content when files under the content directory change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_serve_config() {
        let config = r#"
            [serve]
            interface = "0.0.0.0"
            port = 8080
            watch = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 8080);
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]").unwrap();

        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 5277);
        assert!(config.serve.watch);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [serve]
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }

    #[test]
    fn test_serve_config_partial_override() {
        let config = r#"
            [serve]
            port = 3000
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.interface, "127.0.0.1");
        assert!(config.serve.watch);
    }
}
