//! Gather configuration: deserialization, defaults, validation.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the built-in run: the default package list fetched from
//! raw.githubusercontent.com and written to `startos_targets.json`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::TargetsError;
use crate::packages::default_packages;

/// Top-level gather configuration, parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GatherConfig {
    /// Package identifiers (`owner/repo`), fetched in order.
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
    /// Document host root. Candidates are `<base_url>/<package>/<branch>/manifest.<ext>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Branch names, tried outermost.
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,
    /// Manifest file extensions, tried innermost.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Appended to a manifest id to form the target host.
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_base_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_branches() -> Vec<String> {
    vec!["master".to_string(), "main".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_domain_suffix() -> String {
    ".embassy".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("startos_targets.json")
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            base_url: default_base_url(),
            branches: default_branches(),
            extensions: default_extensions(),
            user_agent: default_user_agent(),
            domain_suffix: default_domain_suffix(),
            output: default_output(),
        }
    }
}

impl GatherConfig {
    /// Parse a TOML document, filling unset fields with defaults.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| TargetsError::InvalidConfig(e.to_string()))
    }

    /// Validate the config, failing fast before any request is made.
    pub fn validate(&self) -> crate::Result<()> {
        if self.branches.is_empty() {
            return Err(TargetsError::InvalidConfig(
                "branches must not be empty".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(TargetsError::InvalidConfig(
                "extensions must not be empty".to_string(),
            ));
        }
        if self.domain_suffix.is_empty() {
            return Err(TargetsError::InvalidConfig(
                "domain_suffix must not be empty".to_string(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TargetsError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if let Some(pos) = self.packages.iter().position(|p| p.trim().is_empty()) {
            return Err(TargetsError::InvalidConfig(format!(
                "package identifier at index {} is blank",
                pos
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::DEFAULT_PACKAGES;

    fn parse_toml(toml_str: &str) -> GatherConfig {
        GatherConfig::from_toml(toml_str).expect("valid TOML")
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_toml("");
        assert_eq!(config.packages.len(), DEFAULT_PACKAGES.len());
        assert_eq!(config.base_url, "https://raw.githubusercontent.com");
        assert_eq!(config.branches, vec!["master", "main"]);
        assert_eq!(config.extensions, vec!["yaml", "yml"]);
        assert_eq!(config.user_agent, "Mozilla/5.0");
        assert_eq!(config.domain_suffix, ".embassy");
        assert_eq!(config.output, PathBuf::from("startos_targets.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_matches_empty_document() {
        let config = GatherConfig::default();
        let parsed = parse_toml("");
        assert_eq!(config.packages, parsed.packages);
        assert_eq!(config.output, parsed.output);
    }

    #[test]
    fn test_overrides() {
        let config = parse_toml(
            r#"
            packages = ["Start9Labs/lnd-startos"]
            base_url = "http://127.0.0.1:8080"
            output = "/tmp/targets.json"
            "#,
        );
        assert_eq!(config.packages, vec!["Start9Labs/lnd-startos"]);
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.output, PathBuf::from("/tmp/targets.json"));
        // untouched fields keep defaults
        assert_eq!(config.branches, vec!["master", "main"]);
    }

    #[test]
    fn test_unparseable_toml() {
        let result = GatherConfig::from_toml("packages = [");
        assert!(matches!(result, Err(TargetsError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_branches_rejected() {
        let config = parse_toml("branches = []");
        let result = config.validate();
        assert!(
            matches!(result, Err(TargetsError::InvalidConfig(msg)) if msg.contains("branches"))
        );
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let config = parse_toml("extensions = []");
        let result = config.validate();
        assert!(
            matches!(result, Err(TargetsError::InvalidConfig(msg)) if msg.contains("extensions"))
        );
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let config = parse_toml(r#"domain_suffix = """#);
        let result = config.validate();
        assert!(
            matches!(result, Err(TargetsError::InvalidConfig(msg)) if msg.contains("domain_suffix"))
        );
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let config = parse_toml(r#"base_url = "ftp://example.com""#);
        let result = config.validate();
        assert!(matches!(result, Err(TargetsError::InvalidConfig(msg)) if msg.contains("ftp")));
    }

    #[test]
    fn test_blank_package_rejected() {
        let config = parse_toml(r#"packages = ["Start9Labs/lnd-startos", "  "]"#);
        let result = config.validate();
        assert!(matches!(result, Err(TargetsError::InvalidConfig(msg)) if msg.contains("index 1")));
    }

    #[test]
    fn test_empty_package_list_is_valid() {
        let config = parse_toml("packages = []");
        assert!(config.validate().is_ok());
    }
}
