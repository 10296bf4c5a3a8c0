use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use anyhow::{Context, Result};
use regex::{Captures, Regex};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_cors_permissive() -> bool {
    true
}

fn default_log_filter() -> String {
    "opmigrate_mock_backend=debug,tower_http=debug".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Replace `${VAR_NAME}` with the value `lookup` returns; unknown names stay as written
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid");
    pattern
        .replace_all(content, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(&content, lookup);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON configuration in {}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML configuration in {}", path))?
        };
        Ok(config)
    }

    /// Load the first candidate file that exists, or fall back to defaults.
    ///
    /// Returns the path that was loaded, if any. A file that exists but does
    /// not parse is an error rather than a silent fallback.
    pub fn discover(candidates: &[String]) -> Result<(Self, Option<String>)> {
        for path in candidates {
            if Path::new(path).exists() {
                let config = Self::load(path)?;
                return Ok((config, Some(path.clone())));
            }
            tracing::debug!("No config at {}", path);
        }
        Ok((Self::default(), None))
    }

    /// Apply `OPMIGRATE_HOST`, `OPMIGRATE_PORT` and `RUST_LOG` on top of the file values
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("OPMIGRATE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("OPMIGRATE_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("OPMIGRATE_PORT is not a valid port: {}", port))?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let host = self.server.host.as_str();
        (host, self.server.port)
            .to_socket_addrs()
            .with_context(|| format!("Cannot resolve listen host: {}", host))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("No address found for listen host: {}", host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_listen_on_all_interfaces_port_9000() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.server.cors_permissive);
        assert_eq!(config.socket_addr().unwrap(), "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let file = write_temp(".yaml", "server:\n  port: 9100\n");
        let config = Config::load_with(file.path().to_str().unwrap(), env(&[])).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn json_is_chosen_by_extension() {
        let file = write_temp(".json", r#"{"server": {"host": "127.0.0.1", "cors_permissive": false}}"#);
        let config = Config::load_with(file.path().to_str().unwrap(), env(&[])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.server.cors_permissive);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn placeholders_are_substituted_before_parsing() {
        let file = write_temp(".yaml", "server:\n  host: \"${BIND_HOST}\"\n  port: ${BIND_PORT}\n");
        let config = Config::load_with(
            file.path().to_str().unwrap(),
            env(&[("BIND_HOST", "127.0.0.1"), ("BIND_PORT", "9555")]),
        )
        .unwrap();
        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:9555".parse().unwrap());
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        let out = substitute_env_vars("a=${KNOWN} b=${UNKNOWN}", env(&[("KNOWN", "1")]));
        assert_eq!(out, "a=1 b=${UNKNOWN}");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_temp(".yaml", "server: [not, a, map\n");
        assert!(Config::load_with(file.path().to_str().unwrap(), env(&[])).is_err());
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let (config, loaded) =
            Config::discover(&["/nonexistent/opmigrate/conf.yaml".to_string()]).unwrap();
        assert!(loaded.is_none());
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn discover_picks_first_existing_file() {
        let file = write_temp(".yaml", "server:\n  port: 9200\n");
        let path = file.path().to_str().unwrap().to_string();
        let (config, loaded) =
            Config::discover(&["/nonexistent/conf.yaml".to_string(), path.clone()]).unwrap();
        assert_eq!(loaded, Some(path));
        assert_eq!(config.server.port, 9200);
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("OPMIGRATE_HOST", "127.0.0.1"),
                ("OPMIGRATE_PORT", "9300"),
                ("RUST_LOG", "info"),
            ]))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9300);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(env(&[("OPMIGRATE_PORT", "ninety")]))
            .unwrap_err();
        assert!(err.to_string().contains("OPMIGRATE_PORT"));
    }
}
