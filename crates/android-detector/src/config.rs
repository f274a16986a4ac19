use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Configuration structure loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Addresses to listen on for DHCP client traffic
    #[serde(default = "default_listen_addresses")]
    pub listen_addresses: Vec<Ipv4Addr>,

    /// UDP port DHCP clients send to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Receive buffer size, larger datagrams are truncated by the socket
    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,

    /// How discoveries are reported
    #[serde(default)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Log line per discovery
    #[default]
    Log,
    /// One JSON object per line on stdout
    Json,
}

fn default_listen_addresses() -> Vec<Ipv4Addr> {
    vec![Ipv4Addr::UNSPECIFIED]
}

fn default_port() -> u16 {
    67
}

fn default_recv_buffer_size() -> usize {
    1500
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addresses: default_listen_addresses(),
            port: default_port(),
            recv_buffer_size: default_recv_buffer_size(),
            output: OutputFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_addresses, vec![Ipv4Addr::new(0, 0, 0, 0)]);
        assert_eq!(config.port, 67);
        assert_eq!(config.recv_buffer_size, 1500);
        assert_eq!(config.output, OutputFormat::Log);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("output: json\nport: 6767\n").unwrap();
        assert_eq!(config.port, 6767);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.listen_addresses, default_listen_addresses());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let path = path.to_str().unwrap();

        let config = Config {
            listen_addresses: vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(10, 0, 0, 1)],
            port: 67,
            recv_buffer_size: 2048,
            output: OutputFormat::Json,
        };
        config.to_file(path).unwrap();

        assert_eq!(Config::from_file(path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file("/nonexistent/android-detector.yaml").is_err());
    }

    #[test]
    fn test_invalid_output_format() {
        assert!(serde_yaml::from_str::<Config>("output: xml\n").is_err());
    }
}
