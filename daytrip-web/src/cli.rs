//! Command-line flags. Flags override config.toml.

use clap::Parser;
use daytrip_core::config::AppConfig;
use daytrip_infrastructure::DaytripPaths;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Default)]
#[command(name = "daytrip-web")]
#[command(about = "Daytrip - two itineraries for a day out, suggested by an LLM", long_about = None)]
pub struct Cli {
    /// Path to config.toml. secret.json is looked up next to it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory for rolling log files.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Paths rooted at the directory holding `--config`, or the platform
    /// config directory when the flag is absent.
    pub fn paths(&self) -> DaytripPaths {
        let base = self.config.as_deref().map(|file| match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        });
        DaytripPaths::new(base)
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["daytrip-web", "--host", "0.0.0.0", "--port", "9000"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.model, AppConfig::default().model);
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::try_parse_from(["daytrip-web"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_paths_follow_config_flag() {
        let cli = Cli::try_parse_from(["daytrip-web", "--config", "/etc/daytrip/config.toml"]).unwrap();
        assert_eq!(
            cli.paths().secret_file().unwrap(),
            PathBuf::from("/etc/daytrip/secret.json")
        );

        let cli = Cli::try_parse_from(["daytrip-web", "--config", "config.toml"]).unwrap();
        assert_eq!(cli.paths().secret_file().unwrap(), PathBuf::from("./secret.json"));
    }
}
