use std::{fs, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_container_home")]
    pub container_home: String,

    #[serde(default = "default_ide_port")]
    pub ide_port: u16,

    #[serde(default = "default_extra_ports")]
    pub extra_ports: Vec<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            image: default_image(),
            container_home: default_container_home(),
            ide_port: default_ide_port(),
            extra_ports: default_extra_ports(),
        }
    }
}

fn default_image() -> String {
    "idebox/workspace:latest".to_string()
}

fn default_container_home() -> String {
    "/home/ubuntu".to_string()
}

fn default_ide_port() -> u16 {
    1337
}

fn default_extra_ports() -> Vec<u16> {
    vec![8080, 8081, 8082]
}

impl Config {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| miette!("could not find config directory"))?
            .join("idebox")
            .join("config.toml"))
    }

    pub fn load_config() -> Result<Self> {
        let path = Self::config_file_path()?;

        if !path.exists() {
            let config = Config::default();
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)
            .into_diagnostic()
            .wrap_err("failed to read config file contents")?;

        let config = toml::from_str(&contents)
            .into_diagnostic()
            .wrap_err("failed to parse config file")?;

        Ok(config)
    }

    /// Host ports published when launching with fixed ports, IDE port first.
    pub fn publish_ports(&self) -> Vec<u16> {
        let mut ports = vec![self.ide_port];
        ports.extend(&self.extra_ports);
        ports
    }
}
