use config::{Config, ConfigError, Environment, File};
use resolve_path::PathResolveExt;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.mangadex.org/";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub base_url: String,
    pub output_directory: String,
    pub quality: Quality,
    pub user_agent: String,
}

/// Image fidelity served by the at-home image host.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    #[default]
    Data,
    DataSaver,
}

impl Quality {
    /// Segment used in image URLs.
    pub fn path_segment(self) -> &'static str {
        match self {
            Quality::Data => "data",
            Quality::DataSaver => "data-saver",
        }
    }
}

impl Settings {
    /// Loads `config_file` if present, then `MANGADEX_DL_*` environment overrides.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("output_directory", ".")?
            .set_default("quality", "data")?
            .set_default(
                "user_agent",
                concat!("mangadex-dl/", env!("CARGO_PKG_VERSION")),
            )?
            .add_source(File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix("MANGADEX_DL"))
            .build()?;
        builder.try_deserialize()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_directory.resolve().into_owned()
    }
}
