//! Layered configuration: defaults, then a JSON file, then `GMAIL_SEARCH_*` variables.

use std::io;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    error::Result,
    extract::BodyStrategy,
    models::DEFAULT_MAX_DEPTH,
    render::DEFAULT_PREVIEW_LEN,
};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "gmail-search";
/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "GMAIL_SEARCH_";

/// Runtime settings of the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct Config {
    /// Directory holding exported messages.
    #[builder(setter(into), default = default_messages_dir())]
    #[serde(default = "default_messages_dir")]
    pub messages_dir: PathBuf,
    /// Number of body characters shown per message.
    #[builder(default = DEFAULT_PREVIEW_LEN)]
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
    /// Body selection strategy.
    #[builder(default)]
    #[serde(default)]
    pub strategy: BodyStrategy,
    /// Maximum accepted part nesting.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// With `path`, that JSON file must exist. Without it,
    /// `<config dir>/gmail-search/config.json` is read when present.
    /// `GMAIL_SEARCH_*` environment variables override file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or a value has the
    /// wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("config file {} not found", path.display()),
                    )
                    .into());
                }
                figment = figment.merge(Json::file(path));
            }
            None => {
                if let Some(path) = Self::default_path().filter(|p| p.is_file()) {
                    figment = figment.merge(Json::file(path));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)).extract()?)
    }

    /// Platform location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }
}

fn default_messages_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("messages"))
        .unwrap_or_else(|| PathBuf::from("messages"))
}

fn default_preview_len() -> usize {
    DEFAULT_PREVIEW_LEN
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
