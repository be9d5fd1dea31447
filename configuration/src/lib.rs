use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Loads `config_path` (format chosen by extension). A missing file is not an
/// error: every field then takes its default.
pub fn get_config<T: DeserializeOwned>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let config = config::Config::builder().add_source(f).build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InspectConfiguration {
    pub input: InputConfiguration,
    pub query: QueryConfiguration,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Hex,
    Binary,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfiguration {
    pub format: InputFormat,
    /// Larger inputs are refused before decoding.
    pub max_message_size: usize,
}

impl Default for InputConfiguration {
    fn default() -> Self {
        Self {
            format: InputFormat::Hex,
            max_message_size: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    Random,
    Sequential,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfiguration {
    pub ids: IdStrategy,
    /// Mnemonic (`A`, `NS`, ...) or `TYPEnn`.
    pub qtype: String,
}

impl Default for QueryConfiguration {
    fn default() -> Self {
        Self {
            ids: IdStrategy::Random,
            qtype: "A".to_string(),
        }
    }
}
