use crate::locator::DEFAULT_BASE_URL;
use crate::observer::{HttpObserver, NoopObserver, TracingObserver};
use crate::pet_client::{PetClient, PetClientError};
use crate::scenarios::ReadAfterCreate;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub petstore: PetstoreSettings,
    pub scenarios: ScenarioSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PetstoreSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    #[serde(default = "default_log_http_traffic")]
    pub log_http_traffic: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_http_traffic() -> bool {
    true
}

impl PetstoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn observer(&self) -> Arc<dyn HttpObserver> {
        if self.log_http_traffic {
            Arc::new(TracingObserver)
        } else {
            Arc::new(NoopObserver)
        }
    }

    pub fn client(&self) -> Result<PetClient, PetClientError> {
        PetClient::new(self.base_url.clone(), self.timeout(), self.observer())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ScenarioSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub read_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub read_max_attempts: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub read_poll_interval_milliseconds: u64,
}

impl ScenarioSettings {
    pub fn read_after_create(&self) -> ReadAfterCreate {
        ReadAfterCreate {
            delay: Duration::from_millis(self.read_delay_milliseconds),
            max_attempts: self.read_max_attempts,
            poll_interval: Duration::from_millis(self.read_poll_interval_milliseconds),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No current directory: {}", e)))?;

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    load_configuration(&base_path.join("configuration"), environment, None)
}

/// Layers `base.yaml`, the environment file and `APP_*` variables.
///
/// `variables` stands in for the process environment when given.
pub fn load_configuration(
    configuration_directory: &Path,
    environment: Environment,
    variables: Option<config::Map<String, String>>,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_PETSTORE__BASE_URL=http://localhost:8080 would set `Settings.petstore.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(variables),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible targets the suite can run against.
#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Live,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Live => "live",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "live" => Ok(Self::Live),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `live`.",
                other
            )),
        }
    }
}
