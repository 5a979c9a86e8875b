use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_EVENT_BUS: &str = "orders-bus";
pub(crate) const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub event_bus: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_bus: DEFAULT_EVENT_BUS.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["EVENT_BUS"]))
            .extract()
    }
}
