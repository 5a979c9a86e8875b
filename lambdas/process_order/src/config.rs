use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_FIREHOSE_NAME: &str = "orders-firehose";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub firehose_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firehose_name: DEFAULT_FIREHOSE_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["FIREHOSE_NAME"]))
            .extract()
    }
}
