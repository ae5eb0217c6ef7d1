use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Configuration {
	#[serde(with = "socket_addr_deserializer")]
	pub address: SocketAddr,
	pub log_filters: String,
	#[serde(default)]
	pub environment: Environment,
	pub database: DatabaseConfiguration,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfiguration {
	pub url: String,
	/// Pause between two failed connection attempts.
	#[serde(with = "humantime_serde", default = "default_retry_interval")]
	pub retry_interval: Duration,
	/// Budget for fetching one page of messages including the total count.
	#[serde(with = "humantime_serde", default = "default_query_timeout")]
	pub query_timeout: Duration,
}

fn default_retry_interval() -> Duration {
	Duration::from_secs(5)
}

fn default_query_timeout() -> Duration {
	Duration::from_secs(8)
}

#[derive(Clone, Copy, Debug, Default, Display, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	#[default]
	#[display("development")]
	Development,
	#[display("production")]
	Production,
}

impl Environment {
	/// Error details are only shown to clients outside of production.
	pub fn exposes_error_details(self) -> bool {
		self != Self::Production
	}
}

/// Values that take precedence over the configuration file.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ConfigurationOverrides {
	/// Port to listen on, keeping the configured IP address
	#[arg(long, env = "PORT")]
	pub port: Option<u16>,
	#[arg(long, env = "DATABASE_URL")]
	pub database_url: Option<String>,
	#[arg(long, env = "ENVIRONMENT", value_enum)]
	pub environment: Option<Environment>,
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;

		Ok(Configuration::try_from(text.as_str())?)
	}

	pub fn apply(&mut self, overrides: ConfigurationOverrides) {
		let ConfigurationOverrides {
			port,
			database_url,
			environment,
		} = overrides;

		if let Some(port) = port {
			self.address.set_port(port);
		}
		if let Some(database_url) = database_url {
			self.database.url = database_url;
		}
		if let Some(environment) = environment {
			self.environment = environment;
		}
	}
}

impl TryFrom<&str> for Configuration {
	type Error = toml::de::Error;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		toml::from_str(text)
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
}

// See https://serde.rs/custom-date-format.html
mod socket_addr_deserializer {
	use serde::{self, Deserialize, Deserializer};
	use std::net::SocketAddr;
	use std::str::FromStr;

	pub fn deserialize<'deserializer, D>(deserializer: D) -> Result<SocketAddr, D::Error>
	where
		D: Deserializer<'deserializer>,
	{
		let string = String::deserialize(deserializer)?;
		SocketAddr::from_str(string.as_str()).map_err(serde::de::Error::custom)
	}
}
