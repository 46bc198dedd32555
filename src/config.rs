//! Environment configuration and client construction.

use crate::error;

use aws_sdk_dynamodb::{Client, config};
use std::env;

const AWS_REGION: &str = "AWS_REGION";
const SERVICE_NAME: &str = "SERVICE_NAME";
const ENVIRONMENT_NAME: &str = "ENVIRONMENT_NAME";
const RELEASE_VERSION: &str = "RELEASE_VERSION";
const LOG_LEVEL: &str = "LOG_LEVEL";
const DB_TABLE_NAME: &str = "DB_TABLE_NAME";
const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from the environment.
///
/// Unset and empty variables are treated alike.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnvironmentConfig {
    /// AWS region; the SDK default chain decides when unset.
    pub region: Option<String>,
    /// Name of the service using the repository.
    pub service_name: String,
    /// Deployment environment, such as `dev` or `prod`.
    pub environment_name: String,
    /// Version of the running release.
    pub release_version: String,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// The data item table.
    pub db_table_name: String,
    /// Endpoint override, for a local DynamoDB.
    pub dynamodb_endpoint: Option<String>,
}

impl EnvironmentConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> error::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> error::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let db_table_name = lookup(DB_TABLE_NAME)
            .ok_or(error::Error::MissingEnvironmentVariable(DB_TABLE_NAME))?;
        let config = Self {
            region: lookup(AWS_REGION),
            service_name: lookup(SERVICE_NAME).unwrap_or_default(),
            environment_name: lookup(ENVIRONMENT_NAME).unwrap_or_default(),
            release_version: lookup(RELEASE_VERSION).unwrap_or_default(),
            log_level: lookup(LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            db_table_name,
            dynamodb_endpoint: lookup(DYNAMODB_ENDPOINT),
        };
        tracing::debug!(
            service_name = %config.service_name,
            environment_name = %config.environment_name,
            db_table_name = %config.db_table_name,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Build a DynamoDB client from the SDK defaults and these settings.
    pub async fn load_client(&self) -> Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;
        let mut builder = config::Builder::from(&sdk_config);
        if let Some(dynamodb_endpoint) = &self.dynamodb_endpoint {
            builder = builder.endpoint_url(dynamodb_endpoint);
        }
        Client::from_conf(builder.build())
    }
}
