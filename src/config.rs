use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const INPUT_S3_BUCKET: &str = "s3-bucket";
pub const INPUT_S3_KEY: &str = "s3-key";
pub const INPUT_S3_REGION: &str = "s3-region";
pub const INPUT_S3_ENDPOINT: &str = "s3-endpoint";
pub const INPUT_S3_FORCE_PATH_STYLE: &str = "s3-force-path-style";
pub const INPUT_S3_ACCESS_KEY_ID: &str = "s3-access-key-id";
pub const INPUT_S3_SECRET_ACCESS_KEY: &str = "s3-secret-access-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Input does not meet YAML 1.2 \"Core Schema\" specification: {name}. Support boolean input list: `true | True | TRUE | false | False | FALSE`")]
    InvalidBoolean { name: String },
}

/// Key-value view of the CI step's inputs
pub trait InputSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// Inputs handed to a GitHub Actions step as `INPUT_<NAME>` environment variables
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl EnvInputs {
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        env::var(Self::variable_name(name)).ok()
    }
}

impl InputSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

fn optional(inputs: &dyn InputSource, name: &str) -> Option<String> {
    inputs
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(inputs: &dyn InputSource, name: &str) -> Result<String, ConfigError> {
    optional(inputs, name).ok_or_else(|| ConfigError::MissingInput(name.to_string()))
}

fn boolean(inputs: &dyn InputSource, name: &str) -> Result<bool, ConfigError> {
    match optional(inputs, name).as_deref() {
        None => Ok(false),
        Some("true" | "True" | "TRUE") => Ok(true),
        Some("false" | "False" | "FALSE") => Ok(false),
        Some(_) => Err(ConfigError::InvalidBoolean {
            name: name.to_string(),
        }),
    }
}

/// Where the project archive lives and how to reach it
#[derive(Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub bucket: String,
    pub key: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Settings")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("force_path_style", &self.force_path_style)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

impl S3Settings {
    pub fn from_inputs(inputs: &dyn InputSource) -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: required(inputs, INPUT_S3_BUCKET)?,
            key: required(inputs, INPUT_S3_KEY)?,
            region: optional(inputs, INPUT_S3_REGION),
            endpoint: optional(inputs, INPUT_S3_ENDPOINT),
            force_path_style: boolean(inputs, INPUT_S3_FORCE_PATH_STYLE)?,
            access_key_id: optional(inputs, INPUT_S3_ACCESS_KEY_ID),
            secret_access_key: optional(inputs, INPUT_S3_SECRET_ACCESS_KEY),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub s3: S3Settings,
    pub workspace: PathBuf,
}

impl PrepConfig {
    pub fn from_inputs(
        inputs: &dyn InputSource,
        workspace: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            s3: S3Settings::from_inputs(inputs)?,
            workspace: workspace.unwrap_or_else(default_workspace),
        })
    }
}

/// `GITHUB_WORKSPACE`, else the current directory
pub fn default_workspace() -> PathBuf {
    env::var_os("GITHUB_WORKSPACE")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
