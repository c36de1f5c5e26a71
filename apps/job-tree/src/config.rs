use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::classification::HierarchyPrefix;
use crate::errors::AppError;

const ENV_PREFIX: &str = "JOB_TREE_";

/// Tool configuration. Defaults reproduce the original classification run;
/// any field can be overridden through a `JOB_TREE_*` environment variable
/// (or a `.env` file).
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_host: String,
    pub ollama_port: u16,
    pub model: String,
    pub job_roles_file: PathBuf,
    pub naics_file: PathBuf,
    pub mapping_output: PathBuf,
    pub tree_output: PathBuf,
    pub prefix: HierarchyPrefix,
    /// Fixed pause taken after every classification call.
    pub pause: Duration,
    pub request_timeout: Duration,
    /// When set, classification is skipped and the tree is rebuilt from this mapping file.
    pub remerge_from: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ollama_host: "127.0.0.1".to_string(),
            ollama_port: 11434,
            model: "deepseek-r1:14b".to_string(),
            job_roles_file: PathBuf::from("data/job_classification/job_roles.txt"),
            naics_file: PathBuf::from("data/job_classification/naics_industries.txt"),
            mapping_output: PathBuf::from("job_roles_hierarchy.json"),
            tree_output: PathBuf::from("merged_hierarchy.json"),
            prefix: HierarchyPrefix::today(1, 0),
            pause: Duration::from_secs(1),
            request_timeout: Duration::from_secs(300),
            remerge_from: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from the defaults, overriding each field whose
    /// `JOB_TREE_*` key `lookup` resolves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Config::default();

        if let Some(host) = get("OLLAMA_HOST") {
            config.ollama_host = host;
        }
        if let Some(port) = get("OLLAMA_PORT") {
            config.ollama_port = parse_var("OLLAMA_PORT", &port)?;
        }
        if let Some(model) = get("MODEL") {
            config.model = model;
        }
        if let Some(path) = get("JOB_ROLES_FILE") {
            config.job_roles_file = PathBuf::from(path);
        }
        if let Some(path) = get("NAICS_FILE") {
            config.naics_file = PathBuf::from(path);
        }
        if let Some(path) = get("MAPPING_OUTPUT") {
            config.mapping_output = PathBuf::from(path);
        }
        if let Some(path) = get("TREE_OUTPUT") {
            config.tree_output = PathBuf::from(path);
        }
        if let Some(major) = get("MAJOR_VERSION") {
            config.prefix.major = parse_var("MAJOR_VERSION", &major)?;
        }
        if let Some(minor) = get("MINOR_VERSION") {
            config.prefix.minor = parse_var("MINOR_VERSION", &minor)?;
        }
        if let Some(date) = get("PATCH_DATE") {
            config.prefix.date = NaiveDate::parse_from_str(&date, "%Y/%m/%d").map_err(|e| {
                AppError::Config(format!(
                    "{ENV_PREFIX}PATCH_DATE must be formatted YYYY/MM/DD ({e})"
                ))
            })?;
        }
        if let Some(ms) = get("PAUSE_MS") {
            config.pause = Duration::from_millis(parse_var("PAUSE_MS", &ms)?);
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", &secs)?);
        }
        config.remerge_from = get("REMERGE_FROM")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Base URL of the Ollama server, e.g. `http://127.0.0.1:11434`.
    pub fn ollama_base_url(&self) -> String {
        format!("http://{}:{}", self.ollama_host, self.ollama_port)
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        AppError::Config(format!("{ENV_PREFIX}{name} has invalid value '{raw}': {e}"))
    })
}
