use dotenvy::dotenv;
use shared::types::{Result, StylistError};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_NAME: &str = "fashionproducts";
pub const DEFAULT_INDEX_HOST: &str = "https://fashionproducts-zn0fky7.svc.aped-4627-b74a.pinecone.io";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_TOP_K: usize = 5;

/// Env var naming an alternative secrets file.
pub const SECRETS_PATH_ENV: &str = "STYLIST_SECRETS";

/// Immutable process-wide settings, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub pinecone_api_key: String,
    pub index_name: String,
    pub index_host: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub top_k: usize,
}

impl Config {
    /// Reads `.env`, then the secrets file, then the process environment.
    /// Environment variables win over file entries.
    pub fn load(secrets_path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        let secrets = match secrets_path {
            Some(path) => Some(SecretsFile::read(path)?),
            None => match env::var(SECRETS_PATH_ENV) {
                Ok(path) => Some(SecretsFile::read(Path::new(&path))?),
                Err(_) => {
                    let fallback = Self::default_secrets_path();
                    if fallback.exists() {
                        Some(SecretsFile::read(&fallback)?)
                    } else {
                        None
                    }
                }
            },
        };
        Self::from_sources(secrets.as_ref(), |key| env::var(key).ok())
    }

    fn default_secrets_path() -> PathBuf {
        let mut path = PathBuf::from(".stylist");
        path.push("secrets.toml");
        path
    }

    /// Builds a config from an optional secrets file and an environment lookup.
    pub fn from_sources<F>(secrets: Option<&SecretsFile>, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| -> Option<String> {
            env_lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| secrets.and_then(|s| s.get(key)))
        };
        let required = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| StylistError::Config(format!("{key} is not set")))
        };

        let top_k = match lookup("STYLIST_TOP_K") {
            Some(raw) => parse_top_k(&raw)?,
            None => DEFAULT_TOP_K,
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            pinecone_api_key: required("PINECONE_API_KEY")?,
            index_name: lookup("PINECONE_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            index_host: lookup("PINECONE_INDEX_HOST").unwrap_or_else(|| DEFAULT_INDEX_HOST.to_string()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            top_k,
        })
    }

    /// Command-line override for the number of matches.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(StylistError::Config("top_k must be at least 1".to_string()));
        }
        self.top_k = top_k;
        Ok(self)
    }
}

fn parse_top_k(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(StylistError::Config(format!(
            "STYLIST_TOP_K must be a positive integer, got `{raw}`"
        ))),
        Ok(k) => Ok(k),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("pinecone_api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("index_host", &self.index_host)
            .field("openai_base_url", &self.openai_base_url)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .field("top_k", &self.top_k)
            .finish()
    }
}

/// Flat TOML table of upper-case secret keys.
#[derive(Debug, Default)]
pub struct SecretsFile {
    table: toml::Table,
}

impl SecretsFile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let table: toml::Table = raw.parse()?;
        Ok(Self { table })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.table.get(key)? {
            toml::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }
}
