//! Configuration for the Gmail mailer
//!
//! OAuth credentials are looked up in this order:
//! 1. Compile-time embedded credentials
//! 2. `google-credentials.json` in the config directory (Google Cloud Console format)
//! 3. Runtime environment variables
//!
//! Compose defaults (sender, priority) come from an optional `compose.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compose::Priority;

/// Credentials filename in the config directory
const CREDENTIALS_FILE: &str = "google-credentials.json";

/// Compose defaults filename in the config directory
const COMPOSE_DEFAULTS_FILE: &str = "compose.json";

const CLIENT_ID_VAR: &str = "GMAIL_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "GMAIL_CLIENT_SECRET";

/// OAuth client credentials for Gmail API access
#[derive(Debug, Clone)]
pub struct GmailCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Google Cloud Console credential file: either an "installed" or a "web" client
#[derive(Deserialize)]
struct GoogleCredentialFile {
    installed: Option<ClientSection>,
    web: Option<ClientSection>,
}

#[derive(Deserialize)]
struct ClientSection {
    client_id: String,
    client_secret: String,
}

impl GmailCredentials {
    /// Load credentials from the first source that provides them
    pub fn load() -> Result<Self> {
        if let Some(creds) = Self::from_compile_time() {
            return Ok(creds);
        }

        if config::config_exists(CREDENTIALS_FILE) {
            let file: GoogleCredentialFile = config::load_json(CREDENTIALS_FILE)?;
            return Self::from_credential_file(file);
        }

        Self::from_env()
    }

    /// Credentials baked in at build time via GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET
    pub fn from_compile_time() -> Option<Self> {
        let client_id = option_env!("GOOGLE_CLIENT_ID")?;
        let client_secret = option_env!("GOOGLE_CLIENT_SECRET")?;

        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }

        Some(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Load credentials from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: GoogleCredentialFile = config::load_json_file(path)?;
        Self::from_credential_file(file)
    }

    /// Parse credentials from a JSON string (Google Cloud Console format)
    pub fn from_json(json: &str) -> Result<Self> {
        let file: GoogleCredentialFile =
            serde_json::from_str(json).context("Failed to parse credentials JSON")?;
        Self::from_credential_file(file)
    }

    fn from_credential_file(file: GoogleCredentialFile) -> Result<Self> {
        let section = file
            .installed
            .or(file.web)
            .context("Credentials file missing 'installed' or 'web' section")?;

        Ok(Self {
            client_id: section.client_id,
            client_secret: section.client_secret,
        })
    }

    /// Load credentials from GMAIL_CLIENT_ID / GMAIL_CLIENT_SECRET
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var(CLIENT_ID_VAR)
            .with_context(|| format!("{CLIENT_ID_VAR} environment variable not set"))?;
        let client_secret = std::env::var(CLIENT_SECRET_VAR)
            .with_context(|| format!("{CLIENT_SECRET_VAR} environment variable not set"))?;

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Where `load` looks for the credentials file
    pub fn default_credentials_path() -> Option<PathBuf> {
        config::config_path(CREDENTIALS_FILE)
    }
}

/// Defaults applied by [`Composer::with_defaults`](crate::Composer::with_defaults)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposeDefaults {
    /// Sender address used when none is set explicitly
    pub from: Option<String>,
    pub from_name: Option<String>,
    pub priority: Option<Priority>,
}

impl ComposeDefaults {
    /// Load `compose.json` from the config directory; missing file means no defaults
    pub fn load() -> Result<Self> {
        config::load_json_or_default(COMPOSE_DEFAULTS_FILE)
    }

    /// Load defaults from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Persist these defaults to `compose.json`
    pub fn save(&self) -> Result<PathBuf> {
        config::save_json(COMPOSE_DEFAULTS_FILE, self)
    }
}
