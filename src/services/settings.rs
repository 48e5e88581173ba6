//! Settings store — the single durable settings record.
//!
//! DESIGN
//! ======
//! One JSON record in the per-user config directory. Loaded with
//! hard-coded defaults for any unset field, overwritten wholesale on
//! save. Secrets can additionally be supplied per-run from the
//! environment; those overrides are never written back. Expiry of the AI
//! token is only ever displayed (see `services::token`), never enforced
//! here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORG_URL: &str = "https://office.visualstudio.com";
pub const DEFAULT_AI_ENDPOINT: &str =
    "https://augloop-cs-test-eastus-shared-open-ai-0.openai.azure.com";
pub const DEFAULT_AI_DEPLOYMENT: &str = "gpt-4o";

/// Env var overriding the tracking-service access token for one run.
pub const ENV_ACCESS_TOKEN: &str = "DCR_ADO_PAT";
/// Env var overriding the AI bearer token for one run.
pub const ENV_AI_TOKEN: &str = "DCR_AI_TOKEN";

const SETTINGS_FILE: &str = "settings.json";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings record malformed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no per-user config directory available on this platform")]
    NoConfigDir,
}

/// The persisted settings record. Missing fields deserialize to defaults,
/// so records written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub org_url: String,
    pub access_token: String,
    pub ai_endpoint: String,
    pub ai_deployment: String,
    pub ai_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org_url: DEFAULT_ORG_URL.to_string(),
            access_token: String::new(),
            ai_endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            ai_deployment: DEFAULT_AI_DEPLOYMENT.to_string(),
            ai_token: String::new(),
        }
    }
}

impl Settings {
    /// Copy with surrounding whitespace trimmed from every field and ALL
    /// whitespace removed from the AI token. Tokens pasted from
    /// `az account get-access-token` often carry embedded line breaks.
    #[must_use]
    fn sanitized(&self) -> Self {
        Self {
            org_url: self.org_url.trim().to_string(),
            access_token: self.access_token.trim().to_string(),
            ai_endpoint: self.ai_endpoint.trim().to_string(),
            ai_deployment: self.ai_deployment.trim().to_string(),
            ai_token: self.ai_token.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// File-backed store for the one settings record.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional per-user config location.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] when the platform exposes no
    /// per-user config directory.
    pub fn default_location() -> Result<Self, SettingsError> {
        let dirs = directories::ProjectDirs::from("", "", "dcrgen")
            .ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved record, falling back to defaults when the file does
    /// not exist yet. Unset fields inside an existing record also fall
    /// back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load and then apply per-run secret overrides from the environment.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SettingsStore::load`].
    pub fn load_with_env(&self) -> Result<Settings, SettingsError> {
        let mut settings = self.load()?;
        if let Ok(value) = std::env::var(ENV_ACCESS_TOKEN) {
            if !value.trim().is_empty() {
                settings.access_token = value.trim().to_string();
            }
        }
        if let Ok(value) = std::env::var(ENV_AI_TOKEN) {
            if !value.trim().is_empty() {
                settings.ai_token = value.chars().filter(|c| !c.is_whitespace()).collect();
            }
        }
        Ok(settings)
    }

    /// Persist the full record as a single file overwrite. Fields are
    /// sanitized before writing; the sanitized record is returned so the
    /// caller sees exactly what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parent directory cannot be
    /// written.
    pub fn save(&self, settings: &Settings) -> Result<Settings, SettingsError> {
        let clean = settings.sanitized();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&clean)?)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(clean)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
