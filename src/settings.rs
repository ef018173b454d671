//! Relay settings, loaded once from a TOML file at startup.
//!
//! Key names follow the camelCase used by the browser extension so the same
//! file can be converted to JSON and shipped with it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `ASK_RELAY_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding the built-in default system prompt.
pub const DEFAULT_SYSTEM_PROMPT_ENV: &str = "DEFAULT_SYSTEM_PROMPT";

pub const FALLBACK_SYSTEM_PROMPT: &str =
    "You are a helpful study assistant. Explain the following transcript clearly and concisely.";

pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub caption: CaptionSettings,
    pub prompts: PromptSettings,
    pub shortcuts: ShortcutSettings,
    pub llm: LlmSettings,
    pub ui: UiSettings,
    pub overlay: OverlaySettings,
}

/// How the ask handler picks the system prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptPolicy {
    /// Use the request's prompt, or the configured default when it is empty.
    #[default]
    ConfigDefault,
    /// Always forward the request's prompt, even when empty.
    RequestOnly,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub prompt_policy: PromptPolicy,
    /// Adds a `degraded` flag to ask responses when set.
    pub report_degraded: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            prompt_policy: PromptPolicy::default(),
            report_degraded: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionSettings {
    pub max_words: usize,
    pub max_seconds: u32,
    pub polling_interval_ms: u64,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            max_words: 30,
            max_seconds: 30,
            polling_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptSettings {
    pub initial: String,
    pub follow_up: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortcutSettings {
    pub activate_chat: String,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            activate_chat: "Alt+A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Local,
    Online,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: Provider,
    pub local: LocalBackend,
    pub online: OnlineBackend,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalBackend {
    pub url: String,
    pub model: String,
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self {
            url: DEFAULT_GENERATE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnlineBackend {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Connection details for whichever backend `llm.provider` selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl LlmSettings {
    pub fn active_backend(&self) -> Backend {
        match self.provider {
            Provider::Local => Backend {
                url: self.local.url.clone(),
                model: self.local.model.clone(),
                api_key: None,
            },
            Provider::Online => Backend {
                url: self.online.url.clone(),
                model: self.online.model.clone(),
                api_key: self
                    .online
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSettings {
    pub font_size: u32,
    pub user_bubble_color: String,
    pub assistant_bubble_color: String,
    pub system_banner_color: String,
    pub send_button_color: String,
    pub user_text_color: String,
    pub assistant_text_color: String,
    pub system_banner_text_color: String,
    pub overlay_background: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            user_bubble_color: "#dcf8c6".to_string(),
            assistant_bubble_color: "#f1f0f0".to_string(),
            system_banner_color: "#1e88e5".to_string(),
            send_button_color: "#1e88e5".to_string(),
            user_text_color: "#000000".to_string(),
            assistant_text_color: "#000000".to_string(),
            system_banner_text_color: "#ffffff".to_string(),
            overlay_background: "rgba(255, 255, 255, 0.95)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlaySettings {
    pub width: u32,
    pub border_radius: u32,
    pub padding: u32,
    pub max_height_percent: u32,
    pub show_initial_message: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            width: 360,
            border_radius: 8,
            padding: 12,
            max_height_percent: 60,
            show_initial_message: true,
        }
    }
}

impl Settings {
    /// Reads and parses the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Path of the config file, honouring `ASK_RELAY_CONFIG`.
    pub fn config_path_from_env() -> PathBuf {
        env::var("ASK_RELAY_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// System prompt used when a request does not bring its own.
    ///
    /// Reads `DEFAULT_SYSTEM_PROMPT` at call time; resolve it once at startup.
    pub fn default_system_prompt(&self) -> String {
        self.resolve_default_prompt(env::var(DEFAULT_SYSTEM_PROMPT_ENV).ok())
    }

    fn resolve_default_prompt(&self, from_env: Option<String>) -> String {
        if !self.prompts.initial.is_empty() {
            return self.prompts.initial.clone();
        }
        from_env
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_SYSTEM_PROMPT.to_string())
    }
}
