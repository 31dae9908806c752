use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
    Macos,
    Linux,
    Windows,
    Web,
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Ios,
            Platform::Android,
            Platform::Macos,
            Platform::Linux,
            Platform::Windows,
            Platform::Web,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Web => "web",
        }
    }

    /// Canonical platform for a lowercased token, `None` if unknown.
    /// Aliases accepted by `flutter create` users map to their canonical
    /// names here (osx → macos, win → windows).
    pub fn from_token(token: &str) -> Option<Platform> {
        match token {
            "ios" => Some(Platform::Ios),
            "android" => Some(Platform::Android),
            "macos" | "osx" => Some(Platform::Macos),
            "linux" => Some(Platform::Linux),
            "windows" | "win" => Some(Platform::Windows),
            "web" => Some(Platform::Web),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Stable,
    Beta,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    App,
    Plugin,
}

impl Template {
    pub fn as_str(self) -> &'static str {
        match self {
            Template::App => "app",
            Template::Plugin => "plugin",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UpdateMode
// ---------------------------------------------------------------------------

/// How an existing SDK checkout is reconciled with its remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Fast-forward when possible; on divergence, offer a hard reset.
    Reset,
    /// Delete the checkout and clone fresh.
    Reclone,
    /// Fast-forward when possible; on divergence, report and stop.
    Skip,
}

impl UpdateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateMode::Reset => "reset",
            UpdateMode::Reclone => "reclone",
            UpdateMode::Skip => "skip",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Plugin languages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IosLanguage {
    Swift,
    Objc,
}

impl IosLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            IosLanguage::Swift => "swift",
            IosLanguage::Objc => "objc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndroidLanguage {
    Kotlin,
    Java,
}

impl AndroidLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            AndroidLanguage::Kotlin => "kotlin",
            AndroidLanguage::Java => "java",
        }
    }
}
