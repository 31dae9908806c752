use crate::error::{Result, SetupError};
use crate::platform;
use crate::types::{AndroidLanguage, Channel, IosLanguage, Platform, Template, UpdateMode};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Fallback package identifier when sanitization yields nothing usable.
pub const FALLBACK_PACKAGE_NAME: &str = "app";

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Validated configuration for a single setup run. Immutable once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project_name: String,
    pub org: String,
    pub channel: Channel,
    pub output_dir: PathBuf,
    pub template: Template,
    pub ios_language: IosLanguage,
    pub android_language: AndroidLanguage,
    pub update_mode: UpdateMode,
    pub dry_run: bool,
    pub platforms: Vec<Platform>,
}

impl RunConfig {
    pub fn new(
        project_name: impl Into<String>,
        raw_platforms: &[String],
        org: impl Into<String>,
        channel: Channel,
        output_dir: impl Into<PathBuf>,
        template: Template,
        ios_language: IosLanguage,
        android_language: AndroidLanguage,
        update_mode: UpdateMode,
        dry_run: bool,
    ) -> Result<Self> {
        let project_name = project_name.into();
        if project_name.is_empty() {
            return Err(SetupError::EmptyProjectName);
        }
        let platforms = platform::resolve(raw_platforms)?;
        Ok(Self {
            project_name,
            org: org.into(),
            channel,
            output_dir: output_dir.into(),
            template,
            ios_language,
            android_language,
            update_mode,
            dry_run,
            platforms,
        })
    }

    /// Full path of the generated project directory.
    pub fn project_path(&self) -> PathBuf {
        self.output_dir.join(&self.project_name)
    }

    /// Sanitized identifier passed to the generator as `--project-name`.
    pub fn package_name(&self) -> String {
        sanitize_package_name(&self.project_name)
    }

    pub fn platforms_csv(&self) -> String {
        platform::csv(&self.platforms)
    }

    pub fn has_platform(&self, p: Platform) -> bool {
        self.platforms.contains(&p)
    }
}

// ---------------------------------------------------------------------------
// Package-name sanitization
// ---------------------------------------------------------------------------

static NON_IDENT_RE: OnceLock<Regex> = OnceLock::new();

fn non_ident_re() -> &'static Regex {
    NON_IDENT_RE.get_or_init(|| Regex::new(r"[^a-z0-9_]").unwrap())
}

/// Derive a Dart-safe package identifier from an arbitrary project name.
///
/// Lowercase, every other character mapped to `_`, `app` for an empty
/// result, `app_` prefixed when the result does not start with a letter.
/// Total and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize_package_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let sanitized = non_ident_re().replace_all(&lowered, "_").into_owned();
    if sanitized.is_empty() {
        return FALLBACK_PACKAGE_NAME.to_string();
    }
    if !sanitized.starts_with(|c: char| c.is_ascii_lowercase()) {
        return format!("{FALLBACK_PACKAGE_NAME}_{sanitized}");
    }
    sanitized
}
