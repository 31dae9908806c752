use crate::error::{Result, SetupError};
use crate::types::Platform;

/// Resolve raw platform tokens to canonical platforms.
///
/// Tokens are trimmed and lowercased, aliases are substituted, unknown
/// tokens are rejected, and duplicates are collapsed preserving the order
/// of first occurrence. Empty tokens are skipped silently.
pub fn resolve<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Platform>> {
    let mut resolved: Vec<Platform> = Vec::new();
    for token in tokens {
        let normalized = token.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let platform = Platform::from_token(&normalized).ok_or_else(|| {
            SetupError::UnsupportedPlatform {
                token: token.as_ref().trim().to_string(),
                allowed: allowed_list(),
            }
        })?;
        if !resolved.contains(&platform) {
            resolved.push(platform);
        }
    }
    if resolved.is_empty() {
        return Err(SetupError::NoPlatforms);
    }
    Ok(resolved)
}

/// Comma-joined canonical names, as consumed by `flutter create --platforms`.
pub fn csv(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn allowed_list() -> String {
    Platform::all()
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical() {
        let platforms = resolve(&["osx", "WIN", "ios"]).unwrap();
        assert_eq!(
            platforms,
            vec![Platform::Macos, Platform::Windows, Platform::Ios]
        );
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let platforms = resolve(&["web", "ios", "web", "android", "ios"]).unwrap();
        assert_eq!(
            platforms,
            vec![Platform::Web, Platform::Ios, Platform::Android]
        );
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let platforms = resolve(&["", "  ", "web"]).unwrap();
        assert_eq!(platforms, vec![Platform::Web]);
    }

    #[test]
    fn unknown_token_reports_token_and_allowed_set() {
        let err = resolve(&["ios", "solaris"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("solaris"));
        assert!(msg.contains("macos"));
        assert!(err.is_validation());
    }

    #[test]
    fn all_empty_is_no_platforms() {
        assert!(matches!(
            resolve(&["", " "]),
            Err(SetupError::NoPlatforms)
        ));
    }

    #[test]
    fn csv_joins_canonical_names() {
        let platforms = resolve(&["ios", "android", "osx"]).unwrap();
        assert_eq!(csv(&platforms), "ios,android,macos");
    }
}
