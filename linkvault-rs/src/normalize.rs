//! Canonical keys for note names, link targets and tags.
//!
//! Every lookup in the index goes through [`NormalizationPolicy::normalize_name`],
//! so changing either policy flag invalidates every key the index holds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// How whitespace inside a name is treated when building its canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceReplacement {
    /// Spaces are kept as-is.
    #[default]
    None,
    /// Every run of whitespace becomes a single `-`.
    Hyphen,
}

impl std::str::FromStr for SpaceReplacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SpaceReplacement::None),
            "hyphen" => Ok(SpaceReplacement::Hyphen),
            other => Err(format!("unknown space replacement '{}'", other)),
        }
    }
}

/// The active name-normalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NormalizationPolicy {
    /// When false, names are lowercased before comparison.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Whitespace handling.
    #[serde(default)]
    pub space_replacement: SpaceReplacement,
}

impl NormalizationPolicy {
    pub fn new(case_sensitive: bool, space_replacement: SpaceReplacement) -> Self {
        Self {
            case_sensitive,
            space_replacement,
        }
    }

    /// Map a raw note name or link target to its canonical key.
    pub fn normalize_name(&self, raw: &str) -> String {
        let cased = self.apply_case(raw);
        match self.space_replacement {
            SpaceReplacement::None => cased,
            SpaceReplacement::Hyphen => WHITESPACE_RUN.replace_all(&cased, "-").into_owned(),
        }
    }

    /// Map a raw tag (with or without `#`) to its canonical key.
    ///
    /// Only the case rule applies; spaces are never replaced in tags.
    /// Returns `None` when nothing meaningful is left.
    pub fn normalize_tag(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        let without_hash = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let stripped = without_hash.trim_matches(|c| c == '/' || c == '\\' || c == '-');
        if stripped.is_empty() {
            return None;
        }
        Some(self.apply_case(stripped))
    }

    fn apply_case(&self, raw: &str) -> String {
        if self.case_sensitive {
            raw.to_string()
        } else {
            raw.to_lowercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(case_sensitive: bool, space: SpaceReplacement) -> NormalizationPolicy {
        NormalizationPolicy::new(case_sensitive, space)
    }

    #[test]
    fn test_default_policy_lowercases_and_keeps_spaces() {
        let p = NormalizationPolicy::default();
        assert_eq!(p.normalize_name("My Note"), "my note");
    }

    #[test]
    fn test_hyphen_collapses_whitespace_runs() {
        let p = policy(false, SpaceReplacement::Hyphen);
        assert_eq!(p.normalize_name("My   Big\tNote"), "my-big-note");
        assert_eq!(p.normalize_name("my note"), p.normalize_name("My Note"));
    }

    #[test]
    fn test_case_sensitive_preserves_case() {
        let p = policy(true, SpaceReplacement::None);
        assert_eq!(p.normalize_name("My Note"), "My Note");
        assert_ne!(p.normalize_name("my note"), p.normalize_name("My Note"));
    }

    #[test]
    fn test_case_sensitive_with_hyphen() {
        let p = policy(true, SpaceReplacement::Hyphen);
        assert_eq!(p.normalize_name("My Note"), "My-Note");
    }

    #[test]
    fn test_normalize_is_total() {
        let p = policy(false, SpaceReplacement::Hyphen);
        assert_eq!(p.normalize_name(""), "");
        assert_eq!(p.normalize_name("   "), "-");
    }

    #[test]
    fn test_tag_ignores_space_replacement() {
        let p = policy(false, SpaceReplacement::Hyphen);
        assert_eq!(p.normalize_tag("Big Project"), Some("big project".to_string()));
    }

    #[test]
    fn test_tag_strips_hash_and_edge_separators() {
        let p = NormalizationPolicy::default();
        assert_eq!(p.normalize_tag("#Rust"), Some("rust".to_string()));
        assert_eq!(p.normalize_tag("/area/work-"), Some("area/work".to_string()));
        assert_eq!(p.normalize_tag("--"), None);
        assert_eq!(p.normalize_tag("#"), None);
    }

    #[test]
    fn test_tag_case_sensitive() {
        let p = policy(true, SpaceReplacement::None);
        assert_eq!(p.normalize_tag("Rust"), Some("Rust".to_string()));
    }

    #[test]
    fn test_space_replacement_from_str() {
        assert_eq!("hyphen".parse::<SpaceReplacement>(), Ok(SpaceReplacement::Hyphen));
        assert_eq!("None".parse::<SpaceReplacement>(), Ok(SpaceReplacement::None));
        assert!("dash".parse::<SpaceReplacement>().is_err());
    }
}
