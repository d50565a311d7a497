//! Release version parsing and ordering.
//!
//! Versions are compared on their numeric part first (`1.2.3`), then on the
//! remaining text, where a plain release ranks above its qualified variants
//! (`1.2-RC1` is older than `1.2`).

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;

/// Download location prefix for release archives.
const DOWNLOAD_URL_PREFIX: &str = "http://download.playframework.com/releases/play-";

/// Suffix text given to versions without any.
const FINAL_SUFFIX: &str = "Z";

fn numeric_part() -> &'static Regex {
    static NUMERIC_PART: OnceLock<Regex> = OnceLock::new();
    NUMERIC_PART.get_or_init(|| Regex::new(r"\d+[\.\d+]+").expect("numeric part pattern is valid"))
}

/// One dotted component. Empty components (as in `1..2`) do not parse.
fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(part.parse().unwrap_or(u64::MAX))
}

/// A framework release identified by its version string.
#[derive(Debug, Clone)]
pub struct Release {
    version: String,
    /// First dotted-number run in the version, or empty.
    numpart: String,
    /// The version with `numpart` removed, `Z` when nothing is left.
    rest: String,
    /// Components of `numpart`; `[0, 0]` when it does not parse. A component
    /// too large for `u64` saturates to `u64::MAX`.
    versions: Vec<u64>,
}

impl Release {
    pub fn new(version: &str) -> Self {
        let numpart = numeric_part()
            .find(version)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let mut rest = if numpart.is_empty() {
            version.to_string()
        } else {
            version.replace(&numpart, "")
        };
        if rest.is_empty() {
            rest = FINAL_SUFFIX.to_string();
        }

        let versions = numpart
            .split('.')
            .map(parse_component)
            .collect::<Option<Vec<_>>>()
            .unwrap_or_else(|| vec![0, 0]);

        Self {
            version: version.to_string(),
            numpart,
            rest,
            versions,
        }
    }

    /// The version string as published.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Download URL of this release's archive.
    pub fn url(&self) -> String {
        format!("{}{}.zip", DOWNLOAD_URL_PREFIX, self.version)
    }

    /// Whether this release predates `other`.
    pub fn is_older_than(&self, other: &Release) -> bool {
        if self == other {
            return false;
        }

        for (i, mine) in self.versions.iter().enumerate() {
            let Some(theirs) = other.versions.get(i) else {
                return false;
            };
            if mine < theirs {
                return true;
            }
            if mine > theirs {
                return false;
            }
        }
        if self.versions.len() < other.versions.len() {
            return true;
        }

        // Same numbers: a version without a numeric part never counts as older.
        if !other.numpart.is_empty() && self.numpart.is_empty() {
            return false;
        }
        if !self.numpart.is_empty() && other.numpart.is_empty() {
            return true;
        }

        self.rest < other.rest
    }

    /// Whether this release is neither equal to nor older than `other`.
    pub fn is_newer_than(&self, other: &Release) -> bool {
        self != other && !self.is_older_than(other)
    }
}

impl PartialEq for Release {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for Release {}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// The newest release; the first one listed wins among equals.
pub fn latest(releases: &[Release]) -> Option<&Release> {
    let mut iter = releases.iter();
    let mut newest = iter.next()?;
    for release in iter {
        if release.is_newer_than(newest) {
            newest = release;
        }
    }
    Some(newest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn older(a: &str, b: &str) -> bool {
        Release::new(a).is_older_than(&Release::new(b))
    }

    #[test]
    fn test_parse_plain_version() {
        let release = Release::new("1.2.3");
        assert_eq!(release.numpart, "1.2.3");
        assert_eq!(release.rest, "Z");
        assert_eq!(release.versions, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_qualified_version() {
        let release = Release::new("1.5.0-RC1");
        assert_eq!(release.numpart, "1.5.0");
        assert_eq!(release.rest, "-RC1");
        assert_eq!(release.versions, vec![1, 5, 0]);
    }

    #[test]
    fn test_parse_without_numbers() {
        let release = Release::new("master");
        assert_eq!(release.numpart, "");
        assert_eq!(release.rest, "master");
        assert_eq!(release.versions, vec![0, 0]);
    }

    #[test]
    fn test_parse_trailing_dot_falls_back() {
        let release = Release::new("1.2.");
        assert_eq!(release.numpart, "1.2.");
        assert_eq!(release.versions, vec![0, 0]);
    }

    #[test]
    fn test_single_number_has_no_numeric_part() {
        let release = Release::new("7");
        assert_eq!(release.numpart, "");
        assert_eq!(release.rest, "7");
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(older("1.2", "1.3"));
        assert!(!older("1.3", "1.2"));
        assert!(older("1.2.9", "1.10.0"));
    }

    #[test]
    fn test_shorter_version_is_older() {
        assert!(older("1.2", "1.2.1"));
        assert!(!older("1.2.1", "1.2"));
    }

    #[test]
    fn test_release_candidate_older_than_final() {
        assert!(older("1.2-RC1", "1.2"));
        assert!(!older("1.2", "1.2-RC1"));
        assert!(older("1.2-RC1", "1.2-RC2"));
    }

    #[test]
    fn test_equal_is_not_older() {
        assert!(!older("1.2", "1.2"));
        assert!(!Release::new("1.2").is_newer_than(&Release::new("1.2")));
    }

    #[test]
    fn test_version_without_numbers() {
        // "master" compares as 0.0 numerically.
        assert!(older("master", "1.0"));
        assert!(!older("master", "0.0"));
        assert!(older("0.0", "master"));
    }

    #[test]
    fn test_oversized_component_saturates() {
        let huge = "1.99999999999999999999999";
        assert!(older("1.9", huge));
        assert!(older(huge, "2.0"));
        assert!(!older(huge, "master"));
    }

    #[test]
    fn test_empty_component_compares_as_zero() {
        assert!(older("1..2", "0.1"));
    }

    #[test]
    fn test_newer_than() {
        assert!(Release::new("1.3").is_newer_than(&Release::new("1.2")));
        assert!(!Release::new("1.2").is_newer_than(&Release::new("1.3")));
    }

    #[test]
    fn test_latest() {
        let releases: Vec<Release> = ["1.4.2", "1.5.0-RC1", "1.5.0", "1.3.9"]
            .iter()
            .map(|v| Release::new(v))
            .collect();
        assert_eq!(latest(&releases).unwrap().version(), "1.5.0");
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn test_url() {
        assert_eq!(
            Release::new("1.5.1").url(),
            "http://download.playframework.com/releases/play-1.5.1.zip"
        );
    }

    #[test]
    fn test_equality_is_textual() {
        assert_eq!(Release::new("1.2"), Release::new("1.2"));
        assert_ne!(Release::new("1.2"), Release::new("v1.2"));
    }
}
