//! Wire types for the tags endpoint.

use serde::{Deserialize, Serialize};

/// A repository tag as returned by `GET /repos/{owner}/{repo}/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Tag name, the release version string.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_tags() {
        let json = r#"[
            {
                "name": "1.8.0",
                "zipball_url": "https://api.github.com/repos/playframework/play1/zipball/refs/tags/1.8.0",
                "tarball_url": "https://api.github.com/repos/playframework/play1/tarball/refs/tags/1.8.0",
                "commit": {
                    "sha": "c3a1f0e",
                    "url": "https://api.github.com/repos/playframework/play1/commits/c3a1f0e"
                },
                "node_id": "MDM6UmVmMTIz"
            },
            { "name": "1.7.1" }
        ]"#;

        let tags: Vec<Tag> = serde_json::from_str(json).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "1.8.0");
        assert_eq!(tags[1].name, "1.7.1");
    }
}
