//! Naming of recorded-interaction fixtures.
//!
//! Each authority owns one cassette, named after its identifier, so replayed
//! runs line up with the registry without a separate mapping.

use std::path::{Path, PathBuf};

use crate::registry::Registry;

pub const FIXTURE_EXTENSION: &str = "yml";

/// Cassette name for an authority.
pub fn fixture_key(identifier: &str) -> &str {
    identifier
}

pub fn fixture_path(dir: impl AsRef<Path>, identifier: &str) -> PathBuf {
    dir.as_ref()
        .join(fixture_key(identifier))
        .with_extension(FIXTURE_EXTENSION)
}

/// Authorities in `registry` with no cassette under `dir`, in definition order.
pub fn missing_fixtures<'r>(registry: &'r Registry, dir: impl AsRef<Path>) -> Vec<&'r str> {
    let dir = dir.as_ref();
    registry
        .list_identifiers()
        .into_iter()
        .filter(|identifier| !fixture_path(dir, identifier).is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthorityConfig, ListMode};

    #[test]
    fn path_is_identifier_with_extension() {
        assert_eq!(
            fixture_path("fixtures/vcr_cassettes", "glen_eira"),
            PathBuf::from("fixtures/vcr_cassettes/glen_eira.yml")
        );
    }

    #[test]
    fn reports_authorities_without_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("knox.yml"), "--- []\n").unwrap();

        let registry = Registry::new([
            AuthorityConfig::new("knox", "https://knox.example.gov.au/ePathway/Production", "VIC")
                .with_list_mode(ListMode::Advertising),
            AuthorityConfig::new("monash", "https://monash.example.gov.au/ePathway", "VIC")
                .with_list_mode(ListMode::Advertising),
        ])
        .unwrap();

        assert_eq!(missing_fixtures(&registry, dir.path()), vec!["monash"]);
    }
}
