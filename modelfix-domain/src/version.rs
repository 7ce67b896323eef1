use crate::range::VersionRange;
use modelfix_types::Coordinate;
use serde::Serialize;
use tracing::debug;

/// Version substituted for every coordinate that does not carry a usable concrete version.
pub const DEFAULT_VERSION: &str = "SYSTEM";

/// Why a version spec was replaced by [`DEFAULT_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    Missing,
    InvalidRange,
    NoRecommendedVersion,
}

/// Turns possibly-empty, possibly-ranged version specs into concrete versions.
///
/// Never fails: every unusable spec degrades to [`DEFAULT_VERSION`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionResolver;

impl VersionResolver {
    pub fn resolve(&self, coordinate: &Coordinate, version: Option<&str>) -> String {
        self.resolve_with_fallback(coordinate, version).0
    }

    /// Like [`resolve`](Self::resolve), also reporting whether the default was substituted.
    pub fn resolve_with_fallback(
        &self,
        coordinate: &Coordinate,
        version: Option<&str>,
    ) -> (String, Option<Fallback>) {
        match Self::classify(coordinate, version) {
            Ok(v) => (v.to_string(), None),
            Err(fallback) => (DEFAULT_VERSION.to_string(), Some(fallback)),
        }
    }

    fn classify<'v>(
        coordinate: &Coordinate,
        version: Option<&'v str>,
    ) -> Result<&'v str, Fallback> {
        let Some(version) = version.filter(|v| !v.is_empty()) else {
            debug!("{} has no version, using {}", coordinate, DEFAULT_VERSION);
            return Err(Fallback::Missing);
        };

        let range = match VersionRange::parse(version) {
            Ok(range) => range,
            Err(e) => {
                debug!(
                    "{} has an invalid version range ({}), falling back to {}",
                    coordinate, e, DEFAULT_VERSION
                );
                return Err(Fallback::InvalidRange);
            }
        };

        if range.recommended_version().is_none() {
            debug!(
                "{} has no recommended version in {} restriction(s), falling back to {}",
                coordinate,
                range.restrictions().len(),
                DEFAULT_VERSION
            );
            return Err(Fallback::NoRecommendedVersion);
        }

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(version: Option<&str>) -> (String, Option<Fallback>) {
        VersionResolver.resolve_with_fallback(&Coordinate::new("org.example", "lib"), version)
    }

    #[test]
    fn empty_and_missing_use_default() {
        assert_eq!(resolve(None), (DEFAULT_VERSION.to_string(), Some(Fallback::Missing)));
        assert_eq!(resolve(Some("")), (DEFAULT_VERSION.to_string(), Some(Fallback::Missing)));
    }

    #[test]
    fn malformed_range_uses_default() {
        for spec in ["not-a-range", "[1.0,2.0", "(1.0)", "[2.0,1.0]", " 1.0"] {
            assert_eq!(
                resolve(Some(spec)),
                (DEFAULT_VERSION.to_string(), Some(Fallback::InvalidRange)),
                "{spec}"
            );
        }
    }

    #[test]
    fn range_without_recommendation_uses_default() {
        for spec in ["[1.0,2.0)", "[1.0]", "(,1.0]", "[1.0,)"] {
            assert_eq!(
                resolve(Some(spec)),
                (
                    DEFAULT_VERSION.to_string(),
                    Some(Fallback::NoRecommendedVersion)
                ),
                "{spec}"
            );
        }
    }

    #[test]
    fn concrete_version_is_returned_verbatim() {
        for spec in ["1.2.3", "1.0-SNAPSHOT", "01.2", "2.0.0.Final"] {
            assert_eq!(resolve(Some(spec)), (spec.to_string(), None));
        }
    }

    #[test]
    fn very_long_specs_resolve() {
        let deep = format!("1{}", "-1".repeat(50_000));
        assert_eq!(resolve(Some(&deep)), (deep.clone(), None));
        assert_eq!(
            resolve(Some(&format!("[{deep},2)"))),
            (
                DEFAULT_VERSION.to_string(),
                Some(Fallback::NoRecommendedVersion)
            )
        );
        assert_eq!(
            resolve(Some(&format!("[{deep}"))),
            (DEFAULT_VERSION.to_string(), Some(Fallback::InvalidRange))
        );
    }

    #[test]
    fn resolve_drops_the_fallback() {
        let c = Coordinate::new("g", "a");
        assert_eq!(VersionResolver.resolve(&c, Some("4.12")), "4.12");
        assert_eq!(VersionResolver.resolve(&c, None), DEFAULT_VERSION);
    }
}
