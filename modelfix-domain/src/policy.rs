use crate::level::{Level, LevelParseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid compiler source level {value:?}: {source}")]
    InvalidCompilerSource {
        value: String,
        #[source]
        source: LevelParseError,
    },
}

/// Process-wide, read-only customization policy.
///
/// Built once before any descriptor is customized and only ever shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPolicy {
    /// Drop `test`-scoped dependencies.
    pub skip_tests: bool,

    /// Compiler source level. When set, every compiler configuration is pinned to it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_source: Option<Level>,
}

impl BuildPolicy {
    /// Build a policy from raw settings, validating the compiler source level.
    pub fn from_raw(skip_tests: bool, compiler_source: Option<&str>) -> Result<Self, PolicyError> {
        let compiler_source = compiler_source
            .map(|raw| {
                raw.trim()
                    .parse::<Level>()
                    .map_err(|source| PolicyError::InvalidCompilerSource {
                        value: raw.to_string(),
                        source,
                    })
            })
            .transpose()?;

        Ok(Self {
            skip_tests,
            compiler_source,
        })
    }
}
