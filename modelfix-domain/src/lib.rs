//! Domain logic: customize a build descriptor before the host validates it.
//!
//! This crate owns *what* a descriptor should look like after customization: pinned
//! versions, no test-only dependencies when tests are skipped, and compiler levels that
//! respect the configured floor. It does no I/O; reading and writing descriptors belongs to
//! the host (see the `modelfix` CLI).

mod comparable;
mod compiler;
mod customizer;
mod level;
mod policy;
mod ports;
mod prune;
mod range;
mod version;

pub use comparable::ComparableVersion;
pub use compiler::{
    COMPILER_PLUGIN_ARTIFACT_ID, COMPILER_PLUGIN_GROUP_ID, CompilerDirectiveNormalizer,
    LocationOutcome, NormalizeSummary, SkipReason, default_compiler_source,
};
pub use customizer::{CustomizeReport, ModelCustomizer, VersionCounts};
pub use level::{Level, LevelParseError};
pub use policy::{BuildPolicy, PolicyError};
pub use ports::{CustomizingValidator, ModelProblem, ModelValidator, Severity};
pub use prune::{DependencyPruner, TEST_SCOPE};
pub use range::{RangeError, Restriction, VersionRange};
pub use version::{DEFAULT_VERSION, Fallback, VersionResolver};
