//! Compiler `source`/`target` directive normalization.

use crate::level::Level;
use modelfix_types::ConfigNode;
use serde::Serialize;
use tracing::{debug, trace};

pub const COMPILER_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";
pub const COMPILER_PLUGIN_ARTIFACT_ID: &str = "maven-compiler-plugin";

const SOURCE: &str = "source";
const TARGET: &str = "target";

/// Floor applied when no compiler source level is configured: `1.5`.
pub fn default_compiler_source() -> Level {
    Level::from_unscaled(15, 1)
}

/// Why a configuration location was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Absent,
    MissingSource,
    MissingTarget,
    InvalidSource,
    InvalidTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOutcome {
    /// Both values were written back; `changed` is false when the text was already canonical.
    Normalized { changed: bool },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeSummary {
    pub locations: u64,
    pub normalized: u64,
    pub changed: u64,
    pub skipped: u64,
}

impl NormalizeSummary {
    fn record(&mut self, outcome: LocationOutcome) {
        self.locations += 1;
        match outcome {
            LocationOutcome::Normalized { changed } => {
                self.normalized += 1;
                if changed {
                    self.changed += 1;
                }
            }
            LocationOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: NormalizeSummary) {
        self.locations += other.locations;
        self.normalized += other.normalized;
        self.changed += other.changed;
        self.skipped += other.skipped;
    }
}

/// Rewrites compiler `source`/`target` levels.
///
/// With a configured level, `source` is pinned to it (even when the descriptor asks for
/// more). Without one, `source` is only raised to [`default_compiler_source`]. Either way,
/// `target` is then raised to `source` when lower.
#[derive(Debug, Clone)]
pub struct CompilerDirectiveNormalizer {
    floor: Level,
    pinned: bool,
}

impl CompilerDirectiveNormalizer {
    pub fn new(compiler_source: Option<&Level>) -> Self {
        match compiler_source {
            Some(level) => Self {
                floor: level.clone(),
                pinned: true,
            },
            None => Self {
                floor: default_compiler_source(),
                pinned: false,
            },
        }
    }

    pub fn floor(&self) -> &Level {
        &self.floor
    }

    /// Normalize every location independently; one bad location never stops the rest.
    pub fn normalize<'a, I>(&self, locations: I) -> NormalizeSummary
    where
        I: IntoIterator<Item = Option<&'a mut ConfigNode>>,
    {
        let mut summary = NormalizeSummary::default();
        for location in locations {
            let outcome = match location {
                Some(config) => self.normalize_location(config),
                None => LocationOutcome::Skipped(SkipReason::Absent),
            };
            summary.record(outcome);
        }
        summary
    }

    /// Normalize one configuration block. Nothing is written unless both values parse.
    pub fn normalize_location(&self, config: &mut ConfigNode) -> LocationOutcome {
        let (source, target) = match read_levels(config) {
            Ok(levels) => levels,
            Err(reason) => {
                trace!("skipping compiler configuration: {:?}", reason);
                return LocationOutcome::Skipped(reason);
            }
        };

        let source = if self.pinned || source < self.floor {
            self.floor.clone()
        } else {
            source
        };
        let target = if target < source {
            source.clone()
        } else {
            target
        };

        let changed = write_level(config, SOURCE, &source) | write_level(config, TARGET, &target);
        if changed {
            debug!("compiler configuration set to source {source}, target {target}");
        }
        LocationOutcome::Normalized { changed }
    }
}

fn read_levels(config: &ConfigNode) -> Result<(Level, Level), SkipReason> {
    let source = config
        .child_value(SOURCE)
        .ok_or(SkipReason::MissingSource)?
        .trim()
        .parse::<Level>()
        .map_err(|_| SkipReason::InvalidSource)?;
    let target = config
        .child_value(TARGET)
        .ok_or(SkipReason::MissingTarget)?
        .trim()
        .parse::<Level>()
        .map_err(|_| SkipReason::InvalidTarget)?;
    Ok((source, target))
}

fn write_level(config: &mut ConfigNode, name: &str, level: &Level) -> bool {
    let Some(node) = config.child_mut(name) else {
        return false;
    };
    let text = level.to_string();
    if node.value() == Some(text.as_str()) {
        return false;
    }
    node.set_value(text);
    true
}
