//! Version range expressions: `1.0`, `[1.0]`, `[1.0,2.0)`, `(,1.0],[1.2,)`.

use crate::comparable::ComparableVersion;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("unbounded range: {0}")]
    Unbounded(String),

    #[error("single version must be surrounded by []: {0}")]
    SingleVersionNotInclusive(String),

    #[error("range cannot have identical boundaries: {0}")]
    IdenticalBounds(String),

    #[error("range defies version ordering: {0}")]
    DefiesOrdering(String),

    #[error("ranges overlap: {0}")]
    Overlap(String),

    #[error("only fully-qualified sets allowed in multiple set scenario: {0}")]
    TrailingSpec(String),

    #[error("not a concrete version: {0:?}")]
    InvalidVersion(String),
}

/// One bracketed interval. `None` bounds are open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub lower: Option<ComparableVersion>,
    pub lower_inclusive: bool,
    pub upper: Option<ComparableVersion>,
    pub upper_inclusive: bool,
}

impl Restriction {
    /// The unrestricted interval that backs a plain version spec.
    pub fn everything() -> Self {
        Self {
            lower: None,
            lower_inclusive: false,
            upper: None,
            upper_inclusive: false,
        }
    }
}

/// A parsed version spec.
///
/// A plain version (`1.2.3`) is a *recommendation*: it is kept as the recommended version and
/// restricts nothing. Any bracketed spec only restricts and never recommends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    recommended: Option<String>,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let mut restrictions = Vec::new();
        let mut process = spec;
        let mut upper_bound: Option<ComparableVersion> = None;

        while process.starts_with('[') || process.starts_with('(') {
            let Some(close) = process.find([']', ')']) else {
                return Err(RangeError::Unbounded(spec.to_string()));
            };

            let restriction = parse_restriction(&process[..=close])?;
            if let Some(prev_upper) = &upper_bound {
                match &restriction.lower {
                    Some(lower) if lower >= prev_upper => {}
                    _ => return Err(RangeError::Overlap(spec.to_string())),
                }
            }
            upper_bound = restriction.upper.clone();
            restrictions.push(restriction);

            process = process[close + 1..].trim();
            if let Some(rest) = process.strip_prefix(',') {
                process = rest.trim();
            }
        }

        if process.is_empty() {
            return Ok(Self {
                recommended: None,
                restrictions,
            });
        }

        if !restrictions.is_empty() {
            return Err(RangeError::TrailingSpec(spec.to_string()));
        }

        if !is_concrete_version(process) {
            return Err(RangeError::InvalidVersion(process.to_string()));
        }

        Ok(Self {
            recommended: Some(process.to_string()),
            restrictions: vec![Restriction::everything()],
        })
    }

    pub fn recommended_version(&self) -> Option<&str> {
        self.recommended.as_deref()
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }
}

fn parse_restriction(spec: &str) -> Result<Restriction, RangeError> {
    let lower_inclusive = spec.starts_with('[');
    let upper_inclusive = spec.ends_with(']');
    let inner = spec[1..spec.len() - 1].trim();

    match inner.find(',') {
        None => {
            if !lower_inclusive || !upper_inclusive {
                return Err(RangeError::SingleVersionNotInclusive(spec.to_string()));
            }
            if inner.is_empty() {
                return Err(RangeError::InvalidVersion(inner.to_string()));
            }
            let version = ComparableVersion::new(inner);
            Ok(Restriction {
                lower: Some(version.clone()),
                lower_inclusive: true,
                upper: Some(version),
                upper_inclusive: true,
            })
        }
        Some(comma) => {
            let lower = inner[..comma].trim();
            let upper = inner[comma + 1..].trim();
            if lower == upper {
                return Err(RangeError::IdenticalBounds(spec.to_string()));
            }

            let lower = (!lower.is_empty()).then(|| ComparableVersion::new(lower));
            let upper = (!upper.is_empty()).then(|| ComparableVersion::new(upper));
            if let (Some(l), Some(u)) = (&lower, &upper)
                && u < l
            {
                return Err(RangeError::DefiesOrdering(spec.to_string()));
            }

            Ok(Restriction {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            })
        }
    }
}

/// A bare version token: starts with a digit, then alphanumerics and `.`, `-`, `_`, `+`.
fn is_concrete_version(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
}
