use crate::customizer::{CustomizeReport, ModelCustomizer};
use modelfix_types::Model;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A finding reported by a host validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelProblem {
    pub severity: Severity,
    pub message: String,
}

impl ModelProblem {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for ModelProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

/// The host's own validation of an effective descriptor.
///
/// modelfix never implements schema validation itself; hosts plug theirs in here.
pub trait ModelValidator {
    fn validate_effective_model(&self, model: &Model, problems: &mut Vec<ModelProblem>);
}

/// Validation hook that customizes a descriptor and then hands it to the host validator.
#[derive(Debug, Clone)]
pub struct CustomizingValidator<V> {
    customizer: ModelCustomizer,
    inner: V,
}

impl<V: ModelValidator> CustomizingValidator<V> {
    pub fn new(customizer: ModelCustomizer, inner: V) -> Self {
        Self { customizer, inner }
    }

    pub fn customizer(&self) -> &ModelCustomizer {
        &self.customizer
    }

    pub fn validate_effective_model(
        &self,
        model: &mut Model,
        problems: &mut Vec<ModelProblem>,
    ) -> CustomizeReport {
        let report = self.customizer.customize(model);
        self.inner.validate_effective_model(model, problems);
        report
    }
}
