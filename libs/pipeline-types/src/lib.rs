//! Diagnostics shared by every pipeline stage.
//!
//! Non-fatal conditions (dead bindings, aggressive mesh sizes, tally boxes
//! that do not cover the geometry) are reported as [`Diagnostic`] values
//! returned next to the stage result. The driver collects them into a
//! stage-tagged [`TraceDiagnostic`] log.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Name of the shape, material, tag or tally the message is about.
    pub subject: Option<String>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            subject: None,
            hint: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(subject) = &self.subject {
            write!(f, " [{subject}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Geometry,
    Meshing,
    Materials,
    Binding,
    Tallies,
    Export,
    Transport,
    Depletion,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDiagnostic {
    pub stage: Stage,
    pub diagnostic: Diagnostic,
    pub file: Option<String>,
}

impl TraceDiagnostic {
    pub fn new(stage: Stage, diagnostic: Diagnostic) -> Self {
        Self {
            stage,
            diagnostic,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Tags every diagnostic with `stage`.
pub fn trace_all<'a>(
    stage: Stage,
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
) -> Vec<TraceDiagnostic> {
    diagnostics
        .into_iter()
        .map(|d| TraceDiagnostic::new(stage, d.clone()))
        .collect()
}
