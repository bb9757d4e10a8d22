//! Analysis request/result data model

use std::fmt;

/// Sentinel stored in a complexity field when the response text
/// carries no recognizable value for it. Callers never see an
/// absent field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The two supported analysis modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Time/space complexity analysis with structured fields
    Complexity,
    /// Free-form optimization suggestions
    Optimization,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Complexity => "complexity analysis",
            TaskKind::Optimization => "optimization suggestions",
        }
    }
}

/// A single analysis request. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
    pub kind: TaskKind,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            kind,
        }
    }

    /// Build the prompt for this request's task kind.
    pub fn prompt(&self) -> String {
        match self.kind {
            TaskKind::Complexity => crate::prompt::complexity_prompt(&self.code, &self.language),
            TaskKind::Optimization => {
                crate::prompt::optimization_prompt(&self.code, &self.language)
            }
        }
    }
}

/// Structured result of a complexity analysis.
///
/// Constructed in one shot once every field is resolved; the complexity
/// fields always hold either an extracted value or [`NOT_SPECIFIED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub language: String,
    pub code: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub explanation: String,
    pub optimization_suggestions: Option<String>,
}

impl fmt::Display for AnalysisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Time Complexity: {}", self.time_complexity)?;
        writeln!(f, "Space Complexity: {}", self.space_complexity)?;
        writeln!(f)?;
        writeln!(f, "Explanation:\n{}", self.explanation)?;
        writeln!(f)?;

        if let Some(suggestions) = &self.optimization_suggestions {
            if !suggestions.is_empty() {
                write!(f, "Optimization Suggestions:\n{}", suggestions)?;
            }
        }

        Ok(())
    }
}
