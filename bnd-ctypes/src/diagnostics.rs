//! Non-fatal problems found while parsing and emitting.
//!
//! Generation always runs to completion; the number of errors recorded
//! here becomes the process exit status.

use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An enum, struct, function or callback without a doc comment.
    MissingDocs,
    /// The documented parameter count differs from the declared one.
    ParamCountMismatch,
    /// An unnamed parameter with no `@param` line to name it.
    MissingParamName,
    /// A C type with no ctypes mapping.
    MissingTypeConversion,
    /// A function return type with no ctypes mapping.
    InvalidReturnType,
    /// An enumerator value expression that could not be evaluated.
    EnumValue,
    /// A malformed enumerator skipped during parsing.
    DroppedEnumerator,
    /// A struct or union member that could not be parsed.
    DroppedField,
}

impl DiagnosticKind {
    /// Errors count towards the exit status, notes do not.
    pub fn is_error(self) -> bool {
        !matches!(self, DiagnosticKind::DroppedEnumerator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Collector threaded through parsing and emission.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem and log it.
    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        if kind.is_error() {
            tracing::warn!(kind = ?kind, "{message}");
        } else {
            tracing::debug!(kind = ?kind, "{message}");
        }
        self.entries.push(Diagnostic { kind, message });
    }

    /// Like [`Diagnostics::record`], but a problem already recorded with the
    /// same kind and message is not recorded again.
    pub fn record_once(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        if self.entries.iter().any(|d| d.kind == kind && d.message == message) {
            return;
        }
        self.record(kind, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|d| d.kind.is_error()).count()
    }

    /// Process exit status: the error count, capped at 9.
    pub fn exit_code(&self) -> u8 {
        self.error_count().min(9) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_is_capped() {
        let mut diags = Diagnostics::new();
        assert_eq!(diags.exit_code(), 0);
        for i in 0..12 {
            diags.record(DiagnosticKind::MissingDocs, format!("item {i}"));
        }
        assert_eq!(diags.error_count(), 12);
        assert_eq!(diags.exit_code(), 9);
    }

    #[test]
    fn notes_do_not_count_as_errors() {
        let mut diags = Diagnostics::new();
        diags.record(DiagnosticKind::DroppedEnumerator, "libvlc_x_t");
        diags.record(DiagnosticKind::MissingParamName, "libvlc_f param0");
        assert_eq!(diags.count(DiagnosticKind::DroppedEnumerator), 1);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.exit_code(), 1);
    }

    #[test]
    fn repeated_problems_recorded_once() {
        let mut diags = Diagnostics::new();
        diags.record_once(DiagnosticKind::MissingTypeConversion, "no type conversion for foo_t");
        diags.record_once(DiagnosticKind::MissingTypeConversion, "no type conversion for foo_t");
        diags.record_once(DiagnosticKind::MissingDocs, "no type conversion for foo_t");
        assert_eq!(diags.count(DiagnosticKind::MissingTypeConversion), 1);
        assert_eq!(diags.error_count(), 2);
    }
}
