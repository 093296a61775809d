//! Validation issue and report types.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding. `path` locates the node from the root (`$`,
/// `$.children[0].items[2]`); `component_id` is the node's id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub path: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.path)?;
        if let Some(field) = &self.field {
            write!(f, ".{}", field)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// Ordered issues from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Only Error-severity issues make a tree unusable.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Warning)
    }

    pub fn infos(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Info)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// One-line summary such as `2 errors, 1 warning, 0 info`.
    pub fn summary(&self) -> String {
        let errors = self.error_count();
        let warnings = self.warning_count();
        let infos = self.infos().count();
        format!(
            "{} error{}, {} warning{}, {} info",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
            infos
        )
    }
}

impl Deref for ValidationReport {
    type Target = [ValidationIssue];

    fn deref(&self) -> &Self::Target {
        &self.issues
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue {
            message: "m".into(),
            component_id: Some("c".into()),
            field: Some("text".into()),
            value: None,
            severity,
            suggestion: None,
            path: "$".into(),
        }
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let report = ValidationReport::new(vec![issue(Severity::Warning), issue(Severity::Info)]);
        assert!(report.is_valid());
        assert_eq!(report.summary(), "0 errors, 1 warning, 1 info");
    }

    #[test]
    fn one_error_invalidates() {
        let report = ValidationReport::new(vec![issue(Severity::Warning), issue(Severity::Error)]);
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn display_includes_path_and_field() {
        assert_eq!(issue(Severity::Error).to_string(), "[error] $.text: m");
    }
}
