//! Validation engine.
//!
//! Walks a decoded tree depth-first, emitting a node's own issues before
//! descending, and finishing each child subtree before the next sibling.
//! Validation never fails; it only reports.

mod issue;
mod rules;

use std::collections::HashMap;

pub use issue::{Severity, ValidationIssue, ValidationReport};

use crate::config::ValidationConfig;
use crate::model::Node;

use rules::Sink;

/// Tree validator with configurable limits.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationConfig,
}

struct Walk<'t> {
    issues: Vec<ValidationIssue>,
    seen_ids: HashMap<&'t str, String>,
}

impl Validator {
    pub fn new(options: ValidationConfig) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationConfig {
        &self.options
    }

    pub fn validate(&self, root: &Node) -> ValidationReport {
        let mut walk = Walk {
            issues: Vec::new(),
            seen_ids: HashMap::new(),
        };
        self.visit(root, "$", 0, &mut walk);

        let report = ValidationReport::new(walk.issues);
        tracing::debug!(
            root = root.id(),
            nodes = root.count(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validated component tree"
        );
        report
    }

    fn visit<'t>(&self, node: &'t Node, path: &str, depth: usize, walk: &mut Walk<'t>) {
        let mut sink = Sink {
            issues: &mut walk.issues,
            path,
            component_id: node.id(),
        };

        rules::check_common(node, &mut sink);

        if self.options.check_duplicate_ids && !node.id().trim().is_empty() {
            if let Some(first) = walk.seen_ids.get(node.id()) {
                sink.push(
                    Severity::Warning,
                    Some("id"),
                    Some(node.id().to_string()),
                    format!("Duplicate id '{}' (first used at {})", node.id(), first),
                    Some("Ids should be unique within a tree"),
                );
            }
        }

        if self.options.warn_hidden && !node.is_visible() {
            sink.push(
                Severity::Info,
                Some("visible"),
                Some("false".to_string()),
                format!("{} is hidden", node.type_name()),
                None,
            );
        }

        if depth == self.options.max_depth + 1 {
            sink.push(
                Severity::Warning,
                None,
                Some(depth.to_string()),
                format!(
                    "Nesting depth {} exceeds the limit of {}",
                    depth, self.options.max_depth
                ),
                Some("Flatten the layout"),
            );
        }

        rules::check_variant(node, &mut sink);
        if let Some(action) = node.action() {
            rules::check_action(action, &mut sink);
        }

        walk.seen_ids
            .entry(node.id())
            .or_insert_with(|| path.to_string());

        if let Some(field) = node.children_field() {
            for (index, child) in node.children().iter().enumerate() {
                let child_path = format!("{}.{}[{}]", path, field, index);
                self.visit(child, &child_path, depth + 1, walk);
            }
        }
    }
}

/// Validate with default options.
pub fn validate(root: &Node) -> ValidationReport {
    Validator::default().validate(root)
}
