//! Per-node checks. Each rule appends to a [`Sink`] scoped to one node.

use crate::model::{Action, Node, Style, DIALOG_KINDS, HTTP_METHODS};
use crate::style::{
    is_hex_color, is_keyword, parse_dimension_strict, ALIGNMENT_KEYWORDS, ALIGN_ITEMS_KEYWORDS,
    CONTENT_SCALE_KEYWORDS, FLEX_DIRECTION_KEYWORDS, FONT_WEIGHT_KEYWORDS,
    JUSTIFY_CONTENT_KEYWORDS, KEYBOARD_TYPE_KEYWORDS, TEXT_OVERFLOW_KEYWORDS,
};

use super::issue::{Severity, ValidationIssue};

/// Collects issues for the node at `path`.
pub(super) struct Sink<'a> {
    pub(super) issues: &'a mut Vec<ValidationIssue>,
    pub(super) path: &'a str,
    pub(super) component_id: &'a str,
}

impl Sink<'_> {
    pub(super) fn push(
        &mut self,
        severity: Severity,
        field: Option<&str>,
        value: Option<String>,
        message: String,
        suggestion: Option<&str>,
    ) {
        self.issues.push(ValidationIssue {
            message,
            component_id: Some(self.component_id.to_string()),
            field: field.map(str::to_string),
            value,
            severity,
            suggestion: suggestion.map(str::to_string),
            path: self.path.to_string(),
        });
    }

    fn error(&mut self, field: &str, value: impl ToString, message: String, suggestion: &str) {
        self.push(
            Severity::Error,
            Some(field),
            Some(value.to_string()),
            message,
            Some(suggestion),
        );
    }

    fn warning(&mut self, field: &str, value: Option<String>, message: String, suggestion: &str) {
        self.push(Severity::Warning, Some(field), value, message, Some(suggestion));
    }
}

/// Checks shared by every variant: id and style.
pub(super) fn check_common(node: &Node, sink: &mut Sink<'_>) {
    if node.id().trim().is_empty() {
        sink.warning(
            "id",
            Some(node.id().to_string()),
            format!("{} has a blank id", node.type_name()),
            "Give the component a unique id so state can be bound to it",
        );
    }
    if let Some(style) = node.style() {
        check_style(style, sink);
    }
}

fn check_min(
    sink: &mut Sink<'_>,
    field: &str,
    value: Option<f64>,
    exclusive: bool,
    severity: Severity,
) {
    let Some(v) = value else { return };
    let bad = if exclusive { v <= 0.0 } else { v < 0.0 };
    if bad {
        let bound = if exclusive { "greater than 0" } else { "at least 0" };
        sink.push(
            severity,
            Some(field),
            Some(v.to_string()),
            format!("{} must be {}, got {}", field, bound, v),
            Some("Use a non-negative value"),
        );
    }
}

fn check_range(sink: &mut Sink<'_>, field: &str, value: Option<f64>, min: f64, max: f64, severity: Severity) {
    let Some(v) = value else { return };
    if v < min || v > max {
        sink.push(
            severity,
            Some(field),
            Some(v.to_string()),
            format!("{} must be between {} and {}, got {}", field, min, max, v),
            Some("Keep the value inside the documented range"),
        );
    }
}

fn check_keyword(sink: &mut Sink<'_>, field: &str, value: Option<&str>, allowed: &[&str]) {
    let Some(raw) = value else { return };
    if !is_keyword(raw, allowed) {
        sink.error(
            field,
            raw,
            format!("Unknown {} '{}'", field, raw),
            &format!("Use one of: {}", allowed.join(", ")),
        );
    }
}

fn check_color(sink: &mut Sink<'_>, field: &str, value: Option<&str>) {
    let Some(raw) = value else { return };
    if !is_hex_color(raw) {
        sink.error(
            field,
            raw,
            format!("Invalid color '{}' for {}", raw, field),
            "Use #RGB, #RRGGBB or #AARRGGBB",
        );
    }
}

fn check_style(style: &Style, sink: &mut Sink<'_>) {
    check_min(sink, "fontSize", style.font_size, true, Severity::Error);
    check_min(sink, "cornerRadius", style.corner_radius, false, Severity::Error);
    check_min(sink, "borderWidth", style.border_width, false, Severity::Error);
    check_min(sink, "shadowRadius", style.shadow_radius, false, Severity::Error);
    check_range(sink, "opacity", style.opacity, 0.0, 1.0, Severity::Error);
    check_min(sink, "scale", style.scale, true, Severity::Error);
    check_min(sink, "flex", style.flex, false, Severity::Error);
    check_min(sink, "zIndex", style.z_index, false, Severity::Error);
    check_range(sink, "rotation", style.rotation, -360.0, 360.0, Severity::Warning);
    check_range(sink, "shadowOffsetX", style.shadow_offset_x, -100.0, 100.0, Severity::Warning);
    check_range(sink, "shadowOffsetY", style.shadow_offset_y, -100.0, 100.0, Severity::Warning);

    for (box_name, spacing) in [("padding", &style.padding), ("margin", &style.margin)] {
        let Some(spacing) = spacing else { continue };
        for (edge, value) in spacing.entries() {
            if value < 0.0 {
                sink.error(
                    &format!("{}.{}", box_name, edge),
                    value,
                    format!("{}.{} must be at least 0, got {}", box_name, edge, value),
                    "Use a non-negative spacing value",
                );
            }
        }
    }

    for (field, value) in style.dimensions() {
        let Some(raw) = value else { continue };
        if parse_dimension_strict(raw).is_none() {
            sink.error(
                field,
                raw,
                format!("Invalid dimension '{}' for {}", raw, field),
                "Use \"100%\", \"<n>%\", \"<n>dp\" or a bare number",
            );
        }
    }
    for (field, value) in style.colors() {
        check_color(sink, field, value);
    }

    check_keyword(sink, "fontWeight", style.font_weight.as_deref(), FONT_WEIGHT_KEYWORDS);
    check_keyword(sink, "alignment", style.alignment.as_deref(), ALIGNMENT_KEYWORDS);
    check_keyword(sink, "flexDirection", style.flex_direction.as_deref(), FLEX_DIRECTION_KEYWORDS);
    check_keyword(sink, "justifyContent", style.justify_content.as_deref(), JUSTIFY_CONTENT_KEYWORDS);
    check_keyword(sink, "alignItems", style.align_items.as_deref(), ALIGN_ITEMS_KEYWORDS);
}

fn check_text(sink: &mut Sink<'_>, kind: &str, text: &str) {
    if text.trim().is_empty() {
        sink.error(
            "text",
            text,
            format!("{} text must not be blank", kind),
            "Provide the text to display",
        );
    }
}

fn check_max_lines(sink: &mut Sink<'_>, max_lines: Option<i32>) {
    if let Some(lines) = max_lines.filter(|l| *l < 1) {
        sink.error(
            "maxLines",
            lines,
            format!("maxLines must be at least 1, got {}", lines),
            "Remove maxLines or set it to a positive number",
        );
    }
}

fn check_children(sink: &mut Sink<'_>, node: &Node) {
    let Some(field) = node.children_field() else { return };
    if node.children().is_empty() {
        let noun = if field == "items" { "items" } else { "children" };
        sink.warning(
            field,
            None,
            format!("{} has no {}", node.type_name(), noun),
            "Add content or remove the empty container",
        );
    }
}

/// Variant-specific structural rules.
pub(super) fn check_variant(node: &Node, sink: &mut Sink<'_>) {
    check_children(sink, node);
    match node {
        Node::Text(n) => {
            check_text(sink, "Text", &n.text);
            check_max_lines(sink, n.max_lines);
            check_keyword(sink, "textOverflow", n.overflow.as_deref(), TEXT_OVERFLOW_KEYWORDS);
        }
        Node::Button(n) => check_text(sink, "Button", &n.text),
        Node::Chip(n) => check_text(sink, "Chip", &n.text),
        Node::Column(n) => check_min(sink, "spacing", n.spacing, false, Severity::Error),
        Node::Row(n) => check_min(sink, "spacing", n.spacing, false, Severity::Error),
        Node::Box(n) => check_min(sink, "spacing", n.spacing, false, Severity::Error),
        Node::Card(n) => {
            check_min(sink, "spacing", n.spacing, false, Severity::Error);
            check_min(sink, "elevation", n.elevation, false, Severity::Error);
        }
        Node::List(n) => check_min(sink, "itemSpacing", n.item_spacing, false, Severity::Error),
        Node::Grid(n) => {
            if n.columns <= 0 {
                sink.error(
                    "columns",
                    n.columns,
                    format!("Grid columns must be greater than 0, got {}", n.columns),
                    "Set columns to a positive number",
                );
            }
            check_min(sink, "itemSpacing", n.item_spacing, false, Severity::Error);
        }
        Node::Slider(n) => {
            if n.min_value >= n.max_value {
                sink.error(
                    "minValue",
                    n.min_value,
                    format!(
                        "Slider minValue {} must be less than maxValue {}",
                        n.min_value, n.max_value
                    ),
                    "Swap or widen the range",
                );
            } else if n.value < n.min_value || n.value > n.max_value {
                sink.error(
                    "value",
                    n.value,
                    format!(
                        "Slider value {} is out of range [{}, {}]",
                        n.value, n.min_value, n.max_value
                    ),
                    "Keep value between minValue and maxValue",
                );
            }
            if let Some(step) = n.step.filter(|s| *s <= 0.0) {
                sink.error(
                    "step",
                    step,
                    format!("Slider step must be greater than 0, got {}", step),
                    "Use a positive step or remove it",
                );
            }
        }
        Node::ProgressBar(n) => {
            if !(0.0..=1.0).contains(&n.progress) {
                sink.error(
                    "progress",
                    n.progress,
                    format!("ProgressBar progress {} is out of range [0, 1]", n.progress),
                    "Express progress as a fraction between 0 and 1",
                );
            }
        }
        Node::RadioButton(n) => {
            if n.group.as_deref().map_or(true, |g| g.trim().is_empty()) {
                sink.warning(
                    "group",
                    n.group.clone(),
                    "RadioButton has no group".to_string(),
                    "Set a group so selection can be mutually exclusive",
                );
            }
        }
        Node::Divider(n) => {
            if let Some(thickness) = n.thickness.filter(|t| *t <= 0.0) {
                sink.error(
                    "thickness",
                    thickness,
                    format!("Divider thickness must be greater than 0, got {}", thickness),
                    "Use a positive thickness or remove it",
                );
            }
            check_color(sink, "color", n.color.as_deref());
        }
        Node::Image(n) => {
            if n.url.trim().is_empty() {
                sink.error(
                    "url",
                    &n.url,
                    "Image url must not be blank".to_string(),
                    "Provide the image location",
                );
            }
            check_keyword(sink, "contentScale", n.content_scale.as_deref(), CONTENT_SCALE_KEYWORDS);
        }
        Node::TextField(n) => {
            check_max_lines(sink, n.max_lines);
            check_keyword(sink, "keyboardType", n.keyboard_type.as_deref(), KEYBOARD_TYPE_KEYWORDS);
        }
        Node::Spacer(n) => check_min(sink, "size", n.size, false, Severity::Error),
        Node::Switch(_) | Node::Checkbox(_) => {}
    }
}

fn check_chained(sink: &mut Sink<'_>, field: &str, chained: Option<&str>) {
    let Some(raw) = chained else { return };
    if !raw.contains(':') {
        sink.warning(
            field,
            Some(raw.to_string()),
            format!("Chained action '{}' has no ':' and will be dropped", raw),
            "Use verb:payload, e.g. navigate:home or update_state:key=value",
        );
    }
}

/// Rules for the action attached to a node.
pub(super) fn check_action(action: &Action, sink: &mut Sink<'_>) {
    match action {
        Action::Navigate { route, payload } => {
            let from_payload = payload.as_ref().and_then(|p| p.get("route"));
            let route = from_payload.or(route.as_ref());
            if route.map_or(true, |r| r.trim().is_empty()) {
                sink.warning(
                    "action.route",
                    route.cloned(),
                    "Navigate action has no route; the default route will be used".to_string(),
                    "Set route explicitly",
                );
            }
        }
        Action::ApiCall {
            url,
            method,
            on_success,
            on_error,
            ..
        } => {
            if url.trim().is_empty() {
                sink.error(
                    "action.url",
                    url,
                    "ApiCall url must not be blank".to_string(),
                    "Provide the endpoint to call",
                );
            }
            if !HTTP_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
                sink.error(
                    "action.method",
                    method,
                    format!("Unsupported HTTP method '{}'", method),
                    &format!("Use one of: {}", HTTP_METHODS.join(", ")),
                );
            }
            check_chained(sink, "action.onSuccess", on_success.as_deref());
            check_chained(sink, "action.onError", on_error.as_deref());
        }
        Action::ShowDialog { kind, .. } => {
            if !is_keyword(kind, DIALOG_KINDS) {
                sink.warning(
                    "action.dialogType",
                    Some(kind.clone()),
                    format!("Unknown dialog type '{}'", kind),
                    &format!("Use one of: {}", DIALOG_KINDS.join(", ")),
                );
            }
        }
        Action::UpdateState { key, .. } => {
            if key.trim().is_empty() {
                sink.error(
                    "action.key",
                    key,
                    "UpdateState key must not be blank".to_string(),
                    "Name the state key to write",
                );
            }
        }
        Action::Custom { action, .. } => {
            if action.trim().is_empty() {
                sink.error(
                    "action.action",
                    action,
                    "Custom action name must not be blank".to_string(),
                    "Name a registered custom handler",
                );
            }
        }
        Action::Reset { .. } => {}
    }
}
