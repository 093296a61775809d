//! User-triggered intents attached to components.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// HTTP methods an `api_call` may use.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

/// Dialog kinds a `show_dialog` may carry.
pub const DIALOG_KINDS: &[&str] = &["info", "success", "warning", "error", "confirm"];

fn default_method() -> String {
    "GET".to_string()
}

fn default_dialog_kind() -> String {
    "info".to_string()
}

fn method_or_get<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient::string_or(deserializer, default_method)
}

fn dialog_kind_or_info<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient::string_or(deserializer, default_dialog_kind)
}

/// A declarative action. The wire tag is `type`, in snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Action {
    Navigate {
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
        route: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string_map")]
        payload: Option<BTreeMap<String, String>>,
    },
    ApiCall {
        #[serde(default, deserialize_with = "lenient::string")]
        url: String,
        #[serde(default = "default_method", deserialize_with = "method_or_get")]
        method: String,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string_map")]
        headers: Option<BTreeMap<String, String>>,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string_or_json")]
        body: Option<String>,
        /// Chained action string run after a successful call.
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
        on_success: Option<String>,
        /// Chained action string run after a failed call.
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
        on_error: Option<String>,
    },
    ShowDialog {
        #[serde(default, deserialize_with = "lenient::string")]
        title: String,
        #[serde(default, deserialize_with = "lenient::string")]
        message: String,
        /// Carried as `dialogType` because `type` is the action tag.
        #[serde(rename = "dialogType", default = "default_dialog_kind", deserialize_with = "dialog_kind_or_info")]
        kind: String,
    },
    UpdateState {
        #[serde(default, deserialize_with = "lenient::string")]
        key: String,
        #[serde(default, deserialize_with = "lenient::string")]
        value: String,
    },
    Reset {
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string_map")]
        payload: Option<BTreeMap<String, String>>,
    },
    Custom {
        #[serde(default, deserialize_with = "lenient::string")]
        action: String,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string_map")]
        data: Option<BTreeMap<String, String>>,
    },
}

impl Action {
    pub fn navigate(route: impl Into<String>) -> Self {
        Action::Navigate {
            route: Some(route.into()),
            payload: None,
        }
    }

    pub fn api_call(url: impl Into<String>, method: impl Into<String>) -> Self {
        Action::ApiCall {
            url: url.into(),
            method: method.into(),
            headers: None,
            body: None,
            on_success: None,
            on_error: None,
        }
    }

    pub fn show_dialog(title: impl Into<String>, message: impl Into<String>) -> Self {
        Action::ShowDialog {
            title: title.into(),
            message: message.into(),
            kind: default_dialog_kind(),
        }
    }

    pub fn update_state(key: impl Into<String>, value: impl Into<String>) -> Self {
        Action::UpdateState {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn reset() -> Self {
        Action::Reset { payload: None }
    }

    pub fn custom(action: impl Into<String>) -> Self {
        Action::Custom {
            action: action.into(),
            data: None,
        }
    }

    /// The wire tag of this action.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::ApiCall { .. } => "api_call",
            Action::ShowDialog { .. } => "show_dialog",
            Action::UpdateState { .. } => "update_state",
            Action::Reset { .. } => "reset",
            Action::Custom { .. } => "custom",
        }
    }
}
