//! Chained action strings (`onSuccess` / `onError`).
//!
//! Grammar, split on the first `:`:
//!
//! ```text
//! navigate:<route>[?k=v&k=v...]
//! show_dialog:<message>
//! update_state:<key>=<value>
//! <verb>:<data>                 routed to the custom handler table
//! ```
//!
//! There is no escaping, so a `:` or `&` inside a payload cannot be
//! expressed unambiguously. Malformed strings are rejected with a
//! [`ChainError`]; the dispatcher logs and drops them.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::Action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chained action '{0}' has no ':' separator")]
    MissingSeparator(String),
    #[error("chained action '{0}' has an empty verb")]
    EmptyVerb(String),
    #[error("chained update_state '{0}' needs key=value")]
    MissingAssignment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainedAction {
    Navigate {
        route: String,
        params: BTreeMap<String, String>,
    },
    ShowDialog {
        message: String,
    },
    UpdateState {
        key: String,
        value: String,
    },
    Custom {
        verb: String,
        data: String,
    },
}

impl ChainedAction {
    pub fn parse(raw: &str) -> Result<Self, ChainError> {
        let (verb, payload) = raw
            .split_once(':')
            .ok_or_else(|| ChainError::MissingSeparator(raw.to_string()))?;
        let verb = verb.trim();
        if verb.is_empty() {
            return Err(ChainError::EmptyVerb(raw.to_string()));
        }
        Ok(match verb {
            "navigate" => {
                let (route, query) = payload.split_once('?').unwrap_or((payload, ""));
                let params = query
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                ChainedAction::Navigate {
                    route: route.to_string(),
                    params,
                }
            }
            "show_dialog" => ChainedAction::ShowDialog {
                message: payload.to_string(),
            },
            "update_state" => {
                let (key, value) = payload
                    .split_once('=')
                    .ok_or_else(|| ChainError::MissingAssignment(raw.to_string()))?;
                ChainedAction::UpdateState {
                    key: key.trim().to_string(),
                    value: value.to_string(),
                }
            }
            other => ChainedAction::Custom {
                verb: other.to_string(),
                data: payload.to_string(),
            },
        })
    }

    /// Typed action equivalent. Query params become the navigate payload
    /// and custom data is passed as `{"data": <payload>}`.
    pub fn into_action(self) -> Action {
        match self {
            ChainedAction::Navigate { route, params } => Action::Navigate {
                route: Some(route),
                payload: (!params.is_empty()).then_some(params),
            },
            ChainedAction::ShowDialog { message } => Action::show_dialog("Info", message),
            ChainedAction::UpdateState { key, value } => Action::update_state(key, value),
            ChainedAction::Custom { verb, data } => Action::Custom {
                action: verb,
                data: Some(BTreeMap::from([("data".to_string(), data)])),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_with_query() {
        let parsed = ChainedAction::parse("navigate:detail?id=7&tab=info&flag").unwrap();
        assert_eq!(
            parsed,
            ChainedAction::Navigate {
                route: "detail".into(),
                params: BTreeMap::from([
                    ("id".into(), "7".into()),
                    ("tab".into(), "info".into()),
                ]),
            }
        );
    }

    #[test]
    fn update_state_splits_on_first_equals() {
        let parsed = ChainedAction::parse("update_state:expr=a=b").unwrap();
        assert_eq!(
            parsed,
            ChainedAction::UpdateState {
                key: "expr".into(),
                value: "a=b".into(),
            }
        );
    }

    #[test]
    fn payload_keeps_later_colons() {
        let parsed = ChainedAction::parse("show_dialog:Saved: 3 items").unwrap();
        assert_eq!(
            parsed,
            ChainedAction::ShowDialog {
                message: "Saved: 3 items".into()
            }
        );
    }

    #[test]
    fn unknown_verbs_are_custom() {
        let action = ChainedAction::parse("track:signup").unwrap().into_action();
        assert_eq!(
            action,
            Action::Custom {
                action: "track".into(),
                data: Some(BTreeMap::from([("data".into(), "signup".into())])),
            }
        );
    }

    #[test]
    fn malformed_strings_are_rejected() {
        assert!(matches!(
            ChainedAction::parse("navigate"),
            Err(ChainError::MissingSeparator(_))
        ));
        assert!(matches!(ChainedAction::parse(":x"), Err(ChainError::EmptyVerb(_))));
        assert!(matches!(
            ChainedAction::parse("update_state:flag"),
            Err(ChainError::MissingAssignment(_))
        ));
    }
}
