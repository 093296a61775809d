//! Component tree: one record type per UI primitive, joined by [`Node`].
//!
//! Containers own their children by value, so a decoded tree is acyclic and
//! every child has exactly one parent. Trees are built once per decode and
//! never mutated; interactive values (typed text, toggles) live in the
//! [`StateStore`](crate::state::StateStore) keyed by node id.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::action::Action;
use super::lenient;
use super::style::Style;

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_true() -> bool {
    true
}

fn default_grid_columns() -> i32 {
    2
}

fn default_slider_max() -> f64 {
    1.0
}

fn is_true(value: &bool) -> bool {
    *value
}

fn id_or_generated<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient::string_or(deserializer, generate_id)
}

fn flag_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    lenient::bool_or(deserializer, default_true)
}

fn grid_columns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    lenient::i32_or(deserializer, default_grid_columns)
}

fn slider_max<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    lenient::f64_or(deserializer, default_slider_max)
}

/// Fields shared by every node variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCommon {
    /// Stable identity. Generated when the document omits it.
    #[serde(default = "generate_id", deserialize_with = "id_or_generated")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default = "default_true", skip_serializing_if = "is_true", deserialize_with = "flag_or_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient::string_map")]
    pub meta: BTreeMap<String, String>,
}

impl Default for NodeCommon {
    fn default() -> Self {
        Self {
            id: generate_id(),
            style: None,
            action: None,
            visible: true,
            meta: BTreeMap::new(),
        }
    }
}

impl NodeCommon {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_i32")]
    pub max_lines: Option<i32>,
    /// One of `clip`, `ellipsis`, `visible`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub overflow: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub items: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub item_spacing: Option<f64>,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub scrollable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub items: Vec<Node>,
    #[serde(default = "default_grid_columns", deserialize_with = "grid_columns")]
    pub columns: i32,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub item_spacing: Option<f64>,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub scrollable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub content_description: Option<String>,
    /// One of `fit`, `crop`, `fill`, `inside`, `none`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub content_scale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub value: Option<String>,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub keyboard_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_i32")]
    pub max_lines: Option<i32>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub is_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub checked: bool,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub checked: bool,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioButtonNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBarNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    /// Completion in `0.0..=1.0`.
    #[serde(default, deserialize_with = "lenient::f64")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub indeterminate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub value: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub min_value: f64,
    #[serde(default = "default_slider_max", deserialize_with = "slider_max")]
    pub max_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub step: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub icon: Option<String>,
}

/// A renderable node. The wire discriminator is the exact variant name in
/// the `type` key (`"Text"`, `"Button"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Text(TextNode),
    Button(ButtonNode),
    Column(ColumnNode),
    Row(RowNode),
    Image(ImageNode),
    TextField(TextFieldNode),
    Spacer(SpacerNode),
    Divider(DividerNode),
    Box(BoxNode),
    Card(CardNode),
    List(ListNode),
    Grid(GridNode),
    Switch(SwitchNode),
    Checkbox(CheckboxNode),
    RadioButton(RadioButtonNode),
    ProgressBar(ProgressBarNode),
    Slider(SliderNode),
    Chip(ChipNode),
}

/// Every wire tag, in declaration order.
pub const NODE_TYPES: &[&str] = &[
    "Text",
    "Button",
    "Column",
    "Row",
    "Image",
    "TextField",
    "Spacer",
    "Divider",
    "Box",
    "Card",
    "List",
    "Grid",
    "Switch",
    "Checkbox",
    "RadioButton",
    "ProgressBar",
    "Slider",
    "Chip",
];

macro_rules! node_from {
    ($($variant:ident => $record:ident),* $(,)?) => {
        $(
            impl From<$record> for Node {
                fn from(record: $record) -> Self {
                    Node::$variant(record)
                }
            }
        )*
    };
}

node_from! {
    Text => TextNode,
    Button => ButtonNode,
    Column => ColumnNode,
    Row => RowNode,
    Image => ImageNode,
    TextField => TextFieldNode,
    Spacer => SpacerNode,
    Divider => DividerNode,
    Box => BoxNode,
    Card => CardNode,
    List => ListNode,
    Grid => GridNode,
    Switch => SwitchNode,
    Checkbox => CheckboxNode,
    RadioButton => RadioButtonNode,
    ProgressBar => ProgressBarNode,
    Slider => SliderNode,
    Chip => ChipNode,
}

impl Node {
    pub fn common(&self) -> &NodeCommon {
        match self {
            Node::Text(n) => &n.common,
            Node::Button(n) => &n.common,
            Node::Column(n) => &n.common,
            Node::Row(n) => &n.common,
            Node::Image(n) => &n.common,
            Node::TextField(n) => &n.common,
            Node::Spacer(n) => &n.common,
            Node::Divider(n) => &n.common,
            Node::Box(n) => &n.common,
            Node::Card(n) => &n.common,
            Node::List(n) => &n.common,
            Node::Grid(n) => &n.common,
            Node::Switch(n) => &n.common,
            Node::Checkbox(n) => &n.common,
            Node::RadioButton(n) => &n.common,
            Node::ProgressBar(n) => &n.common,
            Node::Slider(n) => &n.common,
            Node::Chip(n) => &n.common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn style(&self) -> Option<&Style> {
        self.common().style.as_ref()
    }

    pub fn action(&self) -> Option<&Action> {
        self.common().action.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.common().visible
    }

    /// The wire tag of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Text(_) => "Text",
            Node::Button(_) => "Button",
            Node::Column(_) => "Column",
            Node::Row(_) => "Row",
            Node::Image(_) => "Image",
            Node::TextField(_) => "TextField",
            Node::Spacer(_) => "Spacer",
            Node::Divider(_) => "Divider",
            Node::Box(_) => "Box",
            Node::Card(_) => "Card",
            Node::List(_) => "List",
            Node::Grid(_) => "Grid",
            Node::Switch(_) => "Switch",
            Node::Checkbox(_) => "Checkbox",
            Node::RadioButton(_) => "RadioButton",
            Node::ProgressBar(_) => "ProgressBar",
            Node::Slider(_) => "Slider",
            Node::Chip(_) => "Chip",
        }
    }

    /// Owned children, or an empty slice for leaf variants.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Column(n) => &n.children,
            Node::Row(n) => &n.children,
            Node::Box(n) => &n.children,
            Node::Card(n) => &n.children,
            Node::List(n) => &n.items,
            Node::Grid(n) => &n.items,
            Node::Text(_)
            | Node::Button(_)
            | Node::Image(_)
            | Node::TextField(_)
            | Node::Spacer(_)
            | Node::Divider(_)
            | Node::Switch(_)
            | Node::Checkbox(_)
            | Node::RadioButton(_)
            | Node::ProgressBar(_)
            | Node::Slider(_)
            | Node::Chip(_) => &[],
        }
    }

    /// Wire name of the child collection (`children` or `items`).
    pub fn children_field(&self) -> Option<&'static str> {
        match self {
            Node::Column(_) | Node::Row(_) | Node::Box(_) | Node::Card(_) => Some("children"),
            Node::List(_) | Node::Grid(_) => Some("items"),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children_field().is_some()
    }

    /// Pre-order traversal; the callback receives each node and its depth
    /// (root is 0).
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_by_id(id))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            common: NodeCommon::default(),
            text: text.into(),
            max_lines: None,
            overflow: None,
        }
    }
}

impl ButtonNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            common: NodeCommon::default(),
            text: text.into(),
            enabled: true,
            loading: false,
        }
    }
}

impl ColumnNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            common: NodeCommon::default(),
            children,
            spacing: None,
        }
    }
}

impl RowNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            common: NodeCommon::default(),
            children,
            spacing: None,
        }
    }
}

impl SliderNode {
    pub fn new(value: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            common: NodeCommon::default(),
            value,
            min_value,
            max_value,
            step: None,
        }
    }
}
