//! Component tree, style and action data model.
//!
//! Everything here is plain data with `serde` derives; decoding policy lives
//! in [`crate::codec`] and the tolerant field coercions in [`lenient`].

mod action;
pub mod lenient;
mod node;
mod style;

pub use action::{Action, DIALOG_KINDS, HTTP_METHODS};
pub use node::{
    BoxNode, ButtonNode, CardNode, CheckboxNode, ChipNode, ColumnNode, DividerNode, GridNode,
    ImageNode, ListNode, Node, NodeCommon, ProgressBarNode, RadioButtonNode, RowNode, SliderNode,
    SpacerNode, SwitchNode, TextFieldNode, TextNode, NODE_TYPES,
};
pub use style::{Spacing, Style};
