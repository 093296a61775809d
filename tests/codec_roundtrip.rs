mod common;

use std::collections::BTreeMap;

use sdui::codec::{self, DecodeErrorKind};
use sdui::model::{
    Action, BoxNode, ButtonNode, CardNode, CheckboxNode, ChipNode, ColumnNode, DividerNode,
    GridNode, ImageNode, ListNode, Node, NodeCommon, ProgressBarNode, RadioButtonNode, RowNode,
    SliderNode, Spacing, SpacerNode, Style, SwitchNode, TextFieldNode, TextNode, NODE_TYPES,
};

fn common(id: &str) -> NodeCommon {
    NodeCommon::with_id(id)
}

/// One node of every variant, with most optional fields populated.
fn kitchen_sink() -> Node {
    let styled = NodeCommon {
        style: Some(Style {
            padding: Some(Spacing::symmetric(16.0, 8.0)),
            margin: Some(Spacing {
                top: Some(4.0),
                ..Spacing::default()
            }),
            width: Some("100%".into()),
            height: Some("48dp".into()),
            background_color: Some("#FF1E88E5".into()),
            font_size: Some(14.5),
            font_weight: Some("semibold".into()),
            justify_content: Some("space-between".into()),
            opacity: Some(0.75),
            rotation: Some(-15.0),
            ..Style::default()
        }),
        action: Some(Action::Navigate {
            route: Some("detail".into()),
            payload: Some(BTreeMap::from([("id".into(), "42".into())])),
        }),
        visible: false,
        meta: BTreeMap::from([("analytics".into(), "hero".into())]),
        ..common("card")
    };

    let leaves = vec![
        Node::from(TextNode {
            common: common("text"),
            text: "Hello".into(),
            max_lines: Some(2),
            overflow: Some("ellipsis".into()),
        }),
        Node::from(ButtonNode {
            common: NodeCommon {
                action: Some(Action::ApiCall {
                    url: "https://api.example.test/items".into(),
                    method: "DELETE".into(),
                    headers: Some(BTreeMap::from([("X-Trace".into(), "1".into())])),
                    body: Some(r#"{"ids":[1,2]}"#.into()),
                    on_success: Some("update_state:deleted=true".into()),
                    on_error: Some("show_dialog:Could not delete".into()),
                }),
                ..common("button")
            },
            text: "Delete".into(),
            enabled: false,
            loading: true,
        }),
        Node::from(ImageNode {
            common: common("image"),
            url: "https://cdn.example.test/a.png".into(),
            content_description: Some("A".into()),
            content_scale: Some("crop".into()),
        }),
        Node::from(TextFieldNode {
            common: common("field"),
            placeholder: Some("Name".into()),
            value: Some("Ann".into()),
            enabled: true,
            keyboard_type: Some("text".into()),
            max_lines: Some(1),
            is_password: true,
        }),
        Node::from(SpacerNode {
            common: common("spacer"),
            size: Some(12.0),
        }),
        Node::from(DividerNode {
            common: common("divider"),
            thickness: Some(0.5),
            color: Some("#CCC".into()),
        }),
        Node::from(SwitchNode {
            common: common("switch"),
            checked: true,
            enabled: true,
            label: Some("Wi-Fi".into()),
        }),
        Node::from(CheckboxNode {
            common: common("checkbox"),
            checked: false,
            enabled: false,
            label: None,
        }),
        Node::from(RadioButtonNode {
            common: common("radio"),
            selected: true,
            group: Some("size".into()),
            label: Some("L".into()),
            enabled: true,
        }),
        Node::from(ProgressBarNode {
            common: common("progress"),
            progress: 0.3,
            indeterminate: false,
        }),
        Node::from(SliderNode {
            step: Some(5.0),
            common: common("slider"),
            ..SliderNode::new(50.0, 0.0, 100.0)
        }),
        Node::from(ChipNode {
            common: NodeCommon {
                action: Some(Action::Custom {
                    action: "share".into(),
                    data: Some(BTreeMap::from([("channel".into(), "mail".into())])),
                }),
                ..common("chip")
            },
            text: "Share".into(),
            selected: false,
            icon: Some("share".into()),
        }),
    ];

    Node::from(ColumnNode {
        common: common("root"),
        spacing: Some(8.0),
        children: vec![
            Node::from(RowNode::new(leaves)),
            Node::from(BoxNode {
                common: common("box"),
                children: vec![Node::from(CardNode {
                    common: styled,
                    children: vec![],
                    spacing: None,
                    elevation: Some(2.0),
                })],
                spacing: None,
            }),
            Node::from(ListNode {
                common: common("list"),
                items: vec![Node::from(TextNode::new("row"))],
                item_spacing: Some(4.0),
                scrollable: false,
            }),
            Node::from(GridNode {
                common: common("grid"),
                items: vec![],
                columns: 3,
                item_spacing: None,
                scrollable: true,
            }),
        ],
    })
}

// -- Round trip ---------------------------------------------------------------

#[test]
fn test_round_trip_every_variant() {
    let tree = kitchen_sink();
    let mut seen = std::collections::BTreeSet::new();
    tree.walk(&mut |node, _| {
        seen.insert(node.type_name());
    });
    assert_eq!(seen.len(), NODE_TYPES.len(), "fixture should cover every variant");

    let encoded = codec::encode(&tree).unwrap();
    let decoded = codec::decode(&encoded).unwrap();
    assert_eq!(decoded, tree);
}

#[test]
fn test_round_trip_pretty_matches_compact() {
    let tree = kitchen_sink();
    let pretty = codec::decode(&codec::encode_pretty(&tree).unwrap()).unwrap();
    assert_eq!(pretty, tree);
}

#[test]
fn test_round_trip_fixture_is_stable() {
    let first = codec::decode(&common::fixture("login_screen.json")).unwrap();
    let second = codec::decode(&codec::encode(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_button_api_call_survives_round_trip() {
    let button = ButtonNode {
        common: NodeCommon {
            action: Some(Action::api_call("https://api.example.test/save", "PUT")),
            ..common("save")
        },
        ..ButtonNode::new("Save")
    };
    let column = Node::from(ColumnNode::new(vec![Node::from(button)]));

    let decoded = codec::decode(&codec::encode(&column).unwrap()).unwrap();
    let Node::Button(button) = &decoded.children()[0] else {
        panic!("expected a Button child");
    };
    let Some(Action::ApiCall { url, method, .. }) = &button.common.action else {
        panic!("expected an api_call action");
    };
    assert_eq!(url, "https://api.example.test/save");
    assert_eq!(method, "PUT");
}

#[test]
fn test_action_codec_round_trip() {
    let action = Action::ShowDialog {
        title: "Oops".into(),
        message: "Try again".into(),
        kind: "error".into(),
    };
    let encoded = codec::encode_action(&action).unwrap();
    assert!(encoded.contains(r#""type":"show_dialog""#));
    assert!(encoded.contains(r#""dialogType":"error""#));
    assert_eq!(codec::decode_action(&encoded).unwrap(), action);
}

// -- Tolerant decode ----------------------------------------------------------

#[test]
fn test_unknown_keys_are_ignored() {
    let with_extras = r#"{
        "type": "Row", "id": "r", "futureFlag": true, "layoutHints": {"a": 1},
        "children": [{"type": "Text", "id": "t", "text": "x", "experimental": [1, 2]}]
    }"#;
    let stripped = r#"{
        "type": "Row", "id": "r",
        "children": [{"type": "Text", "id": "t", "text": "x"}]
    }"#;
    assert_eq!(codec::decode(with_extras).unwrap(), codec::decode(stripped).unwrap());
}

#[test]
fn test_coercible_scalars_are_coerced() {
    let node = codec::decode(
        r#"{"type":"Slider","id":"s","value":"5","minValue":"0","maxValue":"10dp","step":1}"#,
    )
    .unwrap();
    let Node::Slider(slider) = node else {
        panic!("expected Slider");
    };
    assert_eq!(slider.value, 5.0);
    assert_eq!(slider.max_value, 10.0);
    assert_eq!(slider.step, Some(1.0));
}

#[test]
fn test_fixture_decodes_with_shorthand_and_coercion() {
    let root = codec::decode(&common::fixture("login_screen.json")).unwrap();
    assert_eq!(root.count(), 8);

    let padding = root.style().and_then(|s| s.padding.clone());
    assert_eq!(padding, Some(Spacing::all(16.0)));

    let Some(Node::Switch(switch)) = root.find_by_id("remember") else {
        panic!("expected the remember switch");
    };
    assert!(switch.checked);

    let Some(Node::Button(submit)) = root.find_by_id("submit") else {
        panic!("expected the submit button");
    };
    let Some(Action::ApiCall { body, method, .. }) = &submit.common.action else {
        panic!("expected an api_call action");
    };
    assert_eq!(method, "POST");
    assert_eq!(body.as_deref(), Some(r#"{"remember":true}"#));
}

#[test]
fn test_absent_children_default_to_empty() {
    let node = codec::decode(r#"{"type":"Card","children":null}"#).unwrap();
    assert!(node.children().is_empty());
}

#[test]
fn test_explicit_nulls_fall_back_to_defaults() {
    let node = codec::decode(r#"{"type":"Text","id":null,"text":"Hi","visible":null}"#).unwrap();
    let Node::Text(text) = &node else {
        panic!("expected Text, got {}", node.type_name());
    };
    assert_eq!(text.text, "Hi");
    assert!(text.common.visible);
    assert!(!text.common.id.is_empty());

    let node = codec::decode(
        r#"{"type":"Grid","id":"g","columns":null,"scrollable":null,"items":[
            {"type":"Button","id":"b","text":null,"enabled":null,"action":{"type":"api_call","url":"/x","method":null}},
            {"type":"Slider","id":"s","value":null,"maxValue":null}
        ]}"#,
    )
    .unwrap();
    let Node::Grid(grid) = &node else {
        panic!("expected Grid, got {}", node.type_name());
    };
    assert_eq!(grid.columns, 2);
    assert!(grid.scrollable);
    let Node::Button(button) = &grid.items[0] else {
        panic!("expected Button");
    };
    assert_eq!(button.text, "");
    assert!(button.enabled);
    assert_eq!(button.common.action, Some(Action::api_call("/x", "GET")));
    let Node::Slider(slider) = &grid.items[1] else {
        panic!("expected Slider");
    };
    assert_eq!(slider.value, 0.0);
    assert_eq!(slider.max_value, 1.0);

    let action = codec::decode_action(r#"{"type":"show_dialog","title":"T","message":"M","dialogType":null}"#).unwrap();
    assert_eq!(action, Action::show_dialog("T", "M"));
}

// -- Failures -----------------------------------------------------------------

#[test]
fn test_nested_unknown_type_reports_node_path() {
    let err = codec::decode(
        r#"{"type":"Column","id":"root","children":[
            {"type":"Text","text":"ok"},
            {"type":"Card","children":[{"type":"Spacer"},{"type":"Carousel"}]}
        ]}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::Data);
    assert!(err.is_unknown_type());
    assert_eq!(err.path.as_deref(), Some("$.children[1].children[1]"));
}

#[test]
fn test_decode_list_paths_include_the_index() {
    let err = codec::decode_list(r#"[{"type":"Spacer"},{"type":"Row","children":[{"type":"Switch","checked":"maybe"}]}]"#)
        .unwrap_err();
    assert_eq!(err.path.as_deref(), Some("$[1].children[0]"));
    assert!(err.to_string().contains("$[1].children[0]"));
}

#[test]
fn test_unknown_type_is_a_decode_error() {
    let err = codec::decode("{\n  \"type\": \"Carousel\"\n}").unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::Data);
    assert!(err.is_unknown_type());
    assert!(err.line >= 1);
}

#[test]
fn test_type_tag_is_case_sensitive() {
    assert!(codec::decode(r#"{"type":"text","text":"x"}"#).is_err());
}

#[test]
fn test_truncated_document_reports_eof() {
    let err = codec::decode(r#"{"type":"Text","text":"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::Eof);
}

#[test]
fn test_decode_list_accepts_arrays_and_single_nodes() {
    let nodes = codec::decode_list(&common::fixture("broken_dashboard.json")).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].type_name(), "Grid");

    let single = codec::decode_list(r#"{"type":"Divider"}"#).unwrap();
    assert_eq!(single.len(), 1);

    let err = codec::decode_list(r#"[{"type":"Text"},{"type":"Nope"}]"#).unwrap_err();
    assert!(err.message.starts_with("[1]: "));
    assert!(codec::decode_list("42").is_err());
}
