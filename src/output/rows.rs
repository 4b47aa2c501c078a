//! Rows describing the nodes selected by a query.

use crate::classifier::parse_form;
use serde::Serialize;
use sxd_xpath::nodeset::Node;

/// Represents one selected node for output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    /// Position in document order, starting at 1.
    pub index: usize,
    /// Element name, `@name` for attributes.
    pub node: String,
    /// String value of the node, surrounding whitespace removed. `kind` and
    /// `address` describe this trimmed text.
    pub text: String,
    /// `address`, `interface` or `network` when the text is an IP value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Address extracted from the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl MatchRow {
    /// Build a row from the raw string value of a node.
    pub fn new(index: usize, node: String, value: &str) -> MatchRow {
        let text = value.trim();
        let form = parse_form(text);
        MatchRow {
            index,
            node,
            text: text.to_string(),
            kind: form.map(|form| form.kind().to_string()),
            address: form.map(|form| form.address().to_string()),
        }
    }
}

pub fn node_name(node: &Node<'_>) -> String {
    match node {
        Node::Element(element) => element.name().local_part().to_string(),
        Node::Attribute(attribute) => format!("@{}", attribute.name().local_part()),
        Node::Root(_) => "/".to_string(),
        Node::Text(_) => "#text".to_string(),
        Node::Comment(_) => "#comment".to_string(),
        _ => "#node".to_string(),
    }
}

pub fn match_rows(nodes: &[Node<'_>]) -> Vec<MatchRow> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| MatchRow::new(i + 1, node_name(node), &node.string_value()))
        .collect()
}
