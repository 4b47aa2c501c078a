//! XPath extension functions backed by the classifier.

use crate::classifier::{
    is_any_ip, is_any_ipv4, is_any_ipv6, is_host_ip, is_host_ipv4, is_host_ipv6,
    is_net_ip, is_net_ipv4, is_net_ipv6, AddressClassifier,
};
use std::sync::Arc;
use sxd_document::dom::ChildOfElement;
use sxd_xpath::context::Evaluation;
use sxd_xpath::function::{self, Function};
use sxd_xpath::nodeset::Node;
use sxd_xpath::Value;

/// Functions published in the extension namespace.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum IpFunction {
    AnyIp,
    HostIp,
    NetIp,
    AnyIpv4,
    HostIpv4,
    NetIpv4,
    AnyIpv6,
    HostIpv6,
    NetIpv6,
    /// `in-subnet(node, 'subnet')`
    InSubnet,
    /// `ip-only(node)`, the extracted address as a string.
    IpOnly,
}

/// Namespace-local names and the function each one is bound to.
pub const FUNCTIONS: [(&str, IpFunction); 11] = [
    ("ip-any", IpFunction::AnyIp),
    ("ip-host", IpFunction::HostIp),
    ("ip-net", IpFunction::NetIp),
    ("ip4-any", IpFunction::AnyIpv4),
    ("ip4-host", IpFunction::HostIpv4),
    ("ip4-net", IpFunction::NetIpv4),
    ("ip6-any", IpFunction::AnyIpv6),
    ("ip6-host", IpFunction::HostIpv6),
    ("ip6-net", IpFunction::NetIpv6),
    ("in-subnet", IpFunction::InSubnet),
    ("ip-only", IpFunction::IpOnly),
];

impl IpFunction {
    pub fn name(self) -> &'static str {
        FUNCTIONS
            .iter()
            .find(|(_, function)| *function == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<IpFunction> {
        FUNCTIONS
            .iter()
            .find(|(local, _)| *local == name)
            .map(|(_, function)| *function)
    }

    /// Single argument boolean test, `None` for functions needing more.
    fn predicate(self) -> Option<fn(&str) -> bool> {
        match self {
            IpFunction::AnyIp => Some(is_any_ip),
            IpFunction::HostIp => Some(is_host_ip),
            IpFunction::NetIp => Some(is_net_ip),
            IpFunction::AnyIpv4 => Some(is_any_ipv4),
            IpFunction::HostIpv4 => Some(is_host_ipv4),
            IpFunction::NetIpv4 => Some(is_net_ipv4),
            IpFunction::AnyIpv6 => Some(is_any_ipv6),
            IpFunction::HostIpv6 => Some(is_host_ipv6),
            IpFunction::NetIpv6 => Some(is_net_ipv6),
            IpFunction::InSubnet | IpFunction::IpOnly => None,
        }
    }
}

/// An [`IpFunction`] adapted to the sxd-xpath calling convention.
///
/// Failures never reach the evaluator: a missing, empty or non-text argument
/// gives `false` (or `""` for `ip-only`).
pub struct BoundFunction {
    function: IpFunction,
    classifier: Arc<AddressClassifier>,
}

impl BoundFunction {
    pub fn new(function: IpFunction, classifier: Arc<AddressClassifier>) -> Self {
        BoundFunction {
            function,
            classifier,
        }
    }

    /// Apply the function to already extracted argument text.
    pub fn call<'d>(&self, text: Option<&str>, subnet: Option<&str>) -> Value<'d> {
        if let Some(predicate) = self.function.predicate() {
            return Value::Boolean(text.map_or(false, predicate));
        }
        match self.function {
            IpFunction::InSubnet => Value::Boolean(match (text, subnet) {
                (Some(text), Some(subnet)) => self.classifier.in_subnet(text, subnet),
                _ => false,
            }),
            _ => Value::String(
                text.and_then(|text| self.classifier.extract_address(text))
                    .unwrap_or_default(),
            ),
        }
    }
}

impl Function for BoundFunction {
    fn evaluate<'c, 'd>(
        &self,
        _context: &Evaluation<'c, 'd>,
        args: Vec<Value<'d>>,
    ) -> Result<Value<'d>, function::Error> {
        let mut args = args.iter().map(argument_text);
        let text = args.next().flatten();
        let subnet = args.next().flatten();
        log::trace!(
            "{name}({text:?}, {subnet:?})",
            name = self.function.name()
        );
        Ok(self.call(text.as_deref(), subnet.as_deref()))
    }
}

/// Text of an argument: the node text of the first node in document order
/// (see [`node_text`]), or a string literal as is.
pub fn argument_text(value: &Value<'_>) -> Option<String> {
    match value {
        Value::Nodeset(nodes) => nodes.document_order_first().and_then(node_text),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Text carried directly by a node.
///
/// For an element this is the text before its first non-text child, `None`
/// when there is none. Other nodes give their string value.
pub fn node_text(node: Node<'_>) -> Option<String> {
    match node {
        Node::Element(element) => {
            let text: String = element
                .children()
                .into_iter()
                .map_while(|child| match child {
                    ChildOfElement::Text(text) => Some(text.text()),
                    _ => None,
                })
                .collect();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
        other => Some(other.string_value()),
    }
}
