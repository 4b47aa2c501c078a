//! Binding of the classifier into XPath evaluation (sxd-xpath).
//!
//! The integrating application calls [`register_functions`] (or
//! [`context_with_functions`]) once while building its evaluation context; no
//! function is registered implicitly.
//!
//! ```
//! use std::sync::Arc;
//! use xpath_ipaddress::classifier::AddressClassifier;
//! use xpath_ipaddress::xpath::{context_with_functions, parse_document, select, DEFAULT_PREFIX};
//!
//! let package = parse_document("<r><a>10.10.0.0/16</a><a>10.1.2.3</a></r>").unwrap();
//! let document = package.as_document();
//! let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
//! let nodes = select(&document, "//a[ip:ip4-net(.)]", &context).unwrap();
//! assert_eq!(nodes.len(), 1);
//! ```

mod functions;

use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use sxd_document::dom::Document;
use sxd_document::Package;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};

use crate::classifier::AddressClassifier;

pub use functions::{argument_text, node_text, BoundFunction, IpFunction, FUNCTIONS};

/// Namespace URI of the extension functions. Callers map a prefix to it.
pub const NAMESPACE: &str = "https://github.com/jeremyschulman/lxml-xpath-ipaddress";

/// Prefix used when the caller has no preference.
pub const DEFAULT_PREFIX: &str = "ip";

/// Prefix to namespace mapping for use with [`NAMESPACE`].
pub fn namespaces(prefix: &str) -> HashMap<String, String> {
    HashMap::from([(prefix.to_string(), NAMESPACE.to_string())])
}

/// Register every entry of [`FUNCTIONS`] under [`NAMESPACE`].
pub fn register_functions(context: &mut Context<'_>, classifier: Arc<AddressClassifier>) {
    for (name, function) in FUNCTIONS {
        context.set_function(
            (NAMESPACE, name),
            BoundFunction::new(function, Arc::clone(&classifier)),
        );
    }
    log::debug!(
        "registered {{{NAMESPACE}}} functions: {}",
        FUNCTIONS.iter().map(|(name, _)| name).join(", ")
    );
}

/// New context with `prefix` bound to [`NAMESPACE`] and all functions registered.
pub fn context_with_functions<'d>(
    prefix: &str,
    classifier: Arc<AddressClassifier>,
) -> Context<'d> {
    let mut context = Context::new();
    context.set_namespace(prefix, NAMESPACE);
    register_functions(&mut context, classifier);
    context
}

pub fn parse_document(xml: &str) -> Result<Package, Box<dyn Error>> {
    Ok(sxd_document::parser::parse(xml).map_err(|e| format!("Error parsing XML: {e:?}"))?)
}

/// Evaluate `expression` with the document root as context node.
pub fn evaluate<'d>(
    document: &Document<'d>,
    expression: &str,
    context: &Context<'d>,
) -> Result<Value<'d>, Box<dyn Error>> {
    let xpath = Factory::new()
        .build(expression)
        .map_err(|e| format!("Invalid XPath expression {expression:?}: {e:?}"))?
        .ok_or_else(|| format!("Empty XPath expression {expression:?}"))?;
    log::debug!("evaluate {expression}");
    Ok(xpath
        .evaluate(context, document.root())
        .map_err(|e| format!("Error evaluating {expression:?}: {e:?}"))?)
}

/// Evaluate `expression` and return the selected nodes in document order.
pub fn select<'d>(
    document: &Document<'d>,
    expression: &str,
    context: &Context<'d>,
) -> Result<Vec<Node<'d>>, Box<dyn Error>> {
    match evaluate(document, expression, context)? {
        Value::Nodeset(nodes) => Ok(nodes.document_order()),
        other => Err(format!("Expression {expression:?} did not select nodes: {other:?}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = "<r><a>10.1.2.3</a><b>10.10.0.0/16</b><c>fe80::1</c><d>hello</d></r>";

    fn texts(nodes: &[Node<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.string_value()).collect()
    }

    fn run(expression: &str) -> Vec<String> {
        let package = parse_document(XML).unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        texts(&select(&document, expression, &context).unwrap())
    }

    fn scalar(expression: &str) -> String {
        let package = parse_document(XML).unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        evaluate(&document, expression, &context).unwrap().string()
    }

    #[test]
    fn test_namespaces() {
        let ns = namespaces("ip");
        assert_eq!(ns.get("ip").map(String::as_str), Some(NAMESPACE));
    }

    #[test]
    fn test_select_predicates() {
        assert_eq!(run("//*[ip:ip4-net(.)]"), vec!["10.10.0.0/16"]);
        assert_eq!(run("//*[ip:ip-host(.)]"), vec!["10.1.2.3", "fe80::1"]);
        assert_eq!(run("//*[ip:ip6-any(.)]"), vec!["fe80::1"]);
        assert_eq!(
            run("//*[ip:ip-any(.)]"),
            vec!["10.1.2.3", "10.10.0.0/16", "fe80::1"]
        );
        assert!(run("//*[ip:ip6-net(.)]").is_empty());
    }

    #[test]
    fn test_select_in_subnet() {
        assert_eq!(
            run("//*[ip:in-subnet(., '10.0.0.0/8')]"),
            vec!["10.1.2.3", "10.10.0.0/16"]
        );
        assert!(run("//*[ip:in-subnet(., 'not-a-subnet')]").is_empty());
        assert!(run("//*[ip:in-subnet(.)]").is_empty());
    }

    #[test]
    fn test_missing_and_empty_arguments() {
        assert!(run("//*[ip:ip-any()]").is_empty());
        assert_eq!(scalar("ip:ip-any(/r/missing)"), "false");
        assert_eq!(scalar("ip:ip-only(/r/missing)"), "");
    }

    #[test]
    fn test_string_arguments() {
        assert_eq!(scalar("ip:ip-any('10.0.0.1')"), "true");
        assert_eq!(scalar("ip:ip-only(/r/b)"), "10.10.0.0");
        assert_eq!(scalar("ip:ip-only('2001:db8::1/64')"), "2001:db8::1");
    }

    #[test]
    fn test_custom_prefix() {
        let package = parse_document(XML).unwrap();
        let document = package.as_document();
        let context = context_with_functions("net", Arc::new(AddressClassifier::new()));
        let nodes = select(&document, "//*[net:ip4-host(.)]", &context).unwrap();
        assert_eq!(texts(&nodes), vec!["10.1.2.3"]);
    }

    #[test]
    fn test_select_errors() {
        let package = parse_document(XML).unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        assert!(select(&document, "count(//a)", &context).is_err());
        assert!(select(&document, "//*[", &context).is_err());
        assert!(parse_document("<r>").is_err());
    }

    #[test]
    fn test_empty_expression_is_error() {
        let package = parse_document(XML).unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        assert!(evaluate(&document, "", &context).is_err());
        assert!(select(&document, "", &context).is_err());
    }

    #[test]
    fn test_element_argument_uses_leading_text() {
        let package =
            parse_document("<r><address><name>10.1.2.3/24</name></address></r>").unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        let nodes = select(&document, "//*[ip:ip-any(.)]", &context).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(texts(&nodes), vec!["10.1.2.3/24"]);
        let value = evaluate(&document, "name(//*[ip:ip-any(.)])", &context).unwrap();
        assert_eq!(value.string(), "name");
    }

    #[test]
    fn test_element_argument_stops_at_first_child() {
        let package = parse_document("<r><c><!--x-->10.0.0.1</c><a>10.0.0.1<b/></a></r>").unwrap();
        let document = package.as_document();
        let context = context_with_functions(DEFAULT_PREFIX, Arc::new(AddressClassifier::new()));
        let value = evaluate(&document, "name(//*[ip:ip4-host(.)])", &context).unwrap();
        assert_eq!(value.string(), "a");
        assert_eq!(select(&document, "//*[ip:ip4-host(.)]", &context).unwrap().len(), 1);
    }
}
