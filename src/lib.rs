//! XPath extension functions for IP addresses, networks and interfaces.
//!
//! - [`classifier`] - predicates, address extraction and subnet membership
//! - [`xpath`] - registration of those functions into an sxd-xpath [`sxd_xpath::Context`]
//! - [`models`] - parsed address forms
//! - [`output`] - CSV and JSON rendering of query results

pub mod classifier;
pub mod config;
pub mod models;
pub mod output;
pub mod xpath;

use colored::Colorize;
use std::error::Error;
use std::sync::Arc;
use sxd_document::dom::Document;
use sxd_xpath::{Context, Value};

use classifier::AddressClassifier;
use config::Config;
use output::{match_rows, render_csv, render_json};

pub use xpath::{namespaces, register_functions, NAMESPACE};

/// Read the configured document, evaluate the expression and print the result.
pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let xml = std::fs::read_to_string(&config.xml_file)
        .map_err(|e| format!("Error reading {}: {e}", config.xml_file.display()))?;
    log::info!("Read {} bytes from {}", xml.len(), config.xml_file.display());

    let package = xpath::parse_document(&xml)?;
    let document = package.as_document();
    let classifier = Arc::new(AddressClassifier::with_cache_capacity(config.cache_size));
    let context = xpath::context_with_functions(&config.prefix, Arc::clone(&classifier));

    let output = query(&document, &config.expression, &context, config.json)?;
    print!("{output}");

    log::info!(
        "#End run() {expression} subnet cache {cache:?}",
        expression = config.expression.on_blue(),
        cache = classifier.subnet_cache()
    );
    Ok(())
}

/// Evaluate `expression` and render the result.
///
/// Node-sets become one row per node; other values are printed as is.
pub fn query<'d>(
    document: &Document<'d>,
    expression: &str,
    context: &Context<'d>,
    json: bool,
) -> Result<String, Box<dyn Error>> {
    match xpath::evaluate(document, expression, context)? {
        Value::Nodeset(nodes) => {
            let rows = match_rows(&nodes.document_order());
            log::info!("{} nodes matched", rows.len());
            if json {
                Ok(format!("{}\n", render_json(&rows)?))
            } else {
                Ok(render_csv(&rows))
            }
        }
        value if json => Ok(format!("{}\n", scalar_json(&value))),
        value => Ok(format!("{}\n", value.string())),
    }
}

fn scalar_json(value: &Value<'_>) -> serde_json::Value {
    match value {
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        other => serde_json::Value::String(other.string()),
    }
}
