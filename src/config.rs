//! Command line and environment configuration.
//!
//! Every option can also be set through the environment (a `.env` file is
//! loaded by the binary before parsing).

use crate::classifier::DEFAULT_SUBNET_CACHE_CAPACITY;
use crate::xpath::DEFAULT_PREFIX;
use clap::Parser;
use std::path::PathBuf;

/// Select XML nodes with IP address aware XPath functions.
#[derive(Parser, Debug, Clone)]
#[command(name = "xpath-ipaddress", version, about)]
pub struct Config {
    /// XML document to query.
    pub xml_file: PathBuf,

    /// XPath expression, e.g. "//*[ip:ip4-net(.)]".
    pub expression: String,

    /// Prefix bound to the extension namespace.
    #[arg(long, env = "XPATH_IP_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Subnet cache capacity, 0 disables the cache.
    #[arg(long, env = "XPATH_IP_CACHE_SIZE", default_value_t = DEFAULT_SUBNET_CACHE_CAPACITY)]
    pub cache_size: usize,

    /// Print matches as JSON instead of CSV.
    #[arg(long)]
    pub json: bool,

    /// log4rs configuration file.
    #[arg(long, env = "XPATH_IP_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: PathBuf,
}
