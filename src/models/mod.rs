//! Parsed forms of textual IP values.
//!
//! This module contains the data structures produced by a parse attempt:
//! - [`Family`] - IPv4 or IPv6 with its full-host prefix length
//! - [`IpForm`] - an address, interface or network parsed from text
//! - parse helpers for every form, per family and family-agnostic

mod ip_form;

// Re-export public types
pub use ip_form::{
    get_cidr_mask, parse_address, parse_interface, parse_ipv4_address, parse_ipv4_interface,
    parse_ipv4_network, parse_ipv6_address, parse_ipv6_interface, parse_ipv6_network,
    parse_network, prefix_from_mask, Family, IpForm, IPV4_HOST_PREFIX, IPV6_HOST_PREFIX,
};
