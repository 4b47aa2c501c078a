//! Family and form predicates over address-like text.
//!
//! Every predicate is an ordered list of parse attempts; the first attempt that
//! parses decides the answer. Text that parses under no attempt yields `false`.

use crate::models::{
    parse_address, parse_interface, parse_ipv4_address, parse_ipv4_interface, parse_ipv4_network,
    parse_ipv6_address, parse_ipv6_interface, parse_ipv6_network, parse_network, IpForm,
    IPV4_HOST_PREFIX, IPV6_HOST_PREFIX,
};
use ipnet::IpNet;
use std::net::IpAddr;

/// A single fallible parse attempt.
pub type Strategy<T> = fn(&str) -> Option<T>;

/// Try each strategy in order and return the first successful parse.
pub fn try_parse_as_any<T>(value: &str, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(value))
}

fn ipv4_network_form(text: &str) -> Option<IpForm> {
    parse_ipv4_network(text).map(|net| IpForm::Network(IpNet::V4(net)))
}

fn ipv4_interface_form(text: &str) -> Option<IpForm> {
    parse_ipv4_interface(text).map(|net| IpForm::Interface(IpNet::V4(net)))
}

fn ipv4_address_form(text: &str) -> Option<IpForm> {
    parse_ipv4_address(text).map(|addr| IpForm::Address(IpAddr::V4(addr)))
}

fn ipv6_network_form(text: &str) -> Option<IpForm> {
    parse_ipv6_network(text).map(|net| IpForm::Network(IpNet::V6(net)))
}

fn ipv6_interface_form(text: &str) -> Option<IpForm> {
    parse_ipv6_interface(text).map(|net| IpForm::Interface(IpNet::V6(net)))
}

fn ipv6_address_form(text: &str) -> Option<IpForm> {
    parse_ipv6_address(text).map(|addr| IpForm::Address(IpAddr::V6(addr)))
}

fn address_form(text: &str) -> Option<IpForm> {
    parse_address(text).map(IpForm::Address)
}

fn interface_form(text: &str) -> Option<IpForm> {
    parse_interface(text).map(IpForm::Interface)
}

fn network_form(text: &str) -> Option<IpForm> {
    parse_network(text).map(IpForm::Network)
}

fn ipv4_network_is_net(text: &str) -> Option<bool> {
    parse_ipv4_network(text).map(|net| net.prefix_len() != IPV4_HOST_PREFIX)
}

fn ipv4_interface_is_net(text: &str) -> Option<bool> {
    parse_ipv4_interface(text).map(|net| net.prefix_len() != IPV4_HOST_PREFIX)
}

fn ipv6_network_is_net(text: &str) -> Option<bool> {
    parse_ipv6_network(text).map(|net| net.prefix_len() != IPV6_HOST_PREFIX)
}

fn ipv6_interface_is_net(text: &str) -> Option<bool> {
    parse_ipv6_interface(text).map(|net| net.prefix_len() != IPV6_HOST_PREFIX)
}

/// Any IPv4 form: network, interface or address.
pub fn is_any_ipv4(text: &str) -> bool {
    try_parse_as_any(
        text,
        &[ipv4_network_form, ipv4_interface_form, ipv4_address_form],
    )
    .is_some()
}

/// IPv4 network or interface with a prefix shorter than 32.
///
/// A network that parses with prefix 32 answers `false` straight away; the
/// interface attempt is only made when the network attempt fails to parse.
pub fn is_net_ipv4(text: &str) -> bool {
    try_parse_as_any(text, &[ipv4_network_is_net, ipv4_interface_is_net]).unwrap_or(false)
}

/// Bare IPv4 address, no prefix.
pub fn is_host_ipv4(text: &str) -> bool {
    parse_ipv4_address(text).is_some()
}

pub fn is_any_ipv6(text: &str) -> bool {
    try_parse_as_any(
        text,
        &[ipv6_network_form, ipv6_interface_form, ipv6_address_form],
    )
    .is_some()
}

/// IPv6 network or interface with a prefix shorter than 128.
pub fn is_net_ipv6(text: &str) -> bool {
    try_parse_as_any(text, &[ipv6_network_is_net, ipv6_interface_is_net]).unwrap_or(false)
}

pub fn is_host_ipv6(text: &str) -> bool {
    parse_ipv6_address(text).is_some()
}

pub fn is_any_ip(text: &str) -> bool {
    is_any_ipv4(text) || is_any_ipv6(text)
}

pub fn is_host_ip(text: &str) -> bool {
    is_host_ipv4(text) || is_host_ipv6(text)
}

pub fn is_net_ip(text: &str) -> bool {
    is_net_ipv4(text) || is_net_ipv6(text)
}

/// Classify text into the most specific form: address, then network, then interface.
pub fn parse_form(text: &str) -> Option<IpForm> {
    try_parse_as_any(text, &[address_form, network_form, interface_form])
}

/// Address of an address, interface or network value.
///
/// Interfaces give their own address, networks their base address.
pub fn extract_ip(text: &str) -> Option<IpAddr> {
    try_parse_as_any(text, &[address_form, interface_form, network_form]).map(|form| {
        log::trace!("extract_ip({text:?}) matched {kind}", kind = form.kind());
        form.address()
    })
}

/// Canonical text of [`extract_ip`], `None` when nothing parses.
pub fn extract_address(text: &str) -> Option<String> {
    extract_ip(text).map(|addr| addr.to_string())
}
