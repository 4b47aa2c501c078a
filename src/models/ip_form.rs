//! IP address, interface and network forms.
//!
//! An *interface* keeps the host bits of its address (`10.1.2.3/24`), a *network*
//! must have them cleared (`10.1.0.0/16`). A bare address is accepted as either
//! one, with the full-host prefix length.
//!
//! The prefix after `/` is a decimal length. IPv4 also accepts a dotted netmask
//! (`255.255.0.0`) or hostmask (`0.0.255.255`) in its place.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Full-host prefix length for IPv4 (32 bits).
pub const IPV4_HOST_PREFIX: u8 = 32;
/// Full-host prefix length for IPv6 (128 bits).
pub const IPV6_HOST_PREFIX: u8 = 128;

/// Address family, determined by literal syntax.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Prefix length at which a network or interface degenerates to a single host.
    pub fn host_prefix(self) -> u8 {
        match self {
            Family::V4 => IPV4_HOST_PREFIX,
            Family::V6 => IPV6_HOST_PREFIX,
        }
    }

    pub fn of_addr(addr: &IpAddr) -> Family {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// Result of a successful parse attempt.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum IpForm {
    /// Bare host address, no prefix.
    Address(IpAddr),
    /// Address plus prefix, host bits preserved.
    Interface(IpNet),
    /// Address plus prefix, host bits zero.
    Network(IpNet),
}

impl IpForm {
    /// The address carried by this form.
    ///
    /// For a network this is the base (first) address of the range.
    pub fn address(&self) -> IpAddr {
        match self {
            IpForm::Address(addr) => *addr,
            IpForm::Interface(net) => net.addr(),
            IpForm::Network(net) => net.network(),
        }
    }

    pub fn family(&self) -> Family {
        Family::of_addr(&self.address())
    }

    /// Prefix length; a bare address reports the full-host length.
    pub fn prefix_len(&self) -> u8 {
        match self {
            IpForm::Address(addr) => Family::of_addr(addr).host_prefix(),
            IpForm::Interface(net) | IpForm::Network(net) => net.prefix_len(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IpForm::Address(_) => "address",
            IpForm::Interface(_) => "interface",
            IpForm::Network(_) => "network",
        }
    }
}

impl fmt::Display for IpForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpForm::Address(addr) => write!(f, "{}", addr),
            IpForm::Interface(net) | IpForm::Network(net) => write!(f, "{}", net),
        }
    }
}

/// Convert a CIDR prefix length to an IPv4 netmask as u32.
///
/// # Examples
/// ```
/// use xpath_ipaddress::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24), Some(0xFFFFFF00));
/// ```
pub fn get_cidr_mask(len: u8) -> Option<u32> {
    if len > IPV4_HOST_PREFIX {
        None
    } else {
        let right_len = IPV4_HOST_PREFIX - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Some(mask as u32)
    }
}

/// Prefix length for a dotted IPv4 netmask, or failing that a hostmask.
pub fn prefix_from_mask(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    (0..=IPV4_HOST_PREFIX)
        .find(|len| get_cidr_mask(*len) == Some(bits))
        .or_else(|| (0..=IPV4_HOST_PREFIX).find(|len| get_cidr_mask(*len) == Some(!bits)))
}

/// Split `ADDR[/PREFIX]`; more than one `/` is rejected.
fn split_addr_prefix(text: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = text.split('/');
    let addr = parts.next()?;
    let prefix = parts.next();
    if parts.next().is_some() {
        return None;
    }
    Some((addr, prefix))
}

fn parse_prefix_len(prefix: &str, max: u8) -> Option<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<u8>().ok().filter(|len| *len <= max)
}

pub fn parse_ipv4_address(text: &str) -> Option<Ipv4Addr> {
    text.parse().ok()
}

/// Parse an IPv6 address with an optional `%zone` suffix.
///
/// The zone must be non-empty and contain neither `%` nor `/`. It is validated
/// and then dropped, [`Ipv6Addr`] has no place for it.
pub fn parse_ipv6_address(text: &str) -> Option<Ipv6Addr> {
    strip_zone_id(text)?.parse().ok()
}

fn strip_zone_id(text: &str) -> Option<&str> {
    match text.split_once('%') {
        None => Some(text),
        Some((addr, zone)) if !zone.is_empty() && !zone.contains(|c: char| c == '%' || c == '/') => {
            Some(addr)
        }
        Some(_) => None,
    }
}

/// Parse `ADDR`, `ADDR/LEN`, `ADDR/NETMASK` or `ADDR/HOSTMASK` keeping host bits.
pub fn parse_ipv4_interface(text: &str) -> Option<Ipv4Net> {
    let (addr, prefix) = split_addr_prefix(text)?;
    let addr = parse_ipv4_address(addr)?;
    let len = match prefix {
        None => IPV4_HOST_PREFIX,
        Some(prefix) => parse_prefix_len(prefix, IPV4_HOST_PREFIX)
            .or_else(|| parse_ipv4_address(prefix).and_then(prefix_from_mask))?,
    };
    Ipv4Net::new(addr, len).ok()
}

/// Like [`parse_ipv4_interface`] but host bits must be zero.
pub fn parse_ipv4_network(text: &str) -> Option<Ipv4Net> {
    parse_ipv4_interface(text).filter(|net| net.addr() == net.network())
}

/// Parse `ADDR` or `ADDR/LEN` keeping host bits.
pub fn parse_ipv6_interface(text: &str) -> Option<Ipv6Net> {
    let (addr, prefix) = split_addr_prefix(text)?;
    let addr = parse_ipv6_address(addr)?;
    let len = match prefix {
        None => IPV6_HOST_PREFIX,
        Some(prefix) => parse_prefix_len(prefix, IPV6_HOST_PREFIX)?,
    };
    Ipv6Net::new(addr, len).ok()
}

/// Like [`parse_ipv6_interface`] but host bits must be zero.
pub fn parse_ipv6_network(text: &str) -> Option<Ipv6Net> {
    parse_ipv6_interface(text).filter(|net| net.addr() == net.network())
}

/// Bare address of either family, IPv4 tried first.
pub fn parse_address(text: &str) -> Option<IpAddr> {
    parse_ipv4_address(text)
        .map(IpAddr::V4)
        .or_else(|| parse_ipv6_address(text).map(IpAddr::V6))
}

/// Interface of either family, IPv4 tried first.
pub fn parse_interface(text: &str) -> Option<IpNet> {
    parse_ipv4_interface(text)
        .map(IpNet::V4)
        .or_else(|| parse_ipv6_interface(text).map(IpNet::V6))
}

/// Network of either family, IPv4 tried first.
pub fn parse_network(text: &str) -> Option<IpNet> {
    parse_ipv4_network(text)
        .map(IpNet::V4)
        .or_else(|| parse_ipv6_network(text).map(IpNet::V6))
}
