//! Classification of address-like text.
//!
//! This module contains the classification logic:
//! - [`predicates`] - family and form predicates plus address extraction
//! - [`cache`] - memoization of parsed subnet strings
//!
//! [`AddressClassifier`] bundles both behind one owned object. Nothing here
//! returns an error: text that does not parse gives `false` or `None`.

mod cache;
mod predicates;

use ipnet::IpNet;
use std::net::IpAddr;

// Re-export public types and functions
pub use cache::{SubnetCache, DEFAULT_SUBNET_CACHE_CAPACITY};
pub use predicates::{
    extract_address, extract_ip, is_any_ip, is_any_ipv4, is_any_ipv6, is_host_ip, is_host_ipv4,
    is_host_ipv6, is_net_ip, is_net_ipv4, is_net_ipv6, parse_form, try_parse_as_any, Strategy,
};

/// Classifier with its own subnet cache.
///
/// Share one instance (e.g. behind an `Arc`) across queries so repeated subnet
/// checks reuse parsed networks.
#[derive(Debug, Default)]
pub struct AddressClassifier {
    subnets: SubnetCache,
}

impl AddressClassifier {
    pub fn new() -> Self {
        AddressClassifier::default()
    }

    /// Create a classifier whose subnet cache keeps at most `capacity` entries.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        AddressClassifier {
            subnets: SubnetCache::new(capacity),
        }
    }

    pub fn subnet_cache(&self) -> &SubnetCache {
        &self.subnets
    }

    pub fn is_any_ip(&self, text: &str) -> bool {
        is_any_ip(text)
    }

    pub fn is_host_ip(&self, text: &str) -> bool {
        is_host_ip(text)
    }

    pub fn is_net_ip(&self, text: &str) -> bool {
        is_net_ip(text)
    }

    pub fn is_any_ipv4(&self, text: &str) -> bool {
        is_any_ipv4(text)
    }

    pub fn is_host_ipv4(&self, text: &str) -> bool {
        is_host_ipv4(text)
    }

    pub fn is_net_ipv4(&self, text: &str) -> bool {
        is_net_ipv4(text)
    }

    pub fn is_any_ipv6(&self, text: &str) -> bool {
        is_any_ipv6(text)
    }

    pub fn is_host_ipv6(&self, text: &str) -> bool {
        is_host_ipv6(text)
    }

    pub fn is_net_ipv6(&self, text: &str) -> bool {
        is_net_ipv6(text)
    }

    pub fn extract_address(&self, text: &str) -> Option<String> {
        extract_address(text)
    }

    /// True when the address extracted from `text` lies inside the network `subnet`.
    ///
    /// `text` may be an address, interface or network; the subnet must be a
    /// network with its host bits clear. Family mismatches answer `false`.
    pub fn in_subnet(&self, text: &str, subnet: &str) -> bool {
        let Some(addr) = extract_ip(text) else {
            log::trace!("in_subnet: {text:?} is not an ip value");
            return false;
        };
        let Some(net) = self.subnets.get_or_parse(subnet) else {
            log::trace!("in_subnet: {subnet:?} is not a subnet");
            return false;
        };
        contains(&net, addr)
    }
}

fn contains(net: &IpNet, addr: IpAddr) -> bool {
    match (net, addr) {
        (IpNet::V4(net), IpAddr::V4(addr)) => net.contains(&addr),
        (IpNet::V6(net), IpAddr::V6(addr)) => net.contains(&addr),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_in_subnet() {
        let classifier = AddressClassifier::new();
        assert!(!classifier.in_subnet("10.1.2.3", "10.10.0.0/16"));
        assert!(classifier.in_subnet("10.10.5.5", "10.10.0.0/16"));
        assert!(!classifier.in_subnet("not-an-ip", "10.10.0.0/16"));
        assert!(!classifier.in_subnet("10.10.5.5", "not-a-subnet"));
    }

    #[test]
    fn test_in_subnet_boundaries() {
        let classifier = AddressClassifier::new();
        assert!(classifier.in_subnet("10.10.0.0", "10.10.0.0/16"));
        assert!(classifier.in_subnet("10.10.255.255", "10.10.0.0/16"));
        assert!(!classifier.in_subnet("10.11.0.0", "10.10.0.0/16"));
        assert!(classifier.in_subnet("192.0.2.1", "0.0.0.0/0"));
        assert!(classifier.in_subnet("10.1.2.3", "10.1.2.3"));
    }

    #[test]
    fn test_in_subnet_accepts_interface_and_network_values() {
        let classifier = AddressClassifier::new();
        assert!(classifier.in_subnet("10.10.5.5/24", "10.10.0.0/16"));
        assert!(classifier.in_subnet("10.10.4.0/24", "10.10.0.0/16"));
        // the base address of a wider network is still inside
        assert!(classifier.in_subnet("10.0.0.0/8", "10.0.0.0/16"));
    }

    #[test]
    fn test_in_subnet_requires_strict_subnet() {
        let classifier = AddressClassifier::new();
        assert!(!classifier.in_subnet("10.10.5.5", "10.10.5.5/16"));
    }

    #[test]
    fn test_in_subnet_cross_family() {
        let classifier = AddressClassifier::new();
        assert!(!classifier.in_subnet("fe80::1", "10.0.0.0/8"));
        assert!(!classifier.in_subnet("10.1.2.3", "::/0"));
        assert!(classifier.in_subnet("fe80::1", "fe80::/10"));
        assert!(classifier.in_subnet("2001:db8::1/64", "2001:db8::/32"));
    }

    #[test]
    fn test_in_subnet_stable_across_cache_state() {
        let classifier = AddressClassifier::with_cache_capacity(1);
        let cases = [
            ("10.10.5.5", "10.10.0.0/16", true),
            ("10.1.2.3", "10.10.0.0/16", false),
            ("10.1.2.3", "10.0.0.0/8", true),
        ];
        for _ in 0..3 {
            for (text, subnet, expected) in cases {
                assert_eq!(classifier.in_subnet(text, subnet), expected, "{text} in {subnet}");
            }
        }
        assert_eq!(classifier.subnet_cache().len(), 1);

        let uncached = AddressClassifier::with_cache_capacity(0);
        for (text, subnet, expected) in cases {
            assert_eq!(uncached.in_subnet(text, subnet), expected);
        }
    }

    #[test]
    fn test_shared_between_threads() {
        let classifier = Arc::new(AddressClassifier::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let classifier = Arc::clone(&classifier);
                thread::spawn(move || {
                    let host = format!("10.10.{i}.1");
                    (0..50).all(|_| classifier.in_subnet(&host, "10.10.0.0/16"))
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(classifier.subnet_cache().len(), 1);
    }

    #[test]
    fn test_methods_match_free_functions() {
        let classifier = AddressClassifier::new();
        for s in ["10.1.2.3", "10.10.0.0/16", "10.1.2.3/32", "fe80::1", "::/0", "x"] {
            assert_eq!(classifier.is_any_ip(s), is_any_ip(s));
            assert_eq!(classifier.is_host_ip(s), is_host_ip(s));
            assert_eq!(classifier.is_net_ip(s), is_net_ip(s));
            assert_eq!(classifier.is_net_ipv4(s), is_net_ipv4(s));
            assert_eq!(classifier.is_net_ipv6(s), is_net_ipv6(s));
            assert_eq!(classifier.extract_address(s), extract_address(s));
        }
    }
}
