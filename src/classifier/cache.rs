//! Memoization of parsed subnet strings.
//!
//! Subnet arguments come from a small set of expressions, so the same string is
//! parsed over and over during a query. Parsing is deterministic, entries never
//! need invalidating; the LRU bound only caps memory.

use crate::models::parse_network;
use ipnet::IpNet;
use lru::LruCache;
use parking_lot::Mutex;
use std::fmt;
use std::num::NonZeroUsize;

/// Default number of subnet strings kept.
pub const DEFAULT_SUBNET_CACHE_CAPACITY: usize = 128;

/// Thread safe LRU map from subnet text to its parsed network.
///
/// Only successful parses are stored. A capacity of 0 disables memoization.
pub struct SubnetCache {
    /// Uses Mutex because LruCache::get mutates internal ordering.
    entries: Option<Mutex<LruCache<String, IpNet>>>,
}

impl SubnetCache {
    pub fn new(capacity: usize) -> Self {
        let entries = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        if entries.is_none() {
            log::debug!("subnet cache disabled");
        }
        SubnetCache { entries }
    }

    /// Return the network for `subnet`, parsing it on a miss.
    ///
    /// Two threads missing on the same string both parse it; the result is identical.
    pub fn get_or_parse(&self, subnet: &str) -> Option<IpNet> {
        let Some(entries) = &self.entries else {
            return parse_network(subnet);
        };

        if let Some(net) = entries.lock().get(subnet).copied() {
            log::trace!("subnet cache hit: {subnet}");
            return Some(net);
        }

        let net = parse_network(subnet)?;
        log::debug!("subnet cache insert: {subnet} -> {net}");
        entries.lock().put(subnet.to_string(), net);
        Some(net)
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| entries.lock().cap().get())
    }

    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.lock().clear();
        }
    }
}

impl Default for SubnetCache {
    fn default() -> Self {
        SubnetCache::new(DEFAULT_SUBNET_CACHE_CAPACITY)
    }
}

impl fmt::Debug for SubnetCache {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SubnetCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
