use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};

use thiserror::Error;

/// A malformed allowlist entry. Startup-fatal: an entry that cannot parse
/// would otherwise sit in the list and never match a real caller.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("allowlist entry `{entry}` is not an IPv4 address literal")]
pub struct BadAllowlistEntry {
    pub entry: String,
}

/// Immutable set of caller addresses permitted through the perimeter.
/// Entries are exact IPv4 literals, not ranges; duplicates are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpAllowlist {
    entries: HashSet<Ipv4Addr>,
}

impl IpAllowlist {
    pub fn parse<I, S>(entries: I) -> Result<Self, BadAllowlistEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for entry in entries {
            let raw = entry.as_ref().trim();
            let addr: Ipv4Addr = raw.parse().map_err(|_| BadAllowlistEntry {
                entry: raw.to_string(),
            })?;
            set.insert(addr);
        }
        Ok(Self { entries: set })
    }

    /// Exact-match membership. IPv6 callers never match: the list is IPv4 by
    /// contract.
    pub fn admit(&self, source: IpAddr) -> bool {
        match source {
            IpAddr::V4(v4) => self.entries.contains(&v4),
            IpAddr::V6(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
