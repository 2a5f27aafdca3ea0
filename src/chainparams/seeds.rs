//! Peer bootstrap data: DNS seeds and pre-resolved fixed seeds.

use crate::error::ChainError;
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use tracing::{debug, warn};

/// A DNS seed: the host to query and a literal address to fall back on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeedData {
    pub name: String,
    pub host: String,
}

impl DnsSeedData {
    pub fn new(name: &str, host: &str) -> Self {
        DnsSeedData {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// A pre-resolved seed node: 16-byte IPv6 address (IPv4 is mapped into
/// `::ffff:a.b.c.d`) and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec6 {
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        SeedSpec6 {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }

    pub fn from_socket_addr(addr: SocketAddr) -> Self {
        let ip = match addr.ip() {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        SeedSpec6 {
            addr: ip.octets(),
            port: addr.port(),
        }
    }

    pub fn to_socket_addr(&self) -> SocketAddr {
        let v6 = Ipv6Addr::from(self.addr);
        match v6.to_ipv4_mapped() {
            Some(v4) => SocketAddr::new(IpAddr::V4(v4), self.port),
            None => SocketAddr::new(IpAddr::V6(v6), self.port),
        }
    }
}

impl fmt::Display for SeedSpec6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_socket_addr())
    }
}

impl Serialize for SeedSpec6 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Compiled-in seed nodes for main.
///
/// Stand-in for the generated seed table, which is not distributed with this
/// crate: it lists the DNS seed hosts on the default port. Deployments that
/// have the real list load it with `fixed_seeds_file`.
pub static MAIN_FIXED_SEEDS: &[SeedSpec6] = &[
    SeedSpec6::ipv4(140, 82, 11, 56, 7997),
    SeedSpec6::ipv4(66, 135, 0, 156, 7997),
    SeedSpec6::ipv4(103, 249, 70, 56, 7997),
    SeedSpec6::ipv4(45, 77, 150, 151, 7997),
];

/// Compiled-in seed nodes for test.
pub static TEST_FIXED_SEEDS: &[SeedSpec6] = &[];

/// Resolves `name` and packs the first address returned into a seed record.
///
/// Blocks on the system resolver.
pub fn lookup_domain(name: &str, port: u16) -> Result<SeedSpec6, ChainError> {
    let mut addrs = (name, port)
        .to_socket_addrs()
        .map_err(|e| ChainError::SeedLookup(format!("{}: {}", name, e)))?;
    let addr = addrs
        .next()
        .ok_or_else(|| ChainError::SeedLookup(format!("{}: no addresses returned", name)))?;
    debug!(%name, %addr, "resolved seed host");
    Ok(SeedSpec6::from_socket_addr(addr))
}

/// Resolves every DNS seed host on `port`. Failures are logged and returned
/// beside the successes; retrying is left to the caller.
pub fn resolve_dns_seeds(
    seeds: &[DnsSeedData],
    port: u16,
) -> (Vec<SeedSpec6>, Vec<ChainError>) {
    let mut resolved = Vec::with_capacity(seeds.len());
    let mut failures = Vec::new();
    for seed in seeds {
        match lookup_domain(&seed.host, port) {
            Ok(spec) => resolved.push(spec),
            Err(e) => {
                warn!(seed = %seed.name, error = %e, "DNS seed lookup failed");
                failures.push(e);
            }
        }
    }
    (resolved, failures)
}

/// Parses a fixed-seed list: one `ip`, `ip:port` or `[ipv6]:port` per line,
/// `#` starts a comment. Bare addresses use `default_port`.
pub fn parse_fixed_seeds(text: &str, default_port: u16) -> Result<Vec<SeedSpec6>, ChainError> {
    let mut seeds = Vec::new();
    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let addr = if let Ok(addr) = line.parse::<SocketAddr>() {
            addr
        } else if let Ok(ip) = line.parse::<IpAddr>() {
            SocketAddr::new(ip, default_port)
        } else {
            return Err(ChainError::Config(format!(
                "Fixed seed line {}: {:?} is not an address",
                line_no + 1,
                line
            )));
        };
        seeds.push(SeedSpec6::from_socket_addr(addr));
    }
    Ok(seeds)
}

/// `true` when the address is an IPv4 address mapped into IPv6.
pub fn is_ipv4_mapped(spec: &SeedSpec6) -> bool {
    Ipv6Addr::from(spec.addr).to_ipv4_mapped().is_some()
}
