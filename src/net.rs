//! Local network address lookup.

use std::io;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

/// First IPv4 address this host's name resolves to.
///
/// Returns `Ok(None)` when the name resolves only to non-IPv4 addresses.
pub fn local_ipv4_addr() -> io::Result<Option<Ipv4Addr>> {
    let host = hostname::get()?;
    let host = host.to_string_lossy();

    let addrs = (host.as_ref(), 0u16).to_socket_addrs()?;
    let found = first_ipv4(addrs.map(|addr| addr.ip()));
    tracing::debug!(host = %host, address = ?found, "Resolved local address");
    Ok(found)
}

/// First IPv4 address of this host as text, or an empty string if none.
pub fn local_ipv4() -> io::Result<String> {
    Ok(local_ipv4_addr()?
        .map(|addr| addr.to_string())
        .unwrap_or_default())
}

fn first_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}
