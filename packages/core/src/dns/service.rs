//! Service name to port mapping

use crate::error::{self, Result};

/// Services resolvable by name. Lookups are case-insensitive.
const WELL_KNOWN: &[(&str, u16)] = &[
    ("echo", 7),
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("http", 80),
    ("ws", 80),
    ("pop3", 110),
    ("ntp", 123),
    ("imap", 143),
    ("ldap", 389),
    ("https", 443),
    ("wss", 443),
    ("submission", 587),
    ("imaps", 993),
    ("pop3s", 995),
    ("mysql", 3306),
    ("postgresql", 5432),
    ("redis", 6379),
    ("http-alt", 8080),
];

/// Port for `service`: empty means 0, then decimal numbers, then well-known
/// names unless `numeric_only` is set.
///
/// # Errors
///
/// Returns `ServiceNotFound` for anything else.
pub fn port_for(service: &str, numeric_only: bool) -> Result<u16> {
    if service.is_empty() {
        return Ok(0);
    }
    if let Ok(port) = service.parse::<u16>() {
        return Ok(port);
    }
    if !numeric_only
        && let Some((_, port)) = WELL_KNOWN
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(service))
    {
        return Ok(*port);
    }
    Err(error::service_not_found(service))
}
