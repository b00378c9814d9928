//! TCP protocol values

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use socket2::{Domain, Protocol};

/// A TCP endpoint: address plus port.
pub type Endpoint = SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

/// TCP over IPv4 or IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tcp {
    family: Family,
}

impl Tcp {
    #[must_use]
    pub const fn v4() -> Self {
        Self { family: Family::V4 }
    }

    #[must_use]
    pub const fn v6() -> Self {
        Self { family: Family::V6 }
    }

    /// The protocol matching an endpoint's address family.
    #[must_use]
    pub fn of(endpoint: &Endpoint) -> Self {
        if endpoint.is_ipv6() { Self::v6() } else { Self::v4() }
    }

    #[must_use]
    pub fn family(self) -> Family {
        self.family
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        match self.family {
            Family::V4 => Domain::IPV4,
            Family::V6 => Domain::IPV6,
        }
    }

    #[must_use]
    pub fn protocol(self) -> Protocol {
        Protocol::TCP
    }

    /// The wildcard endpoint of this family on `port`, for binding.
    #[must_use]
    pub fn unspecified(self, port: u16) -> Endpoint {
        let ip = match self.family {
            Family::V4 => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Family::V6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        SocketAddr::new(ip, port)
    }
}
