//! Address Module
//!
//! Implements the `Address` value type. An address starts empty and is
//! populated by exactly one of three setters: hostname resolution, literal
//! parsing, or raw-structure ingestion. Each setter replaces the stored
//! endpoint atomically; a failed setter leaves the previous endpoint (and
//! validity) untouched and records the failure on the instance.
//!
//! Internally the endpoint is a tagged union over the two supported
//! families. Byte-level layouts appear only at the `socket2::SockAddr`
//! boundary, where ports and addresses take network byte order; everything
//! above that boundary works in host byte order.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use log::debug;
use socket2::{Domain, SockAddr};
use thiserror::Error;

use entities_system_integration_common::{platform, ErrorReporting, ErrorSlot};

/// IP version tag of a populated address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl From<IpVersion> for Domain {
    fn from(version: IpVersion) -> Self {
        match version {
            IpVersion::V4 => Domain::IPV4,
            IpVersion::V6 => Domain::IPV6,
        }
    }
}

/// Address error statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    /// A raw structure's family is neither IPv4 nor IPv6
    #[error("address structure family mismatch")]
    Failure,
    /// The operation needs a populated address and this one is empty
    #[error("invalid address internal state")]
    Internal,
    /// No IP version is set
    #[error("unsupported IP version")]
    UnsupportedVersion,
    /// The platform resolver rejected the host/service pair
    #[error("host resolution failed")]
    Resolution,
    /// The presentation text is not a valid literal of the stated version
    #[error("invalid presentation address")]
    Parse,
}

/// A resolved or hand-built IPv4/IPv6 endpoint.
///
/// Plain value semantics: cheap to clone, comparable through its textual
/// form, default-constructed empty and invalid.
///
/// # Examples
///
/// ```rust
/// use entities_addressing::{Address, IpVersion};
/// use entities_system_integration_common::ErrorReporting;
///
/// let mut addr = Address::new();
/// addr.set_text(IpVersion::V4, "127.0.0.1", 9000).unwrap();
/// assert!(addr.is_valid());
/// assert_eq!(addr.text().unwrap(), "127.0.0.1:9000");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Address {
    repr: Option<SocketAddr>,
    errors: ErrorSlot,
}

impl Address {
    /// Create an empty, invalid address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from a hostname (or literal) and a service/port string.
    ///
    /// Resolution runs through the platform resolver with an unspecified
    /// family and a stream-socket hint. Of the offered candidates, the
    /// first IPv6 one wins; the first IPv4 one is the fallback. A resolver
    /// failure records the resolver's code and text and leaves the stored
    /// endpoint untouched.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or numeric address literal
    /// * `service` - Numeric port or service name
    pub fn set_host(&mut self, host: &str, service: &str) -> Result<(), AddressError> {
        let candidates = match platform::resolve_host(host, service) {
            Ok(candidates) => candidates,
            Err(error) => {
                self.errors.record(error.code, error.message);
                return Err(AddressError::Resolution);
            }
        };

        let picked = candidates
            .iter()
            .find(|candidate| candidate.is_ipv6())
            .or_else(|| candidates.iter().find(|candidate| candidate.is_ipv4()));

        if let Some(endpoint) = picked {
            debug!("resolved {host}:{service} to {endpoint}");
            self.repr = Some(*endpoint);
        }
        Ok(())
    }

    /// Populate from presentation text of the stated version plus a port.
    ///
    /// No resolution happens here: `text` must already be a literal of
    /// exactly `version`. The port arrives in host byte order and is
    /// converted at the native boundary, not before.
    pub fn set_text(
        &mut self,
        version: IpVersion,
        text: &str,
        port: u16,
    ) -> Result<(), AddressError> {
        let parsed = match version {
            IpVersion::V4 => text
                .parse::<Ipv4Addr>()
                .map(|ip| SocketAddr::V4(SocketAddrV4::new(ip, port))),
            IpVersion::V6 => text
                .parse::<Ipv6Addr>()
                .map(|ip| SocketAddr::V6(SocketAddrV6::new(ip, port, 0, 0))),
        };

        match parsed {
            Ok(endpoint) => {
                self.repr = Some(endpoint);
                Ok(())
            }
            Err(_) => {
                self.errors.record(0, "invalid IP string");
                Err(AddressError::Parse)
            }
        }
    }

    /// Populate from a raw native structure.
    ///
    /// This is the ingestion path for peer structures produced by accept
    /// and datagram receive calls. Families other than IPv4/IPv6 are
    /// rejected without touching the stored endpoint.
    pub fn set_native(&mut self, native: &SockAddr) -> Result<(), AddressError> {
        match native.as_socket() {
            Some(endpoint) => {
                self.repr = Some(endpoint);
                Ok(())
            }
            None => Err(AddressError::Failure),
        }
    }

    /// Textual `"<address>:<port>"` form.
    ///
    /// IPv6 renders in canonical compressed presentation form, without
    /// brackets. Fails with [`AddressError::Internal`] on an empty address.
    pub fn text(&self) -> Result<String, AddressError> {
        match self.repr {
            Some(SocketAddr::V4(v4)) => Ok(format!("{}:{}", v4.ip(), v4.port())),
            Some(SocketAddr::V6(v6)) => Ok(format!("{}:{}", v6.ip(), v6.port())),
            None => Err(AddressError::Internal),
        }
    }

    /// The stored IPv4 endpoint, or an all-zero one if the stored version
    /// is not IPv4. A value-level miss, not an error.
    pub fn to_ipv4(&self) -> SocketAddrV4 {
        match self.repr {
            Some(SocketAddr::V4(v4)) => v4,
            _ => SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0),
        }
    }

    /// The stored IPv6 endpoint, or an all-zero one if the stored version
    /// is not IPv6. A value-level miss, not an error.
    pub fn to_ipv6(&self) -> SocketAddrV6 {
        match self.repr {
            Some(SocketAddr::V6(v6)) => v6,
            _ => SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, 0, 0, 0),
        }
    }

    /// The generic native structure view consumed by socket calls.
    ///
    /// This is the only point where the endpoint leaves host byte order.
    pub fn to_native(&self) -> Result<SockAddr, AddressError> {
        match self.repr {
            Some(endpoint) => Ok(SockAddr::from(endpoint)),
            None => Err(AddressError::Internal),
        }
    }

    /// IP version of the stored endpoint.
    pub fn ip_version(&self) -> Result<IpVersion, AddressError> {
        match self.repr {
            Some(SocketAddr::V4(_)) => Ok(IpVersion::V4),
            Some(SocketAddr::V6(_)) => Ok(IpVersion::V6),
            None => Err(AddressError::Failure),
        }
    }

    /// Port of the stored endpoint, in host byte order.
    pub fn port(&self) -> Result<u16, AddressError> {
        match self.repr {
            Some(endpoint) => Ok(endpoint.port()),
            None => Err(AddressError::UnsupportedVersion),
        }
    }

    /// Capacity of the platform's generic socket-address storage, the
    /// upper bound on any native structure this type round-trips.
    pub fn storage_capacity() -> usize {
        platform::sockaddr_storage_len()
    }
}

impl ErrorReporting for Address {
    fn is_valid(&self) -> bool {
        self.repr.is_some()
    }

    fn last_error_code(&self) -> i32 {
        self.errors.code()
    }

    fn last_error_message(&self) -> &str {
        self.errors.message()
    }
}

impl From<SocketAddrV4> for Address {
    fn from(endpoint: SocketAddrV4) -> Self {
        Address {
            repr: Some(SocketAddr::V4(endpoint)),
            errors: ErrorSlot::default(),
        }
    }
}

impl From<SocketAddrV6> for Address {
    fn from(endpoint: SocketAddrV6) -> Self {
        Address {
            repr: Some(SocketAddr::V6(endpoint)),
            errors: ErrorSlot::default(),
        }
    }
}

impl From<SocketAddr> for Address {
    fn from(endpoint: SocketAddr) -> Self {
        Address {
            repr: Some(endpoint),
            errors: ErrorSlot::default(),
        }
    }
}

impl fmt::Display for Address {
    /// Renders the textual form, or nothing for an empty address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Ok(text) => f.write_str(&text),
            Err(_) => Ok(()),
        }
    }
}
