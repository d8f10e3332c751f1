//! Private-range IPv4 address assigned to a computer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::DomainError;

/// A dotted-quad address inside the `10.0.0.0/8` private range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpAddress(Ipv4Addr);

impl IpAddress {
    /// The first octet every game address shares.
    pub const NETWORK_OCTET: u8 = 10;

    /// Builds `10.b.c.d`.
    pub fn in_private_range(b: u8, c: u8, d: u8) -> Self {
        Self(Ipv4Addr::new(Self::NETWORK_OCTET, b, c, d))
    }

    pub fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IpAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr: Ipv4Addr = s
            .parse()
            .map_err(|_| DomainError::parse(format!("Invalid IP address: {}", s)))?;
        if addr.octets()[0] != Self::NETWORK_OCTET {
            return Err(DomainError::validation(format!(
                "IP address {} is outside the 10.0.0.0/8 range",
                s
            )));
        }
        Ok(Self(addr))
    }
}

impl TryFrom<String> for IpAddress {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IpAddress> for String {
    fn from(ip: IpAddress) -> String {
        ip.to_string()
    }
}
