//! # Address Primitives
//!
//! IPv4 validation and subnet-key derivation.
//!
//! Grouping is a deliberate /24-equivalent heuristic: the key is simply the
//! first three dotted octets of an address, with no mask awareness. Addresses
//! that do not parse fall into the shared [`SubnetKey::OTHER`] bucket instead
//! of failing the caller.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Parses a dotted-quad IPv4 address, returning `None` for anything that
/// fails the basic 4-octet numeric shape.
pub fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(s.trim()).ok()
}

/// Returns `true` if `s` is a well-formed IPv4 dotted quad.
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// A /24-equivalent grouping key: the first three octets of an address, or
/// the `"other"` sentinel when the address does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetKey(String);

impl SubnetKey {
    pub const OTHER: &'static str = "other";

    /// Derives the subnet key of an address string.
    pub fn of(address: &str) -> Self {
        match parse_ipv4(address) {
            Some(ip) => {
                let [a, b, c, _] = ip.octets();
                Self(format!("{a}.{b}.{c}"))
            }
            None => Self(Self::OTHER.to_string()),
        }
    }

    /// `true` if this key is the unparseable-address bucket.
    pub fn is_other(&self) -> bool {
        self.0 == Self::OTHER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses_parse() {
        assert!(is_valid_ipv4("192.168.2.81"));
        assert!(is_valid_ipv4("10.0.0.1"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("host.example"));
        assert!(!is_valid_ipv4("10.0.0"));
        assert!(!is_valid_ipv4("999.0.0.1"));
    }

    #[test]
    fn subnet_key_takes_first_three_octets() {
        assert_eq!(SubnetKey::of("192.168.2.81").as_str(), "192.168.2");
        assert_eq!(SubnetKey::of("10.0.0.5").as_str(), "10.0.0");
    }

    #[test]
    fn unparseable_address_falls_into_other() {
        let key = SubnetKey::of("not-an-ip");
        assert!(key.is_other());
        assert_eq!(key.as_str(), "other");
    }
}
