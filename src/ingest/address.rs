//! Textual addresses and CIDR prefixes.
//!
//! IPv6 goes through `std::net`, so it accepts the full, zero-compressed and
//! embedded-IPv4 notations. IPv4 octets may carry leading zeros (`010.001.0.0`),
//! as found in older geo tables, and are read as decimal.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::{IngestError, IngestResult};

/// A parsed `address/prefix_len` pair in the trie's native key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr<K> {
    /// Network address as an unsigned key
    pub address: K,

    /// Number of leading bits that form the prefix
    pub prefix_len: u8,
}

/// Parses a dotted-quad IPv4 address into its 32-bit key.
///
/// Each octet is one to three decimal digits no greater than 255.
pub fn parse_ipv4(text: &str) -> IngestResult<u32> {
    let text = text.trim();
    let invalid = || IngestError::InvalidAddress(text.to_string());

    let mut octets = [0u8; 4];
    let mut parts = text.split('.');
    for octet in &mut octets {
        let part = parts.next().ok_or_else(invalid)?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *octet = part.parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(u32::from(Ipv4Addr::from(octets)))
}

/// Parses an IPv6 address into its 128-bit key.
pub fn parse_ipv6(text: &str) -> IngestResult<u128> {
    let text = text.trim();
    text.parse::<Ipv6Addr>()
        .map(u128::from)
        .map_err(|_| IngestError::InvalidAddress(text.to_string()))
}

/// Formats a 32-bit key as a dotted quad.
pub fn format_ipv4(key: u32) -> String {
    Ipv4Addr::from(key).to_string()
}

/// Formats a 128-bit key in canonical IPv6 notation.
pub fn format_ipv6(key: u128) -> String {
    Ipv6Addr::from(key).to_string()
}

/// True if `text` is a legal IPv4 address.
pub fn is_legal_ipv4(text: &str) -> bool {
    parse_ipv4(text).is_ok()
}

/// True if `text` is a legal IPv6 address.
pub fn is_legal_ipv6(text: &str) -> bool {
    parse_ipv6(text).is_ok()
}

/// True if `text` is a legal address of either family.
pub fn is_legal_address(text: &str) -> bool {
    is_legal_ipv4(text) || is_legal_ipv6(text)
}

/// Parses `"a.b.c.d/len"`.
///
/// The length is only checked to be a number; the trie rejects lengths past 32.
pub fn parse_cidr_v4(text: &str) -> IngestResult<Cidr<u32>> {
    let (address, prefix_len) = split_cidr(text)?;
    Ok(Cidr {
        address: parse_ipv4(address)?,
        prefix_len,
    })
}

/// Parses `"addr/len"` for IPv6.
pub fn parse_cidr_v6(text: &str) -> IngestResult<Cidr<u128>> {
    let (address, prefix_len) = split_cidr(text)?;
    Ok(Cidr {
        address: parse_ipv6(address)?,
        prefix_len,
    })
}

/// Splits a CIDR string into its address text and numeric prefix length.
fn split_cidr(text: &str) -> IngestResult<(&str, u8)> {
    let text = text.trim();
    let (address, len) = text
        .split_once('/')
        .ok_or_else(|| IngestError::MissingPrefixLength(text.to_string()))?;
    let prefix_len = len
        .trim()
        .parse::<u8>()
        .map_err(|_| IngestError::InvalidPrefixLength(text.to_string()))?;
    Ok((address, prefix_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1.1.1.12", true ; "plain ipv4")]
    #[test_case("251.2.1.1", true ; "high first octet")]
    #[test_case("256.2.3.45", false ; "octet out of range")]
    #[test_case("25.2.3.45.23", false ; "five octets")]
    #[test_case("4001:DA8:0200:0:0:0:0:e34", true ; "full ipv6")]
    #[test_case("40012:DA8:0200:0:0:0:0:e34", false ; "group too wide")]
    #[test_case("4001:DA8:0200:0:0:0:0:e34t", false ; "trailing garbage")]
    #[test_case("aa::10:0", true ; "zero compressed")]
    #[test_case("::ffff:1.2.3.4", true ; "embedded ipv4")]
    #[test_case("", false ; "empty")]
    #[test_case("010.001.000.000", true ; "zero padded octets")]
    #[test_case("0255.0.0.0", false ; "four digit octet")]
    #[test_case("1..2.3", false ; "empty octet")]
    #[test_case("+1.2.3.4", false ; "signed octet")]
    fn test_is_legal_address(text: &str, expected: bool) {
        assert_eq!(is_legal_address(text), expected);
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse_ipv4("10.1.2.3").unwrap(), 0x0a01_0203);
        assert_eq!(parse_ipv4(" 255.255.255.255 ").unwrap(), u32::MAX);
        assert!(matches!(
            parse_ipv4("10.1.2"),
            Err(IngestError::InvalidAddress(a)) if a == "10.1.2"
        ));
    }

    #[test]
    fn test_parse_ipv4_zero_padded() {
        assert_eq!(parse_ipv4("010.001.000.000").unwrap(), 0x0a01_0000);
        assert_eq!(parse_ipv4("192.168.001.010").unwrap(), 0xc0a8_010a);
        assert_eq!(
            parse_cidr_v4("010.001.000.000/16").unwrap(),
            Cidr {
                address: 0x0a01_0000,
                prefix_len: 16
            }
        );
        assert!(parse_ipv4("1.2.3.256").is_err());
    }

    #[test]
    fn test_parse_ipv6_notations() {
        let full = parse_ipv6("aa:0:10:0:0:0:10:0").unwrap();
        let compressed = parse_ipv6("aa:0:10::10:0").unwrap();
        assert_eq!(full, compressed);
        assert_eq!(full, 0x00aa_0000_0010_0000_0000_0000_0010_0000);

        assert_eq!(parse_ipv6("::ffff:10.0.0.1").unwrap(), 0xffff_0a00_0001);
        assert_eq!(parse_ipv6("::").unwrap(), 0);
        assert_eq!(
            parse_ipv6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff").unwrap(),
            u128::MAX
        );
    }

    #[test]
    fn test_format_round_trip() {
        assert_eq!(format_ipv4(0x0a01_0203), "10.1.2.3");
        assert_eq!(format_ipv6(parse_ipv6("3e:0:0:0:2:0:0:e").unwrap()), "3e::2:0:0:e");
    }

    #[test_case("10.0.0.0/8", 0x0a00_0000, 8 ; "class a")]
    #[test_case("0.0.0.0/0", 0, 0 ; "default route")]
    #[test_case(" 192.168.1.7/32 ", 0xc0a8_0107, 32 ; "host with spaces")]
    #[test_case("10.0.0.0/33", 0x0a00_0000, 33 ; "length checked by trie")]
    fn test_parse_cidr_v4(text: &str, address: u32, prefix_len: u8) {
        assert_eq!(parse_cidr_v4(text).unwrap(), Cidr { address, prefix_len });
    }

    #[test]
    fn test_parse_cidr_errors() {
        assert!(matches!(
            parse_cidr_v4("10.0.0.0"),
            Err(IngestError::MissingPrefixLength(_))
        ));
        assert!(matches!(
            parse_cidr_v4("10.0.0.0/x"),
            Err(IngestError::InvalidPrefixLength(_))
        ));
        assert!(matches!(
            parse_cidr_v4("10.0.0.0/-1"),
            Err(IngestError::InvalidPrefixLength(_))
        ));
        assert!(matches!(
            parse_cidr_v4("aa::/16"),
            Err(IngestError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_cidr_v6("10.0.0.0/8"),
            Err(IngestError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_cidr_v6() {
        let cidr = parse_cidr_v6("bbbb::10:0/127").unwrap();
        assert_eq!(cidr.prefix_len, 127);
        assert_eq!(cidr.address, parse_ipv6("bbbb:0:0:0:0:0:10:0").unwrap());
    }
}
