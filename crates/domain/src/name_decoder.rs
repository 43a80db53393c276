//! Decoding of IPv6 addresses embedded in query names.
//!
//! A name such as `2001.0db8.0000.0000.0000.0000.0000.0001.v6.example.com.`
//! carries the address as hex digits. Delimiters are not interpreted: every
//! non-hex character is dropped, so dotted, colon separated and concatenated
//! forms all decode the same way as long as the digits keep address order.

use std::net::Ipv6Addr;

const IPV6_LEN: usize = 16;

/// Removes a trailing `.<suffix>.` from `name`.
///
/// The match is literal and case-sensitive. Names that do not end with the
/// pattern are returned unchanged.
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    let Some(without_root) = name.strip_suffix('.') else {
        return name;
    };
    let Some(head) = without_root.strip_suffix(suffix) else {
        return name;
    };
    head.strip_suffix('.').unwrap_or(name)
}

/// Decodes the hex digits found in `name` into an IPv6 address.
///
/// An odd digit count is padded with a leading zero nibble. Anything that does
/// not come out as exactly 16 bytes yields `None`.
pub fn decode_address(name: &str) -> Option<Ipv6Addr> {
    let mut digits: String = name.chars().filter(char::is_ascii_hexdigit).collect();

    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }

    let bytes = hex::decode(&digits).ok()?;
    let octets: [u8; IPV6_LEN] = bytes.try_into().ok()?;

    Some(Ipv6Addr::from(octets))
}
