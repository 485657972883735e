//! Classification of IP addresses into "public" and the non-public ranges a
//! server-side fetch must never reach.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    Unspecified,
    Loopback,
    Private,
    LinkLocal,
    Reserved,
    Multicast,
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unspecified => "unspecified",
            Self::Loopback => "loopback",
            Self::Private => "private",
            Self::LinkLocal => "link-local",
            Self::Reserved => "reserved",
            Self::Multicast => "multicast",
        };
        f.write_str(s)
    }
}

const V4_PRIVATE: &[Ipv4Net] = &[
    Ipv4Net::new_assert(Ipv4Addr::new(10, 0, 0, 0), 8),
    Ipv4Net::new_assert(Ipv4Addr::new(100, 64, 0, 0), 10), // shared address space (CGNAT)
    Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 12),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 0, 0), 16),
];

const V4_RESERVED: &[Ipv4Net] = &[
    Ipv4Net::new_assert(Ipv4Addr::new(0, 0, 0, 0), 8),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 0, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 2, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(198, 18, 0, 0), 15),
    Ipv4Net::new_assert(Ipv4Addr::new(198, 51, 100, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(203, 0, 113, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(240, 0, 0, 0), 4), // includes 255.255.255.255
];

const V6_PRIVATE: &[Ipv6Net] = &[
    Ipv6Net::new_assert(Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    Ipv6Net::new_assert(Ipv6Addr::new(0xfec0, 0, 0, 0, 0, 0, 0, 0), 10), // deprecated site-local
    Ipv6Net::new_assert(Ipv6Addr::new(0x64, 0xff9b, 1, 0, 0, 0, 0, 0), 48),
];

const V6_RESERVED: &[Ipv6Net] = &[
    Ipv6Net::new_assert(Ipv6Addr::new(0x100, 0, 0, 0, 0, 0, 0, 0), 64),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 23),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32),
];

const V6_GLOBAL_UNICAST: Ipv6Net = Ipv6Net::new_assert(Ipv6Addr::new(0x2000, 0, 0, 0, 0, 0, 0, 0), 3);
const V6_LINK_LOCAL: Ipv6Net = Ipv6Net::new_assert(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10);

/// Returns the class of a non-public address, or `None` when the address is
/// safe to connect to.
pub fn classify_ip(ip: IpAddr) -> Option<AddressClass> {
    match ip {
        IpAddr::V4(v4) => classify_v4(v4),
        IpAddr::V6(v6) => classify_v6(v6),
    }
}

fn classify_v4(ip: Ipv4Addr) -> Option<AddressClass> {
    if ip.is_unspecified() {
        return Some(AddressClass::Unspecified);
    }
    if ip.is_loopback() {
        return Some(AddressClass::Loopback);
    }
    if ip.is_link_local() {
        return Some(AddressClass::LinkLocal);
    }
    if ip.is_multicast() {
        return Some(AddressClass::Multicast);
    }
    if V4_PRIVATE.iter().any(|net| net.contains(&ip)) {
        return Some(AddressClass::Private);
    }
    if V4_RESERVED.iter().any(|net| net.contains(&ip)) {
        return Some(AddressClass::Reserved);
    }
    None
}

fn classify_v6(ip: Ipv6Addr) -> Option<AddressClass> {
    if ip.is_unspecified() {
        return Some(AddressClass::Unspecified);
    }
    if ip.is_loopback() {
        return Some(AddressClass::Loopback);
    }
    // Translation forms reach the embedded IPv4 host, so judge that instead.
    if let Some(v4) = embedded_ipv4(ip) {
        return classify_v4(v4);
    }
    if ip.is_multicast() {
        return Some(AddressClass::Multicast);
    }
    if V6_LINK_LOCAL.contains(&ip) {
        return Some(AddressClass::LinkLocal);
    }
    if V6_PRIVATE.iter().any(|net| net.contains(&ip)) {
        return Some(AddressClass::Private);
    }
    if V6_RESERVED.iter().any(|net| net.contains(&ip)) || !V6_GLOBAL_UNICAST.contains(&ip) {
        return Some(AddressClass::Reserved);
    }
    None
}

/// IPv4 address carried inside an IPv4-mapped, IPv4-compatible, NAT64
/// well-known-prefix or 6to4 IPv6 address.
fn embedded_ipv4(ip: Ipv6Addr) -> Option<Ipv4Addr> {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return Some(v4);
    }
    let s = ip.segments();
    let low32 = || Ipv4Addr::new((s[6] >> 8) as u8, s[6] as u8, (s[7] >> 8) as u8, s[7] as u8);
    // ::a.b.c.d (deprecated compatible form); :: and ::1 are handled by the caller.
    if s[..6] == [0, 0, 0, 0, 0, 0] {
        return Some(low32());
    }
    // 64:ff9b::/96
    if s[0] == 0x64 && s[1] == 0xff9b && s[2..6] == [0, 0, 0, 0] {
        return Some(low32());
    }
    // 2002::/16
    if s[0] == 0x2002 {
        return Some(Ipv4Addr::new(
            (s[1] >> 8) as u8,
            s[1] as u8,
            (s[2] >> 8) as u8,
            s[2] as u8,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(s: &str) -> Option<AddressClass> {
        classify_ip(s.parse().unwrap())
    }

    #[test]
    fn ipv4_non_public_ranges() {
        assert_eq!(class("0.0.0.0"), Some(AddressClass::Unspecified));
        assert_eq!(class("127.0.0.1"), Some(AddressClass::Loopback));
        assert_eq!(class("127.255.0.9"), Some(AddressClass::Loopback));
        assert_eq!(class("10.0.0.5"), Some(AddressClass::Private));
        assert_eq!(class("172.16.0.1"), Some(AddressClass::Private));
        assert_eq!(class("172.31.255.255"), Some(AddressClass::Private));
        assert_eq!(class("192.168.1.1"), Some(AddressClass::Private));
        assert_eq!(class("100.64.0.1"), Some(AddressClass::Private));
        assert_eq!(class("169.254.169.254"), Some(AddressClass::LinkLocal));
        assert_eq!(class("224.0.0.1"), Some(AddressClass::Multicast));
        assert_eq!(class("240.0.0.1"), Some(AddressClass::Reserved));
        assert_eq!(class("255.255.255.255"), Some(AddressClass::Reserved));
        assert_eq!(class("0.1.2.3"), Some(AddressClass::Reserved));
        assert_eq!(class("192.0.2.10"), Some(AddressClass::Reserved));
        assert_eq!(class("198.18.0.1"), Some(AddressClass::Reserved));
    }

    #[test]
    fn ipv4_public() {
        assert_eq!(class("93.184.216.34"), None);
        assert_eq!(class("8.8.8.8"), None);
        assert_eq!(class("172.32.0.1"), None);
        assert_eq!(class("100.128.0.1"), None);
    }

    #[test]
    fn ipv6_non_public_ranges() {
        assert_eq!(class("::"), Some(AddressClass::Unspecified));
        assert_eq!(class("::1"), Some(AddressClass::Loopback));
        assert_eq!(class("fe80::1"), Some(AddressClass::LinkLocal));
        assert_eq!(class("fd00:ec2::254"), Some(AddressClass::Private));
        assert_eq!(class("fc00::1"), Some(AddressClass::Private));
        assert_eq!(class("ff02::1"), Some(AddressClass::Multicast));
        assert_eq!(class("2001:db8::1"), Some(AddressClass::Reserved));
        assert_eq!(class("100::1"), Some(AddressClass::Reserved));
        assert_eq!(class("4000::1"), Some(AddressClass::Reserved));
    }

    #[test]
    fn ipv6_embedded_ipv4_is_judged_by_the_ipv4_host() {
        assert_eq!(class("::ffff:127.0.0.1"), Some(AddressClass::Loopback));
        assert_eq!(class("::ffff:10.0.0.1"), Some(AddressClass::Private));
        assert_eq!(class("::169.254.169.254"), Some(AddressClass::LinkLocal));
        assert_eq!(class("64:ff9b::a00:1"), Some(AddressClass::Private));
        assert_eq!(class("2002:c0a8:0101::1"), Some(AddressClass::Private));
        assert_eq!(class("::ffff:93.184.216.34"), None);
    }

    #[test]
    fn ipv6_public() {
        assert_eq!(class("2606:2800:220:1:248:1893:25c8:1946"), None);
        assert_eq!(class("2001:4860:4860::8888"), None);
    }
}
