//! Client address resolution for click tracking.
//!
//! Forwarding headers are honoured only when the service runs behind a
//! trusted reverse proxy; otherwise a client could spoof its own address.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

/// Address recorded when nothing better is known.
pub const FALLBACK_IP: &str = "127.0.0.1";

/// Socket peer address, if the server was started with connect info.
#[derive(Debug, Clone, Copy)]
pub struct PeerAddr(pub Option<SocketAddr>);

impl<S: Send + Sync> FromRequestParts<S> for PeerAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
        ))
    }
}

/// Resolves the visitor's address.
///
/// With `behind_proxy`, the first entry of `X-Forwarded-For` wins, then
/// `X-Real-IP`. Entries that do not parse as an IP address are skipped.
/// Falls back to the peer address, then to [`FALLBACK_IP`].
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) = forwarded_for(headers).or_else(|| real_ip(headers))
    {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| FALLBACK_IP.to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .and_then(|first| first.trim().parse().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("10.1.2.3:54321".parse().unwrap())
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_first_entry_when_behind_proxy() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(resolve_client_ip(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_used_when_forwarded_for_missing() {
        let headers = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(resolve_client_ip(&headers, peer(), true), "198.51.100.4");
    }

    #[test]
    fn test_forwarded_for_takes_priority_over_real_ip() {
        let headers = headers(&[
            ("x-forwarded-for", "203.0.113.7"),
            ("x-real-ip", "198.51.100.4"),
        ]);
        assert_eq!(resolve_client_ip(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_headers_ignored_without_proxy() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7")]);
        assert_eq!(resolve_client_ip(&headers, peer(), false), "10.1.2.3");
    }

    #[test]
    fn test_garbage_header_falls_back_to_peer() {
        let headers = headers(&[("x-forwarded-for", "not-an-ip")]);
        assert_eq!(resolve_client_ip(&headers, peer(), true), "10.1.2.3");
    }

    #[test]
    fn test_ipv6_forwarded_for() {
        let headers = headers(&[("x-forwarded-for", "2001:db8::1")]);
        assert_eq!(resolve_client_ip(&headers, peer(), true), "2001:db8::1");
    }

    #[test]
    fn test_fallback_without_any_address() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None, true), FALLBACK_IP);
    }
}
