// File: http.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeConfig;
use crate::errors::ProbeError;
use log::{debug, warn};
use reqwest::header::{HOST, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{ClientBuilder, Url};
use std::net::{IpAddr, SocketAddr};
use url::Host;

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Where the connection for a fetch is actually opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialOverride {
    /// Normal DNS resolution of the target host.
    System,
    /// Every connection goes to this address. The port still comes from the
    /// URL, and the Host header and SNI stay those of the target.
    Fixed(IpAddr),
}

/// The URL actually requested and the Host header to force, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub url: Url,
    pub host_header: Option<String>,
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

impl DialOverride {
    /// A hostname target keeps its URL and is pinned through the resolver.
    /// An IP-literal target never reaches the resolver, so its host is
    /// swapped for the candidate and the original authority goes into the
    /// Host header.
    pub fn route(&self, url: &Url) -> Route {
        match (self, url.host()) {
            (DialOverride::Fixed(ip), Some(Host::Ipv4(_) | Host::Ipv6(_))) => {
                let mut pinned = url.clone();
                // Only fails for URLs without a host, which this arm excludes.
                let _ = pinned.set_ip_host(*ip);
                Route {
                    url: pinned,
                    host_header: Some(authority(url)),
                }
            }
            _ => Route {
                url: url.clone(),
                host_header: None,
            },
        }
    }

    /// Redirects are followed like a browser would, except that a pinned
    /// fetch stops at the first hop that would leave the candidate.
    fn redirect_policy(&self, url: &Url) -> Policy {
        match self {
            DialOverride::System => Policy::limited(MAX_REDIRECTS),
            DialOverride::Fixed(_) => {
                let pinned = self.route(url).url.host_str().map(str::to_string);
                Policy::custom(move |attempt| {
                    if attempt.previous().len() > MAX_REDIRECTS {
                        attempt.error("too many redirects")
                    } else if attempt.url().host_str() == pinned.as_deref() {
                        attempt.follow()
                    } else {
                        attempt.stop()
                    }
                })
            }
        }
    }

    pub fn apply(&self, builder: ClientBuilder, url: &Url) -> ClientBuilder {
        let builder = builder.redirect(self.redirect_policy(url));
        match (self, url.host()) {
            // reqwest ignores the port of an override and dials the URL's
            // port, so 0 is a placeholder here.
            (DialOverride::Fixed(ip), Some(Host::Domain(domain))) => {
                builder.resolve_to_addrs(domain, &[SocketAddr::new(*ip, 0)])
            }
            _ => builder,
        }
    }
}

/// Reference body prefix captured once through normal routing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    body: Vec<u8>,
}

impl Baseline {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

fn build_client(config: &ProbeConfig, dial: &DialOverride, url: &Url) -> Result<reqwest::Client, ProbeError> {
    let builder = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .pool_max_idle_per_host(0)
        .connect_timeout(config.timeout())
        .timeout(config.timeout());

    dial.apply(builder, url).build().map_err(ProbeError::Client)
}

/// Performs one GET against the configured target and returns at most
/// `match_bytes` bytes of the body. The status code is not inspected.
pub async fn fetch_prefix(config: &ProbeConfig, dial: &DialOverride) -> Result<Vec<u8>, ProbeError> {
    let url = Url::parse(config.target()).map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", config.target(), e)))?;
    let client = build_client(config, dial, &url)?;
    let route = dial.route(&url);

    let mut request = client.get(route.url).header(USER_AGENT, config.user_agent());
    if let Some(host) = route.host_header {
        request = request.header(HOST, host);
    }
    let mut response = request.send().await?;
    debug!("{} answered {} via {:?}", config.target(), response.status(), dial);

    let limit = config.match_bytes();
    let mut body = Vec::with_capacity(limit.min(64 * 1024));
    while body.len() < limit {
        match response.chunk().await? {
            Some(chunk) => {
                let take = (limit - body.len()).min(chunk.len());
                body.extend_from_slice(&chunk[..take]);
            }
            None => break,
        }
    }
    Ok(body)
}

/// Fetches the baseline through normal routing. A failed fetch yields an
/// empty baseline, which makes every candidate an insufficient miss.
pub async fn fetch_baseline(config: &ProbeConfig) -> Baseline {
    match fetch_prefix(config, &DialOverride::System).await {
        Ok(body) => Baseline::new(body),
        Err(e) => {
            warn!("Baseline fetch of {} failed: {}", config.target(), e);
            Baseline::default()
        }
    }
}

/// Fetches the target with the connection pinned to `candidate`. Failures
/// are narrated here and returned so the caller can score them as empty.
pub async fn probe(config: &ProbeConfig, candidate: IpAddr) -> Result<Vec<u8>, ProbeError> {
    fetch_prefix(config, &DialOverride::Fixed(candidate))
        .await
        .inspect_err(|e| warn!("{} via {}: {}", config.target(), candidate, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_baseline_accessors() {
        let baseline = Baseline::new(b"hello".to_vec());
        assert_eq!(baseline.body(), b"hello");
        assert_eq!(baseline.len(), 5);
        assert!(!baseline.is_empty());
        assert!(Baseline::default().is_empty());
    }

    #[test]
    fn test_fixed_override_builds_for_ipv6() {
        let url = Url::parse("https://example.org/").unwrap();
        let dial = DialOverride::Fixed(IpAddr::V6(Ipv6Addr::LOCALHOST));
        let client = dial.apply(reqwest::Client::builder(), &url).build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_hostname_route_is_unchanged() {
        let url = Url::parse("https://shop.example.com:8443/index.html").unwrap();
        let route = DialOverride::Fixed(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7))).route(&url);
        assert_eq!(route.url, url);
        assert_eq!(route.host_header, None);
    }

    #[test]
    fn test_ip_literal_route_swaps_host() {
        let url = Url::parse("http://203.0.113.9:8080/path?q=1").unwrap();
        let route = DialOverride::Fixed(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7))).route(&url);
        assert_eq!(route.url.as_str(), "http://192.0.2.7:8080/path?q=1");
        assert_eq!(route.host_header.as_deref(), Some("203.0.113.9:8080"));
    }

    #[test]
    fn test_ip_literal_route_default_port_and_ipv6() {
        let url = Url::parse("https://[2001:db8::9]/").unwrap();
        let route = DialOverride::Fixed(IpAddr::V6(Ipv6Addr::LOCALHOST)).route(&url);
        assert_eq!(route.url.as_str(), "https://[::1]/");
        assert_eq!(route.host_header.as_deref(), Some("[2001:db8::9]"));
    }

    #[test]
    fn test_system_route_is_unchanged() {
        let url = Url::parse("http://203.0.113.9/").unwrap();
        let route = DialOverride::System.route(&url);
        assert_eq!(route.url, url);
        assert_eq!(route.host_header, None);
    }

    #[tokio::test]
    async fn test_invalid_target_is_typed_error() {
        let mut config = ProbeConfig::new();
        config.set_target("not a url");
        let result = fetch_prefix(&config, &DialOverride::System).await;
        assert!(matches!(result, Err(ProbeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_failed_baseline_is_empty() {
        let mut config = ProbeConfig::new();
        config.set_target("::not-a-url::");
        let baseline = fetch_baseline(&config).await;
        assert!(baseline.is_empty());
    }
}
