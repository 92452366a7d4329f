//! Guards against server-side request forgery.
//!
//! Product URLs come straight from users, so every URL the scraper touches
//! (the submitted link, each redirect hop, and the final page) must point at
//! a public web host.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv6Addr};

use ipnet::IpNet;
use url::{Host, Url};

use crate::error::{SecurityError, SecurityResult};

/// Networks a product page can never live on.
const INTERNAL_NETWORKS: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10", // carrier-grade NAT
    "127.0.0.0/8",
    "169.254.0.0/16", // link-local, cloud metadata
    "172.16.0.0/12",
    "192.168.0.0/16",
    "::/128",
    "::1/128",
    "fc00::/7",
    "fe80::/10",
];

/// Hostnames that name internal services rather than shops.
const INTERNAL_HOSTS: &[&str] = &[
    "localhost",
    "metadata.google.internal",
    "metadata.gke.internal",
    "instance-data",
];

/// Any host under these suffixes is internal.
const INTERNAL_SUFFIXES: &[&str] = &[".localhost", ".internal", ".local"];

/// Decides whether a scraped URL may be fetched.
///
/// IP literals, including IPv4 addresses embedded in IPv6 forms such as
/// `::ffff:127.0.0.1`, are checked against [`INTERNAL_NETWORKS`]. Hostnames are
/// checked by name, and [`validate_with_dns`](Self::validate_with_dns) also
/// checks every address they resolve to.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    schemes: HashSet<String>,
    denied_hosts: HashSet<String>,
    denied_networks: Vec<IpNet>,
    /// Exact host names that skip the host and network checks
    trusted_hosts: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// http(s) only, no internal hosts or networks.
    pub fn new() -> Self {
        Self {
            schemes: ["http", "https"].into_iter().map(String::from).collect(),
            denied_hosts: INTERNAL_HOSTS.iter().map(|h| h.to_string()).collect(),
            denied_networks: INTERNAL_NETWORKS
                .iter()
                .filter_map(|net| net.parse().ok())
                .collect(),
            trusted_hosts: HashSet::new(),
        }
    }

    /// Scheme check only. For local development against fixture servers.
    pub fn permissive() -> Self {
        Self {
            denied_hosts: HashSet::new(),
            denied_networks: Vec::new(),
            ..Self::new()
        }
    }

    /// Trust `host` regardless of the other rules.
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.trusted_hosts.insert(host.into());
        self
    }

    /// Deny an additional host name.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.denied_hosts.insert(host.into().to_ascii_lowercase());
        self
    }

    /// Check a URL without touching the network.
    pub fn validate(&self, url: &str) -> SecurityResult<()> {
        let parsed = Url::parse(url)?;

        if !self.schemes.contains(parsed.scheme()) {
            return Err(SecurityError::DisallowedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host().ok_or(SecurityError::NoHost)?;
        let host_str = parsed.host_str().unwrap_or_default();
        if self.trusted_hosts.contains(host_str) {
            return Ok(());
        }

        match host {
            Host::Ipv4(ip) => self.check_ip(IpAddr::V4(ip)),
            Host::Ipv6(ip) => self.check_ip(IpAddr::V6(ip)),
            Host::Domain(name) => self.check_name(name),
        }
    }

    /// Check a URL, then resolve its host and check every address.
    ///
    /// Catches public names that point at internal addresses.
    pub async fn validate_with_dns(&self, url: &str) -> SecurityResult<()> {
        self.validate(url)?;

        let parsed = Url::parse(url)?;
        let Some(Host::Domain(name)) = parsed.host() else {
            // IP literals were fully checked above
            return Ok(());
        };
        if self.trusted_hosts.contains(name) || self.denied_networks.is_empty() {
            return Ok(());
        }

        let port = parsed.port_or_known_default().unwrap_or(80);
        let addrs = tokio::net::lookup_host((name, port))
            .await
            .map_err(|e| SecurityError::DnsResolution(format!("{}: {}", name, e)))?;

        for addr in addrs {
            self.check_ip(addr.ip()).map_err(|_| {
                SecurityError::BlockedCidr(format!("{} resolves to {}", name, addr.ip()))
            })?;
        }

        Ok(())
    }

    fn check_name(&self, name: &str) -> SecurityResult<()> {
        let name = name.trim_end_matches('.').to_ascii_lowercase();

        let internal_suffix =
            !self.denied_networks.is_empty() && INTERNAL_SUFFIXES.iter().any(|s| name.ends_with(s));
        if self.denied_hosts.contains(&name) || internal_suffix {
            return Err(SecurityError::BlockedHost(name));
        }
        Ok(())
    }

    fn check_ip(&self, ip: IpAddr) -> SecurityResult<()> {
        let ip = canonical_ip(ip);
        if self.denied_networks.iter().any(|net| net.contains(&ip)) {
            return Err(SecurityError::BlockedCidr(ip.to_string()));
        }
        Ok(())
    }
}

/// Unwrap IPv4 addresses carried in IPv6 form (`::ffff:a.b.c.d` and the
/// deprecated `::a.b.c.d`) so they meet the IPv4 rules.
fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped().or_else(|| compat_ipv4(v6)) {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

/// `::a.b.c.d`, excluding `::` and `::1`, which have their own meaning.
fn compat_ipv4(v6: Ipv6Addr) -> Option<std::net::Ipv4Addr> {
    if v6.is_unspecified() || v6.is_loopback() {
        return None;
    }
    v6.to_ipv4().filter(|_| v6.segments()[..6].iter().all(|s| *s == 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(url: &str) -> bool {
        UrlValidator::new().validate(url).is_err()
    }

    #[test]
    fn shop_pages_are_allowed() {
        for url in [
            "https://smartstore.naver.com/sori/products/4821",
            "https://www.musinsa.com/app/goods/1234567",
            "https://ohou.se/productions/998877/selling",
            "http://93.184.216.34/item",
        ] {
            assert!(!blocked(url), "{} should be allowed", url);
        }
    }

    #[test]
    fn loopback_and_unspecified_are_blocked() {
        assert!(blocked("http://localhost:8080/api/list"));
        assert!(blocked("http://LOCALHOST./"));
        assert!(blocked("http://admin.localhost/"));
        assert!(blocked("http://127.0.0.1/"));
        assert!(blocked("http://127.1.2.3:5432/"));
        assert!(blocked("http://0.0.0.0:8080/"));
        assert!(blocked("http://[::1]/"));
        assert!(blocked("http://[::]/"));
    }

    #[test]
    fn ipv4_hidden_in_ipv6_is_blocked() {
        assert!(blocked("http://[::ffff:127.0.0.1]/"));
        assert!(blocked("http://[::ffff:169.254.169.254]/latest/meta-data/"));
        assert!(blocked("http://[::ffff:10.0.0.1]/"));
        assert!(blocked("http://[::ffff:192.168.0.10]/"));
        assert!(blocked("http://[::127.0.0.1]/"));
        assert!(!blocked("http://[::ffff:93.184.216.34]/"));
    }

    #[test]
    fn private_and_metadata_targets_are_blocked() {
        assert!(blocked("http://10.20.30.40/"));
        assert!(blocked("http://172.31.255.255/"));
        assert!(blocked("http://192.168.1.1/router"));
        assert!(blocked("http://100.64.0.1/"));
        assert!(blocked("http://169.254.169.254/latest/meta-data/"));
        assert!(blocked("http://metadata.google.internal/computeMetadata/v1/"));
        assert!(blocked("http://printer.local/"));
        assert!(blocked("http://[fd00::1]/"));
        assert!(blocked("http://[fe80::1]/"));
    }

    #[test]
    fn only_web_schemes_are_fetched() {
        assert!(blocked("file:///etc/passwd"));
        assert!(blocked("gopher://shop.test/"));
        assert!(blocked("ftp://shop.test/catalog.csv"));
        assert!(matches!(
            UrlValidator::new().validate("javascript:alert(1)"),
            Err(SecurityError::DisallowedScheme(_))
        ));
    }

    #[test]
    fn trusted_and_extra_denied_hosts() {
        let validator = UrlValidator::new()
            .allow_host("127.0.0.1")
            .block_host("Tracker.Shop.test");

        assert!(validator.validate("http://127.0.0.1:3000/fixture").is_ok());
        assert!(validator.validate("http://tracker.shop.test/").is_err());
        assert!(validator.validate("http://shop.test/").is_ok());
    }

    #[test]
    fn permissive_keeps_the_scheme_rule() {
        let validator = UrlValidator::permissive();
        assert!(validator.validate("http://127.0.0.1:3000/").is_ok());
        assert!(validator.validate("http://dev.local/").is_ok());
        assert!(validator.validate("file:///etc/passwd").is_err());
    }

    #[tokio::test]
    async fn dns_check_skips_ip_literals() {
        let validator = UrlValidator::new();
        assert!(validator.validate_with_dns("http://93.184.216.34/").await.is_ok());
        assert!(validator
            .validate_with_dns("http://[::ffff:127.0.0.1]/")
            .await
            .is_err());
    }
}
