// src/domain.rs
//! Resolution of credential URLs to registrable domains.
//!
//! Two notions of "the site" live here:
//! - [`KnownDomainSet::resolve`] maps a raw URL to the hosted zone used for
//!   reference lookups, preferring domains that appear in the reference data.
//! - [`main_domain`] collapses an already-resolved domain to the level used
//!   when grouping findings for display.

use crate::reference::{PasskeySite, TwoFaDatabase};
use std::collections::HashSet;
use url::{Host, Url};

/// Bucket key for findings without a usable domain.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Generic subdomain prefixes that never identify a separate service.
const GENERIC_PREFIXES: &[&str] = &["www.", "accounts.", "login.", "auth.", "api.", "admin."];

/// Two-label public suffixes under which the registrable domain has three labels.
const COMPOUND_SUFFIXES: &[&str] = &["co.uk", "com.cn", "com.au", "co.jp"];

/// Lowercase registrable domains compiled from the reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDomainSet {
    domains: HashSet<String>,
}

impl KnownDomainSet {
    /// Builds the set from every 2FA-capable site and every approved, visible passkey site.
    #[must_use]
    pub fn from_reference(twofa: Option<&TwoFaDatabase>, passkey: Option<&[PasskeySite]>) -> Self {
        let twofa_domains = twofa
            .into_iter()
            .flat_map(|db| db.sites.iter())
            .filter(|site| site.supports_2fa)
            .map(|site| site.domain.as_str());

        let passkey_domains = passkey
            .into_iter()
            .flatten()
            .filter(|site| site.is_listed())
            .map(|site| site.domain.as_str());

        let set = Self::from_domains(twofa_domains.chain(passkey_domains));
        tracing::debug!(domains = set.len(), "built known domain set");
        set
    }

    /// Builds the set from arbitrary domain strings, normalized with [`normalize_domain`].
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| normalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    /// Exact membership test. `domain` must already be normalized.
    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Number of distinct domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Resolves `raw_url` to its hosted zone.
    ///
    /// Never fails: empty input yields an empty string and unparseable input
    /// is returned unchanged, so the result is not always a valid domain.
    /// Internationalized hosts come back in their ASCII (punycode) form.
    #[must_use]
    pub fn resolve(&self, raw_url: &str) -> String {
        if raw_url.is_empty() {
            return String::new();
        }

        let candidate = if has_http_scheme(raw_url) {
            raw_url.to_string()
        } else {
            format!("https://{raw_url}")
        };

        let Ok(parsed) = Url::parse(&candidate) else {
            return raw_url.to_string();
        };

        let Some(host) = parsed.host_str() else {
            return String::new();
        };

        let host = host.trim_end_matches('.').to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        if host.is_empty() {
            return String::new();
        }

        self.hosted_zone(host)
    }

    #[allow(clippy::indexing_slicing)] // Guarded: labels.len() >= 2
    fn hosted_zone(&self, host: &str) -> String {
        if self.contains(host) {
            return host.to_string();
        }

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 {
            return host.to_string();
        }

        // Right-anchored suffixes only: "evil-github.com" never yields "github.com".
        for start in 1..labels.len() - 1 {
            let suffix = labels[start..].join(".");
            if self.contains(&suffix) {
                return suffix;
            }
        }

        labels[labels.len() - 2..].join(".")
    }
}

/// Resolves `raw_url` against `known`. See [`KnownDomainSet::resolve`].
#[must_use]
pub fn resolve(raw_url: &str, known: &KnownDomainSet) -> String {
    known.resolve(raw_url)
}

/// Canonical form used on both sides of a lookup: trimmed, lowercase, no
/// trailing dot, and IDNA-encoded so `bücher.de` matches the host `Url`
/// reports for it (`xn--bcher-kva.de`).
///
/// Strings that are not valid hosts are kept lowercase as written.
#[must_use]
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().trim_end_matches('.').to_lowercase();
    if lower.is_empty() {
        return lower;
    }
    match Host::parse(&lower) {
        Ok(Host::Domain(ascii)) => ascii,
        _ => lower,
    }
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Collapses a resolved domain to the level findings are grouped by.
///
/// Strips generic prefixes (`www.`, `accounts.`, ...), then keeps the last two
/// labels, or the last three under a compound suffix such as `co.uk`.
/// Returns an empty string for empty or placeholder (`-`) input.
#[must_use]
#[allow(clippy::indexing_slicing)] // Guarded: labels.len() >= 3
pub fn main_domain(domain: &str) -> String {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() || domain == "-" {
        return String::new();
    }

    let mut rest = domain.as_str();
    for prefix in GENERIC_PREFIXES {
        rest = rest.strip_prefix(prefix).unwrap_or(rest);
    }

    let labels: Vec<&str> = rest.split('.').collect();
    if labels.len() < 3 {
        return rest.to_string();
    }

    let tail = labels[labels.len() - 2..].join(".");
    if COMPOUND_SUFFIXES.contains(&tail.as_str()) {
        labels[labels.len() - 3..].join(".")
    } else {
        tail
    }
}

/// Like [`main_domain`] but maps empty results to [`UNKNOWN_DOMAIN`].
#[must_use]
pub fn bucket_key(domain: &str) -> String {
    let main = main_domain(domain);
    if main.is_empty() {
        UNKNOWN_DOMAIN.to_string()
    } else {
        main
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> KnownDomainSet {
        KnownDomainSet::from_domains(["github.com", "google.com", "Microsoft.com"])
    }

    #[test]
    fn test_bare_host_gets_scheme() {
        assert_eq!(known().resolve("github.com"), "github.com");
        assert_eq!(known().resolve("www.google.com"), "google.com");
    }

    #[test]
    fn test_uppercase_scheme_is_recognized() {
        assert_eq!(known().resolve("HTTPS://WWW.GitHub.com/login"), "github.com");
    }

    #[test]
    fn test_known_set_is_lowercased() {
        assert_eq!(known().resolve("https://login.microsoft.com"), "microsoft.com");
    }

    #[test]
    fn test_unparseable_passthrough() {
        assert_eq!(known().resolve("https://exa mple.com"), "https://exa mple.com");
    }

    #[test]
    fn test_single_label_host() {
        assert_eq!(known().resolve("localhost:8080"), "localhost");
    }

    #[test]
    fn test_normalize_domain_encodes_idn() {
        assert_eq!(normalize_domain(" Bücher.DE. "), "xn--bcher-kva.de");
        assert_eq!(normalize_domain("GitHub.com"), "github.com");
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn test_main_domain_prefixes_and_compound() {
        assert_eq!(main_domain("accounts.google.com"), "google.com");
        assert_eq!(main_domain("www.bbc.co.uk"), "bbc.co.uk");
        assert_eq!(main_domain("a.b.example.com"), "example.com");
        assert_eq!(main_domain("shop.example.com.cn"), "example.com.cn");
        assert_eq!(main_domain("github.com"), "github.com");
        assert_eq!(main_domain("-"), "");
        assert_eq!(bucket_key(""), UNKNOWN_DOMAIN);
    }
}
