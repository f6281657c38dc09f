// tests/unit_domain.rs
use unpass_core::domain::{main_domain, resolve, KnownDomainSet};
use unpass_core::reference::{PasskeySite, TwoFaDatabase, TwoFaSite};

fn matcher() -> KnownDomainSet {
    let twofa = TwoFaDatabase {
        sites: ["github.com", "google.com", "microsoft.com", "apple.com"]
            .iter()
            .map(|d| TwoFaSite {
                domain: (*d).to_string(),
                supports_2fa: true,
                ..TwoFaSite::default()
            })
            .collect(),
        ..TwoFaDatabase::default()
    };
    let passkey = vec![PasskeySite {
        domain: "secure.net".to_string(),
        approved: true,
        passkey_signin: true,
        ..PasskeySite::default()
    }];
    KnownDomainSet::from_reference(Some(&twofa), Some(passkey.as_slice()))
}

#[test]
fn test_resolve_table() {
    let m = matcher();
    let cases = [
        ("https://github.com", "github.com"),
        ("github.com", "github.com"),
        ("https://www.github.com", "github.com"),
        ("www.google.com", "google.com"),
        ("https://api.github.com/v3", "github.com"),
        ("https://accounts.google.com/login", "google.com"),
        ("https://unknown.github.com", "github.com"),
        ("https://sub.api.github.com", "github.com"),
        ("https://github.com/user/repo", "github.com"),
        ("https://google.com/search?q=test", "google.com"),
        ("", ""),
        ("not-a-url", "not-a-url"),
        ("https://unknown-domain.example", "unknown-domain.example"),
        ("https://evil-github.com", "evil-github.com"),
        ("https://github-fake.com", "github-fake.com"),
        ("https://example.co.uk", "co.uk"),
        ("https://unknown.secure.net", "secure.net"),
    ];
    for (input, expected) in cases {
        assert_eq!(m.resolve(input), expected, "resolve({input:?})");
    }
}

#[test]
fn test_suffix_match_is_label_exact() {
    let known = KnownDomainSet::from_domains(["github.com"]);
    assert_eq!(resolve("https://evil-github.com", &known), "evil-github.com");
    assert_eq!(resolve("https://api.github.com/v3", &known), "github.com");
    assert_eq!(resolve("https://notgithub.com", &known), "notgithub.com");
}

#[test]
fn test_www_stripping() {
    let known = KnownDomainSet::from_domains(["google.com"]);
    assert_eq!(resolve("https://www.google.com", &known), "google.com");
}

#[test]
fn test_unknown_domain_two_label_fallback() {
    let known = KnownDomainSet::default();
    assert_eq!(resolve("https://example.co.uk", &known), "co.uk");
    assert_eq!(resolve("https://deep.sub.example.org/path", &known), "example.org");
}

#[test]
fn test_most_specific_known_suffix_wins() {
    let known = KnownDomainSet::from_domains(["amazon.com", "aws.amazon.com"]);
    assert_eq!(resolve("https://console.aws.amazon.com", &known), "aws.amazon.com");
    assert_eq!(resolve("https://smile.amazon.com", &known), "amazon.com");
}

#[test]
fn test_hidden_and_unsupported_sites_excluded() {
    let twofa = TwoFaDatabase {
        sites: vec![TwoFaSite {
            domain: "nofa.com".to_string(),
            supports_2fa: false,
            ..TwoFaSite::default()
        }],
        ..TwoFaDatabase::default()
    };
    let passkey = vec![
        PasskeySite {
            domain: "hidden.com".to_string(),
            approved: true,
            hidden: true,
            ..PasskeySite::default()
        },
        PasskeySite {
            domain: "pending.com".to_string(),
            approved: false,
            ..PasskeySite::default()
        },
    ];
    let known = KnownDomainSet::from_reference(Some(&twofa), Some(passkey.as_slice()));
    assert!(known.is_empty());
}

#[test]
fn test_resolve_is_deterministic() {
    let m = matcher();
    for _ in 0..3 {
        assert_eq!(m.resolve("https://a.b.c.github.com"), "github.com");
    }
}

#[test]
fn test_main_domain_for_grouping() {
    assert_eq!(main_domain("login.microsoft.com"), "microsoft.com");
    assert_eq!(main_domain("admin.shop.example.co.jp"), "example.co.jp");
    assert_eq!(main_domain(""), "");
}

#[test]
fn test_unicode_reference_domain_matches() {
    let known = KnownDomainSet::from_domains(["bücher.de"]);
    assert!(known.contains("xn--bcher-kva.de"));
    assert_eq!(resolve("https://www.bücher.de/login", &known), "xn--bcher-kva.de");
    assert_eq!(resolve("shop.BÜCHER.de", &known), "xn--bcher-kva.de");
}
