// src/cluster/naming.rs
//! Display names for clusters.

use super::tokens::unique_keywords;
use crate::domain::main_domain;
use crate::types::Finding;
use std::collections::HashMap;

/// Curated main-domain to service-name table.
const SERVICE_NAMES: &[(&str, &str)] = &[
    ("amazon.com", "Amazon"),
    ("amazon.cn", "Amazon CN"),
    ("google.com", "Google"),
    ("apple.com", "Apple"),
    ("microsoft.com", "Microsoft"),
    ("github.com", "GitHub"),
    ("gitlab.com", "GitLab"),
    ("aliyun.com", "Aliyun"),
    ("alibabacloud.com", "Alibaba Cloud"),
    ("tencent.com", "Tencent"),
    ("qq.com", "QQ/WeChat"),
    ("163.com", "NetEase"),
    ("126.com", "NetEase"),
    ("baidu.com", "Baidu"),
    ("weibo.com", "Weibo"),
    ("twitter.com", "Twitter"),
    ("x.com", "X/Twitter"),
    ("facebook.com", "Facebook"),
    ("instagram.com", "Instagram"),
    ("linkedin.com", "LinkedIn"),
    ("sony.com", "Sony"),
    ("sonyentertainmentnetwork.com", "Sony PlayStation"),
    ("playstation.com", "Sony PlayStation"),
    ("steampowered.com", "Steam"),
    ("steamcommunity.com", "Steam"),
    ("epicgames.com", "Epic Games"),
    ("adobe.com", "Adobe"),
    ("cloudflare.com", "Cloudflare"),
    ("digitalocean.com", "DigitalOcean"),
    ("vultr.com", "Vultr"),
    ("linode.com", "Linode"),
    ("paypal.com", "PayPal"),
    ("stripe.com", "Stripe"),
    ("jetbrains.com", "JetBrains"),
    ("stackoverflow.com", "Stack Overflow"),
    ("reddit.com", "Reddit"),
    ("discord.com", "Discord"),
    ("slack.com", "Slack"),
    ("zoom.us", "Zoom"),
    ("dropbox.com", "Dropbox"),
    ("box.com", "Box"),
    ("notion.so", "Notion"),
    ("spotify.com", "Spotify"),
    ("netflix.com", "Netflix"),
    ("twitch.tv", "Twitch"),
    ("youtube.com", "YouTube"),
];

/// A keyword must appear in at least this share of titles to name a cluster.
const KEYWORD_MIN_SHARE: f64 = 0.4;
const KEYWORD_MIN_COUNT: usize = 2;
/// The runner-up keyword joins the name when it scores at least this fraction of the top one.
const RUNNER_UP_RATIO: f64 = 0.7;

/// Names a cluster whose members are given in input order.
#[must_use]
pub fn cluster_name(members: &[&Finding]) -> String {
    match members {
        [] => "Empty Group".to_string(),
        [only] => single_name(only),
        [first, ..] => {
            if let Some(domain) = common_domain(members) {
                return service_name(&domain);
            }
            keyword_name(members)
                .unwrap_or_else(|| format!("{} & Others", shorten_title(&first.title)))
        }
    }
}

fn single_name(finding: &Finding) -> String {
    let short = shorten_title(&finding.title);
    if !short.is_empty() {
        short
    } else if !finding.domain.is_empty() {
        finding.domain.clone()
    } else {
        "Untitled".to_string()
    }
}

/// The main domain shared by at least two thirds of `members`, if any.
fn common_domain(members: &[&Finding]) -> Option<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for finding in members {
        let domain = main_domain(&finding.domain);
        if domain.is_empty() {
            continue;
        }
        let count = counts.entry(domain.clone()).or_default();
        if *count == 0 {
            order.push(domain);
        }
        *count += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for domain in order {
        let count = counts.get(&domain).copied().unwrap_or(0);
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((domain, count));
        }
    }

    best.filter(|(_, count)| count * 3 >= members.len() * 2)
        .map(|(domain, _)| domain)
}

/// "GitHub Services" from the table, else the capitalized first label.
#[must_use]
pub fn service_name(domain: &str) -> String {
    if let Some((_, name)) = SERVICE_NAMES.iter().find(|(d, _)| *d == domain) {
        return format!("{name} Services");
    }

    match domain.split('.').next() {
        Some(label) if !label.is_empty() => format!("{} Services", title_case(label)),
        _ => "Related Services".to_string(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn keyword_name(members: &[&Finding]) -> Option<String> {
    let mut candidates: Vec<(String, usize)> = Vec::new();
    for finding in members {
        for word in unique_keywords(&finding.title) {
            match candidates.iter_mut().find(|(w, _)| *w == word) {
                Some((_, df)) => *df += 1,
                None => candidates.push((word, 1)),
            }
        }
    }

    let total = members.len() as f64;
    let mut scored: Vec<(String, f64)> = candidates
        .into_iter()
        .filter(|(_, df)| *df >= KEYWORD_MIN_COUNT && *df as f64 / total >= KEYWORD_MIN_SHARE)
        .map(|(word, df)| {
            let relative = df as f64 / total;
            (word, df as f64 * relative)
        })
        .collect();

    // Stable: equal scores keep first-appearance order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (top, top_score) = scored.first()?;
    match scored.get(1) {
        Some((second, score)) if *score >= top_score * RUNNER_UP_RATIO => Some(format!(
            "{} & {} Services",
            title_case(top),
            title_case(second)
        )),
        _ => Some(format!("{} Services", title_case(top))),
    }
}

/// Keeps the first two whitespace-separated words.
#[must_use]
pub fn shorten_title(title: &str) -> String {
    title.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
