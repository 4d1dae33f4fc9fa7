// github-backup: GitHub account backup tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `link` response header parsing.
//!
//! ```text
//! <https://api.github.com/user/repos?page=2>; rel="next", <...page=5>; rel="last"
//!  \_________________ url ________________/   \__ rel __/
//! ```
//!
//! Entries may come in any order with any whitespace. The URL is returned
//! exactly as the server sent it.

/// One `<url>; rel="..."` entry of a `link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub rels: Vec<String>,
}

impl Link {
    /// Whether this entry carries `relation` (ASCII case-insensitive).
    #[must_use]
    pub fn has_rel(&self, relation: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(relation))
    }
}

/// Parses every entry of a `link` header.
///
/// Entries without a `<...>` target are skipped.
#[must_use]
pub fn parse_links(header: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let url = after[..end].trim();
        let tail = &after[end + 1..];
        // Parameters run up to the next entry's target
        let params_end = tail.find('<').unwrap_or(tail.len());

        links.push(Link {
            url: url.to_string(),
            rels: parse_rels(&tail[..params_end]),
        });
        rest = &tail[params_end..];
    }

    links
}

/// URL of the `rel="next"` entry, if any.
#[must_use]
pub fn next_link(header: &str) -> Option<String> {
    parse_links(header)
        .into_iter()
        .find(|link| link.has_rel("next"))
        .map(|link| link.url)
}

fn parse_rels(params: &str) -> Vec<String> {
    params
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim().eq_ignore_ascii_case("rel").then(|| {
                value
                    .trim()
                    .trim_end_matches(',')
                    .trim()
                    .trim_matches('"')
                    .to_string()
            })
        })
        .flat_map(|value| {
            value
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
