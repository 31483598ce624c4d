use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Cursor;
use storeguard_domain::model::{
    Dependency, DependencyManifest, EntitlementValue, Entitlements, ServiceConfig,
};
use storeguard_types::{Location, RepoPath};

/// Parse `GoogleService-Info.plist` (XML or binary). Only string entries are kept.
pub fn parse_service_config(path: &RepoPath, bytes: &[u8]) -> anyhow::Result<ServiceConfig> {
    let dict = read_plist_dictionary(bytes).context("parse service config plist")?;
    let values = dict
        .iter()
        .filter_map(|(k, v)| v.as_string().map(|s| (k.clone(), s.to_string())))
        .collect();

    Ok(ServiceConfig {
        path: path.clone(),
        values,
    })
}

/// Parse an `.entitlements` plist (XML or binary).
pub fn parse_entitlements(path: &RepoPath, bytes: &[u8]) -> anyhow::Result<Entitlements> {
    let dict = read_plist_dictionary(bytes).context("parse entitlements plist")?;
    let entries = dict
        .iter()
        .map(|(k, v)| (k.clone(), entitlement_value(v)))
        .collect();

    Ok(Entitlements {
        path: path.clone(),
        entries,
    })
}

fn read_plist_dictionary(bytes: &[u8]) -> anyhow::Result<plist::Dictionary> {
    let value = plist::Value::from_reader(Cursor::new(bytes))?;
    value
        .into_dictionary()
        .context("plist root is not a dictionary")
}

fn entitlement_value(value: &plist::Value) -> EntitlementValue {
    match value {
        plist::Value::Boolean(b) => EntitlementValue::Boolean(*b),
        plist::Value::String(s) => EntitlementValue::String(s.clone()),
        plist::Value::Integer(i) => i
            .as_signed()
            .map(EntitlementValue::Integer)
            .unwrap_or(EntitlementValue::Other),
        plist::Value::Array(items) => {
            EntitlementValue::Array(items.iter().map(entitlement_value).collect())
        }
        plist::Value::Dictionary(dict) => EntitlementValue::Dictionary(
            dict.iter()
                .map(|(k, v)| (k.clone(), entitlement_value(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        _ => EntitlementValue::Other,
    }
}

/// Scan a CocoaPods `Podfile` for `pod` declarations.
///
/// The Podfile is Ruby; this only understands the declarative subset:
/// `pod 'Name'`, `pod "Name", '~> 1.0'`, `pod('Name')`, with trailing `#` comments
/// and `=begin`/`=end` blocks skipped. `:subspecs => ['A', 'B']` (or `subspecs: [...]`)
/// declares `Name/A` and `Name/B` instead of `Name`, as CocoaPods expands it.
/// Declarations are returned in file order, across all targets.
pub fn parse_podfile(path: &RepoPath, text: &str) -> DependencyManifest {
    let mut dependencies = Vec::new();
    let mut in_block_comment = false;

    for (idx, raw) in text.lines().enumerate() {
        // Ruby only recognizes block comment markers at the start of a line.
        if in_block_comment {
            in_block_comment = !is_block_marker(raw, "=end");
            continue;
        }
        if is_block_marker(raw, "=begin") {
            in_block_comment = true;
            continue;
        }

        let code = strip_comment(raw);
        let trimmed = code.trim_start();
        let Some(rest) = trimmed.strip_prefix("pod") else {
            continue;
        };
        // `pod` must be followed by a separator (`pods_for_app`, `podspec` are not pods).
        let Some(args) = rest.strip_prefix(|c: char| c == ' ' || c == '\t' || c == '(') else {
            continue;
        };

        let (positional, options) = quoted_list(args);
        let Some(name) = positional.first().filter(|n| !n.is_empty()) else {
            continue;
        };

        let names = match subspecs(options) {
            Some(subs) if !subs.is_empty() => subs
                .iter()
                .map(|sub| format!("{name}/{sub}"))
                .collect::<Vec<_>>(),
            _ => vec![name.to_string()],
        };

        let col = (raw.len() - raw.trim_start().len()) as u32 + 1;
        let requirement = positional.get(1).map(|r| r.to_string());
        for name in names {
            dependencies.push(Dependency {
                name,
                requirement: requirement.clone(),
                location: Some(Location {
                    path: path.clone(),
                    line: Some(idx as u32 + 1),
                    col: Some(col),
                }),
            });
        }
    }

    DependencyManifest {
        path: path.clone(),
        dependencies,
    }
}

fn is_block_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// The string list of a `:subspecs => [...]` or `subspecs: [...]` option, if present.
fn subspecs(options: &str) -> Option<Vec<&str>> {
    const KEY: &str = "subspecs";

    options.match_indices(KEY).find_map(|(at, _)| {
        let before = options[..at].chars().next_back();
        let after = &options[at + KEY.len()..];
        let value = if before == Some(':') {
            after.trim_start().strip_prefix("=>")?
        } else if before.is_none_or(|c| c == ' ' || c == ',') {
            after.strip_prefix(':')?
        } else {
            return None;
        };
        let list = value.trim_start().strip_prefix('[')?;
        let (items, rest) = quoted_list(list);
        rest.starts_with(']').then_some(items)
    })
}

/// Everything before a `#` that is not inside a string literal.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '#') => return &line[..i],
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    line
}

/// Leading comma-separated string literals and the unparsed remainder:
/// `'a', "b", :git => 'c'` yields `([a, b], ":git => 'c'")`.
fn quoted_list(s: &str) -> (Vec<&str>, &str) {
    let mut out = Vec::new();
    let mut rest = s.trim_start();

    while let Some(quote) = rest.chars().next().filter(|c| *c == '\'' || *c == '"') {
        let body = &rest[quote.len_utf8()..];
        let Some(end) = body.find(quote) else {
            break;
        };
        out.push(&body[..end]);
        rest = body[end + quote.len_utf8()..].trim_start();
        match rest.strip_prefix(',') {
            Some(r) => rest = r.trim_start(),
            None => break,
        }
    }

    (out, rest)
}
