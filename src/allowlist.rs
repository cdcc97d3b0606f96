//! Allow-list resolution and target filtering.
//!
//! The pure core of ZenSwitch: merging the default allow-list with
//! user-provided additions and exclusions, then filtering the running
//! application names down to the apps that should be closed.
//!
//! App names are compared case-insensitively after trimming whitespace.
//! The original casing of the first occurrence is preserved for display.

use std::collections::HashSet;

/// Apps that must never be closed regardless of user configuration.
///
/// These cover OS-critical processes and the shells users run `zen` from.
/// Injected into [`resolve`] rather than read as a global so tests can
/// substitute their own defaults.
pub const DEFAULT_ALLOWED_APPS: &[&str] = &[
    "Terminal",
    "iTerm2",
    "Finder",
    "Dock",
    "System Settings",
    "Activity Monitor",
];

/// User-configurable allow-list options, merged from the config file and CLI
/// flags before being handed to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// App names added to the allow-list.
    pub allowed_apps: Vec<String>,
    /// App names removed from the allow-list, overriding defaults and
    /// `allowed_apps` alike.
    pub disallowed_apps: Vec<String>,
    /// When true, the built-in default allow-list is omitted entirely and
    /// only `allowed_apps` protect anything.
    pub replace_default_allowed: bool,
}

/// Normalized comparison key for an app name.
fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve the effective allow-list from `defaults` and `options`.
///
/// Order is significant: defaults first (unless replaced), then user
/// additions. Duplicates under case-insensitive comparison are dropped,
/// first occurrence wins. Disallowed names are removed last, so disallowing
/// a default works even though defaults were appended first.
///
/// Total over its input domain; never fails.
pub fn resolve(defaults: &[&str], options: &Options) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut append_unique = |name: &str| {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        if seen.insert(key(trimmed)) {
            result.push(trimmed.to_string());
        }
    };

    if !options.replace_default_allowed {
        for app in defaults {
            append_unique(app);
        }
    }
    for app in &options.allowed_apps {
        append_unique(app);
    }

    if !options.disallowed_apps.is_empty() {
        let blocked: HashSet<String> = options
            .disallowed_apps
            .iter()
            .map(|app| key(app))
            .filter(|k| !k.is_empty())
            .collect();
        result.retain(|app| !blocked.contains(&key(app)));
    }

    result
}

/// Filter `running` down to the apps eligible for closure.
///
/// Emits every running app whose name is absent (case-insensitively) from
/// both `allow_list` and `self_names`, preserving the relative order of
/// `running`. Sorting for deterministic output is the caller's concern.
pub fn filter_targets(running: &[String], allow_list: &[String], self_names: &[String]) -> Vec<String> {
    let allowed: HashSet<String> = allow_list
        .iter()
        .map(|app| key(app))
        .chain(self_names.iter().map(|app| key(app)))
        .collect();

    running
        .iter()
        .filter(|app| !allowed.contains(&key(app)))
        .cloned()
        .collect()
}

/// Merge `incoming` into `base`, trimming entries, dropping blanks, and
/// deduplicating case-insensitively (first occurrence's casing retained).
pub fn merge_app_lists(base: &[String], incoming: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(base.len() + incoming.len());
    let mut seen: HashSet<String> = HashSet::new();

    for app in base.iter().chain(incoming.iter()) {
        let trimmed = app.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(key(trimmed)) {
            result.push(trimmed.to_string());
        }
    }

    result
}

/// Remove every entry of `to_remove` from `base` (case-insensitive, trimmed).
/// The surviving entries come back deduplicated like [`merge_app_lists`].
pub fn remove_from_app_list(base: &[String], to_remove: &[String]) -> Vec<String> {
    let blocked: HashSet<String> = to_remove
        .iter()
        .map(|app| key(app))
        .filter(|k| !k.is_empty())
        .collect();

    merge_app_lists(base, &[])
        .into_iter()
        .filter(|app| !blocked.contains(&key(app)))
        .collect()
}

/// Split a comma-separated app list into trimmed, non-empty names.
pub fn split_app_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
