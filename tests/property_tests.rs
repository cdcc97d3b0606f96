// Property-based tests for the allow-list resolver and target filter.
//
// These verify the resolver's invariants over arbitrary inputs:
// - no case-insensitive duplicates in the resolved list
// - idempotence
// - defaults survive (in order) unless replaced or disallowed
// - filtered targets never overlap the allow-list or self names

use proptest::prelude::*;

use zenswitch::allowlist::{filter_targets, resolve, Options};

fn app_name() -> impl Strategy<Value = String> {
    // Covers mixed casing, inner spaces, and whitespace-only noise.
    "[ A-Za-z2]{0,10}"
}

fn app_list(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(app_name(), 0..max)
}

fn options_strategy() -> impl Strategy<Value = Options> {
    (app_list(8), app_list(4), any::<bool>()).prop_map(
        |(allowed_apps, disallowed_apps, replace_default_allowed)| Options {
            allowed_apps,
            disallowed_apps,
            replace_default_allowed,
        },
    )
}

const DEFAULTS: &[&str] = &["Terminal", "Finder", "Dock"];

proptest! {
    /// Resolved list never contains case-insensitive duplicates or blanks.
    #[test]
    fn resolve_has_no_duplicates_or_blanks(options in options_strategy()) {
        let resolved = resolve(DEFAULTS, &options);

        let mut keys: Vec<String> = resolved.iter().map(|a| a.trim().to_lowercase()).collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        prop_assert_eq!(before, keys.len());

        for app in &resolved {
            prop_assert!(!app.trim().is_empty());
            prop_assert_eq!(app.trim(), app.as_str());
        }
    }

    /// Resolving twice with identical options yields identical output.
    #[test]
    fn resolve_is_idempotent(options in options_strategy()) {
        prop_assert_eq!(resolve(DEFAULTS, &options), resolve(DEFAULTS, &options));
    }

    /// Without replacement, every non-disallowed default survives in order.
    #[test]
    fn resolve_preserves_defaults_in_order(mut options in options_strategy()) {
        options.replace_default_allowed = false;
        let resolved = resolve(DEFAULTS, &options);

        let disallowed: Vec<String> = options
            .disallowed_apps
            .iter()
            .map(|a| a.trim().to_lowercase())
            .collect();
        let expected: Vec<&str> = DEFAULTS
            .iter()
            .copied()
            .filter(|d| !disallowed.contains(&d.to_lowercase()))
            .collect();

        let kept: Vec<&str> = resolved
            .iter()
            .map(String::as_str)
            .filter(|a| DEFAULTS.iter().any(|d| d.eq_ignore_ascii_case(a)))
            .collect();
        prop_assert_eq!(kept, expected);
    }

    /// With replacement, no default appears unless explicitly re-allowed.
    #[test]
    fn resolve_replacement_omits_defaults(mut options in options_strategy()) {
        options.replace_default_allowed = true;
        let resolved = resolve(DEFAULTS, &options);

        for app in &resolved {
            let explicitly_allowed = options
                .allowed_apps
                .iter()
                .any(|a| a.trim().eq_ignore_ascii_case(app));
            prop_assert!(explicitly_allowed);
        }
    }

    /// Targets never include allow-listed apps or the tool's own names.
    #[test]
    fn filter_never_emits_protected_apps(
        running in app_list(12),
        allow_list in app_list(6),
    ) {
        let self_names = vec!["zen".to_string()];
        let targets = filter_targets(&running, &allow_list, &self_names);

        for target in &targets {
            let key = target.trim().to_lowercase();
            prop_assert!(!allow_list.iter().any(|a| a.trim().to_lowercase() == key));
            prop_assert!(key != "zen");
        }
    }

    /// Filtering preserves the relative order of the running list.
    #[test]
    fn filter_preserves_running_order(
        running in app_list(12),
        allow_list in app_list(6),
    ) {
        let targets = filter_targets(&running, &allow_list, &[]);

        let mut cursor = running.iter();
        for target in &targets {
            prop_assert!(cursor.any(|r| r == target));
        }
    }
}
