//! Merge engine
//!
//! Folds the ordered fragment list (base first, root last) into one
//! accumulator. This is deliberately not a generic recursive merge: each
//! field has its own named rule.
//!
//! | Field       | Rule                                                  |
//! |-------------|-------------------------------------------------------|
//! | stylesheets | append; dedup keeping the last occurrence's position  |
//! | build       | scalars later-wins; `define` deep-merged key-by-key   |
//! | runtime     | deep-merge per partition; later partition wins a key  |
//! | prebundle   | set union, lexical order                              |

pub mod value;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use crate::fragment::{BuildOptions, ConfigFragment, RuntimeDefaults};

pub use value::merge_value_deep;

/// The in-progress composition accumulator
///
/// Owned exclusively by the fold for the duration of one composition; the
/// emitter consumes it to produce the immutable effective config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedConfig {
    pub stylesheets: Vec<String>,
    pub build: BuildOptions,
    pub runtime: RuntimeDefaults,
    pub prebundle: BTreeSet<String>,
}

/// Fold fragments base-first into one merged configuration
pub fn fold_fragments<'a, I>(fragments: I) -> MergedConfig
where
    I: IntoIterator<Item = &'a ConfigFragment>,
{
    let mut acc = MergedConfig::default();
    for fragment in fragments {
        merge_fragment(&mut acc, fragment);
    }
    acc.stylesheets = dedup_keep_last(std::mem::take(&mut acc.stylesheets));
    acc
}

/// Merge one fragment (the later one) onto the accumulator
fn merge_fragment(acc: &mut MergedConfig, fragment: &ConfigFragment) {
    acc.stylesheets
        .extend(fragment.stylesheets.iter().cloned());

    merge_build_options(&mut acc.build, &fragment.build);
    merge_runtime(&mut acc.runtime, &fragment.runtime);

    acc.prebundle.extend(fragment.prebundle.iter().cloned());
}

/// Later fragment wins per scalar option; `define` merges key-by-key
fn merge_build_options(acc: &mut BuildOptions, new: &BuildOptions) {
    if new.target.is_some() {
        acc.target = new.target.clone();
    }
    if new.sourcemap.is_some() {
        acc.sourcemap = new.sourcemap;
    }
    if new.minify.is_some() {
        acc.minify = new.minify;
    }
    merge_map_deep(&mut acc.define, &new.define);
}

/// Deep-merge each partition; a key declared in the later fragment's
/// partition is dropped from the opposite partition first, so the later
/// fragment decides where the key lives.
fn merge_runtime(acc: &mut RuntimeDefaults, new: &RuntimeDefaults) {
    for key in new.public.keys() {
        acc.private.remove(key);
    }
    for key in new.private.keys() {
        acc.public.remove(key);
    }
    merge_map_deep(&mut acc.public, &new.public);
    merge_map_deep(&mut acc.private, &new.private);
}

/// Deep-merge `new` entries into `acc` key-by-key
fn merge_map_deep(acc: &mut BTreeMap<String, JsonValue>, new: &BTreeMap<String, JsonValue>) {
    for (key, new_value) in new {
        let merged = match acc.remove(key) {
            Some(existing) => merge_value_deep(existing, new_value.clone()),
            None => new_value.clone(),
        };
        acc.insert(key.clone(), merged);
    }
}

/// Remove duplicates keeping the last occurrence's position
fn dedup_keep_last(items: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut kept: Vec<String> = items
        .into_iter()
        .rev()
        .filter(|item| seen.insert(item.clone()))
        .collect();
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment_with_styles(styles: &[&str]) -> ConfigFragment {
        ConfigFragment {
            stylesheets: styles.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_fragment_passes_through() {
        let mut fragment = fragment_with_styles(&["a.css", "b.css"]);
        fragment.prebundle = vec!["zod".to_string()];
        fragment.build.target = Some("esnext".to_string());

        let merged = fold_fragments([&fragment]);
        assert_eq!(merged.stylesheets, vec!["a.css", "b.css"]);
        assert_eq!(merged.build.target.as_deref(), Some("esnext"));
        assert!(merged.prebundle.contains("zod"));
    }

    #[test]
    fn test_stylesheets_append_root_last() {
        let base = fragment_with_styles(&["base.css"]);
        let root = fragment_with_styles(&["app.css"]);
        let merged = fold_fragments([&base, &root]);
        assert_eq!(merged.stylesheets, vec!["base.css", "app.css"]);
    }

    #[test]
    fn test_stylesheets_dedup_keeps_last_position() {
        let base = fragment_with_styles(&["reset.css", "theme.css"]);
        let root = fragment_with_styles(&["app.css", "reset.css"]);
        let merged = fold_fragments([&base, &root]);
        assert_eq!(merged.stylesheets, vec!["theme.css", "app.css", "reset.css"]);
    }

    #[test]
    fn test_build_target_later_wins() {
        let mut base = ConfigFragment::default();
        base.build.target = Some("es2020".to_string());
        let mut root = ConfigFragment::default();
        root.build.target = Some("esnext".to_string());

        let merged = fold_fragments([&base, &root]);
        assert_eq!(merged.build.target.as_deref(), Some("esnext"));
    }

    #[test]
    fn test_build_scalar_unset_keeps_earlier() {
        let mut base = ConfigFragment::default();
        base.build.sourcemap = Some(true);
        base.build.target = Some("es2020".to_string());
        let root = ConfigFragment::default();

        let merged = fold_fragments([&base, &root]);
        assert_eq!(merged.build.sourcemap, Some(true));
        assert_eq!(merged.build.target.as_deref(), Some("es2020"));
    }

    #[test]
    fn test_build_define_deep_merges() {
        let mut base = ConfigFragment::default();
        base.build
            .define
            .insert("flags".to_string(), json!({"a11y": false, "debug": true}));
        let mut root = ConfigFragment::default();
        root.build
            .define
            .insert("flags".to_string(), json!({"a11y": true}));

        let merged = fold_fragments([&base, &root]);
        assert_eq!(
            merged.build.define.get("flags"),
            Some(&json!({"a11y": true, "debug": true}))
        );
    }

    #[test]
    fn test_prebundle_set_union_lexical() {
        let mut a = ConfigFragment::default();
        a.prebundle = vec!["zod".to_string()];
        let mut b = ConfigFragment::default();
        b.prebundle = vec!["zod".to_string(), "klona".to_string()];

        let merged = fold_fragments([&a, &b]);
        let deps: Vec<&str> = merged.prebundle.iter().map(String::as_str).collect();
        assert_eq!(deps, vec!["klona", "zod"]);
    }

    #[test]
    fn test_runtime_deep_merge_within_partition() {
        let mut base = ConfigFragment::default();
        base.runtime
            .public
            .insert("api".to_string(), json!({"baseUrl": "http://a", "timeout": 5}));
        let mut root = ConfigFragment::default();
        root.runtime
            .public
            .insert("api".to_string(), json!({"baseUrl": "http://b"}));

        let merged = fold_fragments([&base, &root]);
        assert_eq!(
            merged.runtime.public.get("api"),
            Some(&json!({"baseUrl": "http://b", "timeout": 5}))
        );
    }

    #[test]
    fn test_runtime_partition_conflict_later_wins() {
        let mut base = ConfigFragment::default();
        base.runtime
            .public
            .insert("apiKey".to_string(), json!("public-default"));
        let mut root = ConfigFragment::default();
        root.runtime
            .private
            .insert("apiKey".to_string(), json!("secret"));

        let merged = fold_fragments([&base, &root]);
        assert!(!merged.runtime.public.contains_key("apiKey"));
        assert_eq!(merged.runtime.private.get("apiKey"), Some(&json!("secret")));
    }

    #[test]
    fn test_runtime_partition_conflict_back_to_public() {
        let mut base = ConfigFragment::default();
        base.runtime.private.insert("flag".to_string(), json!(true));
        let mut root = ConfigFragment::default();
        root.runtime.public.insert("flag".to_string(), json!(false));

        let merged = fold_fragments([&base, &root]);
        assert!(!merged.runtime.private.contains_key("flag"));
        assert_eq!(merged.runtime.public.get("flag"), Some(&json!(false)));
    }

    #[test]
    fn test_fold_is_deterministic() {
        let mut a = ConfigFragment::default();
        a.prebundle = vec!["b".to_string(), "a".to_string()];
        a.stylesheets = vec!["x.css".to_string()];
        let b = fragment_with_styles(&["y.css", "x.css"]);

        let first = fold_fragments([&a, &b]);
        let second = fold_fragments([&a, &b]);
        assert_eq!(first, second);
    }
}
