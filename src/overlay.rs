//! Environment overlay for public runtime keys
//!
//! Applied at process startup, not at merge time: the same EffectiveConfig
//! is reusable across environments, and the overlay returns a derived view
//! instead of mutating it. Private defaults are never touched.
//!
//! Each public key maps to one environment variable: the `LAMINA_PUBLIC_`
//! prefix plus the key path with camelCase split into words, joined with
//! `_` and uppercased. `mapboxToken` reads `LAMINA_PUBLIC_MAPBOX_TOKEN`;
//! nested `api.baseUrl` reads `LAMINA_PUBLIC_API_BASE_URL`. Variables
//! matching the prefix but no known key are ignored.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::effective::EffectiveConfig;

/// Prefix for public runtime override variables
pub const ENV_PREFIX: &str = "LAMINA_PUBLIC_";

/// Derive the public runtime view with environment overrides applied
///
/// `lookup` is the environment capability (injected so the overlay stays
/// pure); pass `|name| std::env::var(name).ok()` for the real process
/// environment. Missing variables leave the underlying default untouched.
pub fn overlay_public<F>(config: &EffectiveConfig, lookup: F) -> BTreeMap<String, JsonValue>
where
    F: Fn(&str) -> Option<String>,
{
    let mut view = BTreeMap::new();
    for (key, default) in config.runtime_public() {
        view.insert(key.clone(), overlay_value(&[key.as_str()], default, &lookup));
    }
    view
}

/// Overlay one value: recurse into mappings, override at leaves
fn overlay_value<F>(path: &[&str], default: &JsonValue, lookup: &F) -> JsonValue
where
    F: Fn(&str) -> Option<String>,
{
    if let JsonValue::Object(map) = default {
        let mut out = serde_json::Map::new();
        for (key, value) in map {
            let mut child_path = path.to_vec();
            child_path.push(key.as_str());
            out.insert(key.clone(), overlay_value(&child_path, value, lookup));
        }
        return JsonValue::Object(out);
    }

    match lookup(&env_var_name(path)) {
        Some(raw) => coerce(default, &raw),
        None => default.clone(),
    }
}

/// Environment variable name for a public key path
pub fn env_var_name(path: &[&str]) -> String {
    let joined = path
        .iter()
        .map(|segment| split_words(segment))
        .collect::<Vec<_>>()
        .join("_");
    format!("{ENV_PREFIX}{joined}")
}

/// Split a camelCase/kebab-case segment into `_`-joined uppercase words
fn split_words(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    let mut prev_lower = false;
    for ch in segment.chars() {
        if ch == '-' || ch == '.' {
            out.push('_');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        out.extend(ch.to_uppercase());
    }
    out
}

/// Coerce a raw environment string to the default's scalar type
///
/// Falls back to the raw string when the value does not parse.
fn coerce(default: &JsonValue, raw: &str) -> JsonValue {
    match default {
        JsonValue::Bool(_) => match raw {
            "true" | "1" => JsonValue::Bool(true),
            "false" | "0" => JsonValue::Bool(false),
            _ => JsonValue::String(raw.to_string()),
        },
        JsonValue::Number(_) => raw
            .parse::<i64>()
            .map(JsonValue::from)
            .or_else(|_| raw.parse::<f64>().map(JsonValue::from))
            .unwrap_or_else(|_| JsonValue::String(raw.to_string())),
        _ => JsonValue::String(raw.to_string()),
    }
}
