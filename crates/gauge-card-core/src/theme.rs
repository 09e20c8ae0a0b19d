//! Theme color resolution
//!
//! Dashboard colors may reference theme variables (`var(--warning-color)`).
//! The [`ThemeColorResolver`] turns those references into concrete color
//! strings by looking them up in a [`StyleSource`], and keeps the results in a
//! small TTL cache so that a render pass does not hit the style context once
//! per segment. Entries can be stale for up to one TTL after a theme switch.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Default lifetime of a cached theme color.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default maximum number of cached theme colors.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Nested `var()` fallbacks deeper than this resolve to an empty string.
const MAX_FALLBACK_DEPTH: usize = 8;

fn var_regex() -> &'static Regex {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    VAR_RE.get_or_init(|| {
        Regex::new(r"^\s*var\(\s*(--[A-Za-z0-9_-]+)\s*(?:,\s*(.*?))?\s*\)\s*$")
            .expect("theme variable pattern is valid")
    })
}

/// Returns true if `color_ref` is a `var(--name)` theme reference.
pub fn is_theme_reference(color_ref: &str) -> bool {
    var_regex().is_match(color_ref)
}

/// Read access to the active style context (computed custom properties).
pub trait StyleSource {
    /// Current value of the custom property `name` (given with or without
    /// the leading `--`), or `None` if the property is not defined.
    fn property(&self, name: &str) -> Option<String>;
}

/// Anything that can turn a configured color string into a concrete one.
pub trait ColorResolver {
    fn resolve_color(&self, color_ref: &str) -> String;
}

/// A plain map of theme custom properties.
///
/// Deserializes from a JSON object such as
/// `{"info-color": "#039be5", "--error-color": "#db4437"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeProperties {
    properties: HashMap<String, String>,
}

impl ThemeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property; the leading `--` is optional.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.properties
            .insert(name.trim_start_matches("--").to_string(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = name.trim_start_matches("--");
        self.properties
            .remove(key)
            .or_else(|| self.properties.remove(&format!("--{key}")))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl StyleSource for ThemeProperties {
    fn property(&self, name: &str) -> Option<String> {
        let key = name.trim_start_matches("--");
        self.properties
            .get(key)
            .or_else(|| self.properties.get(&format!("--{key}")))
            .map(|v| v.trim().to_string())
    }
}

/// Cache tuning for [`ThemeColorResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeCacheConfig {
    /// Seconds a resolved color stays valid
    pub ttl_secs: u64,
    /// Maximum number of cached references
    pub capacity: usize,
}

impl Default for ThemeCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    resolved_at: Instant,
}

/// FIFO cache keyed by the original color reference.
#[derive(Debug)]
struct ColorCache {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    ttl: Duration,
    capacity: usize,
}

impl ColorCache {
    fn new(config: ThemeCacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            ttl: Duration::from_secs(config.ttl_secs),
            capacity: config.capacity,
        }
    }

    fn get(&self, key: &str, now: Instant) -> Option<&str> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.resolved_at) < self.ttl {
            Some(entry.value.as_str())
        } else {
            None
        }
    }

    fn insert(&mut self, key: &str, value: String, now: Instant) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(key) {
            self.order.retain(|k| k != key);
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                resolved_at: now,
            },
        );
        self.order.push_back(key.to_string());

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Resolves `var(--name)` references against a [`StyleSource`], with caching.
///
/// The cache sits behind a `RefCell`, so one resolver serves a single UI
/// thread and can be shared by reference between the segment engine and the
/// renderer.
#[derive(Debug)]
pub struct ThemeColorResolver<S> {
    source: S,
    cache: RefCell<ColorCache>,
}

impl<S: StyleSource> ThemeColorResolver<S> {
    /// Create a resolver with the default TTL and capacity.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ThemeCacheConfig::default())
    }

    pub fn with_config(source: S, config: ThemeCacheConfig) -> Self {
        Self {
            source,
            cache: RefCell::new(ColorCache::new(config)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swap the style context (e.g. after a theme change) and drop the cache.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
        self.cache.get_mut().clear();
    }

    /// Resolve a color reference. Non-references are returned unchanged;
    /// undefined properties without a fallback resolve to `""`.
    pub fn resolve(&self, color_ref: &str) -> String {
        self.resolve_at(color_ref, Instant::now())
    }

    /// [`resolve`](Self::resolve) with an explicit clock reading.
    pub fn resolve_at(&self, color_ref: &str, now: Instant) -> String {
        if !is_theme_reference(color_ref) {
            return color_ref.to_string();
        }

        if let Some(hit) = self.cache.borrow().get(color_ref, now) {
            tracing::trace!(color_ref, value = hit, "theme color cache hit");
            return hit.to_string();
        }

        let value = self.lookup(color_ref, 0);
        tracing::debug!(color_ref, value = %value, "resolved theme color");
        self.cache.borrow_mut().insert(color_ref, value.clone(), now);
        value
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Number of cached references, expired ones included.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().entries.len()
    }

    fn lookup(&self, color_ref: &str, depth: usize) -> String {
        let Some(caps) = var_regex().captures(color_ref) else {
            return color_ref.trim().to_string();
        };

        if let Some(value) = self
            .source
            .property(&caps[1])
            .filter(|v| !v.is_empty())
        {
            return value;
        }

        match caps.get(2).map(|m| m.as_str()) {
            Some(fallback) if depth < MAX_FALLBACK_DEPTH => self.lookup(fallback, depth + 1),
            _ => String::new(),
        }
    }
}

impl<S: StyleSource> ColorResolver for ThemeColorResolver<S> {
    fn resolve_color(&self, color_ref: &str) -> String {
        self.resolve(color_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> ThemeProperties {
        ThemeProperties::new()
            .with("info-color", "#039be5")
            .with("--error-color", "#db4437")
    }

    #[test]
    fn test_non_reference_passthrough() {
        let resolver = ThemeColorResolver::new(theme());
        assert_eq!(resolver.resolve("#ff0000"), "#ff0000");
        assert_eq!(resolver.resolve("red"), "red");
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_reference_lookup() {
        let resolver = ThemeColorResolver::new(theme());
        assert_eq!(resolver.resolve("var(--info-color)"), "#039be5");
        assert_eq!(resolver.resolve("var( --error-color )"), "#db4437");
    }

    #[test]
    fn test_undefined_property_is_empty() {
        let resolver = ThemeColorResolver::new(theme());
        assert_eq!(resolver.resolve("var(--missing-color)"), "");
    }

    #[test]
    fn test_fallback_argument() {
        let resolver = ThemeColorResolver::new(theme());
        assert_eq!(resolver.resolve("var(--missing, #123456)"), "#123456");
        assert_eq!(
            resolver.resolve("var(--missing, var(--error-color))"),
            "#db4437"
        );
    }

    #[test]
    fn test_removed_property_after_clear() {
        let mut resolver = ThemeColorResolver::new(theme());
        assert_eq!(resolver.resolve("var(--error-color)"), "#db4437");

        let mut props = resolver.source().clone();
        assert_eq!(props.remove("--error-color").as_deref(), Some("#db4437"));
        assert_eq!(props.remove("error-color"), None);
        assert_eq!(props.len(), 1);

        resolver.set_source(props);
        assert_eq!(resolver.resolve("var(--error-color, #000000)"), "#000000");
    }

    #[test]
    fn test_is_theme_reference() {
        assert!(is_theme_reference("var(--primary-color)"));
        assert!(!is_theme_reference("#fff"));
        assert!(!is_theme_reference("var(primary)"));
    }
}
