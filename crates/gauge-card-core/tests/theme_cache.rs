//! Tests for theme variable resolution and its cache.

use gauge_card_core::theme::{
    StyleSource, ThemeCacheConfig, ThemeColorResolver, ThemeProperties, DEFAULT_CACHE_CAPACITY,
    DEFAULT_CACHE_TTL,
};
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Style source that counts lookups and can change under the resolver.
#[derive(Default)]
struct CountingStyle {
    properties: RefCell<ThemeProperties>,
    lookups: Cell<usize>,
}

impl CountingStyle {
    fn with(name: &str, value: &str) -> Self {
        let style = Self::default();
        style.properties.borrow_mut().set(name, value);
        style
    }

    fn set(&self, name: &str, value: &str) {
        self.properties.borrow_mut().set(name, value);
    }
}

impl StyleSource for &CountingStyle {
    fn property(&self, name: &str) -> Option<String> {
        self.lookups.set(self.lookups.get() + 1);
        self.properties.borrow().property(name)
    }
}

#[test]
fn test_defaults() {
    let config = ThemeCacheConfig::default();
    assert_eq!(config.ttl_secs, DEFAULT_CACHE_TTL.as_secs());
    assert_eq!(config.ttl_secs, 60);
    assert_eq!(config.capacity, DEFAULT_CACHE_CAPACITY);
    assert_eq!(config.capacity, 64);
}

#[test]
fn test_cache_hit_within_ttl() {
    let style = CountingStyle::with("primary-color", "#03a9f4");
    let resolver = ThemeColorResolver::new(&style);
    let t0 = Instant::now();

    assert_eq!(resolver.resolve_at("var(--primary-color)", t0), "#03a9f4");
    assert_eq!(
        resolver.resolve_at("var(--primary-color)", t0 + Duration::from_secs(30)),
        "#03a9f4"
    );
    assert_eq!(style.lookups.get(), 1);
}

#[test]
fn test_stale_until_ttl_expires() {
    let style = CountingStyle::with("primary-color", "#03a9f4");
    let resolver = ThemeColorResolver::new(&style);
    let t0 = Instant::now();

    resolver.resolve_at("var(--primary-color)", t0);
    style.set("primary-color", "#ff9800");

    assert_eq!(
        resolver.resolve_at("var(--primary-color)", t0 + Duration::from_secs(59)),
        "#03a9f4"
    );
    assert_eq!(
        resolver.resolve_at("var(--primary-color)", t0 + Duration::from_secs(60)),
        "#ff9800"
    );
    assert_eq!(style.lookups.get(), 2);
}

#[test]
fn test_fifo_eviction_at_capacity() {
    let style = CountingStyle::default();
    for name in ["a", "b", "c"] {
        style.set(name, "#000000");
    }
    let resolver = ThemeColorResolver::with_config(
        &style,
        ThemeCacheConfig {
            ttl_secs: 60,
            capacity: 2,
        },
    );
    let t0 = Instant::now();

    resolver.resolve_at("var(--a)", t0);
    resolver.resolve_at("var(--b)", t0);
    resolver.resolve_at("var(--c)", t0);
    assert_eq!(resolver.cached_len(), 2);
    assert_eq!(style.lookups.get(), 3);

    // b and c are cached, a was evicted first
    resolver.resolve_at("var(--b)", t0);
    resolver.resolve_at("var(--c)", t0);
    assert_eq!(style.lookups.get(), 3);
    resolver.resolve_at("var(--a)", t0);
    assert_eq!(style.lookups.get(), 4);
}

#[test]
fn test_clear_and_source_swap() {
    let dark = ThemeProperties::new().with("card-background-color", "#1c1c1c");
    let light = ThemeProperties::new().with("card-background-color", "#ffffff");
    let mut resolver = ThemeColorResolver::new(dark);

    assert_eq!(resolver.resolve("var(--card-background-color)"), "#1c1c1c");
    assert_eq!(resolver.cached_len(), 1);
    resolver.clear();
    assert_eq!(resolver.cached_len(), 0);

    resolver.resolve("var(--card-background-color)");
    resolver.set_source(light);
    assert_eq!(resolver.cached_len(), 0);
    assert_eq!(resolver.resolve("var(--card-background-color)"), "#ffffff");
}

#[test]
fn test_theme_properties_from_json() {
    let theme: ThemeProperties =
        serde_json::from_str(r##"{"--info-color": "#039be5", "error-color": " #db4437 "}"##)
            .unwrap();
    let resolver = ThemeColorResolver::new(theme);

    assert_eq!(resolver.resolve("var(--info-color)"), "#039be5");
    assert_eq!(resolver.resolve("var(--error-color)"), "#db4437");
    assert_eq!(resolver.resolve("var(--success-color)"), "");
}
