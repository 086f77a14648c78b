#![forbid(unsafe_code)]

//! Theme mode management (system / light / dark).
//!
//! One string preference in durable storage drives a body-level class, the
//! light/dark variants of marked images, and the label on every theme toggle
//! button. Clicking a toggle cycles system → dark → light → system. While the
//! preference is `system`, an OS-level scheme change re-applies the theme
//! automatically; an explicit mode pins it.
//!
//! # Failure Modes
//!
//! - Storage unreadable: degrade to [`ThemeMode::System`] with a `warn!`.
//! - Storage unwritable: the new mode still applies for this session.
//! - Unknown stored value: treated as `system`.
//! - No body / no marked images / no toggles: each part silently skipped.

use pagefx_core::{ElementId, Page};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

const DARK_CLASS: &str = "theme-dark";
const LIGHT_CLASS: &str = "theme-light";
const LOGO_CLASS: &str = "brand-logo";
const CARD_MEDIA_CLASS: &str = "card-media";
const TOGGLE_CLASS: &str = "theme-toggle";
const LIGHT_SRC_ATTR: &str = "data-light-src";
const DARK_SRC_ATTR: &str = "data-dark-src";

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// The persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Follow the OS-level color scheme; no explicit body class.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    /// Stable string form used in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value; anything unrecognized falls back to `System`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }

    /// The next mode in the click cycle: system → dark → light → system.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::System => Self::Dark,
            Self::Dark => Self::Light,
            Self::Light => Self::System,
        }
    }

    /// Whether dark presentation is in effect under the given OS scheme.
    #[must_use]
    pub fn effective_dark(self, scheme: SystemScheme) -> bool {
        self == Self::Dark || (self == Self::System && scheme == SystemScheme::Dark)
    }
}

/// OS-level preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemScheme {
    Light,
    Dark,
}

impl SystemScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

// ---------------------------------------------------------------------------
// Preference storage
// ---------------------------------------------------------------------------

/// Error from the durable preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage unavailable")]
    Unavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value storage for the single theme preference.
pub trait PreferenceStore {
    /// Read the stored preference, `None` when never written.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Persist the preference.
    fn save(&mut self, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        (**self).save(value)
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a value.
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Applies the persisted theme preference to a page and cycles it on demand.
#[derive(Debug)]
pub struct ThemeManager<S> {
    store: S,
}

impl<S: PreferenceStore> ThemeManager<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current preference; storage failures degrade to `System`.
    #[must_use]
    pub fn current(&self) -> ThemeMode {
        match self.store.load() {
            Ok(Some(value)) => ThemeMode::parse(&value),
            Ok(None) => ThemeMode::System,
            Err(err) => {
                warn!(%err, "theme preference unreadable; falling back to system");
                ThemeMode::System
            }
        }
    }

    /// Apply the stored preference at startup.
    pub fn init(&self, page: &mut Page, scheme: SystemScheme) {
        let mode = self.current();
        apply_mode(page, mode, scheme);
        update_toggles(page, mode, scheme);
    }

    /// Toggle clicked: advance the cycle, persist, and apply.
    ///
    /// A write failure is logged and the new mode still applies for this
    /// session.
    pub fn cycle(&mut self, page: &mut Page, scheme: SystemScheme) -> ThemeMode {
        let next = self.current().cycle();
        if let Err(err) = self.store.save(next.as_str()) {
            warn!(%err, mode = next.as_str(), "theme preference not persisted");
        }
        debug!(mode = next.as_str(), "theme cycled");
        apply_mode(page, next, scheme);
        update_toggles(page, next, scheme);
        next
    }

    /// The OS color scheme changed. Re-applies only while the stored
    /// preference is `system`; an explicit mode stays pinned.
    pub fn system_scheme_changed(&self, page: &mut Page, scheme: SystemScheme) {
        if self.current() == ThemeMode::System {
            apply_mode(page, ThemeMode::System, scheme);
            update_toggles(page, ThemeMode::System, scheme);
        }
    }
}

// ─── Presentation ────────────────────────────────────────────────────────────

fn apply_mode(page: &mut Page, mode: ThemeMode, scheme: SystemScheme) {
    if let Some(body) = body_of(page) {
        page.remove_class(body, DARK_CLASS);
        page.remove_class(body, LIGHT_CLASS);
        match mode {
            ThemeMode::Dark => page.add_class(body, DARK_CLASS),
            ThemeMode::Light => page.add_class(body, LIGHT_CLASS),
            // `system` means no explicit class.
            ThemeMode::System => {}
        }
    }

    let dark = mode.effective_dark(scheme);
    for id in page.query_class(LOGO_CLASS) {
        swap_variant(page, id, dark);
    }
    // Card images: default variant only; hover handled separately.
    for media in page.query_class(CARD_MEDIA_CLASS) {
        let imgs: Vec<ElementId> = page
            .descendants(media)
            .into_iter()
            .filter(|&d| page.get(d).is_some_and(|el| el.tag() == "img"))
            .collect();
        for img in imgs {
            swap_variant(page, img, dark);
        }
    }
}

/// Swap `src` to the light/dark variant when both variants are declared.
fn swap_variant(page: &mut Page, id: ElementId, dark: bool) {
    let light_src = page.attr(id, LIGHT_SRC_ATTR).map(str::to_string);
    let dark_src = page.attr(id, DARK_SRC_ATTR).map(str::to_string);
    if let (Some(light), Some(darker)) = (light_src, dark_src) {
        page.set_attr(id, "src", if dark { &darker } else { &light });
    }
}

fn update_toggles(page: &mut Page, mode: ThemeMode, scheme: SystemScheme) {
    let effective = if mode.effective_dark(scheme) {
        SystemScheme::Dark
    } else {
        SystemScheme::Light
    };
    let label = match mode {
        ThemeMode::System => format!("system ({})", effective.as_str()),
        _ => mode.as_str().to_string(),
    };
    for id in page.query_class(TOGGLE_CLASS) {
        page.set_attr(id, "data-mode", mode.as_str());
        page.set_attr(
            id,
            "aria-pressed",
            if mode == ThemeMode::System { "false" } else { "true" },
        );
        page.set_text(id, &format!("theme: {label}"));
    }
}

fn body_of(page: &Page) -> Option<ElementId> {
    (0..page.len() as u32)
        .map(ElementId)
        .find(|&id| page.get(id).is_some_and(|el| el.tag() == "body"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn save(&mut self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn themed_page() -> (Page, ElementId, ElementId, ElementId) {
        let mut page = Page::new();
        let body = page.create("body");
        let logo = page.create_in(body, "img");
        page.add_class(logo, "brand-logo");
        page.set_attr(logo, "data-light-src", "logo.svg");
        page.set_attr(logo, "data-dark-src", "logo-dark.svg");
        page.set_attr(logo, "src", "logo.svg");
        let toggle = page.create_in(body, "button");
        page.add_class(toggle, "theme-toggle");
        (page, body, logo, toggle)
    }

    #[test]
    fn cycle_order() {
        assert_eq!(ThemeMode::System.cycle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.cycle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.cycle(), ThemeMode::System);
    }

    #[test]
    fn parse_is_tolerant() {
        assert_eq!(ThemeMode::parse("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("system"), ThemeMode::System);
        assert_eq!(ThemeMode::parse("sepia"), ThemeMode::System);
        assert_eq!(ThemeMode::parse(""), ThemeMode::System);
    }

    #[test]
    fn broken_store_degrades_to_system() {
        let manager = ThemeManager::new(BrokenStore);
        assert_eq!(manager.current(), ThemeMode::System);
    }

    #[test]
    fn cycle_survives_unwritable_store() {
        let (mut page, body, _, _) = themed_page();
        let mut manager = ThemeManager::new(BrokenStore);
        let mode = manager.cycle(&mut page, SystemScheme::Light);
        // current() read System, so the session still moves to Dark.
        assert_eq!(mode, ThemeMode::Dark);
        assert!(page.has_class(body, "theme-dark"));
    }

    #[test]
    fn explicit_dark_sets_class_and_swaps_images() {
        let (mut page, body, logo, _) = themed_page();
        let mut manager = ThemeManager::new(MemoryStore::new());
        manager.cycle(&mut page, SystemScheme::Light); // system → dark
        assert!(page.has_class(body, "theme-dark"));
        assert!(!page.has_class(body, "theme-light"));
        assert_eq!(page.attr(logo, "src"), Some("logo-dark.svg"));
    }

    #[test]
    fn system_mode_has_no_explicit_class() {
        let (mut page, body, logo, _) = themed_page();
        let manager = ThemeManager::new(MemoryStore::with_value("system"));
        manager.init(&mut page, SystemScheme::Dark);
        assert!(!page.has_class(body, "theme-dark"));
        assert!(!page.has_class(body, "theme-light"));
        // But images follow the effective (dark) scheme.
        assert_eq!(page.attr(logo, "src"), Some("logo-dark.svg"));
    }

    #[test]
    fn card_media_images_swap_too() {
        let (mut page, body, _, _) = themed_page();
        let card = page.create_in(body, "article");
        let media = page.create_in(card, "div");
        page.add_class(media, "card-media");
        let img = page.create_in(media, "img");
        page.set_attr(img, "data-light-src", "shot.png");
        page.set_attr(img, "data-dark-src", "shot-dark.png");
        page.set_attr(img, "src", "shot.png");
        // An image without both variants is left alone.
        let plain = page.create_in(media, "img");
        page.set_attr(plain, "src", "plain.png");

        let manager = ThemeManager::new(MemoryStore::with_value("dark"));
        manager.init(&mut page, SystemScheme::Light);
        assert_eq!(page.attr(img, "src"), Some("shot-dark.png"));
        assert_eq!(page.attr(plain, "src"), Some("plain.png"));
    }

    #[test]
    fn toggle_ui_reflects_mode() {
        let (mut page, _, _, toggle) = themed_page();
        let manager = ThemeManager::new(MemoryStore::with_value("system"));
        manager.init(&mut page, SystemScheme::Dark);
        assert_eq!(page.attr(toggle, "data-mode"), Some("system"));
        assert_eq!(page.attr(toggle, "aria-pressed"), Some("false"));
        assert_eq!(page.get(toggle).unwrap().text(), "theme: system (dark)");

        let manager = ThemeManager::new(MemoryStore::with_value("light"));
        manager.init(&mut page, SystemScheme::Dark);
        assert_eq!(page.attr(toggle, "aria-pressed"), Some("true"));
        assert_eq!(page.get(toggle).unwrap().text(), "theme: light");
    }

    #[test]
    fn scheme_change_reapplies_only_in_system_mode() {
        let (mut page, body, logo, _) = themed_page();

        let manager = ThemeManager::new(MemoryStore::with_value("system"));
        manager.init(&mut page, SystemScheme::Light);
        assert_eq!(page.attr(logo, "src"), Some("logo.svg"));
        manager.system_scheme_changed(&mut page, SystemScheme::Dark);
        assert_eq!(page.attr(logo, "src"), Some("logo-dark.svg"));

        // Pinned dark: an OS flip to light changes nothing.
        let manager = ThemeManager::new(MemoryStore::with_value("dark"));
        manager.init(&mut page, SystemScheme::Dark);
        manager.system_scheme_changed(&mut page, SystemScheme::Light);
        assert!(page.has_class(body, "theme-dark"));
        assert_eq!(page.attr(logo, "src"), Some("logo-dark.svg"));
    }

    #[test]
    fn cycle_persists_between_managers() {
        let (mut page, _, _, _) = themed_page();
        let mut store = MemoryStore::new();
        let mut manager = ThemeManager::new(&mut store);
        manager.cycle(&mut page, SystemScheme::Light);
        drop(manager);
        assert_eq!(store.load().unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn pageless_theme_is_silent() {
        let mut page = Page::new();
        let manager = ThemeManager::new(MemoryStore::new());
        manager.init(&mut page, SystemScheme::Light);
        assert!(page.is_empty());
    }
}
