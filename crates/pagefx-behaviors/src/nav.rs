#![forbid(unsafe_code)]

//! Mobile navigation toggle.
//!
//! One button, one nav container. Clicking the button flips the button's
//! `aria-expanded` attribute and the container's `open` class in lockstep;
//! clicking a link inside the container closes it (mobile nav collapses once
//! a destination is chosen). Closing when already closed is a no-op.

use pagefx_core::{ElementId, Page};

const OPEN_CLASS: &str = "open";
const EXPANDED_ATTR: &str = "aria-expanded";

/// Click behavior for a nav toggle button and its container.
#[derive(Debug, Clone, Copy)]
pub struct NavToggle {
    button: ElementId,
    nav: ElementId,
}

impl NavToggle {
    #[must_use]
    pub fn new(button: ElementId, nav: ElementId) -> Self {
        Self { button, nav }
    }

    /// Whether the nav is currently open.
    #[must_use]
    pub fn is_open(&self, page: &Page) -> bool {
        page.has_class(self.nav, OPEN_CLASS)
    }

    /// Toggle button clicked.
    pub fn toggle(&self, page: &mut Page) {
        let expanded = page.attr(self.button, EXPANDED_ATTR) == Some("true");
        page.set_attr(
            self.button,
            EXPANDED_ATTR,
            if expanded { "false" } else { "true" },
        );
        page.toggle_class(self.nav, OPEN_CLASS);
    }

    /// Force-close the nav.
    pub fn close(&self, page: &mut Page) {
        page.remove_class(self.nav, OPEN_CLASS);
        page.set_attr(self.button, EXPANDED_ATTR, "false");
    }

    /// A click landed on `target` inside the nav: close when it is a link.
    pub fn link_clicked(&self, page: &mut Page, target: ElementId) {
        let is_nav_link =
            page.get(target).is_some_and(|el| el.tag() == "a") && page.is_within(target, self.nav);
        if is_nav_link {
            self.close(page);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_page() -> (Page, NavToggle, ElementId) {
        let mut page = Page::new();
        let button = page.create_with("button", &["nav-toggle"]);
        page.set_attr(button, EXPANDED_ATTR, "false");
        let nav = page.create("nav");
        let link = page.create_in(nav, "a");
        (page, NavToggle::new(button, nav), link)
    }

    #[test]
    fn toggle_round_trip() {
        let (mut page, toggle, _) = nav_page();
        toggle.toggle(&mut page);
        assert!(toggle.is_open(&page));
        toggle.toggle(&mut page);
        assert!(!toggle.is_open(&page));
    }

    #[test]
    fn aria_expanded_tracks_class() {
        let (mut page, toggle, _) = nav_page();
        toggle.toggle(&mut page);
        assert_eq!(page.attr(ElementId(0), EXPANDED_ATTR), Some("true"));
        toggle.toggle(&mut page);
        assert_eq!(page.attr(ElementId(0), EXPANDED_ATTR), Some("false"));
    }

    #[test]
    fn missing_attribute_counts_as_collapsed() {
        let mut page = Page::new();
        let button = page.create("button");
        let nav = page.create("nav");
        let toggle = NavToggle::new(button, nav);
        toggle.toggle(&mut page);
        assert_eq!(page.attr(button, EXPANDED_ATTR), Some("true"));
        assert!(toggle.is_open(&page));
    }

    #[test]
    fn link_click_closes_open_nav() {
        let (mut page, toggle, link) = nav_page();
        toggle.toggle(&mut page);
        toggle.link_clicked(&mut page, link);
        assert!(!toggle.is_open(&page));
        assert_eq!(page.attr(ElementId(0), EXPANDED_ATTR), Some("false"));
    }

    #[test]
    fn non_link_click_keeps_nav_open() {
        let (mut page, toggle, _) = nav_page();
        let span = page.create_in(ElementId(1), "span");
        toggle.toggle(&mut page);
        toggle.link_clicked(&mut page, span);
        assert!(toggle.is_open(&page));
    }

    #[test]
    fn outside_link_click_is_ignored() {
        let (mut page, toggle, _) = nav_page();
        let outside = page.create("a");
        toggle.toggle(&mut page);
        toggle.link_clicked(&mut page, outside);
        assert!(toggle.is_open(&page));
    }

    #[test]
    fn close_when_closed_is_noop() {
        let (mut page, toggle, _) = nav_page();
        toggle.close(&mut page);
        assert!(!toggle.is_open(&page));
        assert_eq!(page.attr(ElementId(0), EXPANDED_ATTR), Some("false"));
    }
}
