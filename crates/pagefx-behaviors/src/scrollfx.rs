#![forbid(unsafe_code)]

//! Scroll-linked presentation toggles.
//!
//! Threshold comparisons against the current scroll offset, applied on every
//! scroll report with no throttling: header shadow, back-to-top visibility,
//! and the floating-nav section highlight. Smooth scrolling itself is the
//! host's concern; click handlers only return a [`ScrollRequest`] expressing
//! where to go.

use pagefx_core::{ElementId, Page};

const SCROLLED_CLASS: &str = "scrolled";
const VISIBLE_CLASS: &str = "visible";
const ACTIVE_CLASS: &str = "active";

/// How far below the real scroll position the floating nav "reads" the page.
const SECTION_PROBE_OFFSET: f32 = 150.0;

/// Slack above the first section within which it still counts as current.
const FIRST_SECTION_SLACK: f32 = 100.0;

// ---------------------------------------------------------------------------
// Simple toggles
// ---------------------------------------------------------------------------

/// Header shadow: `scrolled` iff the page is scrolled at all.
///
/// Also called once at init so a restored scroll position shows the shadow
/// immediately.
pub fn update_header_shadow(page: &mut Page, header: ElementId, scroll: f32) {
    if scroll > 0.0 {
        page.add_class(header, SCROLLED_CLASS);
    } else {
        page.remove_class(header, SCROLLED_CLASS);
    }
}

/// Back-to-top button: `visible` once the page is scrolled past one full
/// viewport height.
pub fn update_back_to_top(page: &mut Page, button: ElementId, scroll: f32, viewport_height: f32) {
    if scroll > viewport_height {
        page.add_class(button, VISIBLE_CLASS);
    } else {
        page.remove_class(button, VISIBLE_CLASS);
    }
}

/// A scroll destination the host should animate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Target element; `None` means the top of the page.
    pub target: Option<ElementId>,
}

/// Back-to-top button clicked.
#[must_use]
pub fn back_to_top_request() -> ScrollRequest {
    ScrollRequest { target: None }
}

/// Scroll-down button clicked: head for the section with the given `id`
/// attribute, or nowhere when it does not exist.
#[must_use]
pub fn scroll_to_section(page: &Page, section_id: &str) -> Option<ScrollRequest> {
    page.element_by_id(section_id)
        .map(|target| ScrollRequest {
            target: Some(target),
        })
}

// ---------------------------------------------------------------------------
// Floating nav
// ---------------------------------------------------------------------------

/// Floating navigation: highlights the link of the section currently under
/// the (offset) scroll position.
#[derive(Debug, Clone)]
pub struct FloatingNav {
    /// `(link, section)` pairs in document order; only links whose fragment
    /// href resolved to a section are kept.
    entries: Vec<(ElementId, ElementId)>,
}

impl FloatingNav {
    /// Bind the anchors inside containers with `list_class`, resolving each
    /// `#fragment` href to the element with that `id` attribute. Anchors with
    /// no fragment href, or a fragment that matches nothing, are dropped.
    #[must_use]
    pub fn bind(page: &Page, list_class: &str) -> Self {
        let entries = crate::links::anchor_links(page, list_class)
            .into_iter()
            .filter_map(|link| {
                let href = page.attr(link, "href")?;
                let fragment = href.strip_prefix('#')?;
                let section = page.element_by_id(fragment)?;
                Some((link, section))
            })
            .collect();
        Self { entries }
    }

    /// Number of resolved link/section pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-evaluate the highlight for the given scroll offset.
    ///
    /// `section_top` maps a section to its document-space top. The current
    /// section is the last one whose top is at or above `scroll + 150`;
    /// near the very top of the page the first section wins; in the dead zone
    /// just above the first section, nothing is highlighted (as observed in
    /// the page this replaces).
    pub fn update(&self, page: &mut Page, section_top: impl Fn(ElementId) -> f32, scroll: f32) {
        if self.entries.is_empty() {
            return;
        }
        let probe = scroll + SECTION_PROBE_OFFSET;

        let mut current = self
            .entries
            .iter()
            .rev()
            .find(|(_, section)| probe >= section_top(*section))
            .map(|&(link, _)| link);

        let first_top = section_top(self.entries[0].1);
        if probe < first_top - FIRST_SECTION_SLACK {
            current = Some(self.entries[0].0);
        }

        for &(link, _) in &self.entries {
            page.remove_class(link, ACTIVE_CLASS);
        }
        if let Some(link) = current {
            page.add_class(link, ACTIVE_CLASS);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_shadow_threshold() {
        let mut page = Page::new();
        let header = page.create_with("header", &["site-header"]);
        update_header_shadow(&mut page, header, 0.0);
        assert!(!page.has_class(header, "scrolled"));
        update_header_shadow(&mut page, header, 1.0);
        assert!(page.has_class(header, "scrolled"));
        update_header_shadow(&mut page, header, 0.0);
        assert!(!page.has_class(header, "scrolled"));
    }

    #[test]
    fn back_to_top_threshold_is_viewport_height() {
        let mut page = Page::new();
        let button = page.create_with("button", &["back-to-top"]);
        update_back_to_top(&mut page, button, 800.0, 800.0);
        assert!(!page.has_class(button, "visible"));
        update_back_to_top(&mut page, button, 801.0, 800.0);
        assert!(page.has_class(button, "visible"));
    }

    #[test]
    fn scroll_requests() {
        let mut page = Page::new();
        let section = page.create("section");
        page.set_attr(section, "id", "portfolio");
        assert_eq!(back_to_top_request().target, None);
        assert_eq!(
            scroll_to_section(&page, "portfolio").unwrap().target,
            Some(section)
        );
        assert!(scroll_to_section(&page, "missing").is_none());
    }

    /// Three sections at 0 / 1000 / 2000 with matching fragment links.
    fn floating_page() -> (Page, FloatingNav, Vec<ElementId>, Vec<ElementId>) {
        let mut page = Page::new();
        let mut sections = Vec::new();
        for name in ["intro", "work", "contact"] {
            let s = page.create("section");
            page.set_attr(s, "id", name);
            sections.push(s);
        }
        let list = page.create_with("ul", &["floating-nav-list"]);
        let links = ["#intro", "#work", "#contact"]
            .iter()
            .map(|href| {
                let a = page.create_in(list, "a");
                page.set_attr(a, "href", href);
                a
            })
            .collect();
        let nav = FloatingNav::bind(&page, "floating-nav-list");
        (page, nav, links, sections)
    }

    fn tops(sections: &[ElementId]) -> impl Fn(ElementId) -> f32 + '_ {
        move |id| {
            let i = sections.iter().position(|&s| s == id).unwrap();
            1000.0 * i as f32
        }
    }

    #[test]
    fn bind_resolves_fragments_only() {
        let (mut page, nav, _, _) = floating_page();
        assert_eq!(nav.len(), 3);
        let list = page.query_class("floating-nav-list")[0];
        let external = page.create_in(list, "a");
        page.set_attr(external, "href", "team.html");
        let dangling = page.create_in(list, "a");
        page.set_attr(dangling, "href", "#nowhere");
        assert_eq!(FloatingNav::bind(&page, "floating-nav-list").len(), 3);
    }

    #[test]
    fn last_section_at_or_above_probe_wins() {
        let (mut page, nav, links, sections) = floating_page();
        nav.update(&mut page, tops(&sections), 900.0);
        // probe = 1050 → section "work" (top 1000).
        assert!(!page.has_class(links[0], "active"));
        assert!(page.has_class(links[1], "active"));
        assert!(!page.has_class(links[2], "active"));
    }

    #[test]
    fn highlight_moves_and_clears_previous() {
        let (mut page, nav, links, sections) = floating_page();
        nav.update(&mut page, tops(&sections), 900.0);
        nav.update(&mut page, tops(&sections), 2500.0);
        assert!(!page.has_class(links[1], "active"));
        assert!(page.has_class(links[2], "active"));
    }

    #[test]
    fn top_of_page_highlights_first_section() {
        let (mut page, nav, links, sections) = floating_page();
        // Sections shifted so even the first starts below the probe.
        let shifted = move |id| tops(&sections)(id) + 500.0;
        nav.update(&mut page, shifted, 0.0);
        // probe = 150 < 500 - 100 → first section wins.
        assert!(page.has_class(links[0], "active"));
    }

    #[test]
    fn dead_zone_above_first_section_highlights_nothing() {
        let (mut page, nav, links, sections) = floating_page();
        let shifted = move |id| tops(&sections)(id) + 500.0;
        // probe = 450: not past the first section (500), not below the slack
        // boundary (400) either.
        nav.update(&mut page, shifted, 300.0);
        for link in links {
            assert!(!page.has_class(link, "active"));
        }
    }

    #[test]
    fn empty_nav_is_silent() {
        let mut page = Page::new();
        let nav = FloatingNav::bind(&page, "floating-nav-list");
        assert!(nav.is_empty());
        nav.update(&mut page, |_| 0.0, 100.0);
    }
}
