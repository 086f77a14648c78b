#![forbid(unsafe_code)]

//! Active navigation link highlighting.
//!
//! Compares the current document location against each link's `href`,
//! case-insensitively, with the `.html` extension stripped, plus fallback
//! substring matches for a few named pages (`team`, `privacy`, `imprint`) and
//! the `index` ↔ bare-directory equivalence.
//!
//! Each link list (header nav, footer, ...) is highlighted independently, and
//! at most one link per list receives the `active` class: the first match in
//! document order wins.

use pagefx_core::{ElementId, Page};

const ACTIVE_CLASS: &str = "active";

/// Pages that also match by pathname substring, not just by file name.
const SUBSTRING_PAGES: [&str; 3] = ["team", "privacy", "imprint"];

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Last path segment, lowercased; the whole (lowercased) input when the
/// segment is empty.
fn file_name(path: &str) -> String {
    let lower = path.to_lowercase();
    match lower.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => seg.to_string(),
        _ => lower,
    }
}

fn strip_html(name: &str) -> &str {
    name.strip_suffix(".html").unwrap_or(name)
}

/// Whether a link with `href` should be highlighted for the document at
/// `pathname`.
#[must_use]
pub fn matches_location(href: &str, pathname: &str) -> bool {
    let pathname_lower = pathname.to_lowercase();
    let current_file = pathname_lower
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let link_file = file_name(href);
    let link_page = strip_html(&link_file);
    let current_page = strip_html(&current_file);

    if current_file == link_file || current_page == link_page {
        return true;
    }
    if SUBSTRING_PAGES.contains(&link_page) && pathname_lower.contains(link_page) {
        return true;
    }
    link_page == "index" && (current_file.is_empty() || current_file == "index.html")
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Anchor elements inside containers carrying `container_class`, in document
/// order.
#[must_use]
pub fn anchor_links(page: &Page, container_class: &str) -> Vec<ElementId> {
    let mut out = Vec::new();
    for container in page.query_class(container_class) {
        out.extend(
            page.descendants(container)
                .into_iter()
                .filter(|&d| page.get(d).is_some_and(|el| el.tag() == "a")),
        );
    }
    out
}

/// Highlight the active link in one link list.
///
/// Clears `active` from every anchor in the list, then marks the first anchor
/// whose `href` matches `pathname`. Anchors without an `href` never match. An
/// empty list is a silent no-op.
pub fn highlight_active_links(page: &mut Page, container_class: &str, pathname: &str) {
    let links = anchor_links(page, container_class);
    for &link in &links {
        page.remove_class(link, ACTIVE_CLASS);
    }
    let winner = links.into_iter().find(|&link| {
        page.attr(link, "href")
            .is_some_and(|href| matches_location(href, pathname))
    });
    if let Some(link) = winner {
        page.add_class(link, ACTIVE_CLASS);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
