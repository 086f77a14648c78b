#![forbid(unsafe_code)]

//! Card hover image swapping.
//!
//! On pointer enter, a card's image switches to its hover variant; on pointer
//! leave, the original `src` (captured at bind time) comes back. The hover
//! variant is the explicit `data-hover-src` attribute when present, otherwise
//! derived by inserting `-hover` before the file extension
//! (`shot.png` → `shot-hover.png`); unknown extensions derive unchanged, so
//! the swap is a visible no-op rather than a broken image.

use pagefx_core::{ElementId, Page};

const HOVER_SRC_ATTR: &str = "data-hover-src";
const SWAPPABLE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".svg"];

/// Derive the hover variant of an image path.
#[must_use]
pub fn derive_hover_src(src: &str) -> String {
    for ext in SWAPPABLE_EXTENSIONS {
        if let Some(stem) = src.strip_suffix(ext) {
            return format!("{stem}-hover{ext}");
        }
    }
    src.to_string()
}

/// Bound hover behavior for one card.
#[derive(Debug, Clone)]
pub struct HoverSwap {
    image: ElementId,
    original: String,
    hover: String,
}

impl HoverSwap {
    /// Bind to the first image inside `card`.
    ///
    /// Returns `None` when the card holds no image or the image has no `src`
    /// (nothing to swap back to).
    #[must_use]
    pub fn bind(page: &Page, card: ElementId) -> Option<Self> {
        let image = page.find_tag_within(card, "img")?;
        let original = page.attr(image, "src")?.to_string();
        let hover = page
            .attr(image, HOVER_SRC_ATTR)
            .map_or_else(|| derive_hover_src(&original), str::to_string);
        Some(Self {
            image,
            original,
            hover,
        })
    }

    /// Pointer entered the card.
    pub fn pointer_enter(&self, page: &mut Page) {
        page.set_attr(self.image, "src", &self.hover);
    }

    /// Pointer left the card.
    pub fn pointer_leave(&self, page: &mut Page) {
        page.set_attr(self.image, "src", &self.original);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
