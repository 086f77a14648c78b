#![forbid(unsafe_code)]

//! Headless element surface.
//!
//! A [`Page`] is a flat arena of [`Element`]s referenced by [`ElementId`].
//! Elements are created in document order and never removed, so an id doubles
//! as the element's document-order index. Tree structure is limited to
//! parent/child links; that is all the behaviors in this workspace need.
//!
//! # Invariants
//!
//! 1. `ElementId(n)` is the n-th element created; ids are dense and stable.
//! 2. A class list never holds duplicates; `add_class` is idempotent.
//! 3. An element has at most one parent, assigned at creation and immutable.
//! 4. `query_class` and `descendants` return ids in document order.
//!
//! # Failure Modes
//!
//! - Stale or out-of-range id: accessors return `None` / empty, mutators are
//!   silent no-ops. Missing elements skip the associated behavior; nothing is
//!   raised (presentation is best-effort).

use ahash::AHashMap;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Opaque handle to an element; also its document-order index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Position of this element in document order.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A single element: tag, classes, attributes, text, and tree links.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: AHashMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: AHashMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    /// Tag name (lowercase by convention; stored as given).
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Current class list, in insertion order.
    #[inline]
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Text content.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parent element, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Flat arena of elements with class/attribute/text operations.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements on the page.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrow an element.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    #[inline]
    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }
}

// ─── Construction ────────────────────────────────────────────────────────────

impl Page {
    /// Create a root-level element and return its handle.
    pub fn create(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(tag, None));
        id
    }

    /// Create an element as the last child of `parent`.
    ///
    /// An unknown parent yields a root-level element.
    pub fn create_in(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        let parent = if parent.index() < self.elements.len() {
            Some(parent)
        } else {
            None
        };
        self.elements.push(Element::new(tag, parent));
        if let Some(p) = parent
            && let Some(el) = self.get_mut(p)
        {
            el.children.push(id);
        }
        id
    }

    /// Create a root-level element carrying the given classes.
    pub fn create_with(&mut self, tag: &str, classes: &[&str]) -> ElementId {
        let id = self.create(tag);
        for class in classes {
            self.add_class(id, class);
        }
        id
    }
}

// ─── Classes ─────────────────────────────────────────────────────────────────

impl Page {
    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// Add a class (idempotent).
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(el) = self.get_mut(id) {
            el.classes.push(class.to_string());
        }
    }

    /// Remove a class (no-op when absent).
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Toggle a class; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    /// All elements carrying `class`, in document order.
    #[must_use]
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.classes.iter().any(|c| c == class))
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }
}

// ─── Attributes and text ─────────────────────────────────────────────────────

impl Page {
    /// Read an attribute.
    #[must_use]
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|el| el.attrs.get(name)).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Set text content.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.get_mut(id) {
            el.text = text.to_string();
        }
    }

    /// First element whose `id` attribute equals `value`.
    #[must_use]
    pub fn element_by_id(&self, value: &str) -> Option<ElementId> {
        (0..self.elements.len())
            .map(|i| ElementId(i as u32))
            .find(|&id| self.attr(id, "id") == Some(value))
    }
}

// ─── Tree queries ────────────────────────────────────────────────────────────

impl Page {
    /// Direct children of `id`, in document order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |el| el.children.as_slice())
    }

    /// All descendants of `id` in preorder (document order).
    #[must_use]
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).to_vec();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut kids = self.children(next).to_vec();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// First descendant with the given tag.
    #[must_use]
    pub fn find_tag_within(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        self.descendants(id)
            .into_iter()
            .find(|&d| self.get(d).is_some_and(|el| el.tag == tag))
    }

    /// Whether `descendant` is inside `ancestor` (strict; an element does not
    /// contain itself).
    #[must_use]
    pub fn is_within(&self, descendant: ElementId, ancestor: ElementId) -> bool {
        let mut cur = self.get(descendant).and_then(Element::parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.get(p).and_then(Element::parent);
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
