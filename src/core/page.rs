//! # Pages
//!
//! The fixed set of top-level pages, in navigation order. Predecessor and
//! successor lookups go through [`Page::ORDER`] rather than enum
//! discriminants, so reordering the list is the only change needed to
//! reorder the navigation bar.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Projects,
    Blog,
    About,
    Contact,
}

impl Page {
    /// Navigation order, left to right.
    pub const ORDER: [Page; 5] = [
        Page::Home,
        Page::Projects,
        Page::Blog,
        Page::About,
        Page::Contact,
    ];

    pub fn first() -> Page {
        Self::ORDER[0]
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|page| *page == self)
            .unwrap_or(0)
    }

    /// The page to the left, or `None` at the first page.
    pub fn previous(self) -> Option<Page> {
        self.position()
            .checked_sub(1)
            .and_then(|i| Self::ORDER.get(i).copied())
    }

    /// The page to the right, or `None` at the last page.
    pub fn next(self) -> Option<Page> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::Blog => "Blog",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::first()
    }
}
