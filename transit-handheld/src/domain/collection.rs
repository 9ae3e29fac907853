//! Selectable, lazily loaded collections.

use std::fmt;

/// The three collections the device pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Routes,
    Trips,
    Stations,
}

impl CollectionKind {
    /// Plural, lower-case name used in on-screen messages.
    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::Routes => "routes",
            CollectionKind::Trips => "trips",
            CollectionKind::Stations => "stations",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A list of items with a selection cursor and a loaded flag.
///
/// Invariant: whenever the collection is loaded and non-empty, the cursor
/// satisfies `index < len`. Adopting new items or resetting always puts the
/// cursor back to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
    index: usize,
    loaded: bool,
}

impl<T> Collection<T> {
    /// An empty, unloaded collection.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
            loaded: false,
        }
    }

    /// Replace the contents and mark the collection loaded.
    pub fn adopt(&mut self, items: Vec<T>) {
        self.items = items;
        self.index = 0;
        self.loaded = true;
    }

    /// Drop the contents and mark the collection unloaded.
    pub fn reset(&mut self) {
        self.items.clear();
        self.index = 0;
        self.loaded = false;
    }

    /// Move the cursor to the next item, wrapping at the end.
    ///
    /// Returns `false` (and changes nothing) when the collection is empty.
    ///
    /// ```
    /// use transit_handheld::domain::Collection;
    ///
    /// let mut stops = Collection::new();
    /// stops.adopt(vec!["Ghencea", "Gara"]);
    /// stops.advance();
    /// stops.advance();
    /// assert_eq!(stops.selected(), Some(&"Ghencea"));
    /// ```
    pub fn advance(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.index = (self.index + 1) % self.items.len();
        true
    }

    /// The item under the cursor.
    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// True when loaded with at least one item.
    pub fn is_ready(&self) -> bool {
        self.loaded && !self.items.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
