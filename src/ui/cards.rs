//! Ephemeral per-card view state.
//!
//! The deck tracks, for each card currently on screen, which image the
//! carousel shows and whether the card is marked as a favorite, plus the grid
//! cursor. None of this is application state: the deck is rebuilt from
//! scratch on every grid render, so a filter change or page turn resets it.

use std::collections::HashMap;

/// Carousel and favorite state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    pub image_index: usize,
    pub image_count: usize,
    pub favorite: bool,
}

impl CardState {
    const fn new(image_count: usize) -> Self {
        Self {
            image_index: 0,
            image_count,
            favorite: false,
        }
    }
}

/// Carousel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carousel {
    Prev,
    Next,
}

/// Per-card state keyed by listing id, plus the grid cursor.
#[derive(Debug, Clone, Default)]
pub struct CardDeck {
    cards: HashMap<String, CardState>,
    /// Ids of the grid cards in display order.
    order: Vec<String>,
    cursor: usize,
}

impl CardDeck {
    /// Discards all card state and starts over with the given grid cards.
    ///
    /// Each entry is a listing id and its image count.
    pub fn rebuild<'a>(&mut self, cards: impl IntoIterator<Item = (&'a str, usize)>) {
        self.cards.clear();
        self.order.clear();
        self.cursor = 0;
        for (id, image_count) in cards {
            self.cards.insert(id.to_string(), CardState::new(image_count));
            self.order.push(id.to_string());
        }
        tracing::trace!(cards = self.order.len(), "card deck rebuilt");
    }

    /// Registers a card outside the grid (overlay or detail page) without
    /// disturbing existing state.
    pub fn track(&mut self, id: &str, image_count: usize) {
        self.cards
            .entry(id.to_string())
            .or_insert_with(|| CardState::new(image_count));
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardState> {
        self.cards.get(id)
    }

    /// Moves the carousel of card `id`, wrapping at both ends. Returns whether
    /// the card exists.
    pub fn cycle_image(&mut self, id: &str, direction: Carousel) -> bool {
        let Some(card) = self.cards.get_mut(id) else {
            return false;
        };
        let count = card.image_count.max(1);
        card.image_index = match direction {
            Carousel::Next => (card.image_index + 1) % count,
            Carousel::Prev => (card.image_index + count - 1) % count,
        };
        true
    }

    /// Flips the favorite mark of card `id`. Returns whether the card exists.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.cards.get_mut(id).map_or(false, |card| {
            card.favorite = !card.favorite;
            true
        })
    }

    /// Position of the grid cursor within the current page.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Id of the card under the grid cursor.
    #[must_use]
    pub fn focused_id(&self) -> Option<&str> {
        self.order.get(self.cursor).map(String::as_str)
    }

    /// Moves the cursor down one card, wrapping to the top.
    pub fn cursor_down(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.order.len();
    }

    /// Moves the cursor up one card, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.order.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Puts the cursor back on the first card of the page.
    pub fn focus_first(&mut self) {
        self.cursor = 0;
    }
}
