//! Batch selection: the rotating working subset of the pool.

use crate::token::Token;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// A token paired with the reading chosen for it at draw time. The reading is
/// fixed for the item's lifetime in the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchItem {
    pub token: Token,
    pub target: String,
}

/// An ordered batch of practice items and the cursor of the active one.
/// `cursor == len` means the batch is exhausted and must be replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    items: Vec<BatchItem>,
    cursor: usize,
}

impl Batch {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draw a new batch from the pool.
    ///
    /// Tokens present in the previous batch are excluded when enough others
    /// remain; with a small pool the full pool is reused, so immediate-repeat
    /// avoidance is a soft preference, not a guarantee. The eligible set is
    /// shuffled uniformly and the first `size` items taken, each with a
    /// freshly rolled reading.
    pub fn draw<R: Rng>(pool: &[Token], size: usize, previous: &Batch, rng: &mut R) -> Batch {
        let eligible = pool
            .iter()
            .filter(|t| !previous.items.iter().any(|item| item.token == **t))
            .collect_vec();
        let mut eligible = if eligible.len() >= size {
            eligible
        } else {
            pool.iter().collect_vec()
        };

        eligible.shuffle(rng);

        let items = eligible
            .into_iter()
            .filter_map(|token| {
                token.select_reading(rng).map(|target| BatchItem {
                    token: token.clone(),
                    target,
                })
            })
            .take(size)
            .collect_vec();

        Batch { items, cursor: 0 }
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The item under the cursor, or None once the batch is exhausted.
    pub fn active(&self) -> Option<&BatchItem> {
        self.items.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn pool(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::Plain(w.to_string())).collect()
    }

    #[test]
    fn draw_respects_batch_size() {
        let pool = pool(&["ねこ", "いぬ", "さかな", "とり", "うま"]);
        let batch = Batch::draw(&pool, 3, &Batch::empty(), &mut thread_rng());
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.cursor(), 0);
        assert!(!batch.is_exhausted());
    }

    #[test]
    fn small_pool_caps_batch_length() {
        let pool = pool(&["ねこ", "いぬ"]);
        let batch = Batch::draw(&pool, 10, &Batch::empty(), &mut thread_rng());
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn draw_excludes_previous_batch_when_possible() {
        let pool = pool(&["あ", "い", "う", "え", "お", "か", "き", "く"]);
        let mut rng = thread_rng();
        let first = Batch::draw(&pool, 4, &Batch::empty(), &mut rng);
        let second = Batch::draw(&pool, 4, &first, &mut rng);

        for item in second.items() {
            assert!(
                !first.items().iter().any(|p| p.token == item.token),
                "token repeated immediately despite a large enough pool"
            );
        }
    }

    #[test]
    fn exhausted_pool_falls_back_to_full_pool() {
        let pool = pool(&["ねこ", "いぬ"]);
        let mut rng = thread_rng();
        let first = Batch::draw(&pool, 2, &Batch::empty(), &mut rng);
        let second = Batch::draw(&pool, 2, &first, &mut rng);
        // progress is guaranteed even though every token repeats
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn batch_length_invariant_over_many_draws() {
        let pool = pool(&["あ", "い", "う", "え", "お"]);
        let mut rng = thread_rng();
        let mut prev = Batch::empty();
        for _ in 0..50 {
            let batch = Batch::draw(&pool, 3, &prev, &mut rng);
            assert!(!batch.is_empty());
            assert!(batch.len() <= 3);
            prev = batch;
        }
    }

    #[test]
    fn cursor_advances_to_exhaustion() {
        let pool = pool(&["ねこ", "いぬ"]);
        let mut batch = Batch::draw(&pool, 2, &Batch::empty(), &mut thread_rng());

        assert!(batch.active().is_some());
        batch.advance();
        assert_eq!(batch.cursor(), 1);
        batch.advance();
        assert!(batch.is_exhausted());
        assert!(batch.active().is_none());
        // advancing past the end stays clamped
        batch.advance();
        assert_eq!(batch.cursor(), 2);
    }

    #[test]
    fn plain_targets_equal_their_words() {
        let pool = pool(&["ねこ"]);
        let batch = Batch::draw(&pool, 1, &Batch::empty(), &mut thread_rng());
        assert_eq!(batch.items()[0].target, "ねこ");
    }
}
