//! In-memory quote store for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::seq::IteratorRandom;

use crate::error::{StoreError, StoreResult};
use crate::{Quote, QuoteStore};

/// Quote store holding its rows in a map, with no external backend.
pub struct MemoryQuoteStore {
    quotes: HashMap<i64, Quote>,
}

impl MemoryQuoteStore {
    /// Build a store from an arbitrary set of quotes.
    pub fn new(quotes: impl IntoIterator<Item = Quote>) -> Self {
        Self {
            quotes: quotes.into_iter().map(|q| (q.id, q)).collect(),
        }
    }

    /// Build a store seeded with the bundled sample quotes.
    pub fn with_sample_quotes() -> Self {
        Self::new(sample_quotes())
    }

    /// Number of quotes held.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the store holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn quote_by_id(&self, id: i64) -> StoreResult<Quote> {
        self.quotes.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn random_quote(&self) -> StoreResult<Quote> {
        let mut rng = rand::thread_rng();
        self.quotes
            .values()
            .choose(&mut rng)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

/// The quote set bundled with the service, on the theme of age.
fn sample_quotes() -> Vec<Quote> {
    let rows: [(i64, &str, i64); 20] = [
        (1, "Age is an issue of mind over matter. If you don't mind, it doesn't matter.", 1),
        (2, "Anyone who stops learning is old, whether at twenty or eighty. Anyone who keeps learning stays young. The greatest thing in life is to keep your mind young.", 2),
        (3, "Wrinkles should merely indicate where smiles have been.", 3),
        (4, "True terror is to wake up one morning and discover that your high school class is running the country.", 4),
        (5, "A diplomat is a man who always remembers a woman's birthday but never remembers her age.", 5),
        (6, "As I grow older, I pay less attention to what men say. I just watch what they do.", 6),
        (7, "How incessant and great are the ills with which a prolonged old age is replete.", 7),
        (8, "Old age, believe me, is a good and pleasant thing. It is true you are gently shouldered off the stage, but then you are given such a comfortable front stall as spectator.", 8),
        (9, "Old age has deformities enough of its own. It should never add to them the deformity of vice.", 9),
        (10, "Nobody grows old merely by living a number of years. We grow old by deserting our ideals. Years may wrinkle the skin, but to give up enthusiasm wrinkles the soul.", 10),
        (11, "An archaeologist is the best husband a woman can have. The older she gets the more interested he is in her.", 11),
        (12, "All diseases run into one, old age.", 12),
        (13, "Bashfulness is an ornament to youth, but a reproach to old age.", 13),
        (14, "Like everyone else who makes the mistake of getting older, I begin each day with coffee and obituaries.", 14),
        (15, "Age appears to be best in four things old wood best to burn, old wine to drink, old friends to trust, and old authors to read.", 15),
        (16, "None are so old as those who have outlived enthusiasm.", 16),
        (17, "Every man over forty is a scoundrel.", 17),
        (18, "Forty is the old age of youth fifty the youth of old age.", 18),
        (19, "You can't help getting older, but you don't have to get old.", 19),
        (20, "Alas, after a certain age every man is responsible for his face.", 20),
    ];

    rows.into_iter()
        .map(|(id, message, author_id)| Quote {
            id,
            message: message.to_string(),
            author_id,
        })
        .collect()
}
