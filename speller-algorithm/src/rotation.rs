use ahash::AHashSet;
use speller_error::{Error, ErrorType};

/// Structure holding the active word list and the words drawn in the
/// current cycle.
///
/// Membership in the drawn-set is checked by value, so a list holding the
/// same word twice is exhausted once each distinct value has been drawn.
#[derive(Debug, Clone)]
pub struct WordSet {
    /// Words set by the latest [`WordSet::load`], duplicates included.
    words: Vec<String>,
    /// Words already handed out since the last reset.
    drawn: AHashSet<String>,
    /// Number of distinct values in `words`.
    distinct: usize,
    rng: fastrand::Rng,
}

impl Default for WordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSet {
    /// Creates an empty set seeded from entropy.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Creates an empty set with a fixed seed, draws become reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            words: Vec::new(),
            drawn: AHashSet::new(),
            distinct: 0,
            rng,
        }
    }

    /// Replaces the whole list and starts a new cycle.
    /// An empty list is accepted. Returns the number of words loaded.
    pub fn load<I, T>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self.distinct = self.words.iter().collect::<AHashSet<_>>().len();
        self.reset();

        self.words.len()
    }

    /// Starts a new cycle. The list itself is left untouched.
    pub fn reset(&mut self) {
        self.drawn.clear();
    }

    /// Hands out a word not yet drawn in the current cycle.
    ///
    /// Once every distinct word has been drawn, the cycle restarts before
    /// picking. Fails with [`ErrorType::NotAvailable`] when no word is
    /// loaded.
    pub fn draw(&mut self) -> Result<String, Error> {
        if self.words.is_empty() {
            return Err(Error::new(
                ErrorType::NotAvailable,
                None,
                Some("word list is empty".to_string()),
            ));
        }

        if self.drawn.len() >= self.distinct {
            self.reset();
        }

        let candidates: Vec<&String> = self
            .words
            .iter()
            .filter(|word| !self.drawn.contains(*word))
            .collect();

        if candidates.is_empty() {
            return Err(Error::new(
                ErrorType::NotAvailable,
                None,
                Some("no candidate left after cycle reset".to_string()),
            ));
        }

        let word = candidates[self.rng.usize(..candidates.len())].clone();
        self.drawn.insert(word.clone());

        Ok(word)
    }

    /// Number of words loaded, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word is loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct words that can still be drawn in this cycle.
    pub fn remaining(&self) -> usize {
        self.distinct - self.drawn.len()
    }

    /// The loaded list, in load order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
