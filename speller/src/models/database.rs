use serde::{Deserialize, Serialize};
use speller_db::Attributes;

/// One line of the high-score table.
///
/// Nothing is validated: negative scores and free-form dates are stored
/// as sent.
#[derive(Serialize, Deserialize, PartialEq, Default, Debug, Clone)]
pub struct ScoreRecord {
    /// Display name of the player.
    pub name: String,
    pub score: i64,
    /// Timestamp chosen by the client.
    pub date: String,
    /// Number of words played during the session.
    #[serde(alias = "wordCount")]
    pub word_count: i64,
}

impl Attributes for ScoreRecord {
    fn score(&self) -> i64 {
        self.score
    }
}
