use serde::{Deserialize, Serialize};

/// Body of `POST /words`.
#[derive(Debug, Deserialize)]
pub struct WordList {
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Loaded {
    pub status: &'static str,
    pub word_count: usize,
}

/// Answer of `GET /word`, with the enrichment found for it.
#[derive(Debug, Serialize, PartialEq)]
pub struct Word {
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Example sentence with the word hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    /// Same sentence, unmasked, meant to be spoken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sentence: Option<String>,
}

/// Query string of `GET /audio/:text`.
#[derive(Debug, Deserialize)]
pub struct Audio {
    /// Whether to speak the prompt before the text.
    #[serde(default = "default_prompt")]
    pub prompt: bool,
    /// Cache buster, ignored.
    #[serde(rename = "t")]
    pub _t: Option<String>,
}

fn default_prompt() -> bool {
    true
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Acknowledge {
    pub status: &'static str,
}

impl Default for Acknowledge {
    fn default() -> Self {
        Self { status: "success" }
    }
}

/// Body sent with every failed request.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub detail: String,
}
