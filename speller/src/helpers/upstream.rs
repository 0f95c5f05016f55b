use crate::helpers::tokenizer::{chunk, mask, normalize, MAX_CHUNK_CHARS};
use crate::models::{
    config::{Config, Images, Sentences, Speech},
    upstream::{first_example, DictionaryEntry, ImageSearch},
};
use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode, Url};
use speller_error::{Error, ErrorType, UpstreamError};
use std::time::Duration;
use tracing::{debug, warn};

/// Example sentence attached to a drawn word.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Sentence with the word replaced by underscores.
    pub display: String,
    /// Original sentence, to be spoken.
    pub audio: String,
}

/// Clients of the outbound services: speech, images and dictionary.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    speech: Speech,
    images: Images,
    sentences: Sentences,
}

impl Upstream {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs()))
                .build()?,
            speech: config.speech.clone(),
            images: config.images.clone(),
            sentences: config.sentences.clone(),
        })
    }

    /// Prompt spoken before a word.
    pub fn prompt(&self) -> &str {
        &self.speech.prompt
    }

    /// Synthesizes `text` into MP3 bytes.
    ///
    /// Text is sent in pieces the endpoint accepts and the answers are
    /// concatenated.
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, Error> {
        let chunks = chunk(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::new(
                ErrorType::Upstream(UpstreamError::Request),
                None,
                Some("nothing to synthesize".to_string()),
            ));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, piece) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = piece.chars().count().to_string();

            let response = self
                .client
                .get(&self.speech.url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", self.speech.lang.as_str()),
                    ("q", piece.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .map_err(|error| {
                    Error::new(
                        ErrorType::Upstream(UpstreamError::Request),
                        Some(Box::new(error)),
                        Some("speech synthesis".to_string()),
                    )
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::new(
                    ErrorType::Upstream(UpstreamError::Status(status.as_u16())),
                    None,
                    Some("speech synthesis".to_string()),
                ));
            }

            audio.extend_from_slice(&response.bytes().await.map_err(|error| {
                Error::new(
                    ErrorType::Upstream(UpstreamError::Decoding),
                    Some(Box::new(error)),
                    Some("reading speech audio".to_string()),
                )
            })?);
        }

        debug!(chunks = chunks.len(), bytes = audio.len(), "Speech synthesized.");

        Ok(audio)
    }

    /// Looks up an image and an example sentence at the same time.
    pub async fn enrich(&self, word: &str) -> (Option<String>, Option<Example>) {
        tokio::join!(self.image(word), self.example(word))
    }

    /// URL of an image illustrating `word`, when one is found.
    pub async fn image(&self, word: &str) -> Option<String> {
        let key = match (&self.images.access_key, self.images.enabled) {
            (Some(key), true) => key,
            _ => return None,
        };

        self.search_image(word, key).await.unwrap_or_else(|error| {
            warn!(word, "Image lookup failed: {}", error);
            None
        })
    }

    async fn search_image(&self, word: &str, key: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.images.url)
            .query(&[("query", word), ("per_page", "1"), ("client_id", key)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ImageSearch>().await?.first())
    }

    /// Example sentence using `word`, masked for display.
    pub async fn example(&self, word: &str) -> Option<Example> {
        if !self.sentences.enabled {
            return None;
        }

        self.lookup_example(word).await.unwrap_or_else(|error| {
            warn!(word, "Example sentence lookup failed: {}", error);
            None
        })
    }

    async fn lookup_example(&self, word: &str) -> Result<Option<Example>> {
        let mut url = Url::parse(&self.sentences.url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be a base", self.sentences.url))?
            .pop_if_empty()
            .push(word.trim());

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(word, "No dictionary entry.");
            return Ok(None);
        }

        let entries = response
            .error_for_status()?
            .json::<Vec<DictionaryEntry>>()
            .await?;

        Ok(first_example(&entries).map(|sentence| example(sentence, word)))
    }
}

/// Builds the display and spoken forms of an example sentence.
pub fn example(sentence: &str, word: &str) -> Example {
    let audio = normalize(sentence);

    Example {
        display: mask(&audio, word),
        audio,
    }
}
