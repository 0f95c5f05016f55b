use serde::Deserialize;

/// Google Translate speech endpoint, answers with MP3 audio.
const SPEECH_URL: &str = "https://translate.google.com/translate_tts";
const IMAGES_URL: &str = "https://api.unsplash.com/search/photos";
const SENTENCES_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// The data in the configuration file for setting up Speller.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Flat JSON file holding the high scores.
    pub scores_path: Option<String>,
    pub max_scores: Option<usize>,
    /// Timeout for every outbound request, in seconds.
    pub timeout_secs: Option<u64>,
    pub speech: Speech,
    pub images: Images,
    pub sentences: Sentences,
}

impl Config {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8000)
    }

    pub fn scores_path(&self) -> &str {
        self.scores_path
            .as_deref()
            .unwrap_or(speller_db::SOURCE_FILE)
    }

    pub fn max_scores(&self) -> usize {
        self.max_scores.unwrap_or(speller_db::MAX_ENTRIES)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(10)
    }
}

/// Text-to-speech settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Speech {
    pub url: String,
    pub lang: String,
    /// Spoken before the word when the client asks for a prompt.
    pub prompt: String,
}

impl Default for Speech {
    fn default() -> Self {
        Self {
            url: SPEECH_URL.to_string(),
            lang: "en".to_string(),
            prompt: "Your word is...".to_string(),
        }
    }
}

/// Illustrative image lookup, through Unsplash.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Images {
    pub enabled: bool,
    pub url: String,
    /// Without a key, lookups are skipped.
    pub access_key: Option<String>,
}

impl Default for Images {
    fn default() -> Self {
        Self {
            enabled: true,
            url: IMAGES_URL.to_string(),
            access_key: None,
        }
    }
}

/// Example sentence lookup, through a dictionary API.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Sentences {
    pub enabled: bool,
    pub url: String,
}

impl Default for Sentences {
    fn default() -> Self {
        Self {
            enabled: true,
            url: SENTENCES_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 8000);
        assert_eq!(config.scores_path(), "./highscores.json");
        assert_eq!(config.max_scores(), 10);
        assert_eq!(config.speech.lang, "en");
        assert!(config.images.enabled);
        assert!(config.images.access_key.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = serde_yaml::from_str(
            r#"
port: 9000
scores_path: /var/lib/speller/scores.json
images:
  access_key: secret
sentences:
  enabled: false
"#,
        )
        .unwrap();

        assert_eq!(config.port(), 9000);
        assert_eq!(config.scores_path(), "/var/lib/speller/scores.json");
        assert_eq!(config.images.access_key.as_deref(), Some("secret"));
        assert_eq!(config.images.url, IMAGES_URL);
        assert!(!config.sentences.enabled);
        assert_eq!(config.speech.prompt, "Your word is...");
    }
}
