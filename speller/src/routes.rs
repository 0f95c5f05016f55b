use crate::helpers::{self, tokenizer::utterance, upstream::Upstream};
use crate::models::{
    database::ScoreRecord,
    query::{Acknowledge, Audio, Failure, Loaded, Word, WordList},
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use speller_algorithm::rotation::WordSet;
use speller_db::Instance;
use speller_error::{Error, ErrorType};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// State shared by every handler.
pub struct AppState {
    pub words: Mutex<WordSet>,
    pub ledger: Arc<RwLock<Instance<ScoreRecord>>>,
    pub upstream: Upstream,
}

/// Error answered to the client as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new<T: ToString>(status: StatusCode, detail: T) -> Self {
        Self {
            status,
            detail: detail.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = match error.etype {
            ErrorType::NotAvailable => StatusCode::NOT_FOUND,
            ErrorType::Upstream(_) => StatusCode::BAD_GATEWAY,
            ErrorType::Persistence(_) | ErrorType::Unspecified => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        Self::new(status, error.etype)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Failure { detail: self.detail })).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/words", post(load_words))
        .route("/word", get(draw_word))
        .route("/audio/:text", get(audio))
        .route("/scores", get(list_scores).post(submit_score))
        .layer(cors)
        .with_state(state)
}

/// POST /words - replace the word list.
pub async fn load_words(
    State(state): State<Arc<AppState>>,
    Json(list): Json<WordList>,
) -> Json<Loaded> {
    let word_count = state.words.lock().await.load(list.words);
    info!(word_count, "Word list loaded.");

    Json(Loaded {
        status: "success",
        word_count,
    })
}

/// GET /word - draw the next word, with its image and example sentence.
pub async fn draw_word(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Word>, ApiError> {
    // The lock is released before any outbound call.
    let word = state.words.lock().await.draw()?;
    let (image_url, example) = state.upstream.enrich(&word).await;
    let (sentence, audio_sentence) = match example {
        Some(example) => (Some(example.display), Some(example.audio)),
        None => (None, None),
    };

    Ok(Json(Word {
        word,
        image_url,
        sentence,
        audio_sentence,
    }))
}

/// GET /audio/:text - speak a word or a sentence.
pub async fn audio(
    State(state): State<Arc<AppState>>,
    Path(text): Path<String>,
    Query(query): Query<Audio>,
) -> Result<Response, ApiError> {
    let speech = utterance(&text, query.prompt.then(|| state.upstream.prompt()));
    info!(text, speech, "Generating audio.");

    let audio = state.upstream.speak(&speech).await.map_err(|err| {
        error!(text, "Error generating audio: {}", err);
        ApiError::new(
            StatusCode::BAD_GATEWAY,
            format!("Failed to generate audio: {}", err.etype),
        )
    })?;

    Ok((audio_headers(&text), audio).into_response())
}

fn audio_headers(text: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename={}.mp3", text))
            .unwrap_or_else(|_| {
                HeaderValue::from_static("attachment; filename=audio.mp3")
            }),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));

    headers
}

/// POST /scores - record a score.
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    Json(record): Json<ScoreRecord>,
) -> Result<Json<Acknowledge>, ApiError> {
    helpers::database::submit(Arc::clone(&state.ledger), record).await?;

    Ok(Json(Acknowledge::default()))
}

/// GET /scores - the high-score table, best first.
pub async fn list_scores(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ScoreRecord>> {
    Json(helpers::database::list(Arc::clone(&state.ledger)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::Config;
    use speller_error::{PersistenceError, UpstreamError};
    use std::collections::HashSet;

    fn state(scores: std::path::PathBuf) -> Arc<AppState> {
        let mut config = Config::default();
        config.images.enabled = false;
        config.sentences.enabled = false;

        Arc::new(AppState {
            words: Mutex::new(WordSet::with_seed(8)),
            ledger: Arc::new(RwLock::new(
                speller_db::Builder::default().path(scores).build(),
            )),
            upstream: Upstream::new(&config).unwrap(),
        })
    }

    fn temporary_scores() -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("speller-scores-{}.json", uuid::Uuid::new_v4()))
    }

    fn record(name: &str, score: i64) -> ScoreRecord {
        ScoreRecord {
            name: name.to_string(),
            score,
            date: "2024-05-01T10:00:00Z".to_string(),
            word_count: 10,
        }
    }

    #[tokio::test]
    async fn test_draw_without_words() {
        let state = state(temporary_scores());

        let error = draw_word(State(state)).await.unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.detail, "No words available");
    }

    #[tokio::test]
    async fn test_load_then_draw_cycle() {
        let state = state(temporary_scores());

        let Json(loaded) = load_words(
            State(Arc::clone(&state)),
            Json(WordList {
                words: vec!["cat".to_string(), "dog".to_string()],
            }),
        )
        .await;
        assert_eq!(
            loaded,
            Loaded {
                status: "success",
                word_count: 2
            }
        );

        let mut drawn = HashSet::new();
        for _ in 0..2 {
            let Json(word) = draw_word(State(Arc::clone(&state))).await.unwrap();
            assert!(word.image_url.is_none());
            assert!(word.sentence.is_none());
            drawn.insert(word.word);
        }
        assert_eq!(drawn, HashSet::from(["cat".to_string(), "dog".to_string()]));

        let Json(third) = draw_word(State(state)).await.unwrap();
        assert!(third.word == "cat" || third.word == "dog");
    }

    #[tokio::test]
    async fn test_empty_load_is_accepted() {
        let state = state(temporary_scores());

        let Json(loaded) =
            load_words(State(Arc::clone(&state)), Json(WordList { words: vec![] }))
                .await;
        assert_eq!(loaded.word_count, 0);
        assert!(draw_word(State(state)).await.is_err());
    }

    #[tokio::test]
    async fn test_scores_round_trip() {
        let path = temporary_scores();
        let state = state(path.clone());

        let Json(empty) = list_scores(State(Arc::clone(&state))).await;
        assert!(empty.is_empty());

        for (name, score) in [("A", 50), ("B", 90), ("C", 70)] {
            let Json(acknowledge) =
                submit_score(State(Arc::clone(&state)), Json(record(name, score)))
                    .await
                    .unwrap();
            assert_eq!(acknowledge.status, "success");
        }

        let Json(scores) = list_scores(State(state)).await;
        let ranking: Vec<(&str, i64)> = scores
            .iter()
            .map(|entry| (entry.name.as_str(), entry.score))
            .collect();
        assert_eq!(ranking, [("B", 90), ("C", 70), ("A", 50)]);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_submit_failure_is_visible() {
        let state = state(
            std::env::temp_dir()
                .join(format!("speller-absent-{}", uuid::Uuid::new_v4()))
                .join("scores.json"),
        );

        let error = submit_score(State(state), Json(record("A", 1)))
            .await
            .unwrap_err();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_status() {
        let upstream: ApiError = Error::new(
            ErrorType::Upstream(UpstreamError::Status(500)),
            None,
            None,
        )
        .into();
        let persistence: ApiError = Error::new(
            ErrorType::Persistence(PersistenceError::WritingError),
            None,
            None,
        )
        .into();

        assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
        assert_eq!(persistence.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::new(StatusCode::NOT_FOUND, "gone")
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_audio_headers() {
        let headers = audio_headers("cat");

        assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=cat.mp3"
        );
        assert_eq!(headers[header::EXPIRES], "0");

        assert_eq!(
            audio_headers("caf\u{e9}\n")[header::CONTENT_DISPOSITION],
            "attachment; filename=audio.mp3"
        );
    }

    #[test]
    fn test_score_record_accepts_camel_case() {
        let record: ScoreRecord = serde_json::from_str(
            r#"{"name": "Ada", "score": 12, "date": "today", "wordCount": 4}"#,
        )
        .unwrap();

        assert_eq!(record.word_count, 4);
        assert_eq!(
            serde_json::to_value(&record).unwrap()["word_count"],
            serde_json::json!(4)
        );
    }
}
