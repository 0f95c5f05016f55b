use serde::Deserialize;

/// Unsplash photo search answer.
#[derive(Deserialize, Debug)]
pub struct ImageSearch {
    #[serde(default)]
    pub results: Vec<Photo>,
}

#[derive(Deserialize, Debug)]
pub struct Photo {
    pub urls: PhotoUrls,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct PhotoUrls {
    pub small: String,
    pub regular: Option<String>,
}

impl ImageSearch {
    pub fn first(self) -> Option<String> {
        self.results.into_iter().next().map(|photo| photo.urls.small)
    }
}

/// One dictionary entry, as returned by dictionaryapi.dev.
#[derive(Deserialize, Debug)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct Definition {
    pub definition: Option<String>,
    pub example: Option<String>,
}

/// First usage example found across all entries.
pub fn first_example(entries: &[DictionaryEntry]) -> Option<&str> {
    entries
        .iter()
        .flat_map(|entry| &entry.meanings)
        .flat_map(|meaning| &meaning.definitions)
        .filter_map(|definition| definition.example.as_deref())
        .find(|example| !example.trim().is_empty())
}
