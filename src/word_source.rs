use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::WordSourceError;
use crate::runtime::AppEvent;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_API_URL: &str = "https://random-word-api.herokuapp.com/word";

/// Supplies the target words for one session.
pub trait WordSource: Send + Sync {
    fn fetch_words(&self) -> Result<Vec<String>, WordSourceError>;
}

/// Runs the source and turns any failure into an empty word list.
pub fn fetch_or_empty(source: &dyn WordSource) -> Vec<String> {
    match source.fetch_words() {
        Ok(words) => {
            debug!(count = words.len(), "fetched words");
            words
        }
        Err(err) => {
            warn!(%err, "failed to fetch words");
            Vec::new()
        }
    }
}

/// Fetches on a worker thread and posts the result, tagged with the
/// session generation, back into the event channel.
pub fn spawn_fetch(source: Arc<dyn WordSource>, generation: u64, tx: Sender<AppEvent>) {
    std::thread::spawn(move || {
        let words = fetch_or_empty(source.as_ref());
        // receiver gone means the app is shutting down
        let _ = tx.send(AppEvent::Words { generation, words });
    });
}

/// Lowercases and keeps only entries that can be typed as a single word.
fn normalize(words: Vec<String>) -> Vec<String> {
    let total = words.len();
    let kept: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && !w.contains(char::is_whitespace))
        .collect();

    if kept.len() != total {
        debug!(dropped = total - kept.len(), "dropped untypeable words");
    }
    kept
}

/// Random words from a remote word-list service that answers with a JSON
/// array of strings.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    pub url: String,
    pub count: usize,
    pub length: Option<usize>,
    pub timeout: Duration,
}

impl HttpWordSource {
    pub fn new(url: impl Into<String>, count: usize, length: Option<usize>) -> Self {
        Self {
            url: url.into(),
            count,
            length,
            timeout: Duration::from_secs(10),
        }
    }
}

impl WordSource for HttpWordSource {
    fn fetch_words(&self) -> Result<Vec<String>, WordSourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let mut request = client.get(&self.url).query(&[("number", self.count)]);
        if let Some(length) = self.length {
            request = request.query(&[("length", length)]);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WordSourceError::Status(status.as_u16()));
        }

        parse_word_list(&response.text()?)
    }
}

/// Parses a JSON array of strings.
pub fn parse_word_list(body: &str) -> Result<Vec<String>, WordSourceError> {
    let words: Vec<String> = serde_json::from_str(body)?;
    Ok(normalize(words))
}

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(name: &str) -> Result<Self, WordSourceError> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| WordSourceError::EmbeddedList(format!("{name} not found")))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordSourceError::EmbeddedList(format!("{name} is not utf-8")))?;

        Ok(serde_json::from_str(contents)?)
    }
}

/// Random words from the embedded English list, for playing offline.
#[derive(Debug, Clone)]
pub struct LocalWordSource {
    pub language: String,
    pub count: usize,
    pub length: Option<usize>,
}

impl LocalWordSource {
    pub fn new(count: usize, length: Option<usize>) -> Self {
        Self {
            language: "english".to_string(),
            count,
            length,
        }
    }
}

impl WordSource for LocalWordSource {
    fn fetch_words(&self) -> Result<Vec<String>, WordSourceError> {
        let language = Language::load(&self.language)?;
        let pool: Vec<String> = normalize(language.words)
            .into_iter()
            .filter(|w| self.length.map_or(true, |len| w.chars().count() == len))
            .collect();

        if pool.is_empty() {
            return Err(WordSourceError::NoWords(self.length.unwrap_or(0)));
        }

        // sample with replacement so any count can be served
        let mut rng = rand::thread_rng();
        Ok((0..self.count)
            .filter_map(|_| pool.choose(&mut rng).cloned())
            .collect())
    }
}

/// A fixed list, e.g. from `--prompt`.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<String>,
}

impl StaticWordSource {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words: normalize(words),
        }
    }

    pub fn from_prompt(prompt: &str) -> Self {
        Self::new(prompt.split_whitespace().map(str::to_owned).collect())
    }
}

impl WordSource for StaticWordSource {
    fn fetch_words(&self) -> Result<Vec<String>, WordSourceError> {
        Ok(self.words.clone())
    }
}
