//! Song catalog loading.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SONG_DATA: &str = include_str!("../data/songs.json");

/// A playable song with its raw difficulty rating.
///
/// `difficulty` is kept exactly as the source provided it; consumers clamp it
/// through [`crate::difficulty::clamp_difficulty`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub difficulty: i32,
}

impl Song {
    #[must_use]
    pub fn new(title: impl Into<String>, difficulty: i32) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            artist: String::new(),
            difficulty,
        }
    }
}

/// Errors raised while parsing catalog text.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("song catalog JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("song catalog CSV line {line}: {reason}")]
    Csv { line: usize, reason: String },
}

/// Ordered list of songs available to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SongCatalog(pub Vec<Song>);

impl SongCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self(songs)
    }

    /// Load a catalog from a JSON array of songs.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into songs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self(serde_json::from_str(json)?))
    }

    /// Load a catalog from the CSV layout written by the song fetch script
    /// (`id,title,artist,album,genre,difficulty,length,year`).
    ///
    /// Columns are located by header name. Only `title` is required; a
    /// missing or unparsable difficulty reads as 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the header lacks a `title` column, a quoted field is
    /// left open, or a row has no title value.
    pub fn from_csv(text: &str) -> Result<Self, CatalogError> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());
        let Some((header_idx, header_line)) = lines.next() else {
            return Ok(Self::empty());
        };
        let header = split_csv_record(header_line).map_err(|reason| CatalogError::Csv {
            line: header_idx + 1,
            reason,
        })?;
        let column = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let title_col = column("title").ok_or_else(|| CatalogError::Csv {
            line: header_idx + 1,
            reason: String::from("header has no title column"),
        })?;
        let id_col = column("id");
        let artist_col = column("artist");
        let difficulty_col = column("difficulty");

        let mut songs = Vec::new();
        for (idx, line) in lines {
            let fields = split_csv_record(line).map_err(|reason| CatalogError::Csv {
                line: idx + 1,
                reason,
            })?;
            let field = |col: Option<usize>| {
                col.and_then(|c| fields.get(c))
                    .map(|value| value.trim().to_string())
                    .unwrap_or_default()
            };
            let title = field(Some(title_col));
            if title.is_empty() {
                return Err(CatalogError::Csv {
                    line: idx + 1,
                    reason: String::from("missing title"),
                });
            }
            songs.push(Song {
                id: field(id_col),
                title,
                artist: field(artist_col),
                difficulty: crate::difficulty::parse_difficulty(&field(difficulty_col)),
            });
        }
        Ok(Self(songs))
    }

    /// Catalog bundled with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SONG_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn split_csv_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if in_quotes {
        return Err(String::from("unterminated quoted field"));
    }
    fields.push(current);
    Ok(fields)
}
