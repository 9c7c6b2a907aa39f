//! Parser for the IMDB "top 1000" CSV layout.
//!
//! Header:
//! `Poster_Link,Series_Title,Released_Year,Certificate,Runtime,Genre,IMDB_Rating,
//!  Overview,Meta_score,Director,Star1,Star2,Star3,Star4,No_of_Votes,Gross`
//!
//! Each row becomes one [`MovieRecord`]:
//! - `Series_Title` -> title, `Released_Year` -> year
//! - `Genre` and `Director` are comma-separated lists inside one quoted field
//! - `Star1..Star4` -> actors
//! - `Poster_Link`, `Runtime` ("142 min"), `IMDB_Rating`, `Overview` -> payload
//! - `Certificate`, `Meta_score`, `No_of_Votes`, `Gross` are dropped
//! - any other column is kept in the payload as text

use crate::error::{DataLoadError, Result};
use crate::types::{fields, AttributeValue, MovieRecord, Payload, Year};
use rayon::prelude::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::warn;

const TITLE_COLUMN: &str = "Series_Title";
const YEAR_COLUMN: &str = "Released_Year";
const GENRE_COLUMN: &str = "Genre";
const DIRECTOR_COLUMN: &str = "Director";
const RUNTIME_COLUMN: &str = "Runtime";
const RATING_COLUMN: &str = "IMDB_Rating";
const POSTER_COLUMN: &str = "Poster_Link";
const OVERVIEW_COLUMN: &str = "Overview";
const STAR_COLUMNS: [&str; 4] = ["Star1", "Star2", "Star3", "Star4"];
const DROPPED_COLUMNS: [&str; 4] = ["Certificate", "Meta_score", "No_of_Votes", "Gross"];

/// `Released_Year` value of the one mislabelled row in the public dataset
const MISLABELLED_YEAR: &str = "PG";

/// A row split into fields, tagged with the line it starts on
#[derive(Debug)]
struct RawRow {
    line: usize,
    fields: Vec<String>,
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnMap {
    width: usize,
    title: usize,
    year: usize,
    genre: usize,
    director: usize,
    runtime: Option<usize>,
    rating: Option<usize>,
    poster: Option<usize>,
    overview: Option<usize>,
    stars: Vec<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnMap {
    fn from_header(header: &[String], file: &str) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| DataLoadError::MissingColumn {
                column: name.to_string(),
                file: file.to_string(),
            })
        };

        let known: Vec<&str> = [
            TITLE_COLUMN,
            YEAR_COLUMN,
            GENRE_COLUMN,
            DIRECTOR_COLUMN,
            RUNTIME_COLUMN,
            RATING_COLUMN,
            POSTER_COLUMN,
            OVERVIEW_COLUMN,
        ]
        .into_iter()
        .chain(STAR_COLUMNS)
        .chain(DROPPED_COLUMNS)
        .collect();

        let extra = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !known.contains(&name.as_str()))
            .map(|(idx, name)| (idx, name.clone()))
            .collect();

        Ok(Self {
            width: header.len(),
            title: require(TITLE_COLUMN)?,
            year: require(YEAR_COLUMN)?,
            genre: require(GENRE_COLUMN)?,
            director: require(DIRECTOR_COLUMN)?,
            runtime: find(RUNTIME_COLUMN),
            rating: find(RATING_COLUMN),
            poster: find(POSTER_COLUMN),
            overview: find(OVERVIEW_COLUMN),
            stars: STAR_COLUMNS.iter().filter_map(|name| find(*name)).collect(),
            extra,
        })
    }
}

/// Parse the movie CSV at `path`
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movies_from_str(&content, &file_name)
}

/// Parse CSV content already held in memory
///
/// `file` is only used to label errors.
pub fn parse_movies_from_str(content: &str, file: &str) -> Result<Vec<MovieRecord>> {
    let mut rows = split_rows(content, file)?.into_iter();

    let header = match rows.next() {
        Some(row) => row,
        None => return Ok(Vec::new()),
    };
    let header: Vec<String> = header
        .fields
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let columns = ColumnMap::from_header(&header, file)?;

    // Rows are independent, so parse them in parallel.
    // Collecting an indexed parallel iterator keeps file order.
    let rows: Vec<RawRow> = rows.collect();
    let parsed: Vec<Option<MovieRecord>> = rows
        .par_iter()
        .map(|row| parse_row(row, &columns, file))
        .collect::<Result<_>>()?;

    Ok(parsed.into_iter().flatten().collect())
}

/// Split CSV text into rows of fields.
///
/// Handles quoted fields containing commas, doubled quotes and line breaks.
/// Blank lines are skipped.
fn split_rows(content: &str, file: &str) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut has_content = false;
    let mut line = 1;
    let mut row_start = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                has_content = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                has_content = true;
            }
            '\r' => {}
            '\n' => {
                if has_content {
                    fields.push(std::mem::take(&mut field));
                    rows.push(RawRow {
                        line: row_start,
                        fields: std::mem::take(&mut fields),
                    });
                } else {
                    field.clear();
                }
                line += 1;
                row_start = line;
                has_content = false;
            }
            _ => {
                if !c.is_whitespace() {
                    has_content = true;
                }
                field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: row_start,
            reason: "Unterminated quoted field".to_string(),
        });
    }
    if has_content {
        fields.push(field);
        rows.push(RawRow {
            line: row_start,
            fields,
        });
    }

    Ok(rows)
}

/// Turn one CSV row into a record.
///
/// Returns `Ok(None)` for rows that are deliberately skipped.
fn parse_row(row: &RawRow, columns: &ColumnMap, file: &str) -> Result<Option<MovieRecord>> {
    if row.fields.len() != columns.width {
        return Err(DataLoadError::FieldCountMismatch {
            expected: columns.width,
            found: row.fields.len(),
            line: row.line,
        });
    }
    let get = |idx: usize| row.fields[idx].trim();

    let title = get(columns.title);
    if title.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: row.line,
            reason: "Missing title".to_string(),
        });
    }

    let year_str = get(columns.year);
    if year_str == MISLABELLED_YEAR {
        warn!(line = row.line, title, "Skipping row with mislabelled release year");
        return Ok(None);
    }
    let year = parse_year(year_str, row.line)?;

    let mut payload = Payload::new();
    if let Some(idx) = columns.poster {
        insert_text(&mut payload, fields::POSTER, get(idx));
    }
    if let Some(idx) = columns.overview {
        insert_text(&mut payload, fields::OVERVIEW, get(idx));
    }
    if let Some(idx) = columns.runtime {
        if let Some(runtime) = parse_runtime(get(idx), row.line)? {
            payload.insert(fields::RUNTIME.to_string(), AttributeValue::Integer(runtime));
        }
    }
    if let Some(idx) = columns.rating {
        if let Some(rating) = parse_rating(get(idx), row.line)? {
            payload.insert(fields::RATING.to_string(), AttributeValue::Float(rating));
        }
    }
    for (idx, name) in &columns.extra {
        insert_text(&mut payload, name, get(*idx));
    }

    Ok(Some(MovieRecord {
        title: title.to_string(),
        year,
        genres: split_list(get(columns.genre)),
        directors: split_list(get(columns.director)),
        actors: columns
            .stars
            .iter()
            .map(|&idx| get(idx))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        payload,
    }))
}

/// Empty year means "no year"; the graph builder decides what to do with it
fn parse_year(s: &str, line: usize) -> Result<Option<Year>> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| DataLoadError::InvalidValue {
            field: YEAR_COLUMN.to_string(),
            value: s.to_string(),
            line,
        })
}

/// Parse runtime in minutes
///
/// Example: "142 min" -> Some(142)
fn parse_runtime(s: &str, line: usize) -> Result<Option<i64>> {
    let minutes = s.trim_end_matches("min").trim();
    if minutes.is_empty() {
        return Ok(None);
    }
    minutes
        .parse()
        .map(Some)
        .map_err(|_| DataLoadError::InvalidValue {
            field: RUNTIME_COLUMN.to_string(),
            value: s.to_string(),
            line,
        })
}

fn parse_rating(s: &str, line: usize) -> Result<Option<f64>> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| DataLoadError::InvalidValue {
            field: RATING_COLUMN.to_string(),
            value: s.to_string(),
            line,
        })
}

/// Split a comma-separated list field
///
/// Example: "Biography, Crime, Drama" -> ["Biography", "Crime", "Drama"]
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn insert_text(payload: &mut Payload, key: &str, value: &str) {
    if !value.is_empty() {
        payload.insert(key.to_string(), AttributeValue::Text(value.to_string()));
    }
}
