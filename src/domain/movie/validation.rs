//! Full and partial validation of movie payloads.
//!
//! Both entry points share the per-field rules below. Failures are returned as a
//! field-keyed list of [`Issue`]s so the HTTP layer can render them verbatim.

use super::{MoviePatch, NewMovie, DEFAULT_RATE, KNOWN_GENRES};
use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use url::Url;
use utoipa::ToSchema;

/// Year of the first known film.
pub const MIN_YEAR: i64 = 1888;
/// How far past the current year a release may be scheduled.
pub const FUTURE_YEAR_MARGIN: i64 = 5;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    InvalidEnumValue,
}

/// One violated constraint. `path` names the offending field (and array index, for genres).
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    fn at(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            path: vec![field.to_string()],
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<Issue>,
}

impl ValidationErrors {
    /// True if any issue points at `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues
            .iter()
            .any(|i| i.path.first().map(String::as_str) == Some(field))
    }
}

// Most rules report a single issue; `genres` reports one per bad element.
type Rule<T> = fn(&str, &JsonValue) -> Result<T, Vec<Issue>>;

/// Validates a create payload. Every field except `rate` is required; unknown keys are dropped.
pub fn validate_movie(candidate: &JsonValue) -> Result<NewMovie, ValidationErrors> {
    let obj = as_object(candidate)?;
    let mut issues = Vec::new();

    let title = required(obj, "title", text, &mut issues);
    let year = required(obj, "year", year, &mut issues);
    let director = required(obj, "director", text, &mut issues);
    let duration = required(obj, "duration", duration, &mut issues);
    let poster = required(obj, "poster", poster, &mut issues);
    let genre = required(obj, "genre", genres, &mut issues);
    let rate = optional(obj, "rate", rate, &mut issues).unwrap_or(DEFAULT_RATE);

    match (title, year, director, duration, poster, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(poster), Some(genre))
            if issues.is_empty() =>
        {
            Ok(NewMovie {
                title,
                year,
                director,
                duration,
                poster,
                genre,
                rate,
            })
        }
        _ => Err(ValidationErrors { issues }),
    }
}

/// Validates an update payload: any subset of fields, each checked with the create rule.
/// An empty object is a valid (empty) patch.
pub fn validate_partial_movie(candidate: &JsonValue) -> Result<MoviePatch, ValidationErrors> {
    let obj = as_object(candidate)?;
    let mut issues = Vec::new();

    let patch = MoviePatch {
        title: optional(obj, "title", text, &mut issues),
        year: optional(obj, "year", year, &mut issues),
        director: optional(obj, "director", text, &mut issues),
        duration: optional(obj, "duration", duration, &mut issues),
        poster: optional(obj, "poster", poster, &mut issues),
        genre: optional(obj, "genre", genres, &mut issues),
        rate: optional(obj, "rate", rate, &mut issues),
    };

    if issues.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationErrors { issues })
    }
}

fn as_object(candidate: &JsonValue) -> Result<&Map<String, JsonValue>, ValidationErrors> {
    candidate.as_object().ok_or_else(|| ValidationErrors {
        issues: vec![Issue {
            code: IssueCode::InvalidType,
            path: Vec::new(),
            message: format!("Expected object, received {}", type_name(candidate)),
        }],
    })
}

// `null` is treated the same as a missing key.
fn present<'a>(obj: &'a Map<String, JsonValue>, name: &str) -> Option<&'a JsonValue> {
    obj.get(name).filter(|v| !v.is_null())
}

fn required<T>(
    obj: &Map<String, JsonValue>,
    name: &str,
    rule: Rule<T>,
    issues: &mut Vec<Issue>,
) -> Option<T> {
    match present(obj, name) {
        Some(value) => collect(rule(name, value), issues),
        None => {
            issues.push(Issue::at(
                IssueCode::Required,
                name,
                format!("Movie {name} is required"),
            ));
            None
        }
    }
}

fn optional<T>(
    obj: &Map<String, JsonValue>,
    name: &str,
    rule: Rule<T>,
    issues: &mut Vec<Issue>,
) -> Option<T> {
    present(obj, name).and_then(|value| collect(rule(name, value), issues))
}

fn collect<T>(result: Result<T, Vec<Issue>>, issues: &mut Vec<Issue>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(mut found) => {
            issues.append(&mut found);
            None
        }
    }
}

fn reject(code: IssueCode, field: &str, message: impl Into<String>) -> Vec<Issue> {
    vec![Issue::at(code, field, message)]
}

fn type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn text(name: &str, v: &JsonValue) -> Result<String, Vec<Issue>> {
    let s = v.as_str().ok_or_else(|| {
        reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be a string, received {}", type_name(v)),
        )
    })?;
    let s = s.trim();
    if s.is_empty() {
        return Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} must not be empty"),
        ));
    }
    Ok(s.to_string())
}

// Accepts `2010` as well as `2010.0`.
fn integer(name: &str, v: &JsonValue) -> Result<i64, Vec<Issue>> {
    if let Some(n) = v.as_i64() {
        return Ok(n);
    }
    match v.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        // Integral but beyond i64 (e.g. u64::MAX or 1e20).
        Some(f) if f.fract() == 0.0 && f > 0.0 => Err(reject(
            IssueCode::TooBig,
            name,
            format!("Movie {name} is out of range"),
        )),
        Some(f) if f.fract() == 0.0 => Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} is out of range"),
        )),
        Some(_) => Err(reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be an integer"),
        )),
        None => Err(reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be a number, received {}", type_name(v)),
        )),
    }
}

fn max_year() -> i64 {
    i64::from(Utc::now().year()) + FUTURE_YEAR_MARGIN
}

fn year(name: &str, v: &JsonValue) -> Result<i32, Vec<Issue>> {
    let n = integer(name, v)?;
    if n < MIN_YEAR {
        return Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} must be {MIN_YEAR} or later"),
        ));
    }
    let max = max_year();
    if n > max {
        return Err(reject(
            IssueCode::TooBig,
            name,
            format!("Movie {name} must be {max} or earlier"),
        ));
    }
    // Bounded above, so this always fits.
    Ok(n as i32)
}

fn duration(name: &str, v: &JsonValue) -> Result<u32, Vec<Issue>> {
    let n = integer(name, v)?;
    if n <= 0 {
        return Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} must be a positive number of minutes"),
        ));
    }
    u32::try_from(n).map_err(|_| {
        reject(
            IssueCode::TooBig,
            name,
            format!("Movie {name} is out of range"),
        )
    })
}

fn rate(name: &str, v: &JsonValue) -> Result<f64, Vec<Issue>> {
    let r = v.as_f64().ok_or_else(|| {
        reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be a number, received {}", type_name(v)),
        )
    })?;
    if r < MIN_RATE {
        return Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} must be at least {MIN_RATE}"),
        ));
    }
    if r > MAX_RATE {
        return Err(reject(
            IssueCode::TooBig,
            name,
            format!("Movie {name} must be at most {MAX_RATE}"),
        ));
    }
    Ok(r)
}

fn poster(name: &str, v: &JsonValue) -> Result<String, Vec<Issue>> {
    let s = v.as_str().ok_or_else(|| {
        reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be a string, received {}", type_name(v)),
        )
    })?;
    match Url::parse(s) {
        Ok(u) if u.host().is_some() => Ok(s.to_string()),
        _ => Err(reject(
            IssueCode::InvalidString,
            name,
            format!("Movie {name} must be a valid URL"),
        )),
    }
}

fn canonical_genre(g: &str) -> Option<&'static str> {
    KNOWN_GENRES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(g.trim()))
}

fn genres(name: &str, v: &JsonValue) -> Result<Vec<String>, Vec<Issue>> {
    let items = v.as_array().ok_or_else(|| {
        reject(
            IssueCode::InvalidType,
            name,
            format!("Movie {name} must be an array of genres"),
        )
    })?;
    if items.is_empty() {
        return Err(reject(
            IssueCode::TooSmall,
            name,
            format!("Movie {name} must contain at least one genre"),
        ));
    }

    let mut out = Vec::with_capacity(items.len());
    let mut bad = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match item.as_str().and_then(canonical_genre) {
            Some(g) => out.push(g.to_string()),
            None => bad.push(Issue {
                code: IssueCode::InvalidEnumValue,
                path: vec![name.to_string(), idx.to_string()],
                message: format!("Invalid genre. Expected one of: {}", KNOWN_GENRES.join(", ")),
            }),
        }
    }
    if bad.is_empty() {
        Ok(out)
    } else {
        Err(bad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inception() -> JsonValue {
        json!({
            "title": "Inception",
            "year": 2010,
            "director": "Nolan",
            "duration": 148,
            "genre": ["Sci-Fi"],
            "poster": "https://x/p.jpg",
            "rate": 8.8
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let movie = validate_movie(&inception()).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.duration, 148);
        assert_eq!(movie.genre, vec!["Sci-Fi"]);
        assert_eq!(movie.rate, 8.8);
    }

    #[test]
    fn missing_rate_gets_the_default() {
        let mut payload = inception();
        payload.as_object_mut().unwrap().remove("rate");
        let movie = validate_movie(&payload).unwrap();
        assert_eq!(movie.rate, DEFAULT_RATE);
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let mut payload = inception();
        payload["id"] = json!("client-chosen");
        payload["is_admin"] = json!(true);
        let movie = validate_movie(&payload).unwrap();
        let rendered = serde_json::to_value(&movie).unwrap();
        assert!(rendered.get("id").is_none());
        assert!(rendered.get("is_admin").is_none());
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let err = validate_movie(&json!({})).unwrap_err();
        for field in ["title", "year", "director", "duration", "poster", "genre"] {
            assert!(err.has_field(field), "missing issue for {field}");
        }
        assert!(!err.has_field("rate"));
        assert!(err.issues.iter().all(|i| i.code == IssueCode::Required));
    }

    #[test]
    fn out_of_range_values_name_their_field() {
        let mut payload = inception();
        payload["year"] = json!(1500);
        payload["rate"] = json!(11);
        payload["duration"] = json!(0);
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues.len(), 3);
        assert!(err.has_field("year"));
        assert!(err.has_field("rate"));
        assert!(err.has_field("duration"));
    }

    #[test]
    fn year_upper_bound_tracks_the_calendar() {
        let mut payload = inception();
        payload["year"] = json!(max_year());
        assert!(validate_movie(&payload).is_ok());
        payload["year"] = json!(max_year() + 1);
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooBig);
    }

    #[test]
    fn integral_floats_count_as_integers() {
        let mut payload = inception();
        payload["year"] = json!(2010.0);
        assert_eq!(validate_movie(&payload).unwrap().year, 2010);
        payload["year"] = json!(2010.5);
        assert!(validate_movie(&payload).unwrap_err().has_field("year"));
    }

    #[test]
    fn wrong_types_are_invalid_type() {
        let mut payload = inception();
        payload["title"] = json!(42);
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);
        assert_eq!(err.issues[0].path, vec!["title"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut payload = inception();
        payload["title"] = json!("   ");
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn poster_must_be_a_url() {
        let mut payload = inception();
        payload["poster"] = json!("not a url");
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidString);
        assert!(err.has_field("poster"));
    }

    #[test]
    fn genres_are_canonicalized_and_checked() {
        let mut payload = inception();
        payload["genre"] = json!(["action", "SCI-FI"]);
        assert_eq!(validate_movie(&payload).unwrap().genre, vec!["Action", "Sci-Fi"]);

        payload["genre"] = json!(["Drama", "Documentary"]);
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidEnumValue);
        assert_eq!(err.issues[0].path, vec!["genre", "1"]);

        payload["genre"] = json!([]);
        assert_eq!(validate_movie(&payload).unwrap_err().issues[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn every_unknown_genre_is_reported() {
        let mut payload = inception();
        payload["genre"] = json!(["Documentary", "Drama", "Western"]);
        let err = validate_movie(&payload).unwrap_err();
        let paths: Vec<Vec<String>> = err.issues.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, vec![vec!["genre", "0"], vec!["genre", "2"]]);
        assert!(err.issues.iter().all(|i| i.code == IssueCode::InvalidEnumValue));
    }

    #[test]
    fn huge_integers_are_too_big_not_wrong_type() {
        let mut payload = inception();
        payload["duration"] = json!(u64::MAX);
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].code, IssueCode::TooBig);
        assert_eq!(err.issues[0].path, vec!["duration"]);

        payload["duration"] = json!(1e20);
        assert_eq!(validate_movie(&payload).unwrap_err().issues[0].code, IssueCode::TooBig);

        payload["duration"] = json!(5_000_000_000u64);
        assert_eq!(validate_movie(&payload).unwrap_err().issues[0].code, IssueCode::TooBig);

        payload["duration"] = json!(148);
        payload["year"] = json!(-1e20);
        assert_eq!(validate_movie(&payload).unwrap_err().issues[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn non_object_body_has_an_empty_path() {
        let err = validate_movie(&json!([1, 2])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].path.is_empty());
        assert!(validate_partial_movie(&json!("x")).is_err());
    }

    #[test]
    fn empty_partial_is_an_empty_patch() {
        let patch = validate_partial_movie(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn partial_checks_only_present_fields() {
        let patch = validate_partial_movie(&json!({ "year": 1999, "id": "nope" })).unwrap();
        assert_eq!(patch.year, Some(1999));
        assert_eq!(patch.title, None);
        assert_eq!(patch.rate, None);

        let err = validate_partial_movie(&json!({ "year": "1999", "rate": -1 })).unwrap_err();
        assert!(err.has_field("year"));
        assert!(err.has_field("rate"));
        assert!(!err.has_field("title"));
    }

    #[test]
    fn null_counts_as_absent() {
        let patch = validate_partial_movie(&json!({ "title": null })).unwrap();
        assert!(patch.is_empty());

        let mut payload = inception();
        payload["title"] = JsonValue::Null;
        let err = validate_movie(&payload).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::Required);
    }
}
