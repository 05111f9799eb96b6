//! Startup seed data for the movie store.

use crate::domain::movie::{validate_movie, Movie};
use crate::infra::config::FixtureSource;
use anyhow::{bail, Context};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// The dataset shipped with the server.
pub const BUNDLED_FIXTURE: &str = include_str!("../../data/movies.json");

/// Loads the seed records for the given source.
pub fn load(source: &FixtureSource) -> anyhow::Result<Vec<Movie>> {
    match source {
        FixtureSource::Empty => Ok(Vec::new()),
        FixtureSource::Bundled => parse(BUNDLED_FIXTURE).context("bundled movie fixture is invalid"),
        FixtureSource::File(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read movie fixture {}", path.display()))?;
            parse(&raw).with_context(|| format!("movie fixture {} is invalid", path.display()))
        }
    }
}

/// Parses a JSON array of movies. Each record must carry a unique id and pass full validation.
pub fn parse(raw: &str) -> anyhow::Result<Vec<Movie>> {
    let records: Vec<JsonValue> = serde_json::from_str(raw).context("expected a JSON array of movies")?;

    let mut seen = HashSet::new();
    let mut movies = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let id = match record.get("id").and_then(JsonValue::as_str) {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => bail!("record {idx} has no id"),
        };
        if !seen.insert(id.clone()) {
            bail!("duplicate movie id {id}");
        }
        let new = validate_movie(record).map_err(|e| {
            anyhow::anyhow!(
                "record {idx} ({id}) failed validation: {}",
                serde_json::to_string(&e.issues).unwrap_or_default()
            )
        })?;
        movies.push(Movie::from_new(id, new));
    }
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_loads() {
        let movies = load(&FixtureSource::Bundled).unwrap();
        assert!(!movies.is_empty());
        assert!(movies.iter().any(|m| m.has_genre("action")));
    }

    #[test]
    fn empty_source_has_no_movies() {
        assert!(load(&FixtureSource::Empty).unwrap().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[
            {"id":"1","title":"A","year":2000,"director":"D","duration":90,"poster":"https://x/a.jpg","genre":["Drama"]},
            {"id":"1","title":"B","year":2001,"director":"D","duration":91,"poster":"https://x/b.jpg","genre":["Drama"]}
        ]"#;
        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn invalid_records_are_rejected() {
        let raw = r#"[{"id":"1","title":"","year":2000,"director":"D","duration":90,"poster":"https://x/a.jpg","genre":["Drama"]}]"#;
        assert!(parse(raw).is_err());
        assert!(parse(r#"[{"title":"no id"}]"#).is_err());
        assert!(parse("{}").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = FixtureSource::File("/definitely/not/here.json".into());
        assert!(load(&source).is_err());
    }
}
