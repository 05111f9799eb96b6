//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 1234;

/// Where the movie store is seeded from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureSource {
    /// The dataset compiled into the binary.
    Bundled,
    /// Start with no movies.
    Empty,
    File(PathBuf),
}

/// Listen port (`PORT`, default 1234).
pub fn port() -> anyhow::Result<u16> {
    match std::env::var("PORT") {
        Ok(v) => v
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got {v:?}")),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Bind address (`HOST`, default 0.0.0.0).
pub fn host() -> anyhow::Result<IpAddr> {
    match std::env::var("HOST") {
        Ok(v) => v
            .trim()
            .parse::<IpAddr>()
            .with_context(|| format!("HOST must be an IP address, got {v:?}")),
        Err(_) => Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
    }
}

pub fn listen_addr() -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::new(host()?, port()?))
}

/// Seed source (`MOVIES_FIXTURE`): unset for the bundled dataset, `none` for an empty store,
/// anything else is a path to a JSON array of movies.
pub fn movies_fixture() -> FixtureSource {
    match std::env::var("MOVIES_FIXTURE") {
        Ok(v) if v.trim().is_empty() => FixtureSource::Bundled,
        Ok(v) if v.trim().eq_ignore_ascii_case("none") => FixtureSource::Empty,
        Ok(v) => FixtureSource::File(PathBuf::from(v.trim())),
        Err(_) => FixtureSource::Bundled,
    }
}
