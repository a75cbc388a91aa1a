use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SITE_DIR: &str = "dist";
const POSTS_INDEX_FILE: &str = "posts.json";
const DEFAULT_POSTS_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) bind_addr: String,
    /// Built static site, served for every non-API path.
    pub(crate) site_dir: PathBuf,
    pub(crate) posts_index: PathBuf,
    pub(crate) include_drafts: bool,
    pub(crate) posts_cache_ttl: Duration,
}

impl Config {
    /// Read configuration from the environment (and `.env`, once loaded).
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let site_dir = lookup("SITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));
        let posts_index = lookup("POSTS_INDEX")
            .map(PathBuf::from)
            .unwrap_or_else(|| site_dir.join(POSTS_INDEX_FILE));

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            posts_index,
            site_dir,
            include_drafts: parse_or(&lookup, "INCLUDE_DRAFTS", false),
            posts_cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "POSTS_CACHE_TTL_SECS",
                DEFAULT_POSTS_CACHE_TTL_SECS,
            )),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, ?default, "invalid config value, using default");
        default
    })
}
