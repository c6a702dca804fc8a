use std::net::SocketAddr;

use anyhow::Context;

use crate::data::SortKey;

const DEFAULT_API_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Settings shared by the front-ends, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` keeps the list in memory only
    pub database_url: Option<String>,
    pub api_addr: SocketAddr,
    pub allowed_origin: String,
    pub default_sort: SortKey,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let api_addr = lookup("LUNCH_API_ADDR").unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
        let api_addr = api_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LUNCH_API_ADDR is not a socket address: {api_addr}"))?;

        let allowed_origin =
            lookup("LUNCH_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let default_sort = match lookup("LUNCH_DEFAULT_SORT") {
            Some(sort) => sort
                .parse::<SortKey>()
                .map_err(|hint| anyhow::anyhow!("LUNCH_DEFAULT_SORT: {hint}"))?,
            None => SortKey::default(),
        };

        Ok(Self {
            database_url,
            api_addr,
            allowed_origin,
            default_sort,
        })
    }
}
