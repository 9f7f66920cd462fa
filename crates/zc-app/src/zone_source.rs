//! Where the zone catalog comes from.

use std::path::PathBuf;
use std::time::Duration;

use zc_form::{ZoneSeed, parse_zone_list};

use crate::error::{AppError, AppResult};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSource {
    Url(String),
    File(PathBuf),
}

impl ZoneSource {
    pub fn describe(&self) -> String {
        match self {
            ZoneSource::Url(url) => url.clone(),
            ZoneSource::File(path) => path.display().to_string(),
        }
    }
}

/// Fetch and decode the zone list.
pub async fn load_zone_list(source: &ZoneSource) -> AppResult<Vec<ZoneSeed>> {
    let body = match source {
        ZoneSource::Url(url) => fetch(url).await?,
        ZoneSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| AppError::FileRead {
                    path: path.clone(),
                    source,
                })?
        }
    };

    let seeds = parse_zone_list(&body)?;
    tracing::info!(source = %source.describe(), zones = seeds.len(), "zone list loaded");
    Ok(seeds)
}

async fn fetch(url: &str) -> AppResult<String> {
    let fetch_err = |source| AppError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?;

    client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_err)?
        .text()
        .await
        .map_err(fetch_err)
}
