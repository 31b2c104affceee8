use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::Coordinate;
use crate::services::cache::GeocodeCache;

/// Errors that can occur when resolving an address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("No location found for address: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One hit in a Nominatim-style search response
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Geocoding provider client
///
/// Talks to a Nominatim-compatible `/search` endpoint. Successful lookups
/// are cached by address; failures are not.
pub struct GeocodingClient {
    base_url: String,
    user_agent: String,
    client: Client,
    cache: GeocodeCache,
}

impl GeocodingClient {
    pub fn new(
        base_url: String,
        user_agent: String,
        timeout_secs: u64,
        cache: GeocodeCache,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            user_agent,
            client,
            cache,
        })
    }

    /// Resolve a postal address to a coordinate
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        if let Some(coordinate) = self.cache.get(address).await {
            return Ok(coordinate);
        }

        let url = format!(
            "{}/search?format=json&limit=1&q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(address)
        );

        tracing::debug!("Geocoding address via: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Failed to geocode address: {}",
                response.status()
            )));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

        let coordinate = parse_hit(&hit)?;
        self.cache.insert(address, coordinate).await;

        tracing::debug!(
            "Geocoded '{}' to ({}, {})",
            address,
            coordinate.latitude,
            coordinate.longitude
        );

        Ok(coordinate)
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}

fn parse_hit(hit: &SearchHit) -> Result<Coordinate, GeocodeError> {
    let parse = |field: &str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| GeocodeError::InvalidResponse(format!("{} is not a number: {}", field, value)))
    };
    Ok(Coordinate::new(parse("lat", &hit.lat)?, parse("lon", &hit.lon)?))
}
