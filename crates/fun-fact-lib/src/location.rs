//! One-shot position providers
//!
//! A provider is asked for permission and then for a single fix. There is no
//! continuous tracking and no retry; the session calls it once at startup.

use crate::{Coordinate, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const IP_LOCATION_URL: &str = "https://ipapi.co/json/";

/// Source of the user's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for permission to read the position
    async fn request_permission(&self) -> Result<()> {
        Ok(())
    }

    /// A single position fix
    async fn current_position(&self) -> Result<Coordinate>;

    /// Short human-readable name for logs
    fn name(&self) -> &'static str;
}

/// Always reports the configured coordinate
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinate> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(Error::LocationUnavailable(format!(
                "configured position {:?} is out of range",
                self.0
            )))
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// No positioning available on this device
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn request_permission(&self) -> Result<()> {
        Err(Error::PermissionDenied)
    }

    async fn current_position(&self) -> Result<Coordinate> {
        Err(Error::LocationUnavailable(
            "positioning is disabled".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximate position from the public IP address
pub struct IpLocation {
    http_client: Client,
    url: String,
}

impl IpLocation {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_url(IP_LOCATION_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn current_position(&self) -> Result<Coordinate> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(Error::Api {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let result: IpApiResult = serde_json::from_str(&body)?;
        position_from_ip_result(result)
    }

    fn name(&self) -> &'static str {
        "ip"
    }
}

fn position_from_ip_result(result: IpApiResult) -> Result<Coordinate> {
    if result.error {
        return Err(Error::LocationUnavailable(
            result.reason.unwrap_or_else(|| "lookup failed".to_string()),
        ));
    }

    let latitude = result
        .latitude
        .ok_or_else(|| Error::LocationUnavailable("no latitude".to_string()))?;
    let longitude = result
        .longitude
        .ok_or_else(|| Error::LocationUnavailable("no longitude".to_string()))?;

    let position = Coordinate::new(longitude, latitude);
    if position.is_valid() {
        Ok(position)
    } else {
        Err(Error::LocationUnavailable(format!(
            "lookup returned out-of-range position {:?}",
            position
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Coordinate> {
        position_from_ip_result(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_ip_result_with_position() {
        let position = parse(r#"{"city": "Oslo", "latitude": 59.9139, "longitude": 10.7522}"#);
        assert_eq!(position.unwrap(), Coordinate::new(10.7522, 59.9139));
    }

    #[test]
    fn test_ip_result_error_flag() {
        let position = parse(r#"{"error": true, "reason": "RateLimited"}"#);
        match position {
            Err(Error::LocationUnavailable(reason)) => assert_eq!(reason, "RateLimited"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ip_result_missing_longitude() {
        assert!(matches!(
            parse(r#"{"latitude": 59.9}"#),
            Err(Error::LocationUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocation(Coordinate::new(10.0, 20.0));
        assert!(provider.request_permission().await.is_ok());
        assert_eq!(
            provider.current_position().await.unwrap(),
            Coordinate::new(10.0, 20.0)
        );

        let invalid = FixedLocation(Coordinate::new(200.0, 20.0));
        assert!(invalid.current_position().await.is_err());
    }

    #[tokio::test]
    async fn test_no_location_denies() {
        assert!(matches!(
            NoLocation.request_permission().await,
            Err(Error::PermissionDenied)
        ));
        assert!(NoLocation.current_position().await.is_err());
    }
}
