/// Optional user geolocation.
///
/// The location is resolved once each time the feature is switched on. A
/// failed lookup switches the feature back off and leaves a message; it never
/// blocks verification. While the feature is on and unresolved, verification
/// is refused (see [`Geolocation::gate`]).
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GeoError, VerifyError};

const IDLE_MESSAGE: &str = "Enable for location-based claims.";
const PENDING_MESSAGE: &str = "Requesting location...";
const SUCCESS_MESSAGE: &str = "Location acquired!";

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting values outside the valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(GeoError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Source of the user's position.
pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, GeoError>> + Send;
}

/// Toggle state of the geolocation feature.
#[derive(Debug, Clone)]
pub struct Geolocation {
    enabled: bool,
    status: LocationStatus,
    coords: Option<Coordinates>,
    message: String,
}

impl Default for Geolocation {
    fn default() -> Self {
        Self {
            enabled: false,
            status: LocationStatus::Idle,
            coords: None,
            message: IDLE_MESSAGE.to_string(),
        }
    }
}

impl Geolocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the feature on and resolve the location once.
    pub async fn enable<P: LocationProvider>(&mut self, provider: &P) {
        self.begin();
        let result = provider.locate().await;
        self.resolve(result);
    }

    /// Switch the feature on; the location is pending until [`Self::resolve`].
    pub fn begin(&mut self) {
        self.enabled = true;
        self.status = LocationStatus::Pending;
        self.message = PENDING_MESSAGE.to_string();
    }

    /// Record the outcome of a lookup. A failure switches the feature off.
    pub fn resolve(&mut self, result: Result<Coordinates, GeoError>) {
        match result {
            Ok(coords) => {
                info!(
                    "Location acquired: {:.4}, {:.4}",
                    coords.latitude, coords.longitude
                );
                self.status = LocationStatus::Success;
                self.coords = Some(coords);
                self.message = SUCCESS_MESSAGE.to_string();
            }
            Err(e) => {
                warn!("Geolocation failed, disabling: {e}");
                self.enabled = false;
                self.status = LocationStatus::Error;
                self.coords = None;
                self.message = format!("Error: {e}.");
            }
        }
    }

    /// Switch the feature off.
    pub fn disable(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn status(&self) -> LocationStatus {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Acquired coordinates, if any.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coords
    }

    /// Coordinates to send with a request.
    ///
    /// `Ok(None)` when the feature is off, the coordinates once acquired, and
    /// [`VerifyError::LocationPending`] while the feature is on but unresolved.
    pub fn gate(&self) -> Result<Option<Coordinates>, VerifyError> {
        if !self.enabled {
            return Ok(None);
        }
        match (self.status, self.coords) {
            (LocationStatus::Success, Some(coords)) => Ok(Some(coords)),
            _ => Err(VerifyError::LocationPending),
        }
    }
}

// ── Providers ────────────────────────────────────────────────────────

/// Coordinates supplied up front (CLI flags, config, browser form).
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lon: Option<f64>,
}

impl IpLookupResponse {
    fn into_coordinates(self) -> Result<Coordinates, GeoError> {
        if self.status.as_deref() == Some("fail") {
            return Err(GeoError::Lookup(
                self.message.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => Err(GeoError::NoCoordinates),
        }
    }
}

/// Approximate position from an IP geolocation service.
///
/// Accepts `{"lat", "lon"}` (ip-api.com) or `{"latitude", "longitude"}`
/// response shapes.
pub struct IpLocation {
    http: reqwest::Client,
    url: String,
}

impl IpLocation {
    pub fn new(url: impl Into<String>) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(concat!("truthverify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeoError::Lookup(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl LocationProvider for IpLocation {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::Lookup(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GeoError::Lookup(format!("status {}", resp.status())));
        }

        let body: IpLookupResponse = resp
            .json()
            .await
            .map_err(|e| GeoError::Lookup(e.to_string()))?;
        body.into_coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLocation;

    impl LocationProvider for FailingLocation {
        async fn locate(&self) -> Result<Coordinates, GeoError> {
            Err(GeoError::Lookup("User denied Geolocation".to_string()))
        }
    }

    #[test]
    fn test_coordinates_range() {
        assert!(Coordinates::new(48.85, 2.35).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_default_is_idle_and_ungated() {
        let geo = Geolocation::new();
        assert_eq!(geo.status(), LocationStatus::Idle);
        assert_eq!(geo.message(), "Enable for location-based claims.");
        assert_eq!(geo.gate().unwrap(), None);
    }

    #[test]
    fn test_pending_blocks_verification() {
        let mut geo = Geolocation::new();
        geo.begin();
        assert_eq!(geo.status(), LocationStatus::Pending);
        assert!(matches!(geo.gate(), Err(VerifyError::LocationPending)));
    }

    #[tokio::test]
    async fn test_enable_success() {
        let coords = Coordinates::new(40.7128, -74.006).unwrap();
        let mut geo = Geolocation::new();
        geo.enable(&FixedLocation(coords)).await;

        assert!(geo.is_enabled());
        assert_eq!(geo.status(), LocationStatus::Success);
        assert_eq!(geo.message(), "Location acquired!");
        assert_eq!(geo.gate().unwrap(), Some(coords));
    }

    #[tokio::test]
    async fn test_enable_failure_disables_feature() {
        let mut geo = Geolocation::new();
        geo.enable(&FailingLocation).await;

        assert!(!geo.is_enabled());
        assert_eq!(geo.status(), LocationStatus::Error);
        assert_eq!(
            geo.message(),
            "Error: location lookup failed: User denied Geolocation."
        );
        // Failure does not block verification
        assert_eq!(geo.gate().unwrap(), None);
    }

    #[tokio::test]
    async fn test_disable_resets() {
        let mut geo = Geolocation::new();
        geo.enable(&FixedLocation(Coordinates::new(1.0, 2.0).unwrap()))
            .await;
        geo.disable();
        assert!(!geo.is_enabled());
        assert_eq!(geo.status(), LocationStatus::Idle);
        assert_eq!(geo.gate().unwrap(), None);
    }

    #[test]
    fn test_ip_lookup_shapes() {
        let ok: IpLookupResponse =
            serde_json::from_str(r#"{"status":"success","lat":52.52,"lon":13.405}"#).unwrap();
        assert_eq!(
            ok.into_coordinates().unwrap(),
            Coordinates::new(52.52, 13.405).unwrap()
        );

        let alt: IpLookupResponse =
            serde_json::from_str(r#"{"latitude":-33.86,"longitude":151.2}"#).unwrap();
        assert!(alt.into_coordinates().is_ok());

        let fail: IpLookupResponse =
            serde_json::from_str(r#"{"status":"fail","message":"private range"}"#).unwrap();
        assert_eq!(
            fail.into_coordinates().unwrap_err(),
            GeoError::Lookup("private range".to_string())
        );

        let empty: IpLookupResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_coordinates().unwrap_err(), GeoError::NoCoordinates);
    }
}
