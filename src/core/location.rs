use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::error::{HirumeshiError, Result};

/// How long a single lookup may take.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(8);
/// How old a previous fix may be and still be reused.
pub const MAX_FIX_AGE: Duration = Duration::from_secs(30);

pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.com/maps/search/";
pub const DEFAULT_MAP_ZOOM: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Why a lookup produced no coordinates. The display text is shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocateError {
    #[error("Location is not available on this device, searching without it.")]
    Unsupported,

    #[error("Location permission was denied, searching without it.")]
    Denied,

    #[error("Location lookup timed out, searching without it.")]
    Timeout,

    #[error("Could not get your location ({0}), searching without it.")]
    Failed(String),

    #[error("Already looking up your location.")]
    Busy,
}

/// Something that can produce a one-shot position fix.
pub trait LocationSource {
    fn locate(&self) -> impl Future<Output = std::result::Result<Coordinates, LocateError>> + Send;
}

/// Position taken from configuration instead of a device sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredLocation {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_enabled() -> bool {
    true
}

impl Default for ConfiguredLocation {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
        }
    }
}

impl ConfiguredLocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            enabled: true,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

impl LocationSource for ConfiguredLocation {
    fn locate(&self) -> impl Future<Output = std::result::Result<Coordinates, LocateError>> + Send {
        let outcome = if !self.enabled {
            Err(LocateError::Denied)
        } else {
            match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude))
                    if (-90.0..=90.0).contains(&latitude)
                        && (-180.0..=180.0).contains(&longitude) =>
                {
                    Ok(Coordinates { latitude, longitude })
                }
                (Some(_), Some(_)) => Err(LocateError::Failed(
                    "configured coordinates are out of range".to_string(),
                )),
                _ => Err(LocateError::Unsupported),
            }
        };
        std::future::ready(outcome)
    }
}

/// Wraps a [`LocationSource`] with a timeout, a short-lived cache of the
/// last fix and a guard against overlapping requests.
pub struct Geolocator<L> {
    source: L,
    timeout: Duration,
    max_age: Duration,
    last_fix: Mutex<Option<(Instant, Coordinates)>>,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<L: LocationSource> Geolocator<L> {
    pub fn new(source: L) -> Self {
        Self {
            source,
            timeout: LOCATE_TIMEOUT,
            max_age: MAX_FIX_AGE,
            last_fix: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// True while a lookup is outstanding; callers should disable whatever
    /// triggers a new one.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn locate(&self) -> std::result::Result<Coordinates, LocateError> {
        if let Some(coords) = self.cached_fix() {
            debug!("reusing cached location");
            return Ok(coords);
        }

        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(LocateError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let outcome = match tokio::time::timeout(self.timeout, self.source.locate()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LocateError::Timeout),
        };

        match &outcome {
            Ok(coords) => {
                if let Ok(mut slot) = self.last_fix.lock() {
                    *slot = Some((Instant::now(), *coords));
                }
            }
            Err(e) => warn!(error = %e, "location lookup failed"),
        }
        outcome
    }

    fn cached_fix(&self) -> Option<Coordinates> {
        let slot = self.last_fix.lock().ok()?;
        let (taken_at, coords) = (*slot)?;
        (taken_at.elapsed() <= self.max_age).then_some(coords)
    }
}

/// Build `<base>/<query>` and, when known, `/@lat,lng,zoomz`.
pub fn map_search_url(
    base: &str,
    query: &str,
    coords: Option<Coordinates>,
    zoom: u8,
) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| HirumeshiError::NotABase(base.to_string()))?;
        segments.pop_if_empty().push(query);
        if let Some(c) = coords {
            segments.push(&format!("@{},{},{}z", c.latitude, c.longitude, zoom));
        }
    }
    Ok(url)
}

/// A ready-to-open map search plus the status to show when the location
/// could not be used.
#[derive(Debug, Clone)]
pub struct MapSearch {
    pub url: Url,
    pub coordinates: Option<Coordinates>,
    pub notice: Option<LocateError>,
}

pub async fn plan_map_search<L: LocationSource>(
    geolocator: &Geolocator<L>,
    base: &str,
    zoom: u8,
    query: &str,
) -> Result<MapSearch> {
    let (coordinates, notice) = match geolocator.locate().await {
        Ok(coords) => (Some(coords), None),
        Err(e) => (None, Some(e)),
    };
    let url = map_search_url(base, query, coordinates, zoom)?;
    Ok(MapSearch {
        url,
        coordinates,
        notice,
    })
}
