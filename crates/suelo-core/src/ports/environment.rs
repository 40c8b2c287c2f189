use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::models::site::{Coordinates, SiteData};

/// Identifier of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port for the identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, if any
    async fn current_user_id(&self) -> Option<UserId>;
}

/// Port for the device geolocation provider
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Current position of the device
    async fn current_coordinates(&self) -> Result<Coordinates>;
}

/// Source of the current time for ids, timestamps and month filtering
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl SiteData {
    /// Fill in the coordinates from the geolocator. Existing coordinates are
    /// replaced; on failure the site data is left untouched.
    pub async fn locate(&mut self, locator: &dyn Geolocator) -> Result<Coordinates> {
        let coords = locator.current_coordinates().await?;
        coords.validate()?;
        self.coordinates = Some(coords);
        Ok(coords)
    }
}
