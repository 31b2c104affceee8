// Service exports
pub mod auth;
pub mod cache;
pub mod geocoding;
pub mod store;

pub use auth::{AuthError, Claims, Identity, Role, SessionAuthenticator};
pub use cache::{CacheStats, GeocodeCache};
pub use geocoding::{GeocodeError, GeocodingClient};
pub use store::{DirectoryStore, StoreError};
