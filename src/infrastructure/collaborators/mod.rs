//! # Collaborators
//!
//! Ports for the services the estimator depends on, and HTTP adapters for
//! them.
//!
//! - [`traits`]: `Geocoder`, `RoutingService`, `DistanceFeeClassifier`,
//!   `CargoFeeEvaluator`
//! - [`error`]: `CollaboratorError` taxonomy
//! - [`http_client`]: Shared reqwest wrapper
//! - [`nominatim`]: Nominatim-compatible geocoder
//! - [`osrm`]: OSRM-compatible router

pub mod error;
pub mod http_client;
pub mod nominatim;
pub mod osrm;
pub mod traits;

pub use error::{CollaboratorError, CollaboratorResult};
pub use http_client::HttpClient;
pub use nominatim::{NominatimConfig, NominatimGeocoder};
pub use osrm::{OsrmConfig, OsrmRouter};
pub use traits::{CargoFeeEvaluator, DistanceFeeClassifier, Geocoder, RoutingService};
