//! # Shipment
//!
//! What the customer wants moved, and the service they asked for.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::shipment::{FeeQuoteRequest, Shipment};
//! use parcel_quote::domain::value_objects::{CargoLineItem, GeoPoint, Location, ServiceClass};
//!
//! let shipment = Shipment::new(
//!     Location::point(GeoPoint::new(10.77, 106.70).unwrap()),
//!     Location::address("Thu Duc, Ho Chi Minh City"),
//!     vec![CargoLineItem::weighed(5.0, false, 1).unwrap()],
//! );
//! let request = FeeQuoteRequest::new(shipment, ServiceClass::Express);
//! assert!(!request.shipment().is_fragile());
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{any_fragile, validate_cargo, CargoLineItem, Location, ServiceClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pickup, delivery and cargo of a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pickup: Location,
    delivery: Location,
    cargo: Vec<CargoLineItem>,
}

impl Shipment {
    /// Creates a shipment. Cargo is checked by [`Shipment::validate`].
    #[must_use]
    pub fn new(pickup: Location, delivery: Location, cargo: Vec<CargoLineItem>) -> Self {
        Self {
            pickup,
            delivery,
            cargo,
        }
    }

    /// Pickup leg.
    #[inline]
    #[must_use]
    pub fn pickup(&self) -> &Location {
        &self.pickup
    }

    /// Delivery leg.
    #[inline]
    #[must_use]
    pub fn delivery(&self) -> &Location {
        &self.delivery
    }

    /// Cargo line items.
    #[inline]
    #[must_use]
    pub fn cargo(&self) -> &[CargoLineItem] {
        &self.cargo
    }

    /// Returns true if any line item is fragile.
    #[must_use]
    pub fn is_fragile(&self) -> bool {
        any_fragile(&self.cargo)
    }

    /// Checks the cargo list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCargoSpec` if there is no cargo.
    pub fn validate(&self) -> DomainResult<()> {
        validate_cargo(&self.cargo)
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shipment({} -> {}, {} item(s))",
            self.pickup,
            self.delivery,
            self.cargo.len()
        )
    }
}

/// A shipment together with the requested service class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuoteRequest {
    shipment: Shipment,
    service_class: ServiceClass,
}

impl FeeQuoteRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(shipment: Shipment, service_class: ServiceClass) -> Self {
        Self {
            shipment,
            service_class,
        }
    }

    /// The shipment.
    #[inline]
    #[must_use]
    pub fn shipment(&self) -> &Shipment {
        &self.shipment
    }

    /// The requested service class.
    #[inline]
    #[must_use]
    pub fn service_class(&self) -> ServiceClass {
        self.service_class
    }
}
