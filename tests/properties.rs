//! Property tests for the pricing formula and distance geometry.

#![allow(clippy::unwrap_used)]

use parcel_quote::application::services::PricingBasis;
use parcel_quote::domain::entities::FeeQuote;
use parcel_quote::domain::services::great_circle::{great_circle_km, path_length_km};
use parcel_quote::domain::value_objects::{
    round_fee, DistanceFee, DistanceQuote, DistanceSource, GeoPoint, ServiceClass,
    ServiceMultiplierTable,
};
use parcel_quote::infrastructure::collaborators::DistanceFeeClassifier;
use parcel_quote::infrastructure::pricing::TieredDistanceFeeClassifier;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
}

fn service_class() -> impl Strategy<Value = ServiceClass> {
    prop::sample::select(ServiceClass::ALL.to_vec())
}

fn distance_quote() -> impl Strategy<Value = DistanceQuote> {
    (0.0f64..2000.0).prop_map(|km| {
        DistanceQuote::new(
            km,
            TieredDistanceFeeClassifier::default().classify(km),
            DistanceSource::GreatCircle,
        )
    })
}

proptest! {
    #[test]
    fn total_fee_follows_rounding_law(
        base_cents in 0i64..100_000_000,
        class in service_class(),
        distance in distance_quote(),
    ) {
        let base_fee = Decimal::new(base_cents, 2);
        let multiplier = ServiceMultiplierTable::default().multiplier_for(class);
        let quote = FeeQuote::compose(class, base_fee, multiplier, &distance).unwrap();

        prop_assert_eq!(
            quote.total_fee(),
            round_fee(base_fee * multiplier + distance.fee())
        );
        prop_assert_eq!(quote.total_fee().scale(), 0);
    }

    #[test]
    fn standard_adds_distance_fee_to_base(
        base in 0i64..10_000_000,
        distance in distance_quote(),
    ) {
        let basis = PricingBasis::new(Decimal::new(base, 0), distance.clone());
        let quote = basis.quote(ServiceClass::Standard, Decimal::ONE).unwrap();

        prop_assert_eq!(quote.total_fee(), round_fee(Decimal::new(base, 0) + distance.fee()));
    }

    #[test]
    fn comparison_shares_everything_but_the_multiplier(
        base in 0i64..10_000_000,
        distance in distance_quote(),
    ) {
        let basis = PricingBasis::new(Decimal::new(base, 0), distance);
        let comparison = basis.quote_all(&ServiceMultiplierTable::default()).unwrap();

        prop_assert_eq!(comparison.len(), ServiceClass::ALL.len());
        let first = comparison.iter().next().unwrap();
        for quote in &comparison {
            prop_assert_eq!(quote.base_fee(), first.base_fee());
            prop_assert_eq!(quote.distance_km(), first.distance_km());
            prop_assert_eq!(quote.distance_fee(), first.distance_fee());
            prop_assert_eq!(quote.region(), first.region());
        }
    }

    #[test]
    fn unavailable_distance_prices_base_only(
        base in 0i64..10_000_000,
        class in service_class(),
    ) {
        let multiplier = ServiceMultiplierTable::default().multiplier_for(class);
        let quote = FeeQuote::compose(
            class,
            Decimal::new(base, 0),
            multiplier,
            &DistanceQuote::unavailable(),
        )
        .unwrap();

        prop_assert_eq!(quote.distance_km(), 0.0);
        prop_assert_eq!(quote.distance_fee(), Decimal::ZERO);
        prop_assert_eq!(quote.region(), "Unknown");
        prop_assert_eq!(quote.total_fee(), round_fee(Decimal::new(base, 0) * multiplier));
    }

    #[test]
    fn great_circle_is_symmetric_and_non_negative(a in geo_point(), b in geo_point()) {
        let ab = great_circle_km(a, b);
        let ba = great_circle_km(b, a);

        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-3);
        prop_assert!(great_circle_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn path_is_never_shorter_than_direct_line(
        a in geo_point(),
        via in prop::collection::vec(geo_point(), 0..6),
        b in geo_point(),
    ) {
        let mut path = vec![a];
        path.extend(via);
        path.push(b);

        prop_assert!(path_length_km(&path) + 1e-3 >= great_circle_km(a, b));
    }

    #[test]
    fn classifier_never_yields_negative_surcharge(km in prop::num::f64::ANY) {
        let fee: DistanceFee = TieredDistanceFeeClassifier::default().classify(km);

        prop_assert!(fee.surcharge() >= Decimal::ZERO);
        prop_assert!(!fee.region().is_empty());
    }
}
