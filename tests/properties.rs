//! Property tests for the calculation core.

use proptest::prelude::*;
use rust_decimal::Decimal;

use haulage_pricing::calculation::{
    QuoteInput, calculate_quote, driver_daily_cost, effective_consumption, resolve_driver_costs,
    to_ht, to_ttc,
};
use haulage_pricing::models::{
    AppSettings, Driver, DriverContract, FleetUnit, InterimTerms, PricingMode, SalariedTerms,
    TripCalculation, VehicleParams,
};

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn driver() -> impl Strategy<Value = Driver> {
    prop_oneof![
        (amount(), 0i64..80, 1i64..31, amount()).prop_map(|(salary, charges, days, bonus)| {
            Driver {
                id: "salaried".to_string(),
                name: String::new(),
                contract: DriverContract::Cdi(SalariedTerms {
                    base_salary: salary,
                    patronal_charges: Decimal::from(charges),
                    working_days_per_month: Decimal::from(days),
                    night_bonus: bonus,
                    sunday_bonus: Decimal::ZERO,
                    seniority_bonus: Decimal::ZERO,
                    meal_allowance: Decimal::new(1520, 2),
                    overnight_allowance: Decimal::ZERO,
                }),
            }
        }),
        (1i64..5000, 0i64..12).prop_map(|(rate_cents, hours)| Driver {
            id: "interim".to_string(),
            name: String::new(),
            contract: DriverContract::Interim(InterimTerms {
                interim_hourly_rate: Some(Decimal::new(rate_cents, 2)),
                hours_per_day: Some(Decimal::from(hours)),
                ..InterimTerms::default()
            }),
        }),
        Just(Driver {
            id: "autre".to_string(),
            name: String::new(),
            contract: DriverContract::Autre,
        }),
    ]
}

proptest! {
    #[test]
    fn ht_ttc_round_trip(amount in amount(), tva_rate in rate()) {
        let ht = to_ht(amount, tva_rate, false);
        let back = to_ttc(ht, tva_rate);
        prop_assert!((back - amount).abs() < Decimal::new(1, 10));
    }

    #[test]
    fn ht_amounts_are_unchanged(amount in amount(), tva_rate in rate()) {
        prop_assert_eq!(to_ht(amount, tva_rate, true), amount);
    }

    #[test]
    fn driver_costs_are_additive(drivers in prop::collection::vec(driver(), 0..6)) {
        let result = resolve_driver_costs(&drivers, 1);
        let expected: Decimal = drivers
            .iter()
            .map(|d| {
                let line = driver_daily_cost(d);
                line.cost + line.bonuses + line.allowances
            })
            .sum();

        prop_assert_eq!(
            result.driver_cost + result.driver_bonuses + result.driver_allowances,
            expected
        );
    }

    #[test]
    fn averaged_consumption_stays_within_bounds(
        rates in prop::collection::vec(1i64..600, 1..8)
    ) {
        let units: Vec<FleetUnit> = rates
            .iter()
            .enumerate()
            .map(|(i, r)| FleetUnit {
                id: format!("veh_{}", i),
                fuel_consumption: Decimal::new(*r, 1),
                ad_blue_consumption: Decimal::ZERO,
                total_annual_fixed_cost: Decimal::ZERO,
            })
            .collect();

        let consumption = effective_consumption(&units, &VehicleParams::default());
        let min = units.iter().map(|u| u.fuel_consumption).min().unwrap();
        let max = units.iter().map(|u| u.fuel_consumption).max().unwrap();

        prop_assert!(consumption.fuel >= min && consumption.fuel <= max);
    }

    #[test]
    fn zero_distance_never_divides(
        toll in amount(),
        target_margin in rate(),
        drivers in prop::collection::vec(driver(), 0..3),
    ) {
        let input = QuoteInput {
            trip: TripCalculation {
                distance: Decimal::ZERO,
                toll_cost: toll,
                target_margin,
                ..TripCalculation::default()
            },
            drivers,
            ..QuoteInput::default()
        };

        let quote = calculate_quote(&input, &AppSettings::default());

        prop_assert_eq!(quote.breakdown.cost_per_km, Decimal::ZERO);
        prop_assert_eq!(quote.breakdown.suggested_price_per_km, Decimal::ZERO);
    }

    #[test]
    fn total_cost_is_sum_of_components(
        distance in 0i64..3000,
        toll in amount(),
        price_per_km in 0i64..500,
        drivers in prop::collection::vec(driver(), 0..3),
    ) {
        let input = QuoteInput {
            trip: TripCalculation {
                distance: Decimal::from(distance),
                toll_cost: toll,
                toll_is_ht: true,
                pricing_mode: PricingMode::Km,
                price_per_km: Decimal::new(price_per_km, 2),
                ..TripCalculation::default()
            },
            drivers,
            ..QuoteInput::default()
        };

        let b = calculate_quote(&input, &AppSettings::default()).breakdown;
        let sum = b.fuel
            + b.ad_blue
            + b.tolls
            + b.driver_cost
            + b.driver_bonuses
            + b.driver_allowances
            + b.structure_cost
            + b.vehicle_cost
            + b.trailer_cost;

        prop_assert_eq!(b.total_cost, sum);
        prop_assert_eq!(b.profit, b.revenue - b.total_cost);
        if b.revenue.is_zero() {
            prop_assert_eq!(b.profit_margin, Decimal::ZERO);
        }
    }
}
