//! Performance benchmarks for the haulage pricing engine.
//!
//! Covers the pure quote pipeline and the `/quote` endpoint:
//! - Single quote, in process
//! - Quotes scaling with the number of drivers and charges
//! - Single HTTP quote
//! - Batch of 100 HTTP quotes
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use haulage_pricing::api::{AppState, create_router};
use haulage_pricing::calculation::{QuoteInput, calculate_quote};
use haulage_pricing::config::ConfigLoader;
use haulage_pricing::models::{
    AppSettings, ChargeCategory, Driver, DriverContract, FixedCharge, FleetUnit, InterimTerms,
    Periodicity, PricingMode, SalariedTerms, TripCalculation, VehicleParams,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_driver(i: usize) -> Driver {
    let contract = if i % 2 == 0 {
        DriverContract::Cdi(SalariedTerms {
            base_salary: Decimal::new(2200, 0),
            patronal_charges: Decimal::new(45, 0),
            working_days_per_month: Decimal::new(21, 0),
            night_bonus: Decimal::new(120, 0),
            sunday_bonus: Decimal::ZERO,
            seniority_bonus: Decimal::new(50, 0),
            meal_allowance: Decimal::new(1520, 2),
            overnight_allowance: Decimal::new(45, 0),
        })
    } else {
        DriverContract::Interim(InterimTerms {
            interim_hourly_rate: Some(Decimal::new(1650, 2)),
            ..InterimTerms::default()
        })
    };
    Driver {
        id: format!("drv_{:03}", i),
        name: String::new(),
        contract,
    }
}

fn create_charge(i: usize) -> FixedCharge {
    FixedCharge {
        id: format!("chg_{:03}", i),
        name: String::new(),
        amount: Decimal::new(450 + i as i64, 0),
        is_ht: i % 2 == 0,
        periodicity: if i % 3 == 0 {
            Periodicity::Yearly
        } else {
            Periodicity::Monthly
        },
        category: ChargeCategory::Administrative,
    }
}

/// Creates a quote input with `size` drivers and `size` charges.
fn create_input(size: usize) -> QuoteInput {
    QuoteInput {
        trip: TripCalculation {
            distance: Decimal::new(640, 0),
            toll_cost: Decimal::new(11280, 2),
            pricing_mode: PricingMode::Km,
            price_per_km: Decimal::new(175, 2),
            target_margin: Decimal::new(15, 0),
            ..TripCalculation::default()
        },
        vehicle_params: VehicleParams::default(),
        vehicles: vec![FleetUnit {
            id: "veh_001".to_string(),
            fuel_consumption: Decimal::new(31, 0),
            ad_blue_consumption: Decimal::new(15, 1),
            total_annual_fixed_cost: Decimal::new(38000, 0),
        }],
        trailer: None,
        drivers: (0..size).map(create_driver).collect(),
        charges: (0..size).map(create_charge).collect(),
    }
}

fn create_request_body(i: usize) -> String {
    serde_json::json!({
        "trip": {
            "distance": format!("{}", 200 + i),
            "toll_cost": "64.80",
            "pricing_mode": if i % 2 == 0 { "km" } else { "auto" },
            "price_per_km": "1.80",
            "target_margin": "12"
        },
        "vehicles": [{
            "id": "veh_001",
            "year": 2023,
            "fuel_consumption": "31",
            "purchase_price": "115000",
            "insurance_cost": "4200",
            "maintenances": [{ "interval_km": "60000", "cost": "650" }]
        }],
        "drivers": [{
            "id": "drv_001",
            "contract_type": "cdi",
            "base_salary": "2200",
            "patronal_charges": "45",
            "working_days_per_month": "21"
        }],
        "charges": [
            { "id": "chg_001", "amount": "900", "is_ht": true, "periodicity": "monthly" }
        ],
        "reference_year": 2025
    })
    .to_string()
}

/// Benchmark: one quote through the pure pipeline.
fn bench_single_quote(c: &mut Criterion) {
    let input = create_input(2);
    let settings = AppSettings::default();

    c.bench_function("single_quote", |b| {
        b.iter(|| black_box(calculate_quote(black_box(&input), &settings)))
    });
}

/// Benchmark: quote cost as drivers and charges grow.
fn bench_scaling(c: &mut Criterion) {
    let settings = AppSettings::default();
    let mut group = c.benchmark_group("scaling");

    for size in [1usize, 4, 16, 64].iter() {
        let input = create_input(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("drivers_and_charges", size), size, |b, _| {
            b.iter(|| black_box(calculate_quote(&input, &settings)))
        });
    }

    group.finish();
}

/// Benchmark: one quote through the HTTP router.
fn bench_http_quote(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(0);

    c.bench_function("http_quote", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/quote")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 HTTP quotes.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let requests: Vec<String> = (0..100).map(create_request_body).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/quote")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_quote,
    bench_scaling,
    bench_http_quote,
    bench_batch_100,
);
criterion_main!(benches);
