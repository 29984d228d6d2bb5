//! Handler tests for the telemetry routes.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockable::MockClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::test_utils::HttpStateBuilder;

fn fixed_clock() -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0)
            .single()
            .expect("valid instant"),
    );
    clock
}

async fn service_with(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(configure),
    )
    .await
}

async fn post<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[rstest]
#[case(StatKind::DailyProduction)]
#[case(StatKind::Energy)]
#[case(StatKind::Equipment)]
#[case(StatKind::MaterialUsage)]
#[case(StatKind::Quality)]
#[actix_web::test]
async fn missing_or_blank_date_is_a_bad_request(#[case] kind: StatKind) {
    let app = service_with(HttpStateBuilder::default().build()).await;

    let (missing, missing_body) = post(&app, kind.record_path(), json!({})).await;
    let (blank, blank_body) = post(&app, kind.record_path(), json!({"date": "  "})).await;

    assert_eq!(missing, StatusCode::BAD_REQUEST);
    assert_eq!(missing_body["details"]["code"], "missing_date");
    assert_eq!(blank, StatusCode::BAD_REQUEST);
    assert_eq!(blank_body["details"]["code"], "empty_date");
}

#[actix_web::test]
async fn record_returns_the_view_with_timestamps() {
    let state = HttpStateBuilder::default().with_clock(fixed_clock()).build();
    let app = service_with(state).await;

    let (status, body) = post(
        &app,
        "/energy/postenergyStats",
        json!({"date": "2024-06-01", "electricity": 72.5, "gas": 3.1}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": INSERT_SUCCESS_MESSAGE,
            "stats": {
                "date": "2024-06-01",
                "electricity": 72.5,
                "gas": 3.1,
                "createdAt": "2024-06-01T08:30:00Z",
                "updatedAt": "2024-06-01T08:30:00Z"
            }
        })
    );
}

#[rstest]
#[case(json!(420.0), StatusCode::CREATED)]
#[case(json!(420.5), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn counts_written_as_floats_must_be_whole(
    #[case] output: Value,
    #[case] expected: StatusCode,
) {
    let app = service_with(HttpStateBuilder::default().build()).await;

    let (status, body) = post(
        &app,
        "/daily/postdailyProductionStats",
        json!({"date": "2024-06-01", "totalOutput": output}),
    )
    .await;

    assert_eq!(status, expected);
    if expected == StatusCode::CREATED {
        assert_eq!(body["stats"]["totalOutput"], 420);
    } else {
        assert_eq!(body["code"], "invalid_request");
    }
}

#[actix_web::test]
async fn duplicate_dates_are_appended_in_order() {
    let app = service_with(HttpStateBuilder::default().build()).await;
    for output in [100, 200] {
        let (status, _) = post(
            &app,
            "/daily/postdailyProductionStats",
            json!({"date": "2024-06-01", "totalOutput": output}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let listed: Vec<Value> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/daily/getdailyProductionStats")
            .to_request(),
    )
    .await;

    let outputs: Vec<i64> = listed
        .iter()
        .filter_map(|row| row["totalOutput"].as_i64())
        .collect();
    assert_eq!(outputs, [100, 200]);
    assert!(listed.iter().all(|row| row.get("id").is_none()));
}

#[actix_web::test]
async fn quality_responses_carry_the_request_url() {
    let app = service_with(HttpStateBuilder::default().build()).await;

    let (status, recorded) = post(
        &app,
        "/quality/postqualityStats",
        json!({"date": "2024-06-01", "sampleCount": 95, "qualifiedCount": 93}),
    )
    .await;
    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/quality/getqualityStats")
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recorded["message"], INSERT_SUCCESS_MESSAGE);
    assert_eq!(recorded["url"], "http://localhost:8080/quality/postqualityStats");
    assert_eq!(recorded["stats"]["qualifiedCount"], 93);
    assert_eq!(listed["url"], "http://localhost:8080/quality/getqualityStats");
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn non_quality_records_omit_the_url() {
    let app = service_with(HttpStateBuilder::default().build()).await;

    let (_, body) = post(
        &app,
        "/material/postmaterialUsageStats",
        json!({"date": "2024-06-01", "materialName": "PE颗粒"}),
    )
    .await;

    assert!(body.get("url").is_none());
    assert_eq!(body["stats"]["materialName"], "PE颗粒");
}

struct UnavailableLedger;

#[async_trait]
impl<F: StatFields> StatsLedger<F> for UnavailableLedger {
    async fn record(&self, _draft: StatDraft<F>) -> Result<StatView<F>, DomainError> {
        Err(DomainError::internal("energy store unavailable"))
    }

    async fn list(&self) -> Result<Vec<StatView<F>>, DomainError> {
        Err(DomainError::internal("energy store unavailable"))
    }
}

fn unavailable_ports() -> StatsPorts {
    let ledger = Arc::new(UnavailableLedger);
    StatsPorts {
        daily_production: ledger.clone(),
        energy: ledger.clone(),
        equipment: ledger.clone(),
        material_usage: ledger.clone(),
        quality: ledger,
    }
}

#[actix_web::test]
async fn storage_failures_are_redacted() {
    let state = HttpStateBuilder::default()
        .with_stats(unavailable_ports())
        .build();
    let app = service_with(state).await;

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/energy/getenergyStats")
            .to_request(),
    )
    .await;
    let (status, body) = post(&app, "/energy/postenergyStats", json!({"date": "2024-06-01"})).await;

    assert_eq!(listed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
}
