//! Telemetry HTTP handlers.
//!
//! ```text
//! GET  /daily/getdailyProductionStats
//! POST /daily/postdailyProductionStats {"date":"2024-06-01","totalOutput":420}
//! ...
//! GET  /quality/getqualityStats        -> {"url": "...", "data": [...]}
//! POST /quality/postqualityStats       -> {"message": "...", "url": "...", "stats": {...}}
//! ```
//!
//! Handlers are generic over the measurement set; [`StatRoute`] picks the
//! ledger for each family out of [`StatsPorts`].

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::StatsLedger;
use crate::domain::{
    DailyProductionFields, DomainError, EnergyFields, EquipmentFields, MaterialUsageFields,
    QualityFields, StatDate, StatDraft, StatFields, StatKind, StatValidationError, StatView,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::{HttpState, StatsPorts};

/// Message returned after a record is stored.
pub const INSERT_SUCCESS_MESSAGE: &str = "插入成功";

/// Maps a measurement set to its ledger.
pub trait StatRoute: StatFields {
    /// Ledger serving this family.
    fn ledger(ports: &StatsPorts) -> &Arc<dyn StatsLedger<Self>>;
}

macro_rules! stat_route {
    ($fields:ty => $port:ident) => {
        impl StatRoute for $fields {
            fn ledger(ports: &StatsPorts) -> &Arc<dyn StatsLedger<Self>> {
                &ports.$port
            }
        }
    };
}

stat_route!(DailyProductionFields => daily_production);
stat_route!(EnergyFields => energy);
stat_route!(EquipmentFields => equipment);
stat_route!(MaterialUsageFields => material_usage);
stat_route!(QualityFields => quality);

/// Request body for every record endpoint: an optional `date` plus any
/// subset of the family's measurements.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "F: StatFields"))]
pub struct StatPayload<F> {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F: StatFields> TryFrom<StatPayload<F>> for StatDraft<F> {
    type Error = StatValidationError;

    fn try_from(payload: StatPayload<F>) -> Result<Self, Self::Error> {
        let date = StatDate::from_optional(payload.date.as_deref())?;
        Ok(StatDraft::new(date, payload.fields))
    }
}

fn map_stat_validation_error(err: StatValidationError) -> DomainError {
    let code = match err {
        StatValidationError::MissingDate => "missing_date",
        StatValidationError::EmptyDate => "empty_date",
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": "date", "code": code }))
}

#[derive(Debug, Serialize)]
struct Recorded<F: Serialize> {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    stats: StatView<F>,
}

#[derive(Debug, Serialize)]
struct QualityListing {
    url: String,
    data: Vec<StatView<QualityFields>>,
}

fn request_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.uri())
}

/// `GET` collection handler for families returning a bare array.
pub async fn list_stats<F: StatRoute>(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StatView<F>>>> {
    let views = F::ledger(&state.stats).list().await?;
    Ok(web::Json(views))
}

/// `GET /quality/getqualityStats`: records wrapped with the request URL.
pub async fn list_quality_stats(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let data = state.stats.quality.list().await?;
    Ok(HttpResponse::Ok().json(QualityListing {
        url: request_url(&req),
        data,
    }))
}

/// `POST` record handler. Quality responses also carry the request URL.
pub async fn record_stat<F: StatRoute>(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<StatPayload<F>>,
) -> ApiResult<HttpResponse> {
    let draft = StatDraft::try_from(payload.into_inner()).map_err(map_stat_validation_error)?;
    let stats = F::ledger(&state.stats).record(draft).await?;
    let url = matches!(F::KIND, StatKind::Quality).then(|| request_url(&req));
    Ok(HttpResponse::Created().json(Recorded {
        message: INSERT_SUCCESS_MESSAGE,
        url,
        stats,
    }))
}

fn register<F: StatRoute>(cfg: &mut web::ServiceConfig) {
    cfg.route(F::KIND.record_path(), web::post().to(record_stat::<F>));
    if !matches!(F::KIND, StatKind::Quality) {
        cfg.route(F::KIND.list_path(), web::get().to(list_stats::<F>));
    }
}

/// Register the ten telemetry routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    register::<DailyProductionFields>(cfg);
    register::<EnergyFields>(cfg);
    register::<EquipmentFields>(cfg);
    register::<MaterialUsageFields>(cfg);
    register::<QualityFields>(cfg);
    cfg.route(
        StatKind::Quality.list_path(),
        web::get().to(list_quality_stats),
    );
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
