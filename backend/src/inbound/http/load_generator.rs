//! Load generator control routes.
//!
//! ```text
//! POST /toggle-timer    -> {"status":"started"} | {"status":"stopped"}
//! GET  /get-call-count  -> {"count":4}
//! GET  /                -> {"title":"...","isRunning":true,"callCount":4}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;

use crate::domain::ports::LoadStatus;
use crate::inbound::http::state::HttpState;

/// Title reported by the status route.
pub const STATUS_TITLE: &str = "工厂数据服务";

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: LoadStatus,
}

#[derive(Debug, Serialize)]
pub struct CallCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub title: &'static str,
    pub is_running: bool,
    pub call_count: u64,
}

/// Start the generator when stopped, stop it when running.
#[post("/toggle-timer")]
pub async fn toggle_timer(state: web::Data<HttpState>) -> web::Json<ToggleResponse> {
    web::Json(ToggleResponse {
        status: state.load.toggle(),
    })
}

/// Successful ticks since the generator last started.
#[get("/get-call-count")]
pub async fn call_count(state: web::Data<HttpState>) -> web::Json<CallCountResponse> {
    web::Json(CallCountResponse {
        count: state.load.snapshot().count,
    })
}

/// Current run state and count.
#[get("/")]
pub async fn status(state: web::Data<HttpState>) -> web::Json<StatusResponse> {
    let snapshot = state.load.snapshot();
    web::Json(StatusResponse {
        title: STATUS_TITLE,
        is_running: snapshot.running,
        call_count: snapshot.count,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{LoadSnapshot, MockLoadControl};
    use crate::inbound::http::test_utils::HttpStateBuilder;

    async fn get_json(load: MockLoadControl, uri: &str) -> Value {
        let state = HttpStateBuilder::default().with_load(load).build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(toggle_timer)
                .service(call_count)
                .service(status),
        )
        .await;
        let request = if uri == "/toggle-timer" {
            actix_test::TestRequest::post().uri(uri)
        } else {
            actix_test::TestRequest::get().uri(uri)
        };
        actix_test::call_and_read_body_json(&app, request.to_request()).await
    }

    #[actix_web::test]
    async fn toggle_reports_the_new_status() {
        let mut load = MockLoadControl::new();
        load.expect_toggle().times(1).return_const(LoadStatus::Started);

        let body = get_json(load, "/toggle-timer").await;

        assert_eq!(body, json!({"status": "started"}));
    }

    #[actix_web::test]
    async fn call_count_reads_the_snapshot() {
        let mut load = MockLoadControl::new();
        load.expect_snapshot().return_const(LoadSnapshot {
            running: false,
            count: 7,
        });

        let body = get_json(load, "/get-call-count").await;

        assert_eq!(body, json!({"count": 7}));
    }

    #[actix_web::test]
    async fn status_page_reports_state_and_count() {
        let mut load = MockLoadControl::new();
        load.expect_snapshot().return_const(LoadSnapshot {
            running: true,
            count: 2,
        });

        let body = get_json(load, "/").await;

        assert_eq!(
            body,
            json!({"title": STATUS_TITLE, "isRunning": true, "callCount": 2})
        );
    }
}
