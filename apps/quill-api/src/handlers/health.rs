//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Liveness plus a database round trip.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database_up = state.database_reachable().await;

    let response = HealthResponse {
        status: if database_up { "ok" } else { "degraded" },
        database: if database_up { "up" } else { "unreachable" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if database_up {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[actix_web::test]
    async fn health_reports_database_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = AppState::with_connection(db);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "up");
    }
}
