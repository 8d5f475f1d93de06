//! HTTP surface.
//!
//! Thin axum handlers over the repositories: coerce path/query/body input,
//! call one repository operation, serialize the result. All failures leave
//! through [`ApiError`] and its `{message, error}` envelope.

mod clock_routes;
mod game_routes;
mod location_routes;
mod people_routes;
mod player_routes;
mod ship_routes;
mod system_routes;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::infrastructure::error::RepoError;

/// Error envelope returned by every failing handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: String,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    error: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.clone(),
            message,
        }
    }

    pub fn bad_request(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            error: error.to_string(),
        }
    }

    /// Wrap a repository error from a read path: NotFound maps to 404,
    /// everything else to 500.
    pub fn from_read(message: &str, err: RepoError) -> Self {
        if err.is_not_found() {
            Self::not_found(err.to_string())
        } else {
            tracing::error!("{message}: {err}");
            Self::internal(message, err)
        }
    }

    /// Wrap a repository error from a write path: NotFound maps to 404,
    /// everything else to 400 (the write was rejected).
    pub fn from_write(message: &str, err: RepoError) -> Self {
        if err.is_not_found() {
            Self::not_found(err.to_string())
        } else {
            tracing::error!("{message}: {err}");
            Self::bad_request(message, err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Shared pagination query parameters (`?page=&limit=`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page
            .unwrap_or(crate::infrastructure::persistence::DEFAULT_PAGE)
            .max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(crate::infrastructure::persistence::DEFAULT_PAGE_SIZE)
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
    timestamp: String,
}

async fn health(State(_state): State<Arc<App>>) -> Json<Health> {
    Json(Health {
        status: "OK",
        message: "Service is healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Assemble the full route tree.
pub fn router(state: Arc<App>) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/people",
            get(people_routes::list_people).post(people_routes::create_people),
        )
        .route(
            "/people/{id}",
            get(people_routes::get_person).put(people_routes::update_person),
        )
        .route("/people/{id}/kill", put(people_routes::kill_person))
        .route(
            "/people/{id}/skills",
            post(people_routes::add_skill).delete(people_routes::remove_skill),
        )
        .route(
            "/people/{id}/job",
            post(people_routes::add_job).delete(people_routes::remove_job),
        )
        .route(
            "/ships",
            get(ship_routes::list_ships).post(ship_routes::create_ships),
        )
        .route(
            "/ships/{id}",
            get(ship_routes::get_ship)
                .put(ship_routes::update_ship)
                .delete(ship_routes::delete_ship),
        )
        .route(
            "/ships/{id}/weapons",
            post(ship_routes::add_weapon).delete(ship_routes::remove_weapon),
        )
        .route(
            "/ships/{id}/defences",
            post(ship_routes::add_defence).delete(ship_routes::remove_defence),
        )
        .route(
            "/ships/{id}/fittings",
            post(ship_routes::add_fitting).delete(ship_routes::remove_fitting),
        )
        .route(
            "/ships/{id}/modifications",
            post(ship_routes::add_modification).delete(ship_routes::remove_modification),
        )
        .route(
            "/ships/{id}/cargo",
            post(ship_routes::add_cargo).delete(ship_routes::remove_cargo),
        )
        .route(
            "/ships/{id}/fitting-limits",
            post(ship_routes::define_fitting_limits),
        )
        .route("/ships/{id}/location", put(ship_routes::move_ship))
        .route(
            "/clocks",
            get(clock_routes::get_clocks)
                .post(clock_routes::create_clock)
                .delete(clock_routes::delete_clock),
        )
        .route(
            "/clocks/group",
            post(clock_routes::create_group).delete(clock_routes::delete_group),
        )
        .route("/clocks/advance", put(clock_routes::advance_clock))
        .route("/clocks/advance-group", put(clock_routes::advance_group))
        .route(
            "/clocks/attach-to-group",
            put(clock_routes::attach_to_group),
        )
        .route(
            "/clocks/detach-from-group",
            delete(clock_routes::detach_from_group),
        )
        .route(
            "/games",
            get(game_routes::list_games).post(game_routes::create_game),
        )
        .route(
            "/games/{id}",
            get(game_routes::get_game)
                .put(game_routes::update_game)
                .delete(game_routes::delete_game),
        )
        .route(
            "/players",
            get(player_routes::list_players).post(player_routes::create_player),
        )
        .route(
            "/players/{id}",
            get(player_routes::get_player)
                .put(player_routes::update_player)
                .delete(player_routes::delete_player),
        )
        .route("/systems", post(system_routes::create_system))
        .route(
            "/systems/{id}",
            get(system_routes::get_system)
                .put(system_routes::update_system)
                .delete(system_routes::delete_system),
        )
        .route(
            "/systems/{id}/neighbors",
            post(system_routes::add_neighbor),
        )
        .route(
            "/locations",
            get(location_routes::list_locations).post(location_routes::create_locations),
        )
        .route(
            "/locations/{id}",
            get(location_routes::get_location)
                .put(location_routes::update_location)
                .delete(location_routes::delete_location),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    use crate::infrastructure::db::Db;

    async fn test_router() -> Router {
        let db = Db::connect_in_memory().await.expect("in-memory pool");
        db.ensure_schema().await.expect("schema");
        router(Arc::new(App::new(db)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = test_router().await;

        let request = HttpRequest::builder()
            .uri("/")
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_missing_person_is_404_with_envelope() {
        let app = test_router().await;

        let request = HttpRequest::builder()
            .uri(format!(
                "/people/{}",
                starhold_domain::PersonId::new()
            ))
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["message"].is_string());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_game_create_then_fetch() {
        let app = test_router().await;

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/games")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "name": "Drift campaign", "description": null }).to_string(),
            ))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let id = created["id"].as_str().expect("id").to_string();

        let request = HttpRequest::builder()
            .uri(format!("/games/{id}"))
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["name"], "Drift campaign");
    }

    #[tokio::test]
    async fn test_clock_fetch_by_clock_id_query() {
        let app = test_router().await;

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/games")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "name": "Clockwork", "description": null }).to_string(),
            ))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let game = body_json(response).await;

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/clocks")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "name": "Pirate raid",
                    "segments": 6,
                    "game_id": game["id"],
                })
                .to_string(),
            ))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let clock = body_json(response).await;
        let clock_id = clock["id"].as_str().expect("id");

        let request = HttpRequest::builder()
            .uri(format!("/clocks?clock_id={clock_id}"))
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["name"], "Pirate raid");
    }

    #[tokio::test]
    async fn test_clocks_require_a_target() {
        let app = test_router().await;

        let request = HttpRequest::builder()
            .uri("/clocks")
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
