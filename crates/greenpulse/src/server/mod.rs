//! REST endpoints over a [`Monitor`].
//!
//! | route                 | handler                      |
//! |-----------------------|------------------------------|
//! | `GET /rooms`          | [`handlers::list_rooms`]     |
//! | `GET /alerts`         | [`handlers::list_alerts`]    |
//! | `GET /summary`        | [`handlers::summary`]        |
//! | `POST /analyze`       | [`handlers::analyze`]        |
//! | `GET /snapshot/:id`   | [`handlers::snapshot`]       |
//! | `GET /healthz`        | [`handlers::health_check`]   |

pub mod dto;
pub mod error;
pub mod handlers;

use std::future::Future;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use greenpulse_core::{ImageSource, Monitor, OccupantDetector};

pub use error::ApiError;

/// Build the router with CORS open to any origin and request tracing.
pub fn create_router<D, S>(monitor: Monitor<D, S>) -> Router
where
    D: OccupantDetector,
    S: ImageSource,
{
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/rooms", get(handlers::list_rooms::<D, S>))
        .route("/alerts", get(handlers::list_alerts::<D, S>))
        .route("/summary", get(handlers::summary::<D, S>))
        .route("/analyze", post(handlers::analyze::<D, S>))
        .route("/snapshot/:room_id", get(handlers::snapshot::<D, S>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(monitor)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<D, S>(
    listener: TcpListener,
    monitor: Monitor<D, S>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()>
where
    D: OccupantDetector,
    S: ImageSource,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, create_router(monitor))
        .with_graceful_shutdown(shutdown)
        .await
}
