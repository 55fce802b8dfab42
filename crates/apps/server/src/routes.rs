use axum::extract::{Path as AxumPath, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Mode;
use crate::params::RawQuery;
use crate::pipeline::Pipeline;
use crate::AppState;

pub fn router(state: AppState, mode: Mode) -> Router {
    let mut app = Router::new().route("/healthz", get(healthz));

    if mode.serves_gen() {
        app = app
            .route("/ds", query_route(Pipeline::RAW_DS))
            .route("/ds/:sample_size", path_route(Pipeline::RAW_DS))
            .route("/perftest/gen", query_route(Pipeline::RAW_GEN))
            .route("/perftest/gen/:sample_size", path_route(Pipeline::RAW_GEN))
            .route("/perftest/aggr/:sample_size", path_route(Pipeline::AGGREGATE));
    }
    if mode.serves_get() {
        app = app
            .route("/perftest/get", query_route(Pipeline::FETCH))
            .route("/perftest/get/:sample_size", path_route(Pipeline::FETCH));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn query_route(pipeline: Pipeline) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Query(query): Query<RawQuery>| async move {
            pipeline.run(&state, None, &query).await
        },
    )
}

fn path_route(pipeline: Pipeline) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>,
              AxumPath(sample_size): AxumPath<String>,
              Query(query): Query<RawQuery>| async move {
            pipeline.run(&state, Some(sample_size.as_str()), &query).await
        },
    )
}
