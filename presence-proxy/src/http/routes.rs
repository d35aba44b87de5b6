use super::Server;
use crate::discord::PresenceSource;

use serde::Serialize;
use std::sync::Arc;
use warp::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL};
use warp::http::{HeaderValue, StatusCode};
use warp::reply::{Json, Response};
use warp::Reply;

#[derive(Serialize, Debug)]
struct PingResponse {
    success: bool,
}

pub(super) async fn ping() -> Result<Json, warp::Rejection> {
    Ok(warp::reply::json(&PingResponse { success: true }))
}

/// Always 200: upstream failures only ever blank parts of the snapshot.
pub(super) async fn presence<T: PresenceSource>(
    server: Arc<Server<T>>,
) -> Result<Response, warp::Rejection> {
    let snapshot = server.aggregator.snapshot().await;

    let mut res = warp::reply::with_status(warp::reply::json(&snapshot), StatusCode::OK)
        .into_response();

    let headers = res.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    if let Some(origin) = &server.config.allowed_origin {
        if let Ok(value) = HeaderValue::from_str(origin) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }

    Ok(res)
}
