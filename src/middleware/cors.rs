// src/middleware/cors.rs
// DOCUMENTATION: CORS headers for the browser client
// PURPOSE: Fixed allowed origin with credentials; preflight requests end here with 204

use crate::config::Config;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

const ALLOWED_HEADERS: &str =
    "X-Requested-With, X-HTTP-Method-Override, Content-Type, Accept, Authorization";
const ALLOWED_METHODS: &str = "GET, PUT, POST, DELETE, OPTIONS";

/// Middleware function, mount with `actix_web::middleware::from_fn(cors)`
/// DOCUMENTATION: The origin comes from Config::cors_allowed_origin in app data
pub async fn cors<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let origin = req
        .app_data::<web::Data<Config>>()
        .map(|config| config.cors_allowed_origin.clone())
        .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

    let mut res = if req.method() == Method::OPTIONS {
        req.into_response(HttpResponse::NoContent().finish())
            .map_into_right_body()
    } else {
        next.call(req).await?.map_into_left_body()
    };

    apply_headers(res.headers_mut(), &origin);
    Ok(res)
}

fn apply_headers(headers: &mut HeaderMap, origin: &str) {
    match HeaderValue::from_str(origin) {
        Ok(value) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        Err(e) => log::warn!("Invalid CORS origin {:?}: {}", origin, e),
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
}
