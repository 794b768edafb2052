/// HTTP middleware and extractors for devhub-api
///
/// `UserId` authenticates a request from its `Authorization: Bearer` header;
/// handlers that take it as an argument are authenticated, everything else is
/// public. `MaybeUserId` is the optional variant for viewer-aware public
/// endpoints (e.g. the feed's `liked` flags). `MetricsMiddleware` records
/// request counts and durations into the Prometheus registry.
use crate::auth::token;
use crate::metrics;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use uuid::Uuid;

// =====================================================================
// Authentication extractors
// =====================================================================

/// Authenticated user identifier extracted from a Bearer token.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

fn bearer_user(req: &HttpRequest) -> Result<Uuid, Error> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

    token::authenticate(token).map_err(|_| ErrorUnauthorized("Invalid or expired token"))
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(bearer_user(req).map(UserId))
    }
}

/// Optional authentication: `None` for anonymous or invalid credentials.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUserId(pub Option<Uuid>);

impl FromRequest for MaybeUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUserId(bearer_user(req).ok())))
    }
}

// =====================================================================
// Metrics middleware
// =====================================================================

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        // Label by route pattern, not raw path, to keep cardinality bounded.
        let path = req
            .match_pattern()
            .unwrap_or_else(|| req.path().to_string());
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed().as_secs_f64();

            let status = match &res {
                Ok(response) => response.status().as_u16().to_string(),
                Err(err) => err.as_response_error().status_code().as_u16().to_string(),
            };

            metrics::HTTP_REQUESTS_TOTAL
                .with_label_values(&[method.as_str(), path.as_str(), status.as_str()])
                .inc();
            metrics::HTTP_REQUEST_DURATION_SECONDS
                .with_label_values(&[method.as_str(), path.as_str()])
                .observe(elapsed);

            tracing::debug!(%method, %path, %status, elapsed, "request completed");
            res
        })
    }
}
