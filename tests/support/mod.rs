#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode, header::AUTHORIZATION};
use axum::routing::get;
use axum::{Router, response::Response};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use token_gate::middleware::auth;
use token_gate::{GateOptions, TokenGate};
use tower::ServiceExt;

/// Ordered record of what ran for a request: the claims callback and/or the handler.
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().expect("trace lock").push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().expect("trace lock").clone()
    }
}

#[derive(Clone, Debug)]
pub struct Subject(pub String);

pub fn sign_with(algorithm: Algorithm, claims: &Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign token")
}

pub fn sign(claims: &Value, secret: &str) -> String {
    sign_with(Algorithm::HS512, claims, secret)
}

/// Current time in epoch seconds, the unit of the verifier's native `exp`/`nbf`.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Current time in epoch milliseconds, the unit of `iat`.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// `GET /protected` behind a gate built from `options`, with a claims callback that
/// records itself and stores the subject, and a handler that records itself.
pub fn gated_app(options: GateOptions, trace: &Trace) -> Router {
    let callback_trace = trace.clone();
    let options = options.with_claims_handler(move |extensions, token| {
        callback_trace.push("callback");
        if let Some(sub) = token.subject() {
            extensions.insert(Subject(sub.to_string()));
        }
    });
    let gate = Arc::new(TokenGate::new(options).expect("gate"));

    let handler_trace = trace.clone();
    let router = Router::new().route(
        "/protected",
        get(move |subject: Option<Extension<Subject>>| {
            let trace = handler_trace.clone();
            async move {
                trace.push("handler");
                subject
                    .map(|Extension(Subject(sub))| sub)
                    .unwrap_or_default()
            }
        }),
    );

    auth::apply(router, gate)
}

pub async fn call(router: Router, uri: &str, authorization: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let req = builder.body(Body::empty()).expect("request");

    router.oneshot(req).await.expect("infallible router")
}

pub async fn into_parts(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

pub async fn get_protected(router: Router, authorization: Option<&str>) -> (StatusCode, String) {
    into_parts(call(router, "/protected", authorization).await).await
}
