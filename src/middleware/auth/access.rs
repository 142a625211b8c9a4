//! Bearer token gate applied as an axum middleware.
//!
//! The gate runs before the wrapped routes: on success the request continues with
//! whatever the claims callback attached to its extensions; on failure the routes
//! never run and the rejection becomes the response.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use super::error::GateRejection;
use super::gate::TokenGate;

/// Put every route registered so far on `router` behind `gate`.
///
/// Routes added after this call are not gated.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.gate.clone());
/// ```
pub fn apply<S>(router: Router<S>, gate: Arc<TokenGate>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(gate, token_gate_middleware))
}

pub async fn token_gate_middleware(
    State(gate): State<Arc<TokenGate>>,
    req: Request,
    next: Next,
) -> Result<Response, GateRejection> {
    let (mut parts, body) = req.into_parts();

    gate.authorize(&parts.headers, &mut parts.extensions).await?;

    // Downstream results and errors pass through unchanged.
    Ok(next.run(Request::from_parts(parts, body)).await)
}
