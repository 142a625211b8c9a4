/*
 * Responsibility
 * - GET /me: echo the identity the token gate established
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        subject: ctx.subject,
        issued_at: ctx.issued_at,
        claims: ctx.claims,
    })
}
