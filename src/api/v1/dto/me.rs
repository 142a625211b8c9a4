/*
 * Responsibility
 * - Response DTO for GET /me
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::auth::Claims;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub claims: Claims,
}
