/*
 * Responsibility
 * - auth: bearer token gate (TokenGate) and its axum layer
 * - http: request id, access log, body limit, timeout
 */
pub mod auth;
pub mod http;
