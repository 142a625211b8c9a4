/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to clone; the gate is behind an Arc and never mutated
 */
use std::sync::Arc;

use crate::middleware::auth::TokenGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<TokenGate>,
}

impl AppState {
    pub fn new(gate: Arc<TokenGate>) -> Self {
        Self { gate }
    }
}
