//! Resource translators: one GraphQL round trip per operation.
//!
//! Ids on the request structs are already in hash form; handlers run them
//! through the [`IdCodec`](tsunagi_core::IdCodec) first.

mod appointment;
mod clock;
mod task;

use serde_json::{Map, Value};
use std::sync::Arc;
use tsunagi_core::{Result, SortField, TsunagiError};
use tsunagi_graphql::{take_field, GraphqlExecutor};

use crate::auth::TokenIssuer;
use crate::tenant::Tenant;

pub struct AppointmentLookup {
    pub tenant: Tenant,
    pub appointment_id: String,
}

pub struct AppointmentSearch {
    pub tenant: Tenant,
    pub sort: Vec<SortField>,
}

pub struct TaskLookup {
    pub tenant: Tenant,
    pub task_id: String,
}

pub struct TaskUpdate {
    pub tenant: Tenant,
    pub task_id: String,
    pub data: Map<String, Value>,
}

pub struct ClockIn {
    pub tenant: Tenant,
    pub shift_id: String,
    pub data: Map<String, Value>,
}

pub struct ClockOut {
    pub tenant: Tenant,
    pub carelog_id: String,
    pub data: Map<String, Value>,
}

pub struct Translator {
    executor: Arc<dyn GraphqlExecutor>,
    tokens: TokenIssuer,
}

impl Translator {
    pub fn new(executor: Arc<dyn GraphqlExecutor>, tokens: TokenIssuer) -> Self {
        Self { executor, tokens }
    }

    /// Mint a token for `tenant`, execute `document` and return `data.<field>`
    async fn run(&self, tenant: &Tenant, document: &str, field: &str) -> Result<Value> {
        let token = self
            .tokens
            .issue(tenant)
            .map_err(|e| TsunagiError::Backend(format!("Failed to mint backend token: {}", e)))?;

        let data = self.executor.execute(document, &token).await.map_err(|e| {
            tracing::error!(field = field, error = %e, "GraphQL call failed");
            TsunagiError::from(e)
        })?;

        Ok(take_field(data, field)?)
    }
}
