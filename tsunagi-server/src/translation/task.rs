use serde_json::{Map, Value};
use tsunagi_core::{shape, Result, TsunagiError};
use tsunagi_graphql::query;

use super::{TaskLookup, TaskUpdate, Translator};

/// Task mutation arguments: the body verbatim plus `taskId` from the path
fn task_arguments(task_id: &str, data: &Map<String, Value>) -> Map<String, Value> {
    let mut args = data.clone();
    args.insert("taskId".to_string(), Value::String(task_id.to_string()));
    args
}

impl Translator {
    pub async fn get_task(&self, req: &TaskLookup) -> Result<Value> {
        let document = query::task_query(&req.task_id);
        let task = self.run(&req.tenant, &document, query::TASK_FIELD).await?;
        if task.is_null() {
            return Err(TsunagiError::not_found("Task", &req.task_id));
        }
        Ok(shape::task_to_fhir(&task))
    }

    /// Returns the `createUpdateTask` payload as is
    pub async fn update_task(&self, req: &TaskUpdate) -> Result<Value> {
        let args = task_arguments(&req.task_id, &req.data);
        let document = query::task_mutation(&args)?;
        self.run(&req.tenant, &document, query::TASK_MUTATION_FIELD)
            .await
    }
}
