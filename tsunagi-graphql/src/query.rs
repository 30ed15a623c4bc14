//! Builders for the fixed set of documents sent to the backend.

use serde_json::{Map, Value};
use tsunagi_core::SortField;

use crate::value::{quote, render_arguments};
use crate::Result;

/// Fields selected for every shift node
pub const SHIFT_FIELDS: &str =
    "id status startTime endTime caregiver { id firstName lastName } client { id firstName lastName }";

const TASK_FIELDS: &str = "id status description dueDate careLog { id }";

pub const CLOCK_IN_FIELD: &str = "caregiverClockIn";
pub const CLOCK_OUT_FIELD: &str = "caregiverClockOut";
pub const TASK_MUTATION_FIELD: &str = "createUpdateTask";
pub const SHIFT_FIELD: &str = "shift";
pub const TASK_FIELD: &str = "task";
pub const SHIFT_SEARCH_FIELD: &str = "shiftSearch";

fn mutation(field: &str, args: &Map<String, Value>, selection: &str) -> Result<String> {
    Ok(format!(
        "mutation {{ {}(input: {{{}}}) {{ {} }} }}",
        field,
        render_arguments(args)?,
        selection
    ))
}

pub fn clock_in_mutation(args: &Map<String, Value>) -> Result<String> {
    mutation(
        CLOCK_IN_FIELD,
        args,
        "careLog { id clockInTime latitude longitude shift { id } } errors",
    )
}

pub fn clock_out_mutation(args: &Map<String, Value>) -> Result<String> {
    mutation(
        CLOCK_OUT_FIELD,
        args,
        "careLog { id clockInTime clockOutTime latitude longitude } errors",
    )
}

pub fn task_mutation(args: &Map<String, Value>) -> Result<String> {
    mutation(
        TASK_MUTATION_FIELD,
        args,
        "task { id status description dueDate } errors",
    )
}

pub fn shift_query(id: &str) -> String {
    format!("query {{ {}(id: {}) {{ {} }} }}", SHIFT_FIELD, quote(id), SHIFT_FIELDS)
}

pub fn task_query(id: &str) -> String {
    format!("query {{ {}(id: {}) {{ {} }} }}", TASK_FIELD, quote(id), TASK_FIELDS)
}

/// Shift search; the `sort:` argument is omitted when `sort` is empty
pub fn shift_search(sort: &[SortField]) -> String {
    let args = if sort.is_empty() {
        String::new()
    } else {
        let fields: Vec<String> = sort.iter().map(|f| quote(&f.to_param())).collect();
        format!("(sort: [{}])", fields.join(", "))
    };
    format!(
        "query {{ {}{} {{ totalRecords results {{ {} }} }} }}",
        SHIFT_SEARCH_FIELD, args, SHIFT_FIELDS
    )
}
