//! Translation of FHIR Encounter fields into backend clock-in/clock-out
//! mutation arguments.
//!
//! Every top-level envelope entry is classified into exactly one
//! [`FieldClass`] and then handled by the matching branch of [`contribute`].

use serde_json::{Map, Value};

/// Flat argument map handed to the GraphQL literal renderer
pub type MutationArgs = Map<String, Value>;

/// FHIR field name -> backend argument name
pub const SHIFT_FIELD_MAPPING: &[(&str, &str)] = &[
    ("start", "clockInTime"),
    ("end", "clockOutTime"),
    ("note", "notes"),
    ("reasonCode", "reason"),
    ("length", "duration"),
];

const POSITION_COORDINATES: [&str; 2] = ["latitude", "longitude"];

/// Look up the backend argument name for a FHIR field
pub fn mapped_name(field: &str) -> Option<&'static str> {
    SHIFT_FIELD_MAPPING
        .iter()
        .find(|(fhir, _)| *fhir == field)
        .map(|(_, backend)| *backend)
}

/// Which end of a shift is being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDirection {
    In,
    Out,
}

impl ClockDirection {
    /// Name of the id argument carried by the mutation
    pub fn id_argument(&self) -> &'static str {
        match self {
            ClockDirection::In => "shiftId",
            ClockDirection::Out => "careLogId",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Position,
    PeriodStart,
    PeriodEnd,
    Mapped(&'static str),
    PassThrough,
}

impl FieldClass {
    pub fn classify(key: &str, direction: ClockDirection) -> Self {
        match key {
            "position" => FieldClass::Position,
            "period" => match direction {
                ClockDirection::In => FieldClass::PeriodStart,
                ClockDirection::Out => FieldClass::PeriodEnd,
            },
            _ => match mapped_name(key) {
                Some(name) => FieldClass::Mapped(name),
                None => FieldClass::PassThrough,
            },
        }
    }
}

/// JSON truthiness: null, false, zero, "" and empty containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Add the contribution of one envelope entry to `args`
pub fn contribute(args: &mut MutationArgs, key: &str, value: &Value, direction: ClockDirection) {
    match FieldClass::classify(key, direction) {
        FieldClass::Position => {
            for coordinate in POSITION_COORDINATES {
                if let Some(v) = value.get(coordinate) {
                    args.insert(coordinate.to_string(), v.clone());
                }
            }
        }
        FieldClass::PeriodStart => copy_period_bound(args, value, "start"),
        FieldClass::PeriodEnd => copy_period_bound(args, value, "end"),
        FieldClass::Mapped(name) => {
            args.insert(name.to_string(), value.clone());
        }
        FieldClass::PassThrough => {
            if is_truthy(value) {
                args.insert(key.to_string(), value.clone());
            }
        }
    }
}

fn copy_period_bound(args: &mut MutationArgs, period: &Value, bound: &str) {
    if let Some(v) = period.get(bound)
        && let Some(name) = mapped_name(bound)
    {
        args.insert(name.to_string(), v.clone());
    }
}

/// Build clock-in/clock-out arguments from an envelope body.
///
/// The id argument is inserted last so the path id always wins over a body
/// key of the same name.
pub fn build_clock_arguments(
    direction: ClockDirection,
    id: &str,
    fields: &Map<String, Value>,
) -> MutationArgs {
    let mut args = MutationArgs::new();
    for (key, value) in fields {
        contribute(&mut args, key, value, direction);
    }
    args.insert(
        direction.id_argument().to_string(),
        Value::String(id.to_string()),
    );
    args
}
