pub mod envelope;
pub mod error;
pub mod field_mapping;
pub mod id_codec;
pub mod operation_outcome;
pub mod shape;
pub mod sort;

pub use envelope::RequestEnvelope;
pub use error::{Result, TsunagiError};
pub use field_mapping::{ClockDirection, FieldClass, MutationArgs};
pub use id_codec::{GlobalIdCodec, HashType, IdCodec, ResourceId};
pub use operation_outcome::{IssueSeverity, IssueType, OperationOutcome, OperationOutcomeIssue};
pub use sort::{SortField, APPOINTMENT_SORT_FIELDS};
