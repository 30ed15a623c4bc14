//! GraphQL backend access: literal rendering, query builders and the
//! executor used by the translators.

pub mod client;
pub mod error;
pub mod query;
pub mod value;

pub use client::{take_field, GraphqlExecutor, HttpGraphqlClient};
pub use error::{GraphqlError, Result};
