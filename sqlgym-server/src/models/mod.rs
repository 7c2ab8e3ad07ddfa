//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod identity;
pub mod post;
pub mod query;
pub mod validation;

pub use identity::ClaimedIdentity;
pub use post::PostContent;
pub use query::SubmittedQuery;
pub use validation::ValidationError;
