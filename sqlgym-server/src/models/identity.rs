//! Claimed identity attributes
//!
//! Identity is an explicit typed value passed into every operation that
//! needs it - never ambient state. The HTTP layer decides where claims come
//! from (currently a mock provider); everything below it only sees this
//! struct or the bare user id.

/// Identity attributes claimed by the caller.
///
/// Used for upsert-on-read: the stored user's mutable fields are overwritten
/// with these values on every authenticated request, last writer wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedIdentity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}
