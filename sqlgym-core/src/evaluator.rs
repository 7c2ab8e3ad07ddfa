//! Placeholder correctness check for submitted SQL.
//!
//! This does NOT execute anything. A submission is judged "correct" when its
//! lowercased text contains both `select` and `from` - a stand-in for running
//! the query against a sandboxed database and comparing result sets. The
//! verdict is non-authoritative.
//!
//! The check is a pure function of the query text, so the HTTP and
//! persistence layers can treat grading as deterministic and side-effect free.

/// Judge a submitted query.
///
/// Returns `true` iff the lowercased text contains both the `select` and
/// `from` keywords. Case and position are irrelevant.
///
/// # Example
/// ```
/// use sqlgym_core::evaluate_query;
///
/// assert!(evaluate_query("SELECT * FROM users"));
/// assert!(!evaluate_query("DROP TABLE users"));
/// ```
pub fn evaluate_query(query: &str) -> bool {
    let normalized = query.to_lowercase();
    normalized.contains("select") && normalized.contains("from")
}
