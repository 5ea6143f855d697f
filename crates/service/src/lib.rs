//! Service layer providing the enrollment use cases on top of models.
//! - Every multi-statement write runs in one transaction.
//! - The connection is passed in by the caller; nothing here is global.
//! - Failures come back as `ServiceError` instead of being swallowed.

pub mod errors;
pub mod enrollment_service;
pub mod student_service;
pub mod course_service;
#[cfg(test)]
pub mod test_support;
