//! Transport plumbing shared by the REST modules: RFC 9457 problem
//! responses and request-id propagation.

pub mod problem;
pub mod request_id;

pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
pub use request_id::XRequestId;
