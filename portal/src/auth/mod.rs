//! Request authorization and response guarding for every API call.
pub mod authorizer;
pub mod guard;

pub use authorizer::RequestAuthorizer;
pub use guard::{LOGIN_PATH, ResponseGuard};
