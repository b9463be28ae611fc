pub mod model;
pub mod storage;
pub mod store;

pub use model::{BearerToken, Role, Session, UserIdentity};
pub use storage::Storage;
pub use store::{DEFAULT_SESSION_KEY, SessionStore};
