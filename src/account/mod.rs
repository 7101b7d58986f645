//! Account domain: validation, password hashing, persistence and the service
//! that composes them for registration and login.

mod error;
pub mod password;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{AccountError, CONFLICT_MESSAGE, STORE_MESSAGE, UNAUTHORIZED_MESSAGE};
pub use service::AccountService;
pub use store::{InsertOutcome, MemoryUserStore, PgUserStore, UserRecord, UserStore};
pub use types::{Credentials, NewAccount};
pub use validation::Validator;
