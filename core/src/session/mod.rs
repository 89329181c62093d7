pub mod storage;
pub mod store;
pub mod types;

pub use storage::{MemoryStorage, SessionStorage};
pub use store::SessionStore;
pub use types::{CommitOutcome, Credentials, LoginGrant, RequestTicket, Session, Subscription};
