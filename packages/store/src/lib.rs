pub mod guard;
pub mod models;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use guard::{evaluate, login_redirect, safe_next, GuardDecision, LOGIN_PATH, UNAUTHORIZED_PATH};
pub use models::{Role, Session, SessionGrant, SessionState, UnknownRole, UserIdentity};
pub use session::SessionStore;
pub use storage::{platform_storage, PlatformStorage, SessionStorage};
