//! Authentication state: token, user info and where they are kept

pub mod clock;
pub mod models;
pub mod session;
pub mod storage;
pub mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{LoginRequest, LoginResponse, Role, UserInfo};
pub use session::{SessionStore, TOKEN_KEY, USER_INFO_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use token::{TokenError, TokenPayload, TokenStatus};
