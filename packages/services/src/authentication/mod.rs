pub mod api;
pub mod authenticator;
pub mod error;
pub mod guard;
pub mod sandbox;
pub mod token;

pub use api::AuthApi;
pub use authenticator::AuthSession;
pub use error::ApiError;
pub use guard::{require_auth, require_guest, Route};
pub use sandbox::SandboxAuthApi;
pub use token::{MemoryTokenStore, TokenStore, TOKEN_KEY};
