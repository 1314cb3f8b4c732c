pub mod identity_provider;
pub mod password_hasher;
pub mod session_revocation;
pub mod token_provider;

pub use identity_provider::{IdentityError, IdentityProvider};
pub use password_hasher::{HashError, PasswordHasher};
pub use session_revocation::{RevocationError, SessionRevocation};
pub use token_provider::{AccessToken, TokenClaims, TokenError, TokenProvider};
