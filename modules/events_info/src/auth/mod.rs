//! Authentication: token issuance/verification, password hashing and the
//! gate that ties them to the credential store.

pub mod error;
pub mod gate;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use gate::AuthService;
pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{Claims, IssueError, TokenAuthority};
