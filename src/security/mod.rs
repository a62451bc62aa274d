/// Security primitives for the account-auth service
///
/// - Password hashing and verification (Argon2id)
/// - Access token signing and validation (HS256 JWT, algorithm pinned)
/// - Opaque refresh-token generation (CSPRNG, URL-safe)
pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::{Claims, TokenSigner};
pub use password::{hash_password, verify_password};
pub use token::generate_opaque_token;
