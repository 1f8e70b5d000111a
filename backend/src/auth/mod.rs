//! Authentication module
//!
//! JWT sessions (Bearer header or `session` cookie) with argon2 password hashing.

mod jwt;
mod middleware;
mod password;
pub mod session;

pub use jwt::{Claims, JwtService, TokenKind};
pub use middleware::AuthUser;
pub use password::PasswordService;
