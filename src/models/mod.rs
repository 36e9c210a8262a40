//! Data models for BookNest

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use user::{CreateUser, LoginRequest, LoginResponse, Role, User, UserClaims, UserInfo};
