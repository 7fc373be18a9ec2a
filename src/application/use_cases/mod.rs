pub mod auth;
pub mod comments;
pub mod contact;
pub mod posts;
