pub mod auth;
pub mod flash;
pub mod health;
pub mod pages;
pub mod posts;
pub mod session;
