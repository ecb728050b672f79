//! HTTP request handlers

pub mod health;
pub mod sessions;
pub mod tools;
