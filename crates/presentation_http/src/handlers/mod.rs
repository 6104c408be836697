//! HTTP request handlers

pub mod analysis;
pub mod health;
