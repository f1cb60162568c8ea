// src/models/mod.rs

pub mod conversation;
pub mod swap;
pub mod user;
