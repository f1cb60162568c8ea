// src/handlers/mod.rs

pub mod admin;
pub mod ai;
pub mod auth;
pub mod chat;
pub mod swaps;
pub mod users;
