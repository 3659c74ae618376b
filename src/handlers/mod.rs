// src/handlers/mod.rs
pub mod generate;
pub mod status;
