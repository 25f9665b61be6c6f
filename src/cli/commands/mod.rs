//! CLI Commands

pub mod config;
pub mod health;
pub mod serve;
pub mod show;
