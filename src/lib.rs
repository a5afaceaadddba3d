//! sqquats-backend: website backend for The Sqquats Gym.
//!
//! Accepts contact-form submissions, persists them in MongoDB, optionally
//! emails a notification over SMTP, and exposes status-check endpoints.
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
pub mod utils;
