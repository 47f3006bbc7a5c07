//! HTTP request handlers

pub mod audio;
pub mod batch;
pub mod classify;
pub mod health;
