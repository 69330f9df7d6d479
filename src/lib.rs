pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod provider;
pub mod session;
