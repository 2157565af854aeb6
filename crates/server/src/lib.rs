pub mod config;

pub mod state;

pub mod store;

pub mod rest;

pub mod openapi;

pub mod error_convert;

pub mod telemetry;

pub mod health;

pub mod auth;

// Permitflow domain modules
pub mod repo;

pub mod rate_limit;

pub mod search;
