//! HTTP API handlers for tai-ta
//!
//! - `/api/predict` — image classification path
//! - `/api/geology`, `/api/terrain` — coordinate path
//! - `/health` — service monitoring

pub mod classify;
pub mod geology;
pub mod health;

pub use classify::classify_routes;
pub use geology::geology_routes;
pub use health::health_routes;
