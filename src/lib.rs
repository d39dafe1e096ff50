//! Booking service for an auto-repair workshop: customers book service
//! appointments, the mechanic accepts and completes them, and customers are
//! notified when a booking is accepted. All state lives in memory.

pub mod accounts;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod state;
pub mod store;
pub mod workshop;

use actix_web::web;

use crate::error::ApiError;

/// Registers every route scope on an actix-web app. Unreadable JSON bodies
/// are answered like any other validation failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(vec![err.to_string()]).into()
    }));
    routes::public::configure(cfg);
    routes::customer::configure(cfg);
    routes::admin::configure(cfg);
}
