use actix_web::{http::header, web, HttpResponse, Result};
use actix_web_httpauth::middleware::HttpAuthentication;
use chrono::Local;
use serde::Serialize;
use serde_json::json;

use crate::{
    auth::{customer_validator, AuthUser},
    booking::BookingForm,
    error::ApiError,
    models::Appointment,
    routes::events,
    state::AppState,
};

#[derive(Serialize)]
struct CustomerDashboard {
    name: String,
    appointments: Vec<Appointment>,
    notification_count: usize,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customer")
            .wrap(HttpAuthentication::basic(customer_validator))
            .service(web::resource("").route(web::get().to(index)))
            .service(web::resource("/").route(web::get().to(index)))
            .service(web::resource("/dashboard").route(web::get().to(dashboard)))
            .service(
                web::resource("/appointments")
                    .route(web::get().to(list_appointments))
                    .route(web::post().to(create_appointment)),
            )
            .service(web::resource("/notifications").route(web::get().to(notifications)))
            .service(
                web::resource("/notifications/read").route(web::post().to(read_notifications)),
            )
            .service(web::resource("/events").route(web::get().to(events::customer_events))),
    );
}

async fn index() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, "/customer/dashboard"))
        .finish()
}

async fn dashboard(state: web::Data<AppState>, auth: web::ReqData<AuthUser>) -> HttpResponse {
    let workshop = state.workshop();
    let appointments = workshop
        .appointments()
        .list_by_customer(&auth.name)
        .cloned()
        .collect();
    let notification_count = workshop.notification_count(&auth.name);
    drop(workshop);

    HttpResponse::Ok().json(CustomerDashboard {
        name: auth.name.clone(),
        appointments,
        notification_count,
    })
}

async fn list_appointments(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> HttpResponse {
    let appointments: Vec<Appointment> = state
        .workshop()
        .appointments()
        .list_by_customer(&auth.name)
        .cloned()
        .collect();
    HttpResponse::Ok().json(appointments)
}

async fn create_appointment(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
    form: web::Json<BookingForm>,
) -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    let record = form
        .into_inner()
        .validate(&auth, today)
        .map_err(ApiError::Validation)?;

    let appointment = state.workshop().book(record);
    log::info!(
        "New appointment {} requested by {} for {} on {} at {}.",
        appointment.id,
        appointment.customer_name,
        appointment.service_description,
        appointment.date,
        appointment.time
    );
    state.publish("appointment_created", &appointment);

    Ok(HttpResponse::Created().json(appointment))
}

async fn notifications(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> HttpResponse {
    let workshop = state.workshop();
    HttpResponse::Ok().json(json!({
        "count": workshop.notification_count(&auth.name),
        "messages": workshop.peek_notifications(&auth.name),
    }))
}

/// Opening the notification panel marks everything read.
async fn read_notifications(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> HttpResponse {
    let messages = state.workshop().drain_notifications(&auth.name);
    HttpResponse::Ok().json(json!({ "messages": messages }))
}
