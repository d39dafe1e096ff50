use actix_web::{http::header, web, HttpResponse, Result};
use actix_web_httpauth::middleware::HttpAuthentication;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{admin_validator, AuthUser},
    error::ApiError,
    models::{Appointment, AppointmentStatus},
    routes::events,
    state::AppState,
    store::Transition,
};

#[derive(Clone, Debug, Serialize)]
struct StatCard {
    label: &'static str,
    value: usize,
}

#[derive(Serialize)]
struct AdminDashboard {
    admin_name: String,
    stats: Vec<StatCard>,
    appointments: Vec<Appointment>,
}

#[derive(Serialize)]
struct TransitionResponse {
    changed: bool,
    appointment: Appointment,
}

#[derive(Deserialize)]
struct AppointmentFilter {
    status: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(HttpAuthentication::basic(admin_validator))
            .service(web::resource("").route(web::get().to(index)))
            .service(web::resource("/").route(web::get().to(index)))
            .service(web::resource("/dashboard").route(web::get().to(dashboard)))
            .service(web::resource("/appointments").route(web::get().to(list_appointments)))
            .service(web::resource("/appointments/{id}").route(web::delete().to(delete_appointment)))
            .service(
                web::resource("/appointments/{id}/accept")
                    .route(web::post().to(accept_appointment)),
            )
            .service(
                web::resource("/appointments/{id}/complete")
                    .route(web::post().to(complete_appointment)),
            )
            .service(web::resource("/events").route(web::get().to(events::admin_events))),
    );
}

async fn index() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, "/admin/dashboard"))
        .finish()
}

async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let workshop = state.workshop();
    let store = workshop.appointments();
    let totals = store.stats();
    let appointments = store.list_all().to_vec();
    drop(workshop);

    let stats = vec![
        StatCard {
            label: "Total appointments",
            value: totals.total,
        },
        StatCard {
            label: "Pending",
            value: totals.pending,
        },
        StatCard {
            label: "Accepted",
            value: totals.accepted,
        },
        StatCard {
            label: "Completed",
            value: totals.completed,
        },
    ];

    HttpResponse::Ok().json(AdminDashboard {
        admin_name: state.admin_display_name.clone(),
        stats,
        appointments,
    })
}

async fn list_appointments(
    state: web::Data<AppState>,
    query: web::Query<AppointmentFilter>,
) -> Result<HttpResponse> {
    let status_filter = query.status.as_deref().unwrap_or("").trim();
    let workshop = state.workshop();
    let store = workshop.appointments();

    let appointments: Vec<Appointment> = if status_filter.is_empty() {
        store.list_all().to_vec()
    } else {
        let status = AppointmentStatus::parse(status_filter).ok_or_else(|| {
            ApiError::Validation(vec![format!("Unknown status {status_filter:?}.")])
        })?;
        store.list_by_status(status).cloned().collect()
    };

    Ok(HttpResponse::Ok().json(appointments))
}

async fn accept_appointment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    let appointment_id = path.into_inner();
    let (transition, appointment) = {
        let mut workshop = state.workshop();
        let transition = workshop.accept(&appointment_id);
        let appointment = workshop.appointments().get(&appointment_id).cloned();
        (transition, appointment)
    };
    respond(&state, &auth, transition, appointment, "appointment_accepted")
}

async fn complete_appointment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    let appointment_id = path.into_inner();
    let (transition, appointment) = {
        let mut workshop = state.workshop();
        let transition = workshop.complete(&appointment_id);
        let appointment = workshop.appointments().get(&appointment_id).cloned();
        (transition, appointment)
    };
    respond(&state, &auth, transition, appointment, "appointment_completed")
}

async fn delete_appointment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    auth: web::ReqData<AuthUser>,
) -> Result<HttpResponse> {
    let appointment_id = path.into_inner();
    let removed = state
        .workshop()
        .remove(&appointment_id)
        .ok_or(ApiError::NotFound("appointment"))?;

    log::info!("{} deleted appointment {}.", auth.name, removed.id);
    state.publish("appointment_deleted", &removed);

    Ok(HttpResponse::NoContent().finish())
}

fn respond(
    state: &AppState,
    auth: &AuthUser,
    transition: Transition,
    appointment: Option<Appointment>,
    kind: &str,
) -> Result<HttpResponse> {
    let appointment = appointment.ok_or(ApiError::NotFound("appointment"))?;

    match transition {
        Transition::Applied => {
            log::info!(
                "{} moved appointment {} to {}.",
                auth.name,
                appointment.id,
                appointment.status
            );
            state.publish(kind, &appointment);
        }
        Transition::Unchanged(current) => {
            log::debug!(
                "Ignored {kind} for appointment {} while {current}.",
                appointment.id
            );
        }
        Transition::NotFound => return Err(ApiError::NotFound("appointment").into()),
    }

    Ok(HttpResponse::Ok().json(TransitionResponse {
        changed: transition.applied(),
        appointment,
    }))
}
