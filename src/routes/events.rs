//! Server-sent event streams of appointment changes.

use actix_web::{http::header, web, HttpResponse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::{
    auth::AuthUser,
    state::{AppState, ServerEvent},
};

/// Every change, for the workshop dashboard.
pub async fn admin_events(state: web::Data<AppState>) -> HttpResponse {
    event_stream(&state, None)
}

/// Changes to the caller's own appointments only.
pub async fn customer_events(
    state: web::Data<AppState>,
    auth: web::ReqData<AuthUser>,
) -> HttpResponse {
    event_stream(&state, Some(auth.name.clone()))
}

fn event_stream(state: &AppState, customer: Option<String>) -> HttpResponse {
    let rx = state.events.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                log::warn!("Event subscriber dropped updates: {err}");
                return None;
            }
        };
        if !visible_to(&event, customer.as_deref()) {
            return None;
        }
        Some(Ok::<web::Bytes, actix_web::Error>(event_to_bytes(&event)))
    });

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(stream)
}

/// Admin streams (`None`) see everything; customers only their own bookings.
pub(crate) fn visible_to(event: &ServerEvent, customer: Option<&str>) -> bool {
    customer.map_or(true, |name| event.customer_name == name)
}

pub fn event_to_bytes(event: &ServerEvent) -> web::Bytes {
    let payload = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    web::Bytes::from(format!("event: update\ndata: {}\n\n", payload))
}
