use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use argon2::password_hash;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::{
    accounts::Accounts,
    auth::hash_password,
    config::Config,
    models::{Appointment, AppointmentStatus, Role},
    workshop::Workshop,
};

/// Shared application state. Cloned into every worker; the workshop and
/// account registry are guarded so only one request mutates them at a time.
#[derive(Clone)]
pub struct AppState {
    pub shop_name: String,
    pub admin_display_name: String,
    pub events: broadcast::Sender<ServerEvent>,
    workshop: Arc<Mutex<Workshop>>,
    accounts: Arc<Mutex<Accounts>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServerEvent {
    pub kind: String,
    pub appointment_id: String,
    pub status: AppointmentStatus,
    pub customer_name: String,
    pub service: String,
    pub date: String,
    pub time: String,
}

impl ServerEvent {
    pub fn from_appointment(kind: &str, appointment: &Appointment) -> Self {
        Self {
            kind: kind.to_string(),
            appointment_id: appointment.id.clone(),
            status: appointment.status,
            customer_name: appointment.customer_name.clone(),
            service: appointment.service_description.clone(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
        }
    }
}

impl AppState {
    /// Builds empty state and seeds the mechanic account from `config`.
    pub fn new(config: &Config) -> Result<Self, password_hash::Error> {
        if config.uses_default_password() {
            log::warn!("ADMIN_PASSWORD not set. Using default password 'admin'. Set ADMIN_PASSWORD in production.");
        }
        let password_hash = hash_password(&config.admin_password)?;

        let mut accounts = Accounts::new();
        if let Err(err) = accounts.insert(
            Role::Mechanic,
            &config.admin_user,
            "",
            "",
            password_hash,
        ) {
            log::warn!("Could not seed admin account: {err}");
        }

        let (events, _) = broadcast::channel(config.event_buffer);

        Ok(Self {
            shop_name: config.shop_name.clone(),
            admin_display_name: config.admin_display_name.clone(),
            events,
            workshop: Arc::new(Mutex::new(Workshop::new())),
            accounts: Arc::new(Mutex::new(accounts)),
        })
    }

    pub fn workshop(&self) -> MutexGuard<'_, Workshop> {
        self.workshop.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn accounts(&self) -> MutexGuard<'_, Accounts> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Broadcasts an appointment change. Having no listeners is fine.
    pub fn publish(&self, kind: &str, appointment: &Appointment) {
        let _ = self
            .events
            .send(ServerEvent::from_appointment(kind, appointment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewAppointment;

    fn state() -> AppState {
        let config = Config {
            admin_password: "workshop".into(),
            ..Config::default()
        };
        AppState::new(&config).unwrap()
    }

    #[test]
    fn seeds_the_mechanic_account() {
        let state = state();
        let accounts = state.accounts();
        let admin = accounts.verify("admin", "workshop").expect("seeded admin");
        assert_eq!(admin.role, Role::Mechanic);
        assert_eq!(state.admin_display_name, "Workshop Admin");
    }

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let state = state();
        let mut rx = state.events.subscribe();

        let appointment = state.workshop().book(NewAppointment {
            customer_name: "Ana".into(),
            phone: "910000000".into(),
            email: "ana@example.com".into(),
            service_description: "Brakes".into(),
            date: "10/10/2030".into(),
            time: "09:00".into(),
            note: None,
        });
        state.publish("appointment_created", &appointment);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, "appointment_created");
        assert_eq!(event.appointment_id, appointment.id);
        assert_eq!(event.status, AppointmentStatus::Pending);
    }
}
