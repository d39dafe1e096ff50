//! In-memory appointment store.
//!
//! Records keep insertion order. Status changes only move forward
//! (pending → accepted → completed); any other request leaves the record
//! untouched and reports why.

use chrono::Utc;
use serde::Serialize;

use crate::{
    auth::new_id,
    models::{Appointment, AppointmentStatus, NewAppointment},
};

/// Outcome of a mutating store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// The record exists but was not in the required state.
    Unchanged(AppointmentStatus),
    NotFound,
}

impl Transition {
    pub fn applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub completed: usize,
}

#[derive(Debug, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new pending appointment and returns it.
    ///
    /// Callers validate the mandatory fields (service, date, time) first.
    pub fn add(&mut self, record: NewAppointment) -> &Appointment {
        let mut id = new_id();
        while self.get(&id).is_some() {
            id = new_id();
        }

        self.appointments.push(Appointment {
            id,
            customer_name: record.customer_name,
            phone: record.phone,
            email: record.email,
            service_description: record.service_description,
            date: record.date,
            time: record.time,
            note: record.note,
            status: AppointmentStatus::Pending,
            requested_at: Utc::now().to_rfc3339(),
        });

        let index = self.appointments.len() - 1;
        &self.appointments[index]
    }

    pub fn accept(&mut self, id: &str) -> Transition {
        self.advance(id, AppointmentStatus::Pending, AppointmentStatus::Accepted)
    }

    pub fn complete(&mut self, id: &str) -> Transition {
        self.advance(id, AppointmentStatus::Accepted, AppointmentStatus::Completed)
    }

    /// Removes the record whatever its status.
    pub fn remove(&mut self, id: &str) -> Option<Appointment> {
        let index = self.appointments.iter().position(|a| a.id == id)?;
        Some(self.appointments.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn list_all(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments whose customer name equals `name` exactly.
    pub fn list_by_customer<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Appointment> {
        self.appointments
            .iter()
            .filter(move |a| a.customer_name == name)
    }

    pub fn list_by_status(&self, status: AppointmentStatus) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter().filter(move |a| a.status == status)
    }

    pub fn stats(&self) -> StoreStats {
        self.appointments
            .iter()
            .fold(StoreStats::default(), |mut stats, appointment| {
                stats.total += 1;
                match appointment.status {
                    AppointmentStatus::Pending => stats.pending += 1,
                    AppointmentStatus::Accepted => stats.accepted += 1,
                    AppointmentStatus::Completed => stats.completed += 1,
                }
                stats
            })
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn advance(
        &mut self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Transition {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == id) else {
            return Transition::NotFound;
        };
        if appointment.status != from {
            return Transition::Unchanged(appointment.status);
        }
        appointment.status = to;
        Transition::Applied
    }
}
