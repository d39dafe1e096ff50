//! Customer notification queue. Reading the queue consumes it.

use crate::models::Appointment;

#[derive(Debug, Default)]
pub struct NotificationQueue {
    messages: Vec<String>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Returns every queued message in order and leaves the queue empty.
    pub fn drain_all(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    pub fn peek(&self) -> &[String] {
        &self.messages
    }

    pub fn count(&self) -> usize {
        self.messages.len()
    }
}

pub fn accepted_message(appointment: &Appointment) -> String {
    format!(
        "Your appointment for {} on {} at {} has been accepted.",
        appointment.service_description, appointment.date, appointment.time
    )
}
