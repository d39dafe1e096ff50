//! The shop's top-level state: appointments plus one notification queue per
//! customer, fed by accepted appointments.

use std::collections::HashMap;

use crate::{
    models::{Appointment, NewAppointment},
    notifications::{accepted_message, NotificationQueue},
    store::{AppointmentStore, Transition},
};

#[derive(Debug, Default)]
pub struct Workshop {
    appointments: AppointmentStore,
    notifications: HashMap<String, NotificationQueue>,
}

impl Workshop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&mut self, record: NewAppointment) -> Appointment {
        self.appointments.add(record).clone()
    }

    /// Accepts a pending appointment and queues one notification for its
    /// customer. Anything other than a fresh acceptance queues nothing.
    pub fn accept(&mut self, id: &str) -> Transition {
        let transition = self.appointments.accept(id);
        if transition.applied() {
            if let Some(appointment) = self.appointments.get(id) {
                let message = accepted_message(appointment);
                self.notifications
                    .entry(appointment.customer_name.clone())
                    .or_default()
                    .push(message);
            }
        }
        transition
    }

    pub fn complete(&mut self, id: &str) -> Transition {
        self.appointments.complete(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Appointment> {
        self.appointments.remove(id)
    }

    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    pub fn notification_count(&self, customer: &str) -> usize {
        self.notifications
            .get(customer)
            .map_or(0, NotificationQueue::count)
    }

    pub fn peek_notifications(&self, customer: &str) -> &[String] {
        self.notifications
            .get(customer)
            .map(NotificationQueue::peek)
            .unwrap_or_default()
    }

    /// Empties `customer`'s queue and returns what it held.
    pub fn drain_notifications(&mut self, customer: &str) -> Vec<String> {
        self.notifications
            .remove(customer)
            .map(|mut queue| queue.drain_all())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    fn oil_change_for_ana() -> NewAppointment {
        NewAppointment {
            customer_name: "Ana".into(),
            phone: "910000000".into(),
            email: "ana@example.com".into(),
            service_description: "Oil Change".into(),
            date: "10/10/2025".into(),
            time: "09:00".into(),
            note: Some("Strange noise when braking".into()),
        }
    }

    #[test]
    fn full_lifecycle() {
        let mut workshop = Workshop::new();
        let id = workshop.book(oil_change_for_ana()).id;
        assert_eq!(workshop.appointments().len(), 1);
        assert_eq!(
            workshop.appointments().get(&id).unwrap().status,
            AppointmentStatus::Pending
        );

        assert_eq!(workshop.accept(&id), Transition::Applied);
        assert_eq!(
            workshop.appointments().get(&id).unwrap().status,
            AppointmentStatus::Accepted
        );
        assert_eq!(workshop.notification_count("Ana"), 1);
        let message = &workshop.peek_notifications("Ana")[0];
        assert!(message.contains("Oil Change"));
        assert!(message.contains("10/10/2025"));
        assert!(message.contains("09:00"));

        assert_eq!(workshop.complete(&id), Transition::Applied);
        assert_eq!(
            workshop.appointments().get(&id).unwrap().status,
            AppointmentStatus::Completed
        );

        assert!(workshop.remove(&id).is_some());
        assert!(workshop.appointments().is_empty());
    }

    #[test]
    fn repeated_accept_does_not_duplicate_notification() {
        let mut workshop = Workshop::new();
        let id = workshop.book(oil_change_for_ana()).id;
        workshop.accept(&id);
        assert_eq!(
            workshop.accept(&id),
            Transition::Unchanged(AppointmentStatus::Accepted)
        );
        assert_eq!(workshop.notification_count("Ana"), 1);
    }

    #[test]
    fn accept_of_unknown_id_queues_nothing() {
        let mut workshop = Workshop::new();
        assert_eq!(workshop.accept("nope"), Transition::NotFound);
        assert!(workshop.notifications.is_empty());
    }

    #[test]
    fn complete_does_not_notify() {
        let mut workshop = Workshop::new();
        let id = workshop.book(oil_change_for_ana()).id;
        workshop.accept(&id);
        workshop.drain_notifications("Ana");
        workshop.complete(&id);
        assert_eq!(workshop.notification_count("Ana"), 0);
    }

    #[test]
    fn notifications_go_only_to_the_booking_customer() {
        let mut workshop = Workshop::new();
        let id = workshop.book(oil_change_for_ana()).id;
        workshop.book(NewAppointment {
            customer_name: "Rui".into(),
            ..oil_change_for_ana()
        });
        workshop.accept(&id);

        assert_eq!(workshop.notification_count("Rui"), 0);
        assert!(workshop.drain_notifications("Rui").is_empty());

        let messages = workshop.drain_notifications("Ana");
        assert_eq!(messages.len(), 1);
        assert_eq!(workshop.notification_count("Ana"), 0);
        assert!(workshop.peek_notifications("Ana").is_empty());
    }
}
