//! Booking form checks performed before anything reaches the store.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::{
    auth::AuthUser,
    models::{vehicle_category, NewAppointment, SERVICES, TIME_SLOTS},
};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub vehicle_category: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub note: Option<String>,
}

impl BookingForm {
    /// Checks every field against the catalogs and `today`, collecting all
    /// problems, and builds the record for `customer` when there are none.
    pub fn validate(
        self,
        customer: &AuthUser,
        today: NaiveDate,
    ) -> Result<NewAppointment, Vec<String>> {
        let mut errors = Vec::new();
        let service = self.service.trim();
        let category = self.vehicle_category.trim();
        let model = self.vehicle_model.trim();
        let date = self.date.trim();
        let time = self.time.trim();

        if service.is_empty() {
            errors.push("Please select a service.".to_string());
        } else if !SERVICES.contains(&service) {
            errors.push(format!("Unknown service {service:?}."));
        }

        if category.is_empty() {
            errors.push("Please select a vehicle category.".to_string());
        }
        if model.is_empty() {
            errors.push("Please select a vehicle model.".to_string());
        }
        if !category.is_empty() {
            match vehicle_category(category) {
                None => errors.push(format!("Unknown vehicle category {category:?}.")),
                Some(found) if !model.is_empty() && !found.models.contains(&model) => {
                    errors.push(format!("{model:?} is not a {category} model."))
                }
                Some(_) => {}
            }
        }

        let day = if date.is_empty() {
            errors.push("Please pick a date.".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(date, DATE_FORMAT) {
                Err(_) => {
                    errors.push("Date must use the dd/mm/yyyy format.".to_string());
                    None
                }
                Ok(day) if day <= today => {
                    errors.push("Bookings open from tomorrow onwards.".to_string());
                    None
                }
                Ok(day) if day.weekday() == Weekday::Sun => {
                    errors.push("The workshop is closed on Sundays.".to_string());
                    None
                }
                Ok(day) => Some(day),
            }
        };

        if time.is_empty() {
            errors.push("Please pick a time.".to_string());
        } else if !TIME_SLOTS.contains(&time) {
            errors.push(format!("{time} is not an available time slot."));
        }

        let day = match day {
            Some(day) if errors.is_empty() => day,
            _ => return Err(errors),
        };

        Ok(NewAppointment {
            customer_name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            service_description: format!("{service} - {category} ({model})"),
            date: day.format(DATE_FORMAT).to_string(),
            time: time.to_string(),
            note: self
                .note
                .map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn ana() -> AuthUser {
        AuthUser {
            id: "acc-1".into(),
            name: "Ana".into(),
            phone: "910000000".into(),
            email: "ana@example.com".into(),
            role: Role::Customer,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 10, 1).unwrap()
    }

    fn form() -> BookingForm {
        BookingForm {
            service: "Oil Change".into(),
            vehicle_category: "SUVs".into(),
            vehicle_model: "Honda CR-V".into(),
            date: "10/10/2030".into(),
            time: "09:00".into(),
            note: Some("  ".into()),
        }
    }

    #[test]
    fn valid_form_builds_record_from_account() {
        let record = form().validate(&ana(), today()).unwrap();
        assert_eq!(record.customer_name, "Ana");
        assert_eq!(record.email, "ana@example.com");
        assert_eq!(record.service_description, "Oil Change - SUVs (Honda CR-V)");
        assert_eq!(record.date, "10/10/2030");
        assert_eq!(record.note, None);
    }

    #[test]
    fn empty_form_lists_every_missing_field() {
        let errors = BookingForm::default().validate(&ana(), today()).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn rejects_model_from_other_category() {
        let errors = BookingForm {
            vehicle_model: "Ford Ranger".into(),
            ..form()
        }
        .validate(&ana(), today())
        .unwrap_err();
        assert_eq!(errors, vec!["\"Ford Ranger\" is not a SUVs model."]);
    }

    #[test]
    fn rejects_past_dates_and_sundays() {
        let past = BookingForm {
            date: "30/09/2030".into(),
            ..form()
        };
        assert!(past.validate(&ana(), today()).is_err());

        // 13 October 2030 is a Sunday.
        let sunday = BookingForm {
            date: "13/10/2030".into(),
            ..form()
        };
        let errors = sunday.validate(&ana(), today()).unwrap_err();
        assert!(errors[0].contains("Sundays"));
    }

    #[test]
    fn same_day_booking_is_rejected() {
        let errors = BookingForm {
            date: "01/10/2030".into(),
            ..form()
        }
        .validate(&ana(), today())
        .unwrap_err();
        assert_eq!(errors, vec!["Bookings open from tomorrow onwards."]);

        let tomorrow = BookingForm {
            date: "02/10/2030".into(),
            ..form()
        };
        assert!(tomorrow.validate(&ana(), today()).is_ok());
    }

    #[test]
    fn stores_the_date_zero_padded() {
        let record = BookingForm {
            date: " 2/10/2030".into(),
            ..form()
        }
        .validate(&ana(), today())
        .unwrap();
        assert_eq!(record.date, "02/10/2030");
    }

    #[test]
    fn rejects_bad_date_format_and_slot() {
        let errors = BookingForm {
            date: "2030-10-10".into(),
            time: "12:15".into(),
            ..form()
        }
        .validate(&ana(), today())
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
