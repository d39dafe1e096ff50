use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Mechanic,
}

/// Lifecycle of an appointment. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Accepted,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Accepted => "accepted",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub service_description: String,
    pub date: String,
    pub time: String,
    pub note: Option<String>,
    pub status: AppointmentStatus,
    pub requested_at: String,
}

/// An appointment as submitted, before the store assigns id and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub service_description: String,
    pub date: String,
    pub time: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleCategory {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

pub const SERVICES: &[&str] = &[
    "Oil Change",
    "Alignment and Balancing",
    "Full Inspection",
    "Brakes",
    "Clutch",
    "Suspension",
    "Electrical System",
    "Air Conditioning",
    "Gearbox",
    "Engine",
];

pub const TIME_SLOTS: &[&str] = &[
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

pub const VEHICLE_CATEGORIES: &[VehicleCategory] = &[
    VehicleCategory {
        name: "Passenger Cars",
        models: &[
            "Toyota Corolla",
            "Honda Civic",
            "Volkswagen Golf",
            "Ford Focus",
            "Nissan Sentra",
            "Hyundai Elantra",
        ],
    },
    VehicleCategory {
        name: "SUVs",
        models: &[
            "Toyota RAV4",
            "Honda CR-V",
            "Volkswagen Tiguan",
            "Ford Escape",
            "Nissan X-Trail",
            "Hyundai Tucson",
        ],
    },
    VehicleCategory {
        name: "Pickups",
        models: &[
            "Ford Ranger",
            "Toyota Hilux",
            "Volkswagen Amarok",
            "Nissan Navara",
            "Mitsubishi L200",
        ],
    },
    VehicleCategory {
        name: "Motorcycles",
        models: &[
            "Honda CB600F",
            "Yamaha MT-07",
            "Kawasaki Ninja 300",
            "BMW S1000RR",
            "Ducati Monster",
        ],
    },
    VehicleCategory {
        name: "Commercial Vehicles",
        models: &[
            "Ford Transit",
            "Volkswagen Crafter",
            "Mercedes Sprinter",
            "Iveco Daily",
        ],
    },
    VehicleCategory {
        name: "Luxury Vehicles",
        models: &[
            "BMW 3 Series",
            "Mercedes C-Class",
            "Audi A4",
            "Lexus IS",
            "Jaguar XE",
        ],
    },
];

pub fn vehicle_category(name: &str) -> Option<&'static VehicleCategory> {
    VEHICLE_CATEGORIES
        .iter()
        .find(|category| category.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_its_own_labels() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse(" accepted "), Some(AppointmentStatus::Accepted));
        assert_eq!(AppointmentStatus::parse("declined"), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn vehicle_lookup_by_name() {
        let suvs = vehicle_category("SUVs").expect("SUVs listed");
        assert!(suvs.models.contains(&"Honda CR-V"));
        assert!(vehicle_category("Spaceships").is_none());
    }
}
