// tests/helpers/mod.rs
#![allow(dead_code)]

use chrono::NaiveDate;
use validador_escala::models::escala::{
    Assignment, BrokerInfo, LocationInfo, LocationType, ShiftType, UnallocatedDemand,
};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn broker(id: &str, name: &str, saturday: bool) -> BrokerInfo {
    let mut days: Vec<String> = ["monday", "tuesday", "wednesday", "thursday", "friday"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if saturday {
        days.push("saturday".into());
        days.push("sunday".into());
    }
    BrokerInfo {
        id: id.into(),
        name: name.into(),
        available_weekdays: days,
    }
}

pub fn location(id: &str, name: &str, kind: LocationType) -> LocationInfo {
    LocationInfo {
        id: id.into(),
        name: name.into(),
        location_type: kind,
    }
}

/// Locais usados nos cenários.
pub fn locations() -> Vec<LocationInfo> {
    vec![
        location("botanic", "Botanic", LocationType::External),
        location("vivence", "Artus Vivence", LocationType::External),
        location("parque", "Parque das Águas", LocationType::External),
        location("sede", "Sede", LocationType::Internal),
    ]
}

pub fn shift(broker_id: &str, location_id: &str, date: &str, shift: ShiftType) -> Assignment {
    Assignment {
        broker_id: broker_id.into(),
        location_id: location_id.into(),
        assignment_date: d(date),
        shift_type: shift,
    }
}

pub fn morning(broker_id: &str, location_id: &str, date: &str) -> Assignment {
    shift(broker_id, location_id, date, ShiftType::Morning)
}

pub fn demand(location_id: &str, name: &str, date: &str) -> UnallocatedDemand {
    UnallocatedDemand {
        location_id: location_id.into(),
        location_name: name.into(),
        date: d(date),
        shift: ShiftType::Afternoon,
    }
}
