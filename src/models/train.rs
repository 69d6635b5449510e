/// Train model for the booking engine.
/// Trains carry their stop schedule and per-seat-class inventory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fare category with its own remaining-capacity counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    #[serde(rename = "商务座")]
    Business,
    #[serde(rename = "一等座")]
    FirstClass,
    #[serde(rename = "二等座")]
    SecondClass,
    #[serde(rename = "硬座")]
    HardSeat,
    #[serde(rename = "硬卧")]
    HardSleeper,
    #[serde(rename = "无座")]
    Standing,
}

impl SeatClass {
    pub const ALL: [SeatClass; 6] = [
        SeatClass::Business,
        SeatClass::FirstClass,
        SeatClass::SecondClass,
        SeatClass::HardSeat,
        SeatClass::HardSleeper,
        SeatClass::Standing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeatClass::Business => "商务座",
            SeatClass::FirstClass => "一等座",
            SeatClass::SecondClass => "二等座",
            SeatClass::HardSeat => "硬座",
            SeatClass::HardSleeper => "硬卧",
            SeatClass::Standing => "无座",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            SeatClass::Business => "business",
            SeatClass::FirstClass => "first",
            SeatClass::SecondClass => "second",
            SeatClass::HardSeat => "hard-seat",
            SeatClass::HardSleeper => "hard-sleeper",
            SeatClass::Standing => "standing",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeatClass {
    type Err = String;

    /// Accepts the Chinese label or an English alias such as `second`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SeatClass::ALL
            .into_iter()
            .find(|class| class.label() == s || class.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown seat class: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StationStop {
    pub code: String,
    pub name: String,
    /// `HH:mm`, or `-` at the origin
    pub arrival_time: String,
    /// `HH:mm`, or `-` at the terminus
    pub departure_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    pub class_name: SeatClass,
    /// Not clamped: may go negative
    pub remaining: i32,
    pub price: u32,
}

/// Train summary without stops or seats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrainItem {
    pub id: String,
    pub train_no: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// `H:mm`
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub id: String,
    pub train_no: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: Vec<StationStop>,
    pub seats: Vec<SeatAvailability>,
}

impl Train {
    pub fn item(&self) -> TrainItem {
        TrainItem {
            id: self.id.clone(),
            train_no: self.train_no.clone(),
            from_station: self.from_station.clone(),
            to_station: self.to_station.clone(),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
        }
    }

    pub fn seat(&self, class: SeatClass) -> Option<&SeatAvailability> {
        self.seats.iter().find(|s| s.class_name == class)
    }

    pub fn seat_mut(&mut self, class: SeatClass) -> Option<&mut SeatAvailability> {
        self.seats.iter_mut().find(|s| s.class_name == class)
    }

    /// e.g. `商务座:5  一等座:21  二等座:64`
    pub fn seats_summary(&self) -> String {
        self.seats
            .iter()
            .map(|s| format!("{}:{}", s.class_name, s.remaining))
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn min_price(&self) -> Option<u32> {
        self.seats.iter().map(|s| s.price).min()
    }
}

/// Convert `HH:mm` (or `H:mm` durations) to minutes; malformed input sorts last
pub fn clock_to_minutes(value: &str) -> u32 {
    let mut parts = value.split(':');
    let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hours, minutes) {
        (Some(h), Some(m)) => h.checked_mul(60).and_then(|v| v.checked_add(m)).unwrap_or(u32::MAX),
        _ => u32::MAX,
    }
}
