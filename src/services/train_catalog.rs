/// Train catalog service.
/// Serves the seeded train list and owns the only mutation on it: seat inventory.

use crate::error::{BookingError, Result};
use crate::models::{SeatAvailability, SeatClass, StationStop, Train, TrainItem};
use crate::storage::{keys, LocalStore};
use std::sync::Arc;

pub struct TrainCatalog {
    storage: Arc<LocalStore>,
}

impl TrainCatalog {
    pub fn new(storage: Arc<LocalStore>) -> Self {
        TrainCatalog { storage }
    }

    /// Load the persisted catalog, seeding it on first use
    fn load(&self) -> Result<Vec<Train>> {
        if let Some(trains) = self.storage.read_json_opt::<Vec<Train>>(keys::TRAINS)? {
            return Ok(trains);
        }

        let trains = seed_trains();
        self.storage.write_json(keys::TRAINS, &trains)?;
        log::info!("Seeded train catalog with {} trains", trains.len());
        Ok(trains)
    }

    /// All trains without stops or seats
    pub fn list(&self) -> Result<Vec<TrainItem>> {
        Ok(self.load()?.iter().map(Train::item).collect())
    }

    /// A detached copy of one train
    pub fn get(&self, train_id: &str) -> Result<Option<Train>> {
        Ok(self.load()?.into_iter().find(|t| t.id == train_id))
    }

    /// Detached copies of every train
    pub fn all(&self) -> Result<Vec<Train>> {
        self.load()
    }

    /// Add a signed delta to a seat class's remaining count and persist it.
    /// The count is not clamped.
    pub fn adjust_seat_remaining(
        &self,
        train_id: &str,
        seat_class: SeatClass,
        delta: i32,
    ) -> Result<SeatAvailability> {
        let mut trains = self.load()?;
        let train = trains
            .iter_mut()
            .find(|t| t.id == train_id)
            .ok_or(BookingError::TrainNotFound)?;
        let train_no = train.train_no.clone();
        let seat = train
            .seat_mut(seat_class)
            .ok_or(BookingError::SeatClassNotFound)?;

        seat.remaining = seat.remaining.saturating_add(delta);
        let updated = seat.clone();

        if updated.remaining < 0 {
            log::warn!(
                "{} {} oversold: remaining is {}",
                train_no,
                seat_class,
                updated.remaining
            );
        }

        self.storage.write_json(keys::TRAINS, &trains)?;
        log::debug!("{} {} remaining {:+} -> {}", train_no, seat_class, delta, updated.remaining);
        Ok(updated)
    }
}

fn stop(code: &str, name: &str, arrival_time: &str, departure_time: &str) -> StationStop {
    StationStop {
        code: code.to_string(),
        name: name.to_string(),
        arrival_time: arrival_time.to_string(),
        departure_time: departure_time.to_string(),
    }
}

fn seat(class_name: SeatClass, remaining: i32, price: u32) -> SeatAvailability {
    SeatAvailability {
        class_name,
        remaining,
        price,
    }
}

/// Built-in catalog written to storage on first use
pub fn seed_trains() -> Vec<Train> {
    vec![
        Train {
            id: "t_g101".to_string(),
            train_no: "G101".to_string(),
            from_station: "北京南".to_string(),
            to_station: "上海虹桥".to_string(),
            departure_time: "07:00".to_string(),
            arrival_time: "12:38".to_string(),
            duration: "5:38".to_string(),
            stops: vec![
                stop("BJN", "北京南", "-", "07:00"),
                stop("TJ", "天津南", "07:33", "07:36"),
                stop("JN", "济南西", "08:48", "08:51"),
                stop("XUZ", "徐州东", "10:02", "10:05"),
                stop("BZH", "蚌埠南", "10:36", "10:38"),
                stop("NJN", "南京南", "11:20", "11:23"),
                stop("SUZ", "苏州北", "12:10", "12:12"),
                stop("SHHQ", "上海虹桥", "12:38", "-"),
            ],
            seats: vec![
                seat(SeatClass::Business, 5, 1748),
                seat(SeatClass::FirstClass, 21, 933),
                seat(SeatClass::SecondClass, 64, 553),
                seat(SeatClass::Standing, 0, 553),
            ],
        },
        Train {
            id: "t_z19".to_string(),
            train_no: "Z19".to_string(),
            from_station: "北京".to_string(),
            to_station: "西安".to_string(),
            departure_time: "20:40".to_string(),
            arrival_time: "07:57".to_string(),
            duration: "11:17".to_string(),
            stops: vec![
                stop("BJ", "北京", "-", "20:40"),
                stop("SJZ", "石家庄", "23:05", "23:21"),
                stop("TY", "太原", "01:18", "01:35"),
                stop("HBY", "韩城", "05:46", "05:48"),
                stop("XA", "西安", "07:57", "-"),
            ],
            seats: vec![
                seat(SeatClass::HardSeat, 112, 156),
                seat(SeatClass::HardSleeper, 37, 268),
                seat(SeatClass::Standing, 18, 156),
            ],
        },
    ]
}
