/// Order ledger.
/// Creates orders and drives their lifecycle, adjusting train inventory on pay and refund.
///
/// Nothing here is transactional across keys: reschedule refunds first and then
/// creates the replacement, so a failure in between leaves the original refunded.

use crate::error::{BookingError, Result};
use crate::models::{generate_id, NewOrder, Order, OrderStatus, SeatClass};
use crate::services::{PassengerService, TrainCatalog};
use crate::storage::{keys, LocalStore};
use std::collections::BTreeMap;
use std::sync::Arc;

type OrderMap = BTreeMap<String, Order>;

pub struct OrderService {
    storage: Arc<LocalStore>,
    catalog: Arc<TrainCatalog>,
    passengers: Arc<PassengerService>,
}

impl OrderService {
    pub fn new(
        storage: Arc<LocalStore>,
        catalog: Arc<TrainCatalog>,
        passengers: Arc<PassengerService>,
    ) -> Self {
        OrderService {
            storage,
            catalog,
            passengers,
        }
    }

    fn read(&self) -> Result<OrderMap> {
        self.storage.read_json(keys::ORDERS)
    }

    fn write(&self, map: &OrderMap) -> Result<()> {
        self.storage.write_json(keys::ORDERS, map)
    }

    fn save(&self, order: &Order) -> Result<()> {
        let mut map = self.read()?;
        map.insert(order.id.clone(), order.clone());
        self.write(&map)
    }

    fn require(&self, id: &str) -> Result<Order> {
        self.read()?.remove(id).ok_or(BookingError::OrderNotFound)
    }

    /// Orders, newest first
    pub fn list(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.read()?.into_values().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub fn get(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.read()?.remove(id))
    }

    /// Persist a new unpaid order as given
    pub fn create(&self, input: NewOrder) -> Result<Order> {
        let order = Order::new(generate_id("o"), input);
        self.save(&order)?;

        log::info!(
            "Created order {} on {} {} for {} passenger(s), total {}",
            order.id,
            order.train_no,
            order.seat_class,
            order.passenger_ids.len(),
            order.total_price
        );
        Ok(order)
    }

    /// Validate a booking against the catalog and registry, price it, and create it
    pub fn book(
        &self,
        train_id: &str,
        seat_class: SeatClass,
        passenger_ids: Vec<String>,
    ) -> Result<Order> {
        if passenger_ids.is_empty() {
            return Err(BookingError::Validation("请至少选择一位乘客".to_string()));
        }

        let train = self
            .catalog
            .get(train_id)?
            .ok_or(BookingError::TrainNotFound)?;
        let seat = train
            .seat(seat_class)
            .ok_or(BookingError::SeatClassNotFound)?;

        for passenger_id in &passenger_ids {
            if self.passengers.get(passenger_id)?.is_none() {
                return Err(BookingError::PassengerNotFound);
            }
        }

        let count = u32::try_from(passenger_ids.len())
            .map_err(|_| BookingError::Validation("乘客数量过多".to_string()))?;
        let total_price = seat.price.saturating_mul(count);

        self.create(NewOrder {
            train_id: train.id.clone(),
            train_no: train.train_no.clone(),
            seat_class,
            passenger_ids,
            total_price,
        })
    }

    /// Mark an order paid and take its seats out of inventory.
    /// Only a missing order is rejected; paying again decrements again.
    pub fn pay(&self, id: &str) -> Result<Order> {
        let mut order = self.require(id)?;

        self.catalog
            .adjust_seat_remaining(&order.train_id, order.seat_class, -order.passenger_count())?;

        order.status = OrderStatus::Paid;
        self.save(&order)?;

        log::info!("Order {} paid", order.id);
        Ok(order)
    }

    /// Cancel an order whatever its status; inventory is left as is
    pub fn cancel(&self, id: &str) -> Result<Order> {
        let mut order = self.require(id)?;
        order.status = OrderStatus::Canceled;
        self.save(&order)?;

        log::info!("Order {} canceled", order.id);
        Ok(order)
    }

    /// Refund a paid order, returning its seats to inventory
    pub fn refund(&self, id: &str) -> Result<Order> {
        let mut order = self.require(id)?;
        if order.status != OrderStatus::Paid {
            return Err(BookingError::OrderNotPaid);
        }

        self.catalog
            .adjust_seat_remaining(&order.train_id, order.seat_class, order.passenger_count())?;

        order.status = OrderStatus::Canceled;
        self.save(&order)?;

        log::info!("Order {} refunded", order.id);
        Ok(order)
    }

    /// Refund a paid order and open an unpaid replacement on another train
    pub fn reschedule(&self, id: &str, target_train_id: &str) -> Result<Order> {
        let original = self.require(id)?;
        if original.status != OrderStatus::Paid {
            return Err(BookingError::OrderNotPaid);
        }
        if original.train_id == target_train_id {
            return Err(BookingError::InvalidReschedule);
        }
        let target = self
            .catalog
            .get(target_train_id)?
            .ok_or(BookingError::TrainNotFound)?;

        let refunded = self.refund(id)?;
        let replacement = self.create(NewOrder {
            train_id: target.id,
            train_no: target.train_no,
            seat_class: refunded.seat_class,
            passenger_ids: refunded.passenger_ids,
            total_price: refunded.total_price,
        })?;

        log::info!("Order {} rescheduled as {}", refunded.id, replacement.id);
        Ok(replacement)
    }
}
