/// Order model for the booking engine.
/// Orders move unpaid -> paid -> canceled, or unpaid -> canceled.

use super::train::SeatClass;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "未支付")]
    Unpaid,
    #[serde(rename = "已支付")]
    Paid,
    #[serde(rename = "已取消")]
    Canceled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "未支付",
            OrderStatus::Paid => "已支付",
            OrderStatus::Canceled => "已取消",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub train_id: String,
    pub train_no: String,
    pub seat_class: SeatClass,
    pub passenger_ids: Vec<String>,
    pub total_price: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: String, input: NewOrder) -> Self {
        Order {
            id,
            train_id: input.train_id,
            train_no: input.train_no,
            seat_class: input.seat_class,
            passenger_ids: input.passenger_ids,
            total_price: input.total_price,
            status: OrderStatus::Unpaid,
            created_at: Utc::now(),
        }
    }

    pub fn passenger_count(&self) -> i32 {
        i32::try_from(self.passenger_ids.len()).unwrap_or(i32::MAX)
    }
}

/// Everything an order carries except the generated id, status and timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub train_id: String,
    pub train_no: String,
    pub seat_class: SeatClass,
    pub passenger_ids: Vec<String>,
    pub total_price: u32,
}
