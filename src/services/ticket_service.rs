/// Ticket search over the train catalog.

use crate::error::Result;
use crate::models::train::clock_to_minutes;
use crate::models::TrainItem;
use crate::services::TrainCatalog;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Departure time
    Time,
    Duration,
    /// Cheapest seat class
    Price,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(SortBy::Time),
            "duration" => Ok(SortBy::Duration),
            "price" => Ok(SortBy::Price),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub from: String,
    pub to: String,
    /// `YYYY-MM-DD`; only checked for presence
    pub date: String,
    pub sort_by: Option<SortBy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResult {
    #[serde(flatten)]
    pub train: TrainItem,
    pub min_price: u32,
    /// e.g. `二等座:64  一等座:21`
    pub seats_summary: String,
}

pub struct TicketService {
    catalog: Arc<TrainCatalog>,
}

impl TicketService {
    pub fn new(catalog: Arc<TrainCatalog>) -> Self {
        TicketService { catalog }
    }

    /// Trains whose stations contain the query's `from`/`to` text
    pub fn search(&self, query: &TicketQuery) -> Result<Vec<TicketResult>> {
        let from = query.from.trim();
        let to = query.to.trim();
        let has_date = !query.date.trim().is_empty();

        let mut results: Vec<TicketResult> = self
            .catalog
            .all()?
            .into_iter()
            .filter(|t| has_date && t.from_station.contains(from) && t.to_station.contains(to))
            .map(|t| TicketResult {
                min_price: t.min_price().unwrap_or(u32::MAX),
                seats_summary: t.seats_summary(),
                train: t.item(),
            })
            .collect();

        match query.sort_by {
            Some(SortBy::Time) => {
                results.sort_by_key(|r| clock_to_minutes(&r.train.departure_time))
            }
            Some(SortBy::Duration) => results.sort_by_key(|r| clock_to_minutes(&r.train.duration)),
            Some(SortBy::Price) => results.sort_by_key(|r| r.min_price),
            None => {}
        }

        log::debug!("Search {} -> {} matched {} train(s)", from, to, results.len());
        Ok(results)
    }
}
