// Ticket booking on top of the route graph: fare quotes, tickets and the traveller's wallet

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::airport::Airport;
use crate::graph::Graph;
use crate::linked_list::Weight;

// Fare rules: 2 MXN per km plus a 500 MXN base, cruising at 14 km per minute.
pub const PRICE_PER_KM: u64 = 2;
pub const BASE_FARE: u64 = 500;
pub const KM_PER_MINUTE: u32 = 14;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Unknown airport code: {0}")]
    UnknownCode(String),

    #[error("No route from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("Departure and arrival are the same airport: {0}")]
    SameAirport(String),

    #[error("Wallet is full: capacity {0} reached")]
    WalletFull(usize),

    #[error("Wallet capacity must be greater than zero")]
    InvalidCapacity,

    #[error("No ticket at position {0}")]
    NoSuchTicket(usize),
}

// Priced route between two airports, with copies of both payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub departure: Airport,
    pub arrival: Airport,
    pub distance: Weight,
    pub minutes: u32,
    pub price: u64,
}

impl Quote {
    pub fn between(graph: &Graph, from_code: &str, to_code: &str) -> Result<Self, BookingError> {
        let from_idx = graph
            .index_of_code(from_code)
            .ok_or_else(|| BookingError::UnknownCode(from_code.to_string()))?;
        let to_idx = graph
            .index_of_code(to_code)
            .ok_or_else(|| BookingError::UnknownCode(to_code.to_string()))?;

        if from_idx == to_idx {
            return Err(BookingError::SameAirport(from_code.to_string()));
        }

        let distance = graph
            .weight(from_idx, to_idx)
            .ok_or_else(|| BookingError::NoRoute {
                from: from_code.to_string(),
                to: to_code.to_string(),
            })?;

        // both indices were just resolved from the graph
        let (Some(departure), Some(arrival)) = (graph.airport(from_idx), graph.airport(to_idx))
        else {
            return Err(BookingError::UnknownCode(from_code.to_string()));
        };

        Ok(Self {
            departure: departure.clone(),
            arrival: arrival.clone(),
            distance,
            minutes: distance / KM_PER_MINUTE,
            price: u64::from(distance) * PRICE_PER_KM + BASE_FARE,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub departure: Airport,
    pub arrival: Airport,
    pub distance: Weight,
    pub minutes: u32,
    pub price: u64,
    pub booked_at: DateTime<Utc>,
}

impl From<Quote> for Ticket {
    fn from(quote: Quote) -> Self {
        Self {
            departure: quote.departure,
            arrival: quote.arrival,
            distance: quote.distance,
            minutes: quote.minutes,
            price: quote.price,
            booked_at: Utc::now(),
        }
    }
}

// Departure/arrival summary, flight time and price
impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Departure: {} {}", self.departure.code, self.departure.name)?;
        writeln!(f, "Arrival: {} {}", self.arrival.code, self.arrival.name)?;
        writeln!(f, "Flight time: {} minutes", self.minutes)?;
        write!(f, "Ticket price: {}.00 MXN", self.price)
    }
}

impl Ticket {
    pub fn involves(&self, code: &str) -> bool {
        self.departure.code == code || self.arrival.code == code
    }
}

// Fixed-capacity ordered list of booked tickets.
#[derive(Debug, Clone)]
pub struct Wallet {
    tickets: Vec<Ticket>,
    capacity: usize,
}

impl Wallet {
    pub fn new(capacity: usize) -> Result<Self, BookingError> {
        if capacity == 0 {
            return Err(BookingError::InvalidCapacity);
        }
        Ok(Self {
            tickets: Vec::with_capacity(capacity),
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tickets.len() == self.capacity
    }

    pub fn book(&mut self, quote: Quote) -> Result<&Ticket, BookingError> {
        if self.is_full() {
            warn!(capacity = self.capacity, "wallet full, booking rejected");
            return Err(BookingError::WalletFull(self.capacity));
        }

        let ticket = Ticket::from(quote);
        debug!(
            from = %ticket.departure.code,
            to = %ticket.arrival.code,
            price = ticket.price,
            "ticket booked"
        );
        self.tickets.push(ticket);

        Ok(&self.tickets[self.tickets.len() - 1])
    }

    // Cancels the ticket at `index`; later tickets shift down one position.
    pub fn cancel(&mut self, index: usize) -> Result<Ticket, BookingError> {
        if index >= self.tickets.len() {
            return Err(BookingError::NoSuchTicket(index));
        }
        Ok(self.tickets.remove(index))
    }

    pub fn position_by_code(&self, code: &str) -> Option<usize> {
        self.tickets.iter().position(|t| t.involves(code))
    }

    pub fn get(&self, index: usize) -> Option<&Ticket> {
        self.tickets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.iter()
    }

    // Numbered ticket blocks, one blank line apart.
    pub fn listing(&self) -> String {
        if self.tickets.is_empty() {
            return "No booked flights\n".to_string();
        }
        self.tickets
            .iter()
            .enumerate()
            .map(|(i, ticket)| format!("Ticket #{}:\n{}\n\n", i + 1, ticket))
            .collect()
    }
}
