use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::MovementDirection;

/// Published after a mutation has been persisted, so that views can refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    DepotsRenamed {
        names: Vec<String>,
    },
    ProductAdded {
        product_id: Uuid,
        name: String,
        unit: String,
    },
    ProductDeleted {
        product_id: Uuid,
        purged_rows: usize,
    },
    StockMoved {
        depot: String,
        product_id: Uuid,
        direction: MovementDirection,
        amount: Decimal,
        new_quantity: Decimal,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self { sender }
    }

    /// Sends without blocking; fails only when the receiver is gone.
    pub fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Creates a sender and the receiver the presentation layer listens on.
pub fn channel() -> (EventSender, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender::new(tx), rx)
}
