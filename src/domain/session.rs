use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use super::{CheckInMode, Customer, DrinkOrderItem, ExternalOrder, Seat};

/// Transient state of one drawer opening for one customer.
///
/// Mutated only through `CheckInAction`s; see `checkin_actor`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInSession {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub mode: CheckInMode,
    /// Pending catalog-built items not yet handed over.
    pub cart: Vec<DrinkOrderItem>,
    pub external_orders: Vec<ExternalOrder>,
    /// Ids of external orders that existed when the drawer opened.
    pub original_order_ids: HashSet<String>,
    pub selected_seat: Option<Seat>,
    /// External order awaiting void confirmation.
    pub pending_void: Option<String>,
    pub inline_ordering: bool,
}

impl CheckInSession {
    /// Orders appended during this session first, then the ones present at open time.
    pub fn external_orders_for_display(&self) -> Vec<&ExternalOrder> {
        let (original, appended): (Vec<&ExternalOrder>, Vec<&ExternalOrder>) = self
            .external_orders
            .iter()
            .partition(|order| self.original_order_ids.contains(&order.id));
        appended.into_iter().chain(original).collect()
    }
}

/// Payload for opening a drawer: a read-only snapshot of the customer.
#[derive(Debug, Clone)]
pub struct OpenSession {
    pub customer: Customer,
}

/// What a successful check-in hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub orders: Vec<DrinkOrderItem>,
    pub seat: Option<Seat>,
}

impl CheckInOutcome {
    /// Sum of priced lines; unpriced drinks count as free.
    pub fn total_price(&self) -> f64 {
        self.orders.iter().filter_map(DrinkOrderItem::line_total).sum()
    }

    pub fn success_notice(&self) -> String {
        match &self.seat {
            Some(seat) => format!("签到成功，请引导客户至指定座位 {}", seat.name),
            None => "签到成功".to_string(),
        }
    }
}

/// Drawer notifications for the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerEvent {
    OpenChanged {
        session_id: String,
        customer_id: String,
        open: bool,
    },
    Completed {
        session_id: String,
        customer_id: String,
        outcome: CheckInOutcome,
    },
}
