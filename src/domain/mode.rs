use serde::{Deserialize, Serialize};
use std::fmt;

/// Which check-in flow a visitor gets. Fixed for the lifetime of a drawer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CheckInMode {
    SeatOnly,
    #[default]
    OrderAndSeat,
    OrderOnly,
    ExternalOrdersNoSeat,
    ExternalOrdersSeat,
    ExternalOrdersSeatAndOrder,
}

/// Where a session's drink orders come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    None,
    Catalog,
    /// Pre-seeded external orders; `can_append` allows building new ones inline.
    External { can_append: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub allow_order_selection: bool,
    pub allow_seat_selection: bool,
    pub is_external_order_mode: bool,
}

impl CheckInMode {
    pub const ALL: [CheckInMode; 6] = [
        CheckInMode::SeatOnly,
        CheckInMode::OrderAndSeat,
        CheckInMode::OrderOnly,
        CheckInMode::ExternalOrdersNoSeat,
        CheckInMode::ExternalOrdersSeat,
        CheckInMode::ExternalOrdersSeatAndOrder,
    ];

    pub fn order_source(self) -> OrderSource {
        match self {
            CheckInMode::SeatOnly => OrderSource::None,
            CheckInMode::OrderAndSeat | CheckInMode::OrderOnly => OrderSource::Catalog,
            CheckInMode::ExternalOrdersNoSeat | CheckInMode::ExternalOrdersSeat => {
                OrderSource::External { can_append: false }
            }
            CheckInMode::ExternalOrdersSeatAndOrder => OrderSource::External { can_append: true },
        }
    }

    pub fn allows_seat_selection(self) -> bool {
        match self {
            CheckInMode::SeatOnly
            | CheckInMode::OrderAndSeat
            | CheckInMode::ExternalOrdersSeat
            | CheckInMode::ExternalOrdersSeatAndOrder => true,
            CheckInMode::OrderOnly | CheckInMode::ExternalOrdersNoSeat => false,
        }
    }

    pub fn allows_order_selection(self) -> bool {
        match self.order_source() {
            OrderSource::Catalog | OrderSource::External { can_append: true } => true,
            OrderSource::None | OrderSource::External { can_append: false } => false,
        }
    }

    pub fn is_external_order_mode(self) -> bool {
        matches!(self.order_source(), OrderSource::External { .. })
    }

    pub fn capabilities(self) -> Capabilities {
        Capabilities {
            allow_order_selection: self.allows_order_selection(),
            allow_seat_selection: self.allows_seat_selection(),
            is_external_order_mode: self.is_external_order_mode(),
        }
    }
}

impl fmt::Display for CheckInMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckInMode::SeatOnly => "seatOnly",
            CheckInMode::OrderAndSeat => "orderAndSeat",
            CheckInMode::OrderOnly => "orderOnly",
            CheckInMode::ExternalOrdersNoSeat => "externalOrdersNoSeat",
            CheckInMode::ExternalOrdersSeat => "externalOrdersSeat",
            CheckInMode::ExternalOrdersSeatAndOrder => "externalOrdersSeatAndOrder",
        };
        f.write_str(name)
    }
}
