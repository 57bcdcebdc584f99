use tokio::sync::oneshot;
use crate::actors::TickOutcome;
use crate::domain::Seat;
use crate::error::SeatError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the seat registry service. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum SeatRequest {
    ListSeats {
        respond_to: ServiceResponse<Vec<Seat>, SeatError>,
    },
    GetSeat {
        id: String,
        respond_to: ServiceResponse<Option<Seat>, SeatError>,
    },
    OccupySeat {
        id: String,
        respond_to: ServiceResponse<(), SeatError>,
    },
    ReleaseSeat {
        id: String,
        respond_to: ServiceResponse<(), SeatError>,
    },
    SimulateTick {
        respond_to: ServiceResponse<TickOutcome, SeatError>,
    },
    Shutdown,
}
