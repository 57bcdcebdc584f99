use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::actors::TickOutcome;
use crate::domain::Seat;
use crate::error::SeatError;
use crate::messages::SeatRequest;

/// Client for the seat registry service.
#[derive(Clone)]
pub struct SeatClient {
    sender: mpsc::Sender<SeatRequest>,
}

impl SeatClient {
    pub fn new(sender: mpsc::Sender<SeatRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), SeatError> {
        debug!("Sending request");
        self.sender
            .send(SeatRequest::Shutdown)
            .await
            .map_err(|_| SeatError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(SeatClient => fn list_seats() -> Vec<Seat> as SeatRequest::ListSeats, Error = SeatError);
client_method!(SeatClient => fn get_seat(id: String) -> Option<Seat> as SeatRequest::GetSeat, Error = SeatError);
client_method!(SeatClient => fn occupy_seat(id: String) -> () as SeatRequest::OccupySeat, Error = SeatError);
client_method!(SeatClient => fn release_seat(id: String) -> () as SeatRequest::ReleaseSeat, Error = SeatError);
client_method!(SeatClient => fn simulate_tick() -> TickOutcome as SeatRequest::SimulateTick, Error = SeatError);
