use std::collections::HashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use crate::clients::SeatClient;
use crate::domain::Seat;
use crate::messages::{SeatRequest, ServiceResponse};
use crate::error::SeatError;

/// Chance that each half of a simulation tick (release, occupy) fires.
pub const TICK_FLIP_PROBABILITY: f64 = 0.5;

/// What one simulation tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub released: Option<String>,
    pub occupied: Option<String>,
}

// =============================================================================
// SEAT REGISTRY (pure state)
// =============================================================================

/// Fixed set of seats partitioned into areas, with an occupancy flag each.
#[derive(Debug, Clone)]
pub struct SeatRegistry {
    areas: Vec<String>,
    seats: Vec<Seat>,
    index: HashMap<String, usize>,
}

impl SeatRegistry {
    /// Creates `seats_per_area` available seats per area, named `<area>-NN` from 01.
    pub fn initialize<S: AsRef<str>>(areas: &[S], seats_per_area: usize) -> Self {
        let areas: Vec<String> = areas.iter().map(|area| area.as_ref().to_string()).collect();
        let seats: Vec<Seat> = areas
            .iter()
            .flat_map(|area| (1..=seats_per_area).map(move |i| Seat::new(area.as_str(), i)))
            .collect();
        let index = seats
            .iter()
            .enumerate()
            .map(|(i, seat)| (seat.id.clone(), i))
            .collect();
        Self { areas, seats, index }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn seats_in_area<'a>(&'a self, area: &'a str) -> impl Iterator<Item = &'a Seat> + 'a {
        self.seats.iter().filter(move |seat| seat.area == area)
    }

    pub fn get(&self, id: &str) -> Option<&Seat> {
        self.index.get(id).map(|&i| &self.seats[i])
    }

    /// Marks a seat occupied. Returns `false` for an unknown id.
    pub fn occupy(&mut self, id: &str) -> bool {
        self.set_occupied(id, true)
    }

    /// Marks a seat available. Returns `false` for an unknown id.
    pub fn release(&mut self, id: &str) -> bool {
        self.set_occupied(id, false)
    }

    fn set_occupied(&mut self, id: &str, occupied: bool) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.seats[i].is_occupied = occupied;
                true
            }
            None => false,
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_occupied).count()
    }

    pub fn available_count(&self) -> usize {
        self.seats.len() - self.occupied_count()
    }

    /// Occupies `floor(len * ratio)` distinct random seats. Returns how many.
    pub fn seed_occupancy(&mut self, ratio: f64, rng: &mut impl Rng) -> usize {
        let ratio = ratio.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let count = (self.seats.len() as f64 * ratio).floor() as usize;
        for i in rand::seq::index::sample(rng, self.seats.len(), count) {
            self.seats[i].is_occupied = true;
        }
        count
    }

    /// One step of simulated lounge activity.
    ///
    /// Candidates are drawn from the occupancy before the tick, so a seat
    /// released here is never re-occupied in the same tick.
    pub fn simulate_tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        let (occupied, available): (Vec<usize>, Vec<usize>) =
            (0..self.seats.len()).partition(|&i| self.seats[i].is_occupied);
        let mut outcome = TickOutcome::default();

        if !occupied.is_empty() && rng.gen_bool(TICK_FLIP_PROBABILITY) {
            if let Some(&i) = occupied.choose(rng) {
                self.seats[i].is_occupied = false;
                outcome.released = Some(self.seats[i].id.clone());
            }
        }
        if !available.is_empty() && rng.gen_bool(TICK_FLIP_PROBABILITY) {
            if let Some(&i) = available.choose(rng) {
                self.seats[i].is_occupied = true;
                outcome.occupied = Some(self.seats[i].id.clone());
            }
        }
        outcome
    }
}

// =============================================================================
// SEAT REGISTRY SERVICE
// =============================================================================

/// Owns the registry; every mutation is one message, so readers never see a half-applied tick.
pub struct SeatRegistryService {
    receiver: mpsc::Receiver<SeatRequest>,
    registry: SeatRegistry,
    rng: StdRng,
}

impl SeatRegistryService {
    pub fn new(buffer_size: usize, registry: SeatRegistry, rng: StdRng) -> (Self, SeatClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, registry, rng };
        (service, SeatClient::new(sender))
    }

    #[instrument(name = "seat_registry", skip(self))]
    pub async fn run(mut self) {
        info!(
            seats = self.registry.seats().len(),
            occupied = self.registry.occupied_count(),
            "SeatRegistryService starting"
        );
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SeatRequest::ListSeats { respond_to } => {
                    let _ = respond_to.send(Ok(self.registry.seats().to_vec()));
                }
                SeatRequest::GetSeat { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.registry.get(&id).cloned()));
                }
                SeatRequest::OccupySeat { id, respond_to } => self.handle_occupy(id, respond_to),
                SeatRequest::ReleaseSeat { id, respond_to } => self.handle_release(id, respond_to),
                SeatRequest::SimulateTick { respond_to } => self.handle_simulate_tick(respond_to),
                SeatRequest::Shutdown => {
                    info!("SeatRegistryService shutting down");
                    break;
                }
            }
        }
        info!("SeatRegistryService stopped");
    }

    #[instrument(fields(seat_id = %id), skip(self, id, respond_to))]
    fn handle_occupy(&mut self, id: String, respond_to: ServiceResponse<(), SeatError>) {
        if self.registry.occupy(&id) {
            debug!("Seat occupied");
        } else {
            warn!("Ignoring occupy for unknown seat");
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(seat_id = %id), skip(self, id, respond_to))]
    fn handle_release(&mut self, id: String, respond_to: ServiceResponse<(), SeatError>) {
        if self.registry.release(&id) {
            debug!("Seat released");
        } else {
            warn!("Ignoring release for unknown seat");
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_simulate_tick(&mut self, respond_to: ServiceResponse<TickOutcome, SeatError>) {
        let outcome = self.registry.simulate_tick(&mut self.rng);
        debug!(
            released = ?outcome.released,
            occupied = ?outcome.occupied,
            total_occupied = self.registry.occupied_count(),
            "Simulated occupancy tick"
        );
        let _ = respond_to.send(Ok(outcome));
    }
}
