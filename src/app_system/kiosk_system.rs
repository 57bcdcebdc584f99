use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};
use crate::actor_framework::ResourceActor;
use crate::actors::{IntervalTicks, OccupancySimulator, SeatRegistry, SeatRegistryService};
use crate::checkin_actor::CheckInError;
use crate::clients::{CheckInClient, CustomerClient, SeatClient};
use crate::domain::{CheckInOutcome, CheckInSession, Customer, DrawerEvent};
use super::config::{ConfigError, KioskConfig};

fn counter_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The kiosk core: seat registry, visitor roster and check-in sessions, wired together.
///
/// Responsible for starting up services, wiring them together, and handling shutdown.
pub struct KioskSystem {
    pub config: KioskConfig,
    pub seat_client: SeatClient,
    pub customer_client: CustomerClient,
    pub checkin_client: CheckInClient,
    /// Drawer open/close and completion notifications for the host UI.
    pub drawer_events: mpsc::UnboundedReceiver<DrawerEvent>,
    simulator: Option<JoinHandle<usize>>,
    handles: Vec<JoinHandle<()>>,
}

impl KioskSystem {
    /// Must be called from within a tokio runtime.
    #[instrument(name = "kiosk_system", skip(config), fields(property = %config.property_name))]
    pub fn new(config: KioskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Starting kiosk system");

        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // 1. Seat registry
        let mut registry = SeatRegistry::initialize(&config.seat_areas, config.seats_per_area);
        let seeded = registry.seed_occupancy(config.initial_occupancy, &mut rng);
        info!(seats = registry.seats().len(), occupied = seeded, "Seat registry initialized");
        let (seat_service, seat_client) = SeatRegistryService::new(config.channel_buffer, registry, rng);
        let seat_handle = tokio::spawn(seat_service.run());

        // 2. Visitor roster
        let (customer_actor, customer_inner) =
            ResourceActor::<Customer>::new(config.channel_buffer, counter_ids("customer"));
        let customer_client = CustomerClient::new(customer_inner);
        let customer_handle = tokio::spawn(customer_actor.run());

        // 3. Check-in sessions
        let (drawer_tx, drawer_events) = mpsc::unbounded_channel();
        let (session_actor, session_inner) =
            ResourceActor::<CheckInSession>::new(config.channel_buffer, counter_ids("session"));
        let checkin_client = CheckInClient::new(
            session_inner,
            customer_client.clone(),
            seat_client.clone(),
            drawer_tx,
        );
        let session_handle = tokio::spawn(session_actor.run());

        // 4. Occupancy simulation
        let simulator = config.simulation_enabled.then(|| {
            let ticks = IntervalTicks::new(config.simulation_period);
            tokio::spawn(OccupancySimulator::new(seat_client.clone(), ticks).run())
        });

        Ok(Self {
            config,
            seat_client,
            customer_client,
            checkin_client,
            drawer_events,
            simulator,
            handles: vec![seat_handle, customer_handle, session_handle],
        })
    }

    /// Completes the session and records the check-in on the visitor's roster entry.
    #[instrument(skip(self))]
    pub async fn complete_check_in(&self, session_id: String) -> Result<CheckInOutcome, CheckInError> {
        let session = self
            .checkin_client
            .get_session(session_id.clone())
            .await?
            .ok_or_else(|| CheckInError::SessionNotFound(session_id.clone()))?;
        let outcome = self.checkin_client.complete(session_id).await?;

        if let Err(e) = self
            .customer_client
            .record_check_in(session.customer_id.clone(), outcome.clone())
            .await
        {
            warn!(customer_id = %session.customer_id, error = %e, "Could not record check-in on roster");
        }
        Ok(outcome)
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down kiosk system...");

        // The simulator holds a seat client; stop it first so the registry channel can close.
        if let Some(simulator) = self.simulator {
            simulator.abort();
            let _ = simulator.await;
        }

        // Drop clients to close channels. Actors stop when their channel closes.
        drop(self.checkin_client);
        drop(self.customer_client);
        if let Err(e) = self.seat_client.shutdown().await {
            warn!(error = %e, "Seat registry already stopped");
        }
        drop(self.seat_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Kiosk system shutdown complete.");
        Ok(())
    }
}
