use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::checkin_actor::{CheckInAction, CheckInActionResult, CheckInError, DeleteOutcome};
use crate::clients::{CustomerClient, SeatClient};
use crate::domain::{
    CheckInOutcome, CheckInSession, DrawerEvent, DrinkSelection, ExternalOrder, OpenSession, Seat,
    Sweetness, Temperature,
};

/// Client for check-in drawer sessions.
///
/// Orchestrates the roster (read-only), the session actor and the seat registry.
#[derive(Clone)]
pub struct CheckInClient {
    inner: ResourceClient<CheckInSession>,
    customer_client: CustomerClient,
    seat_client: SeatClient,
    events: mpsc::UnboundedSender<DrawerEvent>,
}

impl_client_methods!(CheckInClient, CheckInSession, CheckInError, session);

fn unexpected(result: CheckInActionResult) -> CheckInError {
    CheckInError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl CheckInClient {
    pub fn new(
        inner: ResourceClient<CheckInSession>,
        customer_client: CustomerClient,
        seat_client: SeatClient,
        events: mpsc::UnboundedSender<DrawerEvent>,
    ) -> Self {
        Self {
            inner,
            customer_client,
            seat_client,
            events,
        }
    }

    fn emit(&self, event: DrawerEvent) {
        if self.events.send(event).is_err() {
            debug!("No listener for drawer events");
        }
    }

    async fn act(&self, session_id: &str, action: CheckInAction) -> Result<CheckInActionResult, CheckInError> {
        self.inner
            .perform_action(session_id.to_string(), action)
            .await
            .map_err(CheckInError::from)
    }

    async fn session_snapshot(&self, session_id: &str) -> Result<CheckInSession, CheckInError> {
        self.get_session(session_id.to_string())
            .await?
            .ok_or_else(|| CheckInError::SessionNotFound(session_id.to_string()))
    }

    /// Opens the drawer for a customer and returns the new session id.
    #[instrument(skip(self))]
    pub async fn open(&self, customer_id: String) -> Result<String, CheckInError> {
        info!("Opening check-in drawer");

        let customer = match self.customer_client.get_customer(customer_id.clone()).await {
            Ok(Some(customer)) => customer,
            Ok(None) => {
                error!("Customer not found");
                return Err(CheckInError::CustomerNotFound(customer_id));
            }
            Err(e) => {
                error!(error = %e, "Customer lookup failed");
                return Err(CheckInError::ActorCommunicationError(e.to_string()));
            }
        };
        let mode = customer.effective_mode();

        let session_id = self.inner.create(OpenSession { customer }).await?;
        info!(session_id = %session_id, mode = %mode, "Check-in session opened");
        self.emit(DrawerEvent::OpenChanged {
            session_id: session_id.clone(),
            customer_id,
            open: true,
        });
        Ok(session_id)
    }

    #[instrument(skip(self, selection), fields(drink = %selection.drink.name, quantity = selection.quantity))]
    pub async fn add_drink(&self, session_id: String, selection: DrinkSelection) -> Result<String, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::AddDrink(selection)).await? {
            CheckInActionResult::AddDrink(item_id) => Ok(item_id),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn adjust_quantity(&self, session_id: String, item_id: String, delta: i32) -> Result<u32, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::AdjustQuantity { item_id, delta }).await? {
            CheckInActionResult::AdjustQuantity(quantity) => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_item_options(
        &self,
        session_id: String,
        item_id: String,
        temperature: Temperature,
        sweetness: Sweetness,
    ) -> Result<(), CheckInError> {
        debug!("Sending request");
        let action = CheckInAction::UpdateItemOptions { item_id, temperature, sweetness };
        match self.act(&session_id, action).await? {
            CheckInActionResult::UpdateItemOptions(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Deletes a cart line, or stages an external order for voiding.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, session_id: String, id: String) -> Result<DeleteOutcome, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::DeleteItem(id)).await? {
            CheckInActionResult::DeleteItem(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn confirm_void(&self, session_id: String) -> Result<ExternalOrder, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::ConfirmVoid).await? {
            CheckInActionResult::ConfirmVoid(order) => {
                info!(order_id = %order.id, "External order voided");
                Ok(order)
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_void(&self, session_id: String) -> Result<(), CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::CancelVoid).await? {
            CheckInActionResult::CancelVoid(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn open_inline_ordering(&self, session_id: String) -> Result<(), CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::OpenInlineOrdering).await? {
            CheckInActionResult::OpenInlineOrdering(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Returns how many cart lines were discarded.
    #[instrument(skip(self))]
    pub async fn close_inline_ordering(&self, session_id: String) -> Result<usize, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::CloseInlineOrdering).await? {
            CheckInActionResult::CloseInlineOrdering(discarded) => Ok(discarded),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn commit_inline_order(&self, session_id: String) -> Result<Option<String>, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::CommitInlineOrder).await? {
            CheckInActionResult::CommitInlineOrder(order_id) => Ok(order_id),
            other => Err(unexpected(other)),
        }
    }

    /// Chooses a seat using the registry's current view of it. Nothing is reserved yet.
    ///
    /// The session's mode is checked before the registry is consulted.
    #[instrument(skip(self))]
    pub async fn select_seat(&self, session_id: String, seat_id: String) -> Result<Seat, CheckInError> {
        debug!("Sending request");
        let session = self.session_snapshot(&session_id).await?;
        if !session.mode.allows_seat_selection() {
            return Err(CheckInError::SeatSelectionNotAllowed(session.mode));
        }
        let seat = match self.seat_client.get_seat(seat_id.clone()).await {
            Ok(Some(seat)) => seat,
            Ok(None) => return Err(CheckInError::SeatNotFound(seat_id)),
            Err(e) => return Err(CheckInError::ActorCommunicationError(e.to_string())),
        };
        match self.act(&session_id, CheckInAction::SelectSeat(seat)).await? {
            CheckInActionResult::SelectSeat(seat) => Ok(seat),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear_seat(&self, session_id: String) -> Result<Option<Seat>, CheckInError> {
        debug!("Sending request");
        match self.act(&session_id, CheckInAction::ClearSeat).await? {
            CheckInActionResult::ClearSeat(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    /// Finishes the check-in: occupies the chosen seat, closes the session and
    /// emits `Completed` exactly once.
    ///
    /// The seat is occupied before the session is reset, so a registry failure
    /// leaves the session intact for another attempt.
    #[instrument(skip(self))]
    pub async fn complete(&self, session_id: String) -> Result<CheckInOutcome, CheckInError> {
        info!("Completing check-in");
        let session = self.session_snapshot(&session_id).await?;

        if let Some(seat) = &session.selected_seat {
            self.occupy(seat).await?;
        }

        let outcome = match self.act(&session_id, CheckInAction::Complete).await? {
            CheckInActionResult::Complete(outcome) => outcome,
            other => return Err(unexpected(other)),
        };
        if let Some(seat) = &outcome.seat {
            if session.selected_seat.as_ref().map(|s| &s.id) != Some(&seat.id) {
                self.occupy(seat).await?;
            }
        }

        self.inner.delete(session_id.clone()).await?;
        info!(
            orders = outcome.orders.len(),
            seat = ?outcome.seat.as_ref().map(|seat| seat.id.as_str()),
            "Check-in completed"
        );
        self.emit(DrawerEvent::Completed {
            session_id: session_id.clone(),
            customer_id: session.customer_id.clone(),
            outcome: outcome.clone(),
        });
        self.emit(DrawerEvent::OpenChanged {
            session_id,
            customer_id: session.customer_id,
            open: false,
        });
        Ok(outcome)
    }

    /// Commits occupancy for a selected seat.
    ///
    /// The simulator may have taken the seat since it was selected; occupying is idempotent.
    async fn occupy(&self, seat: &Seat) -> Result<(), CheckInError> {
        if let Ok(Some(current)) = self.seat_client.get_seat(seat.id.clone()).await {
            if current.is_occupied {
                warn!(seat_id = %seat.id, "Selected seat was occupied before completion");
            }
        }
        self.seat_client
            .occupy_seat(seat.id.clone())
            .await
            .map_err(|e| CheckInError::ActorCommunicationError(e.to_string()))
    }

    /// Closes the drawer without committing anything.
    #[instrument(skip(self))]
    pub async fn cancel(&self, session_id: String) -> Result<(), CheckInError> {
        info!("Cancelling check-in");
        let session = self.session_snapshot(&session_id).await?;

        match self.act(&session_id, CheckInAction::Cancel).await? {
            CheckInActionResult::Cancel(()) => {}
            other => return Err(unexpected(other)),
        }
        self.inner.delete(session_id.clone()).await?;
        self.emit(DrawerEvent::OpenChanged {
            session_id,
            customer_id: session.customer_id,
            open: false,
        });
        Ok(())
    }
}
