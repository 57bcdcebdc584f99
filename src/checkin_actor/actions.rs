use crate::domain::{CheckInOutcome, DrinkOrderItem, DrinkSelection, ExternalOrder, Seat, Sweetness, Temperature};

/// Operations a host can apply to an open check-in session.
#[derive(Debug, Clone)]
pub enum CheckInAction {
    /// Appends a configured drink to the pending cart.
    AddDrink(DrinkSelection),
    /// Shifts a cart line's quantity; the result never drops below 1.
    AdjustQuantity { item_id: String, delta: i32 },
    UpdateItemOptions {
        item_id: String,
        temperature: Temperature,
        sweetness: Sweetness,
    },
    /// Removes a cart line outright, or stages a whole external order for voiding.
    DeleteItem(String),
    ConfirmVoid,
    CancelVoid,
    OpenInlineOrdering,
    /// Closes the inline panel, discarding whatever it held.
    CloseInlineOrdering,
    /// Wraps the cart as a new external order.
    CommitInlineOrder,
    /// Chooses a seat. The snapshot comes from the seat registry.
    SelectSeat(Seat),
    ClearSeat,
    Complete,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Removed(DrinkOrderItem),
    VoidPending(String),
}

/// Results from CheckInActions - variants match 1:1 with CheckInAction
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInActionResult {
    /// Id of the new cart line
    AddDrink(String),
    /// Quantity after clamping
    AdjustQuantity(u32),
    UpdateItemOptions(()),
    DeleteItem(DeleteOutcome),
    /// The voided order
    ConfirmVoid(ExternalOrder),
    CancelVoid(()),
    OpenInlineOrdering(()),
    /// Number of discarded cart lines
    CloseInlineOrdering(usize),
    /// Id of the committed order, `None` when the cart was empty
    CommitInlineOrder(Option<String>),
    SelectSeat(Seat),
    /// The previously selected seat, if any
    ClearSeat(Option<Seat>),
    Complete(CheckInOutcome),
    Cancel(()),
}
