use std::collections::HashSet;
use std::mem;
use tracing::debug;
use crate::actor_framework::Entity;
use crate::domain::{
    CheckInOutcome, CheckInSession, DrinkOrderItem, DrinkSelection, ExternalOrder, OpenSession,
    OrderSource, Seat, Sweetness, Temperature,
};
use super::actions::{CheckInAction, CheckInActionResult, DeleteOutcome};
use super::error::CheckInError;

impl Entity for CheckInSession {
    type Id = String;
    type CreateParams = OpenSession;
    type Patch = ();
    type Action = CheckInAction;
    type ActionResult = CheckInActionResult;
    type Error = CheckInError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Opens a drawer session for the customer.
    ///
    /// External-order modes seed their order list from a copy of the customer's
    /// orders and remember which ids existed at open time.
    fn from_create_params(id: String, params: OpenSession) -> Result<Self, CheckInError> {
        let customer = params.customer;
        let mode = customer.effective_mode();
        let external_orders = if mode.is_external_order_mode() {
            customer.external_orders.clone()
        } else {
            Vec::new()
        };
        let original_order_ids = external_orders.iter().map(|order| order.id.clone()).collect();

        Ok(Self {
            id,
            customer_id: customer.id,
            customer_name: customer.name,
            mode,
            cart: Vec::new(),
            external_orders,
            original_order_ids,
            selected_seat: None,
            pending_void: None,
            inline_ordering: false,
        })
    }

    /// Sessions have no patchable fields.
    fn on_update(&mut self, _patch: ()) -> Result<(), CheckInError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CheckInAction) -> Result<CheckInActionResult, CheckInError> {
        debug!(session_id = %self.id, mode = %self.mode, ?action, "Applying check-in action");
        match action {
            CheckInAction::AddDrink(selection) => {
                self.add_drink(selection).map(CheckInActionResult::AddDrink)
            }
            CheckInAction::AdjustQuantity { item_id, delta } => {
                self.adjust_quantity(&item_id, delta).map(CheckInActionResult::AdjustQuantity)
            }
            CheckInAction::UpdateItemOptions { item_id, temperature, sweetness } => self
                .update_item_options(&item_id, temperature, sweetness)
                .map(CheckInActionResult::UpdateItemOptions),
            CheckInAction::DeleteItem(id) => self.delete_item(&id).map(CheckInActionResult::DeleteItem),
            CheckInAction::ConfirmVoid => self.confirm_void().map(CheckInActionResult::ConfirmVoid),
            CheckInAction::CancelVoid => {
                self.pending_void = None;
                Ok(CheckInActionResult::CancelVoid(()))
            }
            CheckInAction::OpenInlineOrdering => self
                .set_inline_ordering(true)
                .map(|_| CheckInActionResult::OpenInlineOrdering(())),
            CheckInAction::CloseInlineOrdering => self
                .set_inline_ordering(false)
                .map(CheckInActionResult::CloseInlineOrdering),
            CheckInAction::CommitInlineOrder => self
                .commit_inline_order()
                .map(CheckInActionResult::CommitInlineOrder),
            CheckInAction::SelectSeat(seat) => self.select_seat(seat).map(CheckInActionResult::SelectSeat),
            CheckInAction::ClearSeat => Ok(CheckInActionResult::ClearSeat(self.selected_seat.take())),
            CheckInAction::Complete => Ok(CheckInActionResult::Complete(self.complete())),
            CheckInAction::Cancel => {
                self.reset();
                Ok(CheckInActionResult::Cancel(()))
            }
        }
    }
}

impl CheckInSession {
    fn add_drink(&mut self, selection: DrinkSelection) -> Result<String, CheckInError> {
        match self.mode.order_source() {
            OrderSource::Catalog => {}
            OrderSource::External { can_append: true } if self.inline_ordering => {}
            OrderSource::External { can_append: true } => return Err(CheckInError::InlineOrderingClosed),
            OrderSource::None | OrderSource::External { can_append: false } => {
                return Err(CheckInError::OrderingNotAllowed(self.mode))
            }
        }
        if selection.quantity == 0 {
            return Err(CheckInError::InvalidQuantity(0));
        }

        let item = DrinkOrderItem::new(
            selection.drink,
            selection.temperature,
            selection.sweetness,
            selection.quantity,
        );
        let id = item.id.clone();
        self.cart.push(item);
        Ok(id)
    }

    fn cart_item_mut(&mut self, item_id: &str) -> Result<&mut DrinkOrderItem, CheckInError> {
        self.cart
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CheckInError::ItemNotFound(item_id.to_string()))
    }

    fn adjust_quantity(&mut self, item_id: &str, delta: i32) -> Result<u32, CheckInError> {
        let item = self.cart_item_mut(item_id)?;
        let adjusted = (i64::from(item.quantity) + i64::from(delta)).clamp(1, i64::from(u32::MAX));
        item.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);
        Ok(item.quantity)
    }

    fn update_item_options(
        &mut self,
        item_id: &str,
        temperature: Temperature,
        sweetness: Sweetness,
    ) -> Result<(), CheckInError> {
        let item = self.cart_item_mut(item_id)?;
        item.temperature = temperature;
        item.sweetness = sweetness;
        Ok(())
    }

    fn delete_item(&mut self, id: &str) -> Result<DeleteOutcome, CheckInError> {
        if let Some(index) = self.cart.iter().position(|item| item.id == id) {
            return Ok(DeleteOutcome::Removed(self.cart.remove(index)));
        }
        if !self.mode.is_external_order_mode() {
            return Err(CheckInError::ItemNotFound(id.to_string()));
        }
        if !self.external_orders.iter().any(|order| order.id == id) {
            return Err(CheckInError::ExternalOrderNotFound(id.to_string()));
        }
        self.pending_void = Some(id.to_string());
        Ok(DeleteOutcome::VoidPending(id.to_string()))
    }

    fn confirm_void(&mut self) -> Result<ExternalOrder, CheckInError> {
        let id = self.pending_void.take().ok_or(CheckInError::NoPendingVoid)?;
        let index = self
            .external_orders
            .iter()
            .position(|order| order.id == id)
            .ok_or(CheckInError::ExternalOrderNotFound(id))?;
        Ok(self.external_orders.remove(index))
    }

    /// Returns how many cart lines were discarded.
    fn set_inline_ordering(&mut self, open: bool) -> Result<usize, CheckInError> {
        if self.mode.order_source() != (OrderSource::External { can_append: true }) {
            return Err(CheckInError::InlineOrderingUnavailable(self.mode));
        }
        self.inline_ordering = open;
        let discarded = if open { 0 } else { mem::take(&mut self.cart).len() };
        Ok(discarded)
    }

    fn commit_inline_order(&mut self) -> Result<Option<String>, CheckInError> {
        if self.mode.order_source() != (OrderSource::External { can_append: true }) {
            return Err(CheckInError::InlineOrderingUnavailable(self.mode));
        }
        if self.cart.is_empty() {
            return Ok(None);
        }
        let name = format!("现场点单 #{}", self.external_orders.len() + 1);
        let order = ExternalOrder::new(name, mem::take(&mut self.cart));
        let id = order.id.clone();
        self.external_orders.push(order);
        self.inline_ordering = false;
        Ok(Some(id))
    }

    fn select_seat(&mut self, seat: Seat) -> Result<Seat, CheckInError> {
        if !self.mode.allows_seat_selection() {
            return Err(CheckInError::SeatSelectionNotAllowed(self.mode));
        }
        if seat.is_occupied {
            return Err(CheckInError::SeatOccupied(seat.id));
        }
        self.selected_seat = Some(seat.clone());
        Ok(seat)
    }

    fn complete(&mut self) -> CheckInOutcome {
        let cart = mem::take(&mut self.cart);
        let orders = if self.mode.is_external_order_mode() {
            mem::take(&mut self.external_orders)
                .into_iter()
                .flat_map(|order| order.items)
                .chain(cart)
                .collect()
        } else {
            cart
        };
        let seat = self.selected_seat.take();
        self.reset();
        CheckInOutcome { orders, seat }
    }

    fn reset(&mut self) {
        self.cart.clear();
        self.external_orders.clear();
        self.original_order_ids = HashSet::new();
        self.selected_seat = None;
        self.pending_void = None;
        self.inline_ordering = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_catalog, CheckInMode, Customer, Gender};
    use proptest::prelude::*;

    fn customer(mode: Option<CheckInMode>, external_orders: Vec<ExternalOrder>) -> Customer {
        Customer {
            id: "customer_1".into(),
            name: "王芳".into(),
            phone: "13800000000".into(),
            gender: Gender::Female,
            age_range: None,
            occupation: None,
            consultant: None,
            recommender: None,
            channel: None,
            check_in_time: None,
            check_in_mode: mode,
            external_orders,
            is_processed: false,
            assigned_seat: None,
            served_orders: Vec::new(),
        }
    }

    fn open(mode: CheckInMode, external_orders: Vec<ExternalOrder>) -> CheckInSession {
        let params = OpenSession { customer: customer(Some(mode), external_orders) };
        CheckInSession::from_create_params("session_1".into(), params).unwrap()
    }

    fn americano(quantity: u32) -> DrinkSelection {
        DrinkSelection {
            drink: default_catalog().remove(0),
            temperature: Temperature::Hot,
            sweetness: Sweetness::Standard,
            quantity,
        }
    }

    fn external_order(name: &str, cups: u32) -> ExternalOrder {
        let item = DrinkOrderItem::new(default_catalog().remove(1), Temperature::NoIce, Sweetness::LessSugar, cups);
        ExternalOrder::new(name, vec![item])
    }

    fn add(session: &mut CheckInSession, quantity: u32) -> String {
        match session.handle_action(CheckInAction::AddDrink(americano(quantity))).unwrap() {
            CheckInActionResult::AddDrink(id) => id,
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    fn seat(id: &str, occupied: bool) -> Seat {
        let (area, index) = id.split_once('-').unwrap();
        Seat { is_occupied: occupied, ..Seat::new(area, index.parse().unwrap()) }
    }

    #[test]
    fn test_missing_mode_defaults_to_order_and_seat() {
        let params = OpenSession { customer: customer(None, vec![external_order("美团", 1)]) };
        let session = CheckInSession::from_create_params("s".into(), params).unwrap();
        assert_eq!(session.mode, CheckInMode::OrderAndSeat);
        assert!(session.external_orders.is_empty());
    }

    #[test]
    fn test_open_copies_external_orders() {
        let orders = vec![external_order("美团", 1), external_order("饿了么", 2)];
        let session = open(CheckInMode::ExternalOrdersSeat, orders.clone());
        assert_eq!(session.external_orders, orders);
        assert_eq!(session.original_order_ids.len(), 2);
    }

    #[test]
    fn test_add_drink_respects_mode() {
        for mode in [CheckInMode::OrderAndSeat, CheckInMode::OrderOnly] {
            let mut session = open(mode, vec![]);
            add(&mut session, 2);
            assert_eq!(session.cart.len(), 1);
        }
        for mode in [
            CheckInMode::SeatOnly,
            CheckInMode::ExternalOrdersNoSeat,
            CheckInMode::ExternalOrdersSeat,
        ] {
            let mut session = open(mode, vec![]);
            let err = session.handle_action(CheckInAction::AddDrink(americano(1))).unwrap_err();
            assert_eq!(err, CheckInError::OrderingNotAllowed(mode));
            assert!(session.cart.is_empty());
        }
    }

    #[test]
    fn test_add_drink_needs_inline_panel_when_appending_external_orders() {
        let mut session = open(CheckInMode::ExternalOrdersSeatAndOrder, vec![]);
        let err = session.handle_action(CheckInAction::AddDrink(americano(1))).unwrap_err();
        assert_eq!(err, CheckInError::InlineOrderingClosed);

        session.handle_action(CheckInAction::OpenInlineOrdering).unwrap();
        add(&mut session, 1);
        assert_eq!(session.cart.len(), 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut session = open(CheckInMode::OrderOnly, vec![]);
        let err = session.handle_action(CheckInAction::AddDrink(americano(0))).unwrap_err();
        assert_eq!(err, CheckInError::InvalidQuantity(0));
    }

    #[test]
    fn test_adjust_quantity_clamps_at_one() {
        let mut session = open(CheckInMode::OrderOnly, vec![]);
        let id = add(&mut session, 2);

        let result = session
            .handle_action(CheckInAction::AdjustQuantity { item_id: id.clone(), delta: -5 })
            .unwrap();
        assert_eq!(result, CheckInActionResult::AdjustQuantity(1));
        assert_eq!(session.cart.len(), 1);

        let result = session
            .handle_action(CheckInAction::AdjustQuantity { item_id: id, delta: 3 })
            .unwrap();
        assert_eq!(result, CheckInActionResult::AdjustQuantity(4));
    }

    #[test]
    fn test_update_item_options_in_place() {
        let mut session = open(CheckInMode::OrderOnly, vec![]);
        let id = add(&mut session, 1);
        session
            .handle_action(CheckInAction::UpdateItemOptions {
                item_id: id,
                temperature: Temperature::LessIce,
                sweetness: Sweetness::NoSugar,
            })
            .unwrap();
        assert_eq!(session.cart[0].temperature, Temperature::LessIce);
        assert_eq!(session.cart[0].sweetness, Sweetness::NoSugar);
    }

    #[test]
    fn test_delete_cart_item_is_immediate() {
        let mut session = open(CheckInMode::OrderAndSeat, vec![]);
        let id = add(&mut session, 1);
        let result = session.handle_action(CheckInAction::DeleteItem(id.clone())).unwrap();
        assert!(matches!(result, CheckInActionResult::DeleteItem(DeleteOutcome::Removed(item)) if item.id == id));
        assert!(session.cart.is_empty());

        let err = session.handle_action(CheckInAction::DeleteItem(id.clone())).unwrap_err();
        assert_eq!(err, CheckInError::ItemNotFound(id));
    }

    #[test]
    fn test_void_requires_confirmation() {
        let orders = vec![external_order("美团", 1), external_order("饿了么", 2)];
        let target = orders[0].id.clone();
        let mut session = open(CheckInMode::ExternalOrdersNoSeat, orders);

        let result = session.handle_action(CheckInAction::DeleteItem(target.clone())).unwrap();
        assert_eq!(result, CheckInActionResult::DeleteItem(DeleteOutcome::VoidPending(target.clone())));
        assert_eq!(session.external_orders.len(), 2);

        session.handle_action(CheckInAction::CancelVoid).unwrap();
        assert_eq!(session.external_orders.len(), 2);
        assert_eq!(
            session.handle_action(CheckInAction::ConfirmVoid).unwrap_err(),
            CheckInError::NoPendingVoid
        );

        session.handle_action(CheckInAction::DeleteItem(target.clone())).unwrap();
        match session.handle_action(CheckInAction::ConfirmVoid).unwrap() {
            CheckInActionResult::ConfirmVoid(order) => assert_eq!(order.id, target),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(session.external_orders.len(), 1);
    }

    #[test]
    fn test_void_unknown_order() {
        let mut session = open(CheckInMode::ExternalOrdersSeat, vec![external_order("美团", 1)]);
        let err = session.handle_action(CheckInAction::DeleteItem("nope".into())).unwrap_err();
        assert_eq!(err, CheckInError::ExternalOrderNotFound("nope".into()));
        assert_eq!(session.pending_void, None);
    }

    #[test]
    fn test_commit_inline_order() {
        let mut session = open(CheckInMode::ExternalOrdersSeatAndOrder, vec![external_order("美团", 1)]);

        let result = session.handle_action(CheckInAction::CommitInlineOrder).unwrap();
        assert_eq!(result, CheckInActionResult::CommitInlineOrder(None));
        assert_eq!(session.external_orders.len(), 1);

        session.handle_action(CheckInAction::OpenInlineOrdering).unwrap();
        add(&mut session, 2);
        let committed = match session.handle_action(CheckInAction::CommitInlineOrder).unwrap() {
            CheckInActionResult::CommitInlineOrder(Some(id)) => id,
            other => panic!("Unexpected result: {:?}", other),
        };
        assert_eq!(session.external_orders.len(), 2);
        assert!(session.cart.is_empty());
        assert!(!session.inline_ordering);

        let display = session.external_orders_for_display();
        assert_eq!(display[0].id, committed);
        assert_eq!(display[1].name, "美团");
    }

    #[test]
    fn test_inline_ordering_only_when_appending() {
        let mut session = open(CheckInMode::ExternalOrdersSeat, vec![]);
        assert_eq!(
            session.handle_action(CheckInAction::OpenInlineOrdering).unwrap_err(),
            CheckInError::InlineOrderingUnavailable(CheckInMode::ExternalOrdersSeat)
        );
        assert_eq!(
            session.handle_action(CheckInAction::CommitInlineOrder).unwrap_err(),
            CheckInError::InlineOrderingUnavailable(CheckInMode::ExternalOrdersSeat)
        );
    }

    #[test]
    fn test_closing_inline_panel_discards_cart() {
        let mut session = open(CheckInMode::ExternalOrdersSeatAndOrder, vec![]);
        session.handle_action(CheckInAction::OpenInlineOrdering).unwrap();
        add(&mut session, 1);
        add(&mut session, 1);
        let result = session.handle_action(CheckInAction::CloseInlineOrdering).unwrap();
        assert_eq!(result, CheckInActionResult::CloseInlineOrdering(2));
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_select_seat_rules() {
        let mut session = open(CheckInMode::OrderAndSeat, vec![]);
        assert_eq!(
            session.handle_action(CheckInAction::SelectSeat(seat("A区-02", true))).unwrap_err(),
            CheckInError::SeatOccupied("A区-02".into())
        );

        session.handle_action(CheckInAction::SelectSeat(seat("A区-01", false))).unwrap();
        session.handle_action(CheckInAction::SelectSeat(seat("B区-03", false))).unwrap();
        assert_eq!(session.selected_seat.as_ref().map(|s| s.id.as_str()), Some("B区-03"));

        let mut session = open(CheckInMode::OrderOnly, vec![]);
        assert_eq!(
            session.handle_action(CheckInAction::SelectSeat(seat("A区-01", false))).unwrap_err(),
            CheckInError::SeatSelectionNotAllowed(CheckInMode::OrderOnly)
        );
        assert_eq!(session.selected_seat, None);
    }

    #[test]
    fn test_complete_in_catalog_mode_returns_cart() {
        let mut session = open(CheckInMode::OrderAndSeat, vec![]);
        add(&mut session, 2);
        session.handle_action(CheckInAction::SelectSeat(seat("A区-01", false))).unwrap();

        let outcome = match session.handle_action(CheckInAction::Complete).unwrap() {
            CheckInActionResult::Complete(outcome) => outcome,
            other => panic!("Unexpected result: {:?}", other),
        };
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].quantity, 2);
        assert_eq!(outcome.seat.as_ref().map(|s| s.id.as_str()), Some("A区-01"));
        assert_eq!(outcome.total_price(), 50.0);

        assert!(session.cart.is_empty());
        assert_eq!(session.selected_seat, None);
    }

    #[test]
    fn test_complete_in_external_mode_flattens_orders_then_cart() {
        let orders = vec![external_order("美团", 1), external_order("饿了么", 3)];
        let mut session = open(CheckInMode::ExternalOrdersSeatAndOrder, orders.clone());
        session.handle_action(CheckInAction::OpenInlineOrdering).unwrap();
        let cart_id = add(&mut session, 1);

        let outcome = match session.handle_action(CheckInAction::Complete).unwrap() {
            CheckInActionResult::Complete(outcome) => outcome,
            other => panic!("Unexpected result: {:?}", other),
        };
        let ids: Vec<_> = outcome.orders.iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids, [orders[0].items[0].id.clone(), orders[1].items[0].id.clone(), cart_id]);
        assert_eq!(outcome.seat, None);
        assert!(session.external_orders.is_empty());
        assert!(!session.inline_ordering);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut session = open(CheckInMode::ExternalOrdersSeat, vec![external_order("美团", 1)]);
        session.handle_action(CheckInAction::SelectSeat(seat("C区-12", false))).unwrap();
        session.handle_action(CheckInAction::Cancel).unwrap();
        assert!(session.external_orders.is_empty());
        assert_eq!(session.selected_seat, None);
    }

    proptest! {
        #[test]
        fn prop_quantity_never_below_one(start in 1u32..20, deltas in prop::collection::vec(-10i32..10, 0..30)) {
            let mut session = open(CheckInMode::OrderAndSeat, vec![]);
            let id = add(&mut session, start);
            for delta in deltas {
                session.handle_action(CheckInAction::AdjustQuantity { item_id: id.clone(), delta }).unwrap();
                prop_assert!(session.cart[0].quantity >= 1);
            }
            prop_assert_eq!(session.cart.len(), 1);
        }
    }
}
