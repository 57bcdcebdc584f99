use tracing::{error, info, warn, Instrument};
use checkin_kiosk::app_system::{setup_tracing, KioskConfig, KioskSystem};
use checkin_kiosk::domain::{
    default_catalog, CheckInMode, CustomerCreate, CustomerTab, DrawerEvent, DrinkOrderItem,
    DrinkSelection, ExternalOrder, Sweetness, Temperature,
};

fn selection(
    drink_index: usize,
    temperature: Temperature,
    quantity: u32,
) -> Result<DrinkSelection, String> {
    let drink = default_catalog()
        .into_iter()
        .nth(drink_index)
        .ok_or_else(|| format!("No drink at index {}", drink_index))?;
    Ok(DrinkSelection { drink, temperature, sweetness: Sweetness::Standard, quantity })
}

fn delivery_order(name: &str, drink_index: usize, cups: u32) -> Result<ExternalOrder, String> {
    let drink = default_catalog()
        .into_iter()
        .nth(drink_index)
        .ok_or_else(|| format!("No drink at index {}", drink_index))?;
    let item = DrinkOrderItem::new(drink, Temperature::NoIce, Sweetness::LessSugar, cups);
    Ok(ExternalOrder::new(name, vec![item]))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    let config = KioskConfig::from_env();

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!(property = %config.property_name, "Starting check-in kiosk");

    let mut system = KioskSystem::new(config).map_err(|e| e.to_string())?;
    let checkin = system.checkin_client.clone();

    // Register today's visitors
    let walk_in = system
        .customer_client
        .register_customer(
            CustomerCreate::new("陈静", "13800138000").with_mode(CheckInMode::OrderAndSeat),
        )
        .await
        .map_err(|e| e.to_string())?;
    let delivery = system
        .customer_client
        .register_customer(
            CustomerCreate::new("刘洋", "13900139000")
                .with_mode(CheckInMode::ExternalOrdersNoSeat)
                .with_external_orders(vec![
                    delivery_order("美团", 1, 1)?,
                    delivery_order("饿了么", 4, 2)?,
                ]),
        )
        .await
        .map_err(|e| e.to_string())?;
    let top_up = system
        .customer_client
        .register_customer(
            CustomerCreate::new("张伟", "13700137000")
                .with_mode(CheckInMode::ExternalOrdersSeatAndOrder)
                .with_external_orders(vec![delivery_order("美团", 2, 1)?]),
        )
        .await
        .map_err(|e| e.to_string())?;

    // Walk-in: order from the catalog and pick a seat
    let span = tracing::info_span!("walk_in", customer_id = %walk_in);
    async {
        let session = checkin
            .open(walk_in.clone())
            .await
            .map_err(|e| e.to_string())?;
        checkin
            .add_drink(session.clone(), selection(0, Temperature::Hot, 2)?)
            .await
            .map_err(|e| e.to_string())?;

        let seats = system
            .seat_client
            .list_seats()
            .await
            .map_err(|e| e.to_string())?;
        let free = seats
            .iter()
            .find(|seat| !seat.is_occupied)
            .ok_or_else(|| "No free seat".to_string())?;
        checkin
            .select_seat(session.clone(), free.id.clone())
            .await
            .map_err(|e| e.to_string())?;

        let outcome = system
            .complete_check_in(session)
            .await
            .map_err(|e| e.to_string())?;
        info!(total = outcome.total_price(), "{}", outcome.success_notice());
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Delivery visitor: void one pre-placed order, no seat
    let span = tracing::info_span!("delivery", customer_id = %delivery);
    async {
        let session = checkin
            .open(delivery.clone())
            .await
            .map_err(|e| e.to_string())?;
        let snapshot = checkin
            .get_session(session.clone())
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "Session vanished".to_string())?;
        if let Some(order) = snapshot.external_orders.first() {
            checkin
                .delete_item(session.clone(), order.id.clone())
                .await
                .map_err(|e| e.to_string())?;
            checkin
                .confirm_void(session.clone())
                .await
                .map_err(|e| e.to_string())?;
        }

        let outcome = system
            .complete_check_in(session)
            .await
            .map_err(|e| e.to_string())?;
        info!(cups = outcome.orders.len(), "{}", outcome.success_notice());
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Delivery visitor who adds a drink on the spot, then changes their mind about the visit
    let span = tracing::info_span!("top_up", customer_id = %top_up);
    let top_up_result = async {
        let session = checkin
            .open(top_up.clone())
            .await
            .map_err(|e| e.to_string())?;
        checkin
            .open_inline_ordering(session.clone())
            .await
            .map_err(|e| e.to_string())?;
        checkin
            .add_drink(session.clone(), selection(5, Temperature::LessIce, 1)?)
            .await
            .map_err(|e| e.to_string())?;

        let committed = checkin
            .commit_inline_order(session.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id = ?committed, "Inline order committed");

        checkin.cancel(session).await.map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = top_up_result {
        error!(error = %e, "Top-up check-in failed");
    }

    while let Ok(event) = system.drawer_events.try_recv() {
        match event {
            DrawerEvent::OpenChanged { customer_id, open, .. } => {
                info!(%customer_id, open, "Drawer")
            }
            DrawerEvent::Completed { customer_id, outcome, .. } => {
                info!(%customer_id, orders = outcome.orders.len(), "Check-in completed")
            }
        }
    }

    match system.customer_client.roster_summary().await {
        Ok(summary) => {
            info!(pending = summary.pending, processed = summary.processed, "Roster")
        }
        Err(e) => warn!(error = %e, "Roster unavailable"),
    }
    let pending = system
        .customer_client
        .list_by_tab(CustomerTab::Pending)
        .await
        .map_err(|e| e.to_string())?;
    for customer in pending {
        info!(name = %customer.name, mode = %customer.effective_mode(), "Still waiting");
    }

    // Shutdown system gracefully
    drop(checkin);
    system.shutdown().await?;

    info!("Kiosk demo completed");
    Ok(())
}
