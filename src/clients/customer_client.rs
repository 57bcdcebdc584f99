use std::cmp::Ordering;
use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::customer_actor::{CustomerAction, CustomerActionResult, CustomerError};
use crate::domain::{CheckInOutcome, Customer, CustomerCreate, CustomerTab, ProfilePatch, RosterSummary};

/// Client for the visitor roster.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, CustomerError, customer);

/// Earliest check-in first; visitors without a time go last.
fn roster_order(a: &Customer, b: &Customer) -> Ordering {
    match (a.check_in_time, b.check_in_time) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}

impl CustomerClient {
    #[instrument(skip(self, customer), fields(name = %customer.name))]
    pub async fn register_customer(&self, customer: CustomerCreate) -> Result<String, CustomerError> {
        debug!("Sending request");
        self.inner.create(customer).await.map_err(CustomerError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, id: String, patch: ProfilePatch) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(CustomerError::from)
    }

    /// Marks the visitor processed. Returns whether they were still pending.
    #[instrument(skip(self, outcome))]
    pub async fn record_check_in(&self, id: String, outcome: CheckInOutcome) -> Result<bool, CustomerError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CustomerAction::RecordCheckIn(outcome)).await {
            Ok(CustomerActionResult::RecordCheckIn(was_pending)) => Ok(was_pending),
            Err(e) => Err(CustomerError::from(e)),
        }
    }

    /// Visitors on one tab of the list, in roster order.
    #[instrument(skip(self))]
    pub async fn list_by_tab(&self, tab: CustomerTab) -> Result<Vec<Customer>, CustomerError> {
        let processed = tab == CustomerTab::Processed;
        let mut customers: Vec<Customer> = self
            .list_customers()
            .await?
            .into_iter()
            .filter(|customer| customer.is_processed == processed)
            .collect();
        customers.sort_by(roster_order);
        Ok(customers)
    }

    #[instrument(skip(self))]
    pub async fn roster_summary(&self) -> Result<RosterSummary, CustomerError> {
        let customers = self.list_customers().await?;
        let processed = customers.iter().filter(|customer| customer.is_processed).count();
        Ok(RosterSummary {
            pending: customers.len() - processed,
            processed,
        })
    }

    /// The visitor pre-selected when the kiosk opens: first pending one, else first overall.
    #[instrument(skip(self))]
    pub async fn default_selection(&self) -> Result<Option<Customer>, CustomerError> {
        let mut customers = self.list_customers().await?;
        customers.sort_by(roster_order);
        let first_pending = customers.iter().position(|customer| !customer.is_processed);
        Ok(match first_pending {
            Some(i) => Some(customers.swap_remove(i)),
            None => customers.into_iter().next(),
        })
    }
}
