use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerCreate, ProfilePatch, AGE_RANGES};
use super::actions::{CustomerAction, CustomerActionResult};
use super::error::CustomerError;

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::ValidationError("name must not be blank".to_string()));
    }
    Ok(())
}

impl Entity for Customer {
    type Id = String;
    type CreateParams = CustomerCreate;
    type Patch = ProfilePatch;
    type Action = CustomerAction;
    type ActionResult = CustomerActionResult;
    type Error = CustomerError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Registers a visitor as pending.
    fn from_create_params(id: String, params: CustomerCreate) -> Result<Self, CustomerError> {
        validate_name(&params.name)?;
        Ok(Self {
            id,
            name: params.name,
            phone: params.phone,
            gender: params.gender,
            age_range: None,
            occupation: params.occupation,
            consultant: params.consultant,
            recommender: params.recommender,
            channel: params.channel,
            check_in_time: params.check_in_time,
            check_in_mode: params.check_in_mode,
            external_orders: params.external_orders,
            is_processed: false,
            assigned_seat: None,
            served_orders: Vec::new(),
        })
    }

    /// Applies the profile form.
    ///
    /// # Errors
    /// Rejects a blank name or an age range outside [`AGE_RANGES`]; nothing is applied then.
    fn on_update(&mut self, patch: ProfilePatch) -> Result<(), CustomerError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(age_range) = &patch.age_range {
            if !AGE_RANGES.contains(&age_range.as_str()) {
                return Err(CustomerError::ValidationError(format!("unknown age range: {age_range}")));
            }
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(age_range) = patch.age_range {
            self.age_range = Some(age_range);
        }
        if let Some(occupation) = patch.occupation {
            self.occupation = Some(occupation);
        }
        if let Some(consultant) = patch.consultant {
            self.consultant = Some(consultant);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CustomerAction) -> Result<CustomerActionResult, CustomerError> {
        match action {
            CustomerAction::RecordCheckIn(outcome) => {
                let was_pending = !self.is_processed;
                self.is_processed = true;
                self.assigned_seat = outcome.seat.map(|seat| seat.id);
                self.served_orders = outcome.orders;
                Ok(CustomerActionResult::RecordCheckIn(was_pending))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckInOutcome, Gender, Seat};

    fn registered() -> Customer {
        Customer::from_create_params("customer_1".into(), CustomerCreate::new("李明", "13900000000")).unwrap()
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let err = Customer::from_create_params("c".into(), CustomerCreate::new("  ", "1")).unwrap_err();
        assert!(matches!(err, CustomerError::ValidationError(_)));
    }

    #[test]
    fn test_profile_patch() {
        let mut customer = registered();
        customer
            .on_update(ProfilePatch {
                gender: Some(Gender::Male),
                age_range: Some("30-35岁".into()),
                occupation: Some("工程师".into()),
                ..ProfilePatch::default()
            })
            .unwrap();
        assert_eq!(customer.name, "李明");
        assert_eq!(customer.gender, Gender::Male);
        assert_eq!(customer.age_range.as_deref(), Some("30-35岁"));
        assert_eq!(customer.occupation.as_deref(), Some("工程师"));
    }

    #[test]
    fn test_invalid_patch_changes_nothing() {
        let mut customer = registered();
        let err = customer
            .on_update(ProfilePatch {
                name: Some("李明明".into()),
                age_range: Some("31岁".into()),
                ..ProfilePatch::default()
            })
            .unwrap_err();
        assert!(matches!(err, CustomerError::ValidationError(_)));
        assert_eq!(customer.name, "李明");
        assert_eq!(customer.age_range, None);
    }

    #[test]
    fn test_record_check_in() {
        let mut customer = registered();
        let outcome = CheckInOutcome { orders: vec![], seat: Some(Seat::new("B区", 4)) };

        let result = customer.handle_action(CustomerAction::RecordCheckIn(outcome.clone())).unwrap();
        assert_eq!(result, CustomerActionResult::RecordCheckIn(true));
        assert!(customer.is_processed);
        assert_eq!(customer.assigned_seat.as_deref(), Some("B区-04"));

        let result = customer.handle_action(CustomerAction::RecordCheckIn(outcome)).unwrap();
        assert_eq!(result, CustomerActionResult::RecordCheckIn(false));
    }
}
