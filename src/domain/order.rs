use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::{Drink, Sweetness, Temperature};

/// One line of a drink order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkOrderItem {
    pub id: String,
    pub drink: Drink,
    pub temperature: Temperature,
    pub sweetness: Sweetness,
    pub quantity: u32,
}

impl DrinkOrderItem {
    /// Creates a line with a freshly generated id.
    pub fn new(drink: Drink, temperature: Temperature, sweetness: Sweetness, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            drink,
            temperature,
            sweetness,
            quantity,
        }
    }

    pub fn line_total(&self) -> Option<f64> {
        self.drink.price.map(|price| price * f64::from(self.quantity))
    }
}

/// What the drink-configuration dialog hands over on confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkSelection {
    pub drink: Drink,
    pub temperature: Temperature,
    pub sweetness: Sweetness,
    pub quantity: u32,
}

/// A group of items ordered through another channel before check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalOrder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<DrinkOrderItem>,
}

impl ExternalOrder {
    pub fn new(name: impl Into<String>, items: Vec<DrinkOrderItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            items,
        }
    }

    /// Number of cups across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_catalog;

    #[test]
    fn test_item_ids_are_unique() {
        let drink = default_catalog().remove(0);
        let a = DrinkOrderItem::new(drink.clone(), Temperature::Hot, Sweetness::Standard, 1);
        let b = DrinkOrderItem::new(drink, Temperature::Hot, Sweetness::Standard, 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_totals() {
        let catalog = default_catalog();
        let latte = DrinkOrderItem::new(catalog[1].clone(), Temperature::NoIce, Sweetness::LessSugar, 3);
        assert_eq!(latte.line_total(), Some(90.0));

        let unpriced = DrinkOrderItem::new(Drink::new("x", "白开水"), Temperature::Hot, Sweetness::NoSugar, 2);
        assert_eq!(unpriced.line_total(), None);

        let order = ExternalOrder::new("美团", vec![latte, unpriced]);
        assert_eq!(order.item_count(), 5);
    }
}
