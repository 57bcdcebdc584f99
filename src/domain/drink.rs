use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog entry. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl Drink {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            price: None,
            category: None,
            tags: Vec::new(),
            image: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperature {
    RoomTemperature,
    Hot,
    StandardIce,
    LessIce,
    NoIce,
}

impl Temperature {
    pub const ALL: [Temperature; 5] = [
        Temperature::RoomTemperature,
        Temperature::Hot,
        Temperature::StandardIce,
        Temperature::LessIce,
        Temperature::NoIce,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Temperature::RoomTemperature => "常温",
            Temperature::Hot => "热饮",
            Temperature::StandardIce => "标准冰",
            Temperature::LessIce => "少冰",
            Temperature::NoIce => "去冰",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sweetness {
    NoSugar,
    LessSugar,
    Standard,
}

impl Sweetness {
    pub const ALL: [Sweetness; 3] = [Sweetness::NoSugar, Sweetness::LessSugar, Sweetness::Standard];

    pub fn label(self) -> &'static str {
        match self {
            Sweetness::NoSugar => "无糖",
            Sweetness::LessSugar => "少糖",
            Sweetness::Standard => "标准糖",
        }
    }
}

impl fmt::Display for Sweetness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The drinks offered at the reception bar.
pub fn default_catalog() -> Vec<Drink> {
    vec![
        Drink::new("1", "美式咖啡").with_icon("☕").with_price(25.0).with_category("咖啡"),
        Drink::new("2", "拿铁").with_icon("☕").with_price(30.0).with_category("咖啡"),
        Drink::new("3", "卡布奇诺").with_icon("☕").with_price(32.0).with_category("咖啡"),
        Drink::new("4", "龙井茶").with_icon("🍵").with_price(28.0).with_category("茶"),
        Drink::new("5", "铁观音").with_icon("🍵").with_price(30.0).with_category("茶"),
        Drink::new("6", "鲜榨橙汁").with_icon("🍹").with_price(25.0).with_category("果汁"),
        Drink::new("7", "鲜榨西瓜汁").with_icon("🍹").with_price(22.0).with_category("果汁"),
        Drink::new("8", "柠檬蜂蜜水").with_icon("🍋").with_price(20.0).with_category("其他"),
        Drink::new("9", "矿泉水").with_icon("💧").with_price(5.0).with_category("其他"),
    ]
}

pub fn find_drink<'a>(catalog: &'a [Drink], id: &str) -> Option<&'a Drink> {
    catalog.iter().find(|drink| drink.id == id)
}
