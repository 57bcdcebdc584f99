use serde::{Deserialize, Serialize};

/// A single seat in the reception lounge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub name: String,
    pub area: String,
    pub is_occupied: bool,
}

impl Seat {
    /// Builds an available seat named `<area>-<2-digit index>`.
    pub fn new(area: impl Into<String>, index: usize) -> Self {
        let area = area.into();
        let id = format!("{area}-{index:02}");
        Self {
            name: id.clone(),
            id,
            area,
            is_occupied: false,
        }
    }

    /// The part of the name after the area prefix, as shown on the seat grid.
    pub fn short_label(&self) -> &str {
        self.name
            .split_once('-')
            .map_or(self.name.as_str(), |(_, number)| number)
    }
}
