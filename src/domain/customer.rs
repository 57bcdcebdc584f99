use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{CheckInMode, DrinkOrderItem, ExternalOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// How the visitor announced their arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckInChannel {
    GiftVoucherRedemption,
    IpadScan,
    EventRegistration,
    PhoneNumber,
    ViewingCodeScan,
}

impl CheckInChannel {
    pub fn label(self) -> &'static str {
        match self {
            CheckInChannel::GiftVoucherRedemption => "案场核销礼券",
            CheckInChannel::IpadScan => "iPad扫码签到",
            CheckInChannel::EventRegistration => "报名活动签到",
            CheckInChannel::PhoneNumber => "手机号签到",
            CheckInChannel::ViewingCodeScan => "扫描带看码",
        }
    }
}

/// Age brackets offered on the profile form.
pub const AGE_RANGES: [&str; 12] = [
    "20岁以下", "20-25岁", "25-30岁", "30-35岁",
    "35-40岁", "40-45岁", "45-50岁", "50-55岁",
    "55-60岁", "60-65岁", "65-70岁", "70岁以上",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommender {
    pub name: String,
    /// e.g. "中介", "朋友"
    pub identity: String,
    pub recommended_at: NaiveDateTime,
    pub is_valid: bool,
}

/// A visiting customer as shown on the reception list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub gender: Gender,
    pub age_range: Option<String>,
    pub occupation: Option<String>,
    pub consultant: Option<Consultant>,
    pub recommender: Option<Recommender>,
    pub channel: Option<CheckInChannel>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_in_mode: Option<CheckInMode>,
    pub external_orders: Vec<ExternalOrder>,
    pub is_processed: bool,
    pub assigned_seat: Option<String>,
    pub served_orders: Vec<DrinkOrderItem>,
}

impl Customer {
    pub fn effective_mode(&self) -> CheckInMode {
        self.check_in_mode.unwrap_or_default()
    }
}

/// Payload for registering a visitor on the roster.
#[derive(Debug, Clone, Default)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    pub gender: Gender,
    pub occupation: Option<String>,
    pub consultant: Option<Consultant>,
    pub recommender: Option<Recommender>,
    pub channel: Option<CheckInChannel>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_in_mode: Option<CheckInMode>,
    pub external_orders: Vec<ExternalOrder>,
}

impl CustomerCreate {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: CheckInMode) -> Self {
        self.check_in_mode = Some(mode);
        self
    }

    pub fn with_external_orders(mut self, orders: Vec<ExternalOrder>) -> Self {
        self.external_orders = orders;
        self
    }

    pub fn checked_in_at(mut self, at: DateTime<Utc>) -> Self {
        self.check_in_time = Some(at);
        self
    }
}

/// Edits submitted from the profile form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age_range: Option<String>,
    pub occupation: Option<String>,
    pub consultant: Option<Consultant>,
}

/// The two tabs of the visitor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTab {
    Pending,
    Processed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterSummary {
    pub pending: usize,
    pub processed: usize,
}
