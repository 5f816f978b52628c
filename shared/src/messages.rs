use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entry of the race picker.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSummary {
    pub race_id: String,
    pub round: Option<u32>,
    pub name: String,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}
