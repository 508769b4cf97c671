//! The payload handed to the rendering surface.

use serde::{Deserialize, Serialize};

use crate::config::InjectType;

/// Payload type tag. Shares the config discriminant's tag set.
pub type DataType = InjectType;

/// Literal carried in `content` when nothing is delivered.
pub const NULL_CONTENT: &str = "null";

/// Wire payload, recomputed on every delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    #[serde(rename = "selfId")]
    pub self_id: String,

    #[serde(rename = "type")]
    pub data_type: DataType,

    pub content: String,
}

impl Data {
    /// The `{type: "null", content: "null"}` marker for `self_id`.
    pub fn suppressed(self_id: impl Into<String>) -> Self {
        Self {
            self_id: self_id.into(),
            data_type: DataType::Null,
            content: NULL_CONTENT.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.data_type == DataType::Null
    }
}
