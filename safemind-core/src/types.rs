//! Core domain types for safemind
//!
//! These types mirror the search-activity records produced upstream by the
//! browser extension and stored by the backend. They are read-only to the
//! analytics engine: every loosely-typed field is kept exactly as it arrived
//! and coerced later, at the normalization boundary (see
//! [`crate::analytics::normalize`]).
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Owner** | The parent account a record belongs to (`userId`) |
//! | **Child** | The monitored profile that issued the search (`childName`) |
//! | **Prediction** | Free-text risk label assigned upstream (`predictedResult`) |
//! | **Exposure** | Seconds spent on the result page (`totalTimeSpent`) |

use serde::{Deserialize, Serialize};

// ============================================
// Loosely-typed field values
// ============================================

/// The `isHarmful` flag as it appears on the wire.
///
/// Upstream writers disagree on the type: some store a JSON boolean, others
/// the strings `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HarmfulFlag {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

/// A numeric field that may arrive as a number or as text.
///
/// Used for `sentimentScore` and `totalTimeSpent`; the latter can also be a
/// composite duration such as `"2m 15s"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// A timestamp value: plain text, or the Mongo extended-JSON `{"$date": ...}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampValue {
    Text(String),
    Extended {
        #[serde(rename = "$date")]
        date: String,
    },
    Other(serde_json::Value),
}

impl TimestampValue {
    /// The textual form of the timestamp, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TimestampValue::Text(s) => Some(s),
            TimestampValue::Extended { date } => Some(date),
            TimestampValue::Other(_) => None,
        }
    }
}

/// An object id: plain string or Mongo extended-JSON `{"$oid": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl ObjectId {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectId::Plain(s) => s,
            ObjectId::Extended { oid } => oid,
        }
    }
}

/// Reference to the owning parent account.
///
/// Populated queries return the embedded user document instead of the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(String),
    Embedded {
        #[serde(rename = "_id")]
        id: ObjectId,
    },
}

impl OwnerRef {
    pub fn id(&self) -> &str {
        match self {
            OwnerRef::Id(id) => id,
            OwnerRef::Embedded { id } => id.as_str(),
        }
    }
}

// ============================================
// Search record
// ============================================

/// One search performed by a monitored child.
///
/// Unknown fields (`userEmail`, `childId`, `timeSpentUpdates`, ...) are
/// ignored on input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// The search text
    #[serde(default)]
    pub query: String,
    /// Primary timestamp field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_and_time: Option<TimestampValue>,
    /// Fallback timestamp field, used when `dateAndTime` is missing or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimestampValue>,
    /// Upstream harmfulness verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_harmful: Option<HarmfulFlag>,
    /// Free-text risk label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_result: Option<String>,
    /// Legacy name of `predictedResult`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    /// Signed sentiment; more negative means higher risk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<NumericValue>,
    /// Seconds spent, or a composite duration string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_spent: Option<NumericValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<OwnerRef>,
}

impl SearchRecord {
    /// The raw timestamp text: `dateAndTime`, falling back to `timestamp`.
    pub fn raw_timestamp(&self) -> Option<&str> {
        let primary = self
            .date_and_time
            .as_ref()
            .and_then(TimestampValue::as_text)
            .filter(|s| !s.trim().is_empty());
        primary.or_else(|| {
            self.timestamp
                .as_ref()
                .and_then(TimestampValue::as_text)
                .filter(|s| !s.trim().is_empty())
        })
    }

    /// The raw prediction label: `predictedResult`, falling back to `prediction`.
    ///
    /// Empty strings count as missing.
    pub fn raw_prediction(&self) -> Option<&str> {
        self.predicted_result
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.prediction.as_deref().filter(|s| !s.is_empty()))
    }

    /// The owning parent's id, if present.
    pub fn owner_id(&self) -> Option<&str> {
        self.user_id.as_ref().map(OwnerRef::id)
    }
}
