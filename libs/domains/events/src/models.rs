//! Event domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Discriminator values of the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum EventType {
    #[strum(serialize = "Page Viewed")]
    PageViewed,
    #[strum(serialize = "Order Completed")]
    OrderCompleted,
    #[strum(serialize = "Heartbeat")]
    Heartbeat,
}

/// An analytics event.
///
/// On the wire the variant is selected by the `type` field and the variant's
/// fields sit next to it:
///
/// ```json
/// {"type": "Order Completed", "timestamp": "2020-01-01T00:00:00Z", "userId": "u1", "revenue": 9.99}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "Page Viewed")]
    PageViewed(PageViewed),
    #[serde(rename = "Order Completed")]
    OrderCompleted(OrderCompleted),
    #[serde(rename = "Heartbeat")]
    Heartbeat(Heartbeat),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageViewed {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderCompleted {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Heartbeat {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::PageViewed(_) => EventType::PageViewed,
            Event::OrderCompleted(_) => EventType::OrderCompleted,
            Event::Heartbeat(_) => EventType::Heartbeat,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Event::PageViewed(e) => &e.user_id,
            Event::OrderCompleted(e) => &e.user_id,
            Event::Heartbeat(e) => &e.user_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::PageViewed(e) => e.timestamp,
            Event::OrderCompleted(e) => e.timestamp,
            Event::Heartbeat(e) => e.timestamp,
        }
    }

    /// Revenue of a completed order; `None` for every other variant.
    pub fn revenue(&self) -> Option<f64> {
        match self {
            Event::OrderCompleted(e) => Some(e.revenue),
            _ => None,
        }
    }
}

/// A schema violation, both fields are RFC 6901 JSON Pointers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// Location in the submitted event
    #[serde(rename = "instancePath")]
    pub instance_path: String,
    /// Location in the schema of the rule that failed
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(EventType::PageViewed.to_string(), "Page Viewed");
        assert_eq!(EventType::OrderCompleted.to_string(), "Order Completed");
        assert_eq!(
            EventType::from_str("Heartbeat").unwrap(),
            EventType::Heartbeat
        );
    }

    #[test]
    fn test_event_type_rejects_unknown_tag() {
        assert!(EventType::from_str("Cart Abandoned").is_err());
        // Matching is exact
        assert!(EventType::from_str("order completed").is_err());
    }

    #[test]
    fn test_accessors() {
        let order = Event::OrderCompleted(OrderCompleted {
            timestamp: ts(),
            user_id: "u-1".into(),
            revenue: 12.5,
        });
        assert_eq!(order.event_type(), EventType::OrderCompleted);
        assert_eq!(order.user_id(), "u-1");
        assert_eq!(order.timestamp(), ts());
        assert_eq!(order.revenue(), Some(12.5));

        let view = Event::PageViewed(PageViewed {
            timestamp: ts(),
            user_id: "u-2".into(),
            url: "/checkout".into(),
        });
        assert_eq!(view.event_type(), EventType::PageViewed);
        assert_eq!(view.revenue(), None);
    }

    #[test]
    fn test_validation_error_serializes_camel_case() {
        let err = ValidationError {
            instance_path: "".into(),
            schema_path: "/mapping/Heartbeat/properties/userId".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["instancePath"], "");
        assert_eq!(json["schemaPath"], "/mapping/Heartbeat/properties/userId");
    }
}
