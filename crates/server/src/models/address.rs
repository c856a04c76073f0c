//! Address domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use address_registry_core::{AddressId, SessionId};

/// Country assigned to addresses resolved through the CEP directory.
pub const CEP_COUNTRY: &str = "Brazil";

/// A stored address (domain type).
///
/// Serialized as the public record shape:
/// `{ id, sessionId, street, postalCode, city, state, country, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique address ID, generated on insert.
    pub id: AddressId,
    /// Session the address belongs to.
    pub session_id: SessionId,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Payload for inserting a new address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub session_id: SessionId,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressChanges {
    pub session_id: Option<SessionId>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressChanges {
    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.session_id.is_none()
            && self.street.is_none()
            && self.postal_code.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
    }
}

/// Filter for listing addresses. The default matches every address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressFilter {
    pub session_id: Option<SessionId>,
}

impl AddressFilter {
    /// Match only addresses belonging to `session_id`.
    #[must_use]
    pub const fn session(session_id: SessionId) -> Self {
        Self {
            session_id: Some(session_id),
        }
    }

    /// Returns `true` if `address` passes the filter.
    #[must_use]
    pub fn matches(&self, address: &Address) -> bool {
        self.session_id.is_none_or(|s| s == address.session_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn sample() -> Address {
        let at = Utc.with_ymd_and_hms(2024, 7, 29, 12, 34, 56).unwrap();
        Address {
            id: AddressId::parse("a1b2c3d4-e5f6-7890-abcd-ef1234567890").unwrap(),
            session_id: SessionId::parse("bb60cad4-0240-46ce-8b3d-119877b64eff").unwrap(),
            street: "123 Main St".to_string(),
            postal_code: "12345-678".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "USA".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_serializes_record_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "a1b2c3d4-e5f6-7890-abcd-ef1234567890",
                "sessionId": "bb60cad4-0240-46ce-8b3d-119877b64eff",
                "street": "123 Main St",
                "postalCode": "12345-678",
                "city": "Springfield",
                "state": "IL",
                "country": "USA",
                "createdAt": "2024-07-29T12:34:56Z",
                "updatedAt": "2024-07-29T12:34:56Z",
            })
        );
    }

    #[test]
    fn test_filter_matches() {
        let address = sample();
        assert!(AddressFilter::default().matches(&address));
        assert!(AddressFilter::session(address.session_id).matches(&address));
        assert!(!AddressFilter::session(SessionId::generate()).matches(&address));
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(AddressChanges::default().is_empty());
        let changes = AddressChanges {
            city: Some("Recife".to_string()),
            ..AddressChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
