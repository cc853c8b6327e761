use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `customers` table.
///
/// `id` is assigned by the database on insert; any id sent by a client is
/// discarded. Missing text fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            status: status.into(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let c: Customer = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(c, Customer::new("Ann", "", ""));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<Customer>(r#"{"name":42}"#).is_err());
    }

    #[test]
    fn serializes_all_four_fields() {
        let c = Customer::new("Ann", "a@x.com", "active").with_id(1);
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            serde_json::json!({"id":1,"name":"Ann","email":"a@x.com","status":"active"})
        );
    }
}
