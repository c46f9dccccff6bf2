//! Persistent representation of records: attribute name → typed attribute value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use accounts_core::User;

/// Attribute holding the partition key of a user item.
pub const USER_KEY_ATTRIBUTE: &str = "userId";

/// A single typed attribute value.
///
/// Serialized in the backend's tagged form (`{"S": "ann"}`), so JSON containment
/// on stored items compares both type and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
}

impl AttributeValue {
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
        }
    }
}

/// One stored record.
pub type Item = BTreeMap<String, AttributeValue>;

/// A stored item could not be turned back into a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("attribute `{0}` is missing")]
    MissingAttribute(&'static str),

    #[error("attribute `{attribute}` has type {found}, expected S")]
    WrongType {
        attribute: &'static str,
        found: &'static str,
    },
}

pub fn user_to_item(user: &User) -> Item {
    Item::from([
        (USER_KEY_ATTRIBUTE.to_string(), AttributeValue::s(&user.user_id)),
        ("name".to_string(), AttributeValue::s(&user.name)),
        ("email".to_string(), AttributeValue::s(&user.email)),
        ("password".to_string(), AttributeValue::s(&user.password)),
    ])
}

fn string_attr(item: &Item, attribute: &'static str) -> Result<String, RecordError> {
    let value = item
        .get(attribute)
        .ok_or(RecordError::MissingAttribute(attribute))?;
    value
        .as_s()
        .map(str::to_string)
        .ok_or(RecordError::WrongType {
            attribute,
            found: value.type_name(),
        })
}

/// Unmarshal an item into a `User`. Extra attributes are ignored.
pub fn item_to_user(item: &Item) -> Result<User, RecordError> {
    Ok(User {
        user_id: string_attr(item, USER_KEY_ATTRIBUTE)?,
        name: string_attr(item, "name")?,
        email: string_attr(item, "email")?,
        password: string_attr(item, "password")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_item_layout_uses_string_attributes() {
        let item = user_to_item(&User::new("u1", "Ann", "a@x.com", "p1"));
        assert_eq!(item.len(), 4);
        assert_eq!(item["userId"], AttributeValue::s("u1"));
        assert_eq!(item["password"], AttributeValue::s("p1"));
        assert_eq!(item_to_user(&item).unwrap().email, "a@x.com");
    }

    #[test]
    fn missing_attribute_is_reported() {
        let mut item = user_to_item(&User::new("u1", "Ann", "a@x.com", "p1"));
        item.remove("email");
        assert_eq!(item_to_user(&item), Err(RecordError::MissingAttribute("email")));
    }

    #[test]
    fn non_string_attribute_is_reported() {
        let mut item = user_to_item(&User::new("u1", "Ann", "a@x.com", "p1"));
        item.insert("name".to_string(), AttributeValue::N("42".to_string()));
        assert_eq!(
            item_to_user(&item),
            Err(RecordError::WrongType { attribute: "name", found: "N" })
        );
    }

    #[test]
    fn attribute_values_use_tagged_json() {
        let json = serde_json::to_value(AttributeValue::s("ann")).unwrap();
        assert_eq!(json, serde_json::json!({ "S": "ann" }));
    }
}
