//! Decode + normalize raw request bodies.
//!
//! Decoding failures are reported as `MalformedInput` and always win over field
//! validation: a body that is not JSON never reaches the required-field checks.

use serde::de::DeserializeOwned;

use crate::credential::LoginCredential;
use crate::error::{DomainError, DomainResult};
use crate::user::User;

fn decode<T: DeserializeOwned>(body: &str) -> DomainResult<T> {
    serde_json::from_str(body).map_err(|e| DomainError::malformed(e.to_string()))
}

/// Decode a create-user body and return the normalized record.
pub fn decode_user(body: &str) -> DomainResult<User> {
    decode::<User>(body)?.normalized()
}

/// Decode a login body and return the normalized credential.
pub fn decode_credential(body: &str) -> DomainResult<LoginCredential> {
    decode::<LoginCredential>(body)?.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn malformed_json_is_detected_before_validation() {
        assert!(matches!(decode_user("{not json"), Err(DomainError::MalformedInput(_))));
        assert!(matches!(decode_user(""), Err(DomainError::MalformedInput(_))));
        assert!(matches!(decode_credential("[1,2]"), Err(DomainError::MalformedInput(_))));
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let err = decode_user(r#"{"userId":7,"name":"Ann","email":"a@x.com","password":"p"}"#);
        assert!(matches!(err, Err(DomainError::MalformedInput(_))));
    }

    #[test]
    fn empty_object_reports_all_fields() {
        assert_eq!(
            decode_user("{}"),
            Err(DomainError::missing(vec!["userId", "name", "email", "password"]))
        );
        assert_eq!(
            decode_credential("{}"),
            Err(DomainError::missing(vec!["email", "password"]))
        );
    }

    fn field() -> impl Strategy<Value = String> {
        "[ \t]{0,3}[a-zA-Z0-9@._-]{1,12}[ \t\n]{0,3}"
    }

    fn blank() -> impl Strategy<Value = String> {
        "[ \t\n]{0,4}"
    }

    proptest! {
        #[test]
        fn valid_users_round_trip_trimmed(
            id in field(),
            name in field(),
            email in field(),
            pw in field(),
        ) {
            let body = serde_json::json!({
                "userId": id, "name": name, "email": email, "password": pw,
            })
            .to_string();
            let user = decode_user(&body).unwrap();
            prop_assert_eq!(user.user_id, id.trim());
            prop_assert_eq!(user.name, name.trim());
            prop_assert_eq!(user.email, email.trim());
            prop_assert_eq!(user.password, pw.trim());
        }

        #[test]
        fn any_blank_field_is_rejected(
            id in field(),
            name in field(),
            pw in field(),
            email in blank(),
            which in 0usize..4,
        ) {
            let mut fields = [id, name, String::new(), pw];
            fields[2] = fields[which].clone();
            fields[which] = email;
            let body = serde_json::json!({
                "userId": fields[0], "name": fields[1], "email": fields[2], "password": fields[3],
            })
            .to_string();
            prop_assert!(
                matches!(decode_user(&body), Err(DomainError::Validation { .. })),
                "field {} should be reported missing",
                which
            );
        }
    }
}
