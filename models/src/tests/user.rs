use crate::{UpdateUser, User, UserFinder};

use serde_json::json;

#[test]
fn given_partial_update_when_serialized_then_omits_absent_fields() {
    let update = UpdateUser {
        full_name: Some(String::from("Alice Liddell")),
        ..UpdateUser::default()
    };

    let body = serde_json::to_value(&update).unwrap();

    assert_eq!(body, json!({"fullName": "Alice Liddell"}));
    assert!(!update.is_empty());
    assert!(UpdateUser::default().is_empty());
}

#[test]
fn given_finders_when_segmented_then_match_backend_routes() {
    assert_eq!(
        UserFinder::Username(String::from("alice")).segments(),
        (&["users", "username"][..], "alice")
    );
    assert_eq!(
        UserFinder::Email(String::from("a@b.c")).segments(),
        (&["users", "email"][..], "a@b.c")
    );
    assert_eq!(
        UserFinder::Uuid(String::from("u-1")).segments(),
        (&["users"][..], "u-1")
    );
}

/// **VALUE**: Unknown profile fields survive a decode/encode cycle.
#[test]
fn given_user_with_unknown_field_when_round_tripped_then_field_preserved() {
    let value = json!({
        "uuid": "u-1",
        "username": "alice",
        "fullName": "Alice",
        "email": "alice@example.com",
        "gender": "F",
        "phoneNumber": "1",
        "address": "Somewhere",
        "roles": ["USER"],
        "deleted": false,
        "loyaltyTier": "gold"
    });

    let user: User = serde_json::from_value(value.clone()).unwrap();

    assert_eq!(user.extra.get("loyaltyTier"), Some(&json!("gold")));
    assert_eq!(serde_json::to_value(&user).unwrap(), value);
}
