//! Regression coverage for principal construction and wire decoding.

use super::*;
use crate::domain::ModuleKey;
use rstest::rstest;
use serde_json::json;

fn id() -> PrincipalId {
    PrincipalId::new("42").expect("valid id")
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_usernames_are_rejected(#[case] username: &str) {
    let err = Principal::builder(id(), username)
        .build()
        .expect_err("blank username must fail");
    assert_eq!(err, PrincipalValidationError::EmptyUsername);
}

#[rstest]
fn usernames_are_stored_verbatim() {
    let principal = Principal::builder(id(), "  admin ")
        .build()
        .expect("valid principal");
    assert_eq!(principal.username(), "  admin ");
    assert!(!principal.is_super_user());
}

#[rstest]
#[case("Admin")]
#[case("administrator")]
#[case(" admin")]
#[case("admin ")]
fn only_the_exact_admin_username_is_a_super_user(#[case] username: &str) {
    let principal = Principal::builder(id(), username)
        .role(Role::Admin)
        .build()
        .expect("valid principal");
    assert!(!principal.is_super_user());
}

#[rstest]
fn capabilities_fold_every_override() {
    let tasks = ModuleKey::new("tasks").expect("valid key");
    let principal = Principal::builder(id(), "jdoe")
        .role(Role::TeamLead)
        .permissions(
            PermissionMap::new()
                .with(tasks.clone(), AccessLevel::View)
                .with(ModuleKey::new("crm").expect("valid key"), AccessLevel::None),
        )
        .job_applications_access(true)
        .build()
        .expect("valid principal");

    let caps = principal.capabilities();
    assert!(caps.has_role(Role::TeamLead));
    assert!(caps.grants_module(&tasks));
    assert!(!caps.grants_module(&ModuleKey::new("crm").expect("valid key")));
    assert!(caps.opens_route("/job-applications"));
    assert!(!caps.opens_route("/crm-inquiries"));
    assert!(!caps.is_super_user());
}

#[rstest]
fn decodes_the_session_wire_shape() {
    let principal: Principal = serde_json::from_value(json!({
        "id": 7,
        "username": "jdoe",
        "role": "employee",
        "permissions": { "tasks": "manage" },
        "hasCrmAccess": true
    }))
    .expect("principal decodes");

    assert_eq!(principal.id().as_ref(), "7");
    assert_eq!(principal.role(), Some(Role::Employee));
    assert!(principal.has_crm_access());
    assert!(!principal.has_job_applications_access());
    assert_eq!(
        principal
            .permissions()
            .level(&ModuleKey::new("tasks").expect("valid key")),
        AccessLevel::Manage
    );
}

#[rstest]
fn unknown_role_tags_decode_to_no_role() {
    let principal: Principal = serde_json::from_value(json!({
        "id": "a1",
        "username": "ghost",
        "role": "night_watch"
    }))
    .expect("principal decodes");
    assert_eq!(principal.role(), None);
    assert_eq!(principal.capabilities().iter().count(), 0);
}

#[rstest]
fn padded_admin_records_decode_without_super_user() {
    let principal: Principal = serde_json::from_value(json!({
        "id": "9",
        "username": " admin ",
        "role": "employee"
    }))
    .expect("principal decodes");
    assert_eq!(principal.username(), " admin ");
    assert!(!principal.is_super_user());
    assert_eq!(principal.role(), Some(Role::Employee));
}

#[rstest]
fn blank_usernames_fail_decoding() {
    let result: Result<Principal, _> = serde_json::from_value(json!({
        "id": "a1",
        "username": " "
    }));
    assert!(result.is_err());
}

#[rstest]
fn serialises_camel_case_without_empty_permissions() {
    let principal = Principal::builder(id(), "jdoe")
        .role(Role::Employee)
        .build()
        .expect("valid principal");
    let value = serde_json::to_value(&principal).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": "42",
            "username": "jdoe",
            "role": "employee",
            "hasJobApplicationsAccess": false,
            "hasCrmAccess": false
        })
    );
}
