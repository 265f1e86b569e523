//! Regression coverage for the access predicate.

use super::*;
use crate::domain::{ALL_ROLES, AccessLevel, PermissionMap, PrincipalId, Role};
use rstest::{fixture, rstest};

fn principal(username: &str, role: Option<Role>) -> Principal {
    Principal::builder(PrincipalId::new("p-1").expect("valid id"), username)
        .maybe_role(role)
        .build()
        .expect("valid principal")
}

fn module(raw: &str) -> ModuleKey {
    ModuleKey::new(raw).expect("valid module key")
}

#[fixture]
fn role_sets() -> Vec<RoleSet> {
    vec![
        RoleSet::empty(),
        RoleSet::of(&[Role::HrAdmin]),
        RoleSet::of(&[Role::Employee, Role::TeamLead]),
        ALL_ROLES.into_iter().collect(),
    ]
}

#[rstest]
fn super_user_is_admitted_everywhere(role_sets: Vec<RoleSet>) {
    let admin = principal("admin", None);
    for roles in &role_sets {
        for route in [None, Some("/crm-inquiries"), Some("/tasks")] {
            for key in [None, Some(module("tasks"))] {
                assert!(
                    can_access(Some(&admin), roles, route, key.as_ref()),
                    "admin must pass for {roles:?}, {route:?}, {key:?}"
                );
            }
        }
    }
}

#[rstest]
#[case(" admin")]
#[case("admin ")]
#[case(" admin ")]
#[case("ADMIN")]
fn near_admin_usernames_get_no_override(#[case] username: &str) {
    let user = principal(username, Some(Role::Employee));
    assert!(!user.is_super_user());
    assert!(!can_access(Some(&user), &RoleSet::empty(), None, None));
    assert!(!can_access(
        Some(&user),
        &RoleSet::of(&[Role::HrAdmin]),
        Some("/crm-inquiries"),
        None
    ));
}

#[rstest]
fn anonymous_callers_are_denied_everywhere(role_sets: Vec<RoleSet>) {
    for roles in &role_sets {
        for route in [None, Some("/crm-inquiries"), Some("/job-applications")] {
            for key in [None, Some(module("tasks"))] {
                assert!(!can_access(None, roles, route, key.as_ref()));
            }
        }
    }
}

#[rstest]
fn members_of_the_allowed_roles_are_admitted() {
    for role in ALL_ROLES {
        let user = principal("someone", Some(role));
        assert!(can_access(Some(&user), &RoleSet::of(&[role]), None, None));
    }
}

#[rstest]
#[case(AccessLevel::View)]
#[case(AccessLevel::Manage)]
fn permission_overrides_bypass_roles(#[case] level: AccessLevel) {
    let user = Principal::builder(PrincipalId::new("p-2").expect("valid id"), "analyst")
        .role(Role::SocialMediaSpecialist)
        .permissions(PermissionMap::new().with(module("logistics"), level))
        .build()
        .expect("valid principal");
    let roles = RoleSet::of(&[Role::LogisticsManager]);

    assert!(can_access(Some(&user), &roles, None, Some(&module("logistics"))));
    assert!(!can_access(Some(&user), &roles, None, Some(&module("tasks"))));
    assert!(!can_access(Some(&user), &roles, None, None));
}

#[rstest]
fn none_permission_level_does_not_grant_access() {
    let user = Principal::builder(PrincipalId::new("p-3").expect("valid id"), "jdoe")
        .role(Role::Employee)
        .permissions(PermissionMap::new().with(module("crm"), AccessLevel::None))
        .build()
        .expect("valid principal");
    let roles = RoleSet::of(&[Role::HrAdmin]);
    assert!(!can_access(Some(&user), &roles, None, Some(&module("crm"))));
}

#[rstest]
fn employee_is_denied_hr_screens() {
    let jdoe = principal("jdoe", Some(Role::Employee));
    let roles = RoleSet::of(&[Role::HrAdmin, Role::Admin]);
    assert!(!can_access(Some(&jdoe), &roles, None, None));
}

#[rstest]
fn crm_flag_opens_the_crm_route_only() {
    let jdoe = Principal::builder(PrincipalId::new("p-4").expect("valid id"), "jdoe")
        .role(Role::Employee)
        .crm_access(true)
        .build()
        .expect("valid principal");
    let roles = RoleSet::of(&[Role::HrAdmin]);

    assert!(can_access(Some(&jdoe), &roles, Some("/crm-inquiries"), None));
    assert!(!can_access(Some(&jdoe), &roles, Some("/job-applications"), None));
    assert!(!can_access(Some(&jdoe), &roles, Some("/employees"), None));
}

#[rstest]
fn job_applications_flag_opens_its_route() {
    let lead = Principal::builder(PrincipalId::new("p-5").expect("valid id"), "lead")
        .role(Role::TeamLead)
        .job_applications_access(true)
        .build()
        .expect("valid principal");
    assert!(can_access(
        Some(&lead),
        &RoleSet::empty(),
        Some("/job-applications"),
        None
    ));
}

#[rstest]
fn empty_role_sets_admit_only_overrides() {
    for role in ALL_ROLES {
        let user = principal("someone", Some(role));
        assert!(!can_access(Some(&user), &RoleSet::empty(), None, None));
    }
    let admin = principal("admin", Some(Role::Employee));
    assert!(can_access(Some(&admin), &RoleSet::empty(), None, None));
}

#[rstest]
fn principals_without_a_role_fail_role_checks() {
    let ghost = principal("ghost", None);
    let everyone: RoleSet = ALL_ROLES.into_iter().collect();
    assert!(!can_access(Some(&ghost), &everyone, None, None));
}

#[rstest]
fn requirements_delegate_to_the_predicate() {
    let requirement = AccessRequirement::roles(RoleSet::of(&[Role::HrAdmin]))
        .with_route("/crm-inquiries")
        .with_permission(module("crm"));
    let flagged = Principal::builder(PrincipalId::new("p-6").expect("valid id"), "jdoe")
        .role(Role::Employee)
        .crm_access(true)
        .build()
        .expect("valid principal");
    let plain = principal("other", Some(Role::Employee));

    assert!(requirement.admits(Some(&flagged)));
    assert!(!requirement.admits(Some(&plain)));
    assert!(!requirement.admits(None));
    assert_eq!(requirement.permission_key(), Some(&module("crm")));
    assert!(requirement.allowed_roles().contains(Role::HrAdmin));
}
