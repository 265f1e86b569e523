//! The application's sidebar catalogue.

use std::sync::OnceLock;

use super::{NavigationCategory, NavigationEntry, NavigationModel};
use crate::domain::{
    CRM_INQUIRIES_ROUTE, JOB_APPLICATIONS_ROUTE, ModuleKey, NotificationSource, Role, RoleSet,
};

/// Route of the entry whose label depends on the viewer.
pub const ORGANIZATION_ROUTE: &str = "/organization";
/// Route of the entry carrying the pending trial-request badge.
pub const TRIAL_REQUESTS_ROUTE: &str = "/trial-requests";

static CATALOGUE: OnceLock<NavigationModel> = OnceLock::new();

/// The catalogue shared by every request, built on first use.
///
/// # Panics
///
/// Panics if the compiled-in catalogue repeats a route or names a blank
/// module key. The catalogue is covered by unit tests, so this cannot
/// happen in a tested build.
///
/// # Examples
/// ```
/// use staffdesk::domain::default_catalogue;
///
/// let catalogue = default_catalogue();
/// assert!(catalogue.entry("/dashboard").is_some());
/// ```
#[expect(
    clippy::expect_used,
    reason = "the catalogue is static data validated by unit tests"
)]
pub fn default_catalogue() -> &'static NavigationModel {
    CATALOGUE.get_or_init(|| {
        NavigationModel::new(categories()).expect("navigation catalogue routes are unique")
    })
}

#[expect(clippy::expect_used, reason = "module keys are string literals")]
fn module(raw: &str) -> ModuleKey {
    ModuleKey::new(raw).expect("catalogue module keys are non-empty")
}

fn hr() -> RoleSet {
    RoleSet::of(&[Role::HrAdmin, Role::Admin])
}

fn people_managers() -> RoleSet {
    RoleSet::of(&[
        Role::HrAdmin,
        Role::Admin,
        Role::BranchManager,
        Role::DepartmentHead,
    ])
}

fn staff() -> RoleSet {
    RoleSet::of(&[
        Role::HrAdmin,
        Role::Admin,
        Role::BranchManager,
        Role::DepartmentHead,
        Role::TeamLead,
        Role::Employee,
        Role::StudioManager,
        Role::SocialMediaManager,
        Role::ContentCreator,
        Role::ContentEditor,
        Role::SocialMediaSpecialist,
        Role::CreativeDirector,
    ])
}

fn social_media() -> RoleSet {
    RoleSet::of(&[
        Role::SocialMediaManager,
        Role::SocialMediaSpecialist,
        Role::CreativeDirector,
    ])
}

fn categories() -> Vec<NavigationCategory> {
    vec![
        NavigationCategory::new(
            "Overview",
            vec![
                NavigationEntry::new("Dashboard", "/dashboard", "layout-dashboard", staff()),
                NavigationEntry::new(
                    "Logistics Dashboard",
                    "/logistics",
                    "truck",
                    RoleSet::of(&[Role::LogisticsManager]),
                ),
            ],
        ),
        NavigationCategory::new(
            "People",
            vec![
                NavigationEntry::new("Employees", "/employees", "users", people_managers())
                    .with_permission(module("employees")),
                NavigationEntry::new("Onboarding", "/onboarding", "user-plus", people_managers())
                    .with_permission(module("onboarding")),
                // Label resolved per viewer; see `organization_label`.
                NavigationEntry::new("Organization", ORGANIZATION_ROUTE, "network", staff()),
                NavigationEntry::new(
                    "Job Applications",
                    JOB_APPLICATIONS_ROUTE,
                    "briefcase",
                    hr(),
                ),
                NavigationEntry::new(
                    "Trial Requests",
                    TRIAL_REQUESTS_ROUTE,
                    "clipboard-check",
                    RoleSet::of(&[Role::HrAdmin]),
                )
                .with_notification(NotificationSource::PendingTrialRequests),
            ],
        ),
        NavigationCategory::new(
            "Work",
            vec![
                NavigationEntry::new(
                    "Tasks",
                    "/tasks",
                    "check-square",
                    RoleSet::of(&[
                        Role::HrAdmin,
                        Role::Admin,
                        Role::BranchManager,
                        Role::DepartmentHead,
                        Role::TeamLead,
                        Role::Employee,
                    ]),
                )
                .with_permission(module("tasks")),
                NavigationEntry::new(
                    "Reports",
                    "/reports",
                    "file-text",
                    RoleSet::of(&[
                        Role::HrAdmin,
                        Role::Admin,
                        Role::BranchManager,
                        Role::DepartmentHead,
                        Role::TeamLead,
                    ]),
                )
                .with_permission(module("reports")),
            ],
        ),
        NavigationCategory::new(
            "Assessments",
            vec![
                NavigationEntry::new("Psychometric Tests", "/psychometric-tests", "brain", hr())
                    .with_permission(module("psychometric_tests")),
                NavigationEntry::new(
                    "Test Results",
                    "/test-results",
                    "bar-chart",
                    RoleSet::of(&[Role::HrAdmin, Role::Admin, Role::DepartmentHead]),
                )
                .with_permission(module("psychometric_tests")),
            ],
        ),
        NavigationCategory::new(
            "Logistics",
            vec![
                NavigationEntry::new(
                    "Expenses",
                    "/logistics/expenses",
                    "receipt",
                    RoleSet::of(&[Role::LogisticsManager, Role::HrAdmin, Role::Admin]),
                )
                .with_permission(module("logistics")),
                NavigationEntry::new(
                    "Vehicles",
                    "/logistics/vehicles",
                    "car",
                    RoleSet::of(&[Role::LogisticsManager]),
                )
                .with_permission(module("logistics")),
            ],
        ),
        NavigationCategory::new(
            "Social Media",
            vec![
                NavigationEntry::new(
                    "Accounts",
                    "/social-media/accounts",
                    "at-sign",
                    social_media(),
                )
                .with_permission(module("social_media")),
                NavigationEntry::new(
                    "Analytics",
                    "/social-media/analytics",
                    "trending-up",
                    RoleSet::of(&[
                        Role::SocialMediaManager,
                        Role::SocialMediaSpecialist,
                        Role::CreativeDirector,
                        Role::ContentEditor,
                    ]),
                )
                .with_permission(module("social_media")),
                NavigationEntry::new(
                    "Content Calendar",
                    "/social-media/content",
                    "calendar",
                    RoleSet::of(&[
                        Role::ContentCreator,
                        Role::ContentEditor,
                        Role::SocialMediaManager,
                        Role::CreativeDirector,
                    ]),
                ),
                NavigationEntry::new(
                    "Studios",
                    "/studios",
                    "video",
                    RoleSet::of(&[Role::StudioManager, Role::CreativeDirector]),
                ),
            ],
        ),
        NavigationCategory::new(
            "Sales",
            vec![
                NavigationEntry::new("CRM Inquiries", CRM_INQUIRIES_ROUTE, "inbox", hr())
                    .with_permission(module("crm")),
            ],
        ),
        NavigationCategory::new(
            "Administration",
            vec![
                NavigationEntry::new(
                    "Subscription & Billing",
                    "/billing",
                    "credit-card",
                    RoleSet::of(&[Role::HrAdmin]),
                ),
                // Super-user only: reachable solely through the admin override.
                NavigationEntry::new("User Management", "/admin/users", "shield", RoleSet::empty()),
                NavigationEntry::new(
                    "Permissions",
                    "/admin/permissions",
                    "key",
                    RoleSet::empty(),
                ),
            ],
        ),
    ]
}
