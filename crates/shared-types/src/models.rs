use serde::{Deserialize, Serialize};

/// Staff and operator roles carried in the identity token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Licensed company submitting applications and paying fees.
    Operator,
    /// Licensing officer reviewing applications and local content plans.
    Officer,
    Finance,
    Immigration,
    Compliance,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        UserRole::Operator,
        UserRole::Officer,
        UserRole::Finance,
        UserRole::Immigration,
        UserRole::Compliance,
        UserRole::Admin,
    ];

    /// Parse a role claim case-insensitively. Unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "operator" => Some(UserRole::Operator),
            "officer" => Some(UserRole::Officer),
            "finance" => Some(UserRole::Finance),
            "immigration" => Some(UserRole::Immigration),
            "compliance" => Some(UserRole::Compliance),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Lowercase string for token storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Operator => "operator",
            UserRole::Officer => "officer",
            UserRole::Finance => "finance",
            UserRole::Immigration => "immigration",
            UserRole::Compliance => "compliance",
            UserRole::Admin => "admin",
        }
    }

    /// True for every regulator-side role.
    pub fn is_staff(&self) -> bool {
        !matches!(self, UserRole::Operator)
    }
}

/// Dashboard a role lands on after sign-in.
pub fn route_for(role: UserRole) -> &'static str {
    match role {
        UserRole::Operator => "/operator/dashboard",
        UserRole::Officer => "/officer/dashboard",
        UserRole::Finance => "/finance/dashboard",
        UserRole::Immigration => "/immigration/dashboard",
        UserRole::Compliance => "/compliance/dashboard",
        UserRole::Admin => "/admin/dashboard",
    }
}

pub const LOGIN_ROUTE: &str = "/login";

/// Landing route for a raw role claim; anything unrecognised goes to login.
pub fn landing_route(role: Option<&str>) -> &'static str {
    role.and_then(UserRole::parse)
        .map(route_for)
        .unwrap_or(LOGIN_ROUTE)
}

/// Record collections exposed by the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    Payment,
    LocalContentPlan,
    Inspection,
    Visa,
    Notification,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Application,
        EntityKind::Payment,
        EntityKind::LocalContentPlan,
        EntityKind::Inspection,
        EntityKind::Visa,
        EntityKind::Notification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Application => "application",
            EntityKind::Payment => "payment",
            EntityKind::LocalContentPlan => "local_content_plan",
            EntityKind::Inspection => "inspection",
            EntityKind::Visa => "visa",
            EntityKind::Notification => "notification",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.segment().replace('-', "_") == s)
    }

    /// URL path segment for the collection.
    pub fn segment(&self) -> &'static str {
        match self {
            EntityKind::Application => "applications",
            EntityKind::Payment => "payments",
            EntityKind::LocalContentPlan => "local-content-plans",
            EntityKind::Inspection => "inspections",
            EntityKind::Visa => "visas",
            EntityKind::Notification => "notifications",
        }
    }
}

/// Detail page for a record.
pub fn detail_url(kind: EntityKind, id: &str) -> String {
    format!("/{}/{}", kind.segment(), urlencoding::encode(id))
}

/// Edit page for a record.
pub fn edit_url(kind: EntityKind, id: &str) -> String {
    format!("{}/edit", detail_url(kind, id))
}

/// The verified identity behind a request, as returned by `GET /api/session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionResponse {
    pub subject: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Dashboard route for `role`.
    pub dashboard: String,
}
