use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login account.
///
/// `password_hash` is a bcrypt hash and never leaves the storage layer;
/// the API responds with [`UserView`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            role_ar: self.role.label_ar().to_string(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}

/// The sanitized user shape returned by the API. Canonical English role plus
/// the Arabic label the UI displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub role_ar: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// Account roles. A closed set: anything outside it is rejected at the
/// boundary. Historical data contains Arabic role names, so normalization
/// accepts both languages via an explicit alias table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
    Scanner,
}

/// Bidirectional Arabic/English alias table. "مدير النظام" and "مسؤول" both
/// map to admin; the reverse mapping always uses the long form.
const ROLE_ALIASES_AR: &[(&str, UserRole)] = &[
    ("مدير النظام", UserRole::Admin),
    ("مسؤول", UserRole::Admin),
    ("مدير", UserRole::Manager),
    ("مشغل", UserRole::Employee),
    ("ماسح", UserRole::Scanner),
];

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Scanner => "scanner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            "scanner" => Some(Self::Scanner),
            _ => None,
        }
    }

    /// Normalize free-form input to a canonical role. Accepts English names
    /// (case-insensitive) and the known Arabic aliases; anything else is
    /// rejected.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(role) = Self::from_str(&trimmed.to_lowercase()) {
            return Some(role);
        }
        ROLE_ALIASES_AR
            .iter()
            .find(|(alias, _)| *alias == trimmed)
            .map(|(_, role)| *role)
    }

    /// The Arabic label the UI displays for this role.
    pub fn label_ar(&self) -> &'static str {
        match self {
            Self::Admin => "مدير النظام",
            Self::Manager => "مدير",
            Self::Employee => "مشغل",
            Self::Scanner => "ماسح",
        }
    }
}

/// Input for registering an account. Role defaults to `employee` and may be
/// given in English or Arabic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login response: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}
