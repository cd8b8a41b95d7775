//! Tabular export of merged users.
//!
//! [`row::project`] flattens a [`MergedUser`](crate::users::MergedUser) into an
//! [`OutputRow`]; [`workbook`] writes rows to a single-sheet `.xlsx` file with
//! the French column labels of [`Column`].

/// Row projection
pub mod row;

/// Workbook rendering and atomic file output
pub mod workbook;

use serde_json::Value;

pub use row::{project, project_all};

/// Status label for enabled accounts
pub const STATUS_ACTIVE: &str = "actif";

/// Status label for disabled accounts
pub const STATUS_DISABLED: &str = "désactivé";

/// Separator placed between group names in the groups column
pub const GROUP_SEPARATOR: &str = ", ";

/// One output column, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Account creation date
    CreatedAt,
    /// Login name
    Username,
    /// Whether the email address was verified
    EmailVerified,
    /// Family name
    LastName,
    /// Given name
    FirstName,
    /// Email address
    Email,
    /// `actif` / `désactivé`
    Status,
    /// First `direction` attribute
    Direction,
    /// Groups joined with `", "`
    Groups,
    /// LDAP `createTimestamp`
    LdapCreatedAt,
    /// LDAP `modifyTimestamp`
    LdapModifiedAt,
}

impl Column {
    /// Columns written by default
    pub const STANDARD: &'static [Self] = &[
        Self::CreatedAt,
        Self::Username,
        Self::EmailVerified,
        Self::LastName,
        Self::FirstName,
        Self::Email,
        Self::Status,
        Self::Direction,
        Self::Groups,
    ];

    /// Default columns followed by the two LDAP dates
    pub const WITH_LDAP_DATES: &'static [Self] = &[
        Self::CreatedAt,
        Self::Username,
        Self::EmailVerified,
        Self::LastName,
        Self::FirstName,
        Self::Email,
        Self::Status,
        Self::Direction,
        Self::Groups,
        Self::LdapCreatedAt,
        Self::LdapModifiedAt,
    ];

    /// Column set for a run
    #[must_use]
    pub const fn selection(ldap_dates: bool) -> &'static [Self] {
        if ldap_dates {
            Self::WITH_LDAP_DATES
        } else {
            Self::STANDARD
        }
    }

    /// Header label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Date de création",
            Self::Username => "Nom d'utilisateur",
            Self::EmailVerified => "Email vérifié",
            Self::LastName => "Nom",
            Self::FirstName => "Prénom",
            Self::Email => "Adresse email",
            Self::Status => "Statut",
            Self::Direction => "Direction",
            Self::Groups => "groupes",
            Self::LdapCreatedAt => "Date de création LDAP",
            Self::LdapModifiedAt => "Date de modification LDAP",
        }
    }
}

/// A cell carrying a source value unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Absent or `null`
    Empty,
    /// Text
    Text(String),
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
}

impl CellValue {
    /// Text cell
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<Option<&Value>> for CellValue {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Empty,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Empty, Self::Number),
            Some(Value::String(s)) => Self::Text(s.clone()),
            // Nested values are written as their JSON text
            Some(other @ (Value::Array(_) | Value::Object(_))) => Self::Text(other.to_string()),
        }
    }
}

/// Flat, export-ready projection of a merged user
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    /// `dd/mm/yyyy HH:MM:SS`, or empty when unknown
    pub created_at: String,
    /// `username`
    pub username: CellValue,
    /// `emailVerified`
    pub email_verified: CellValue,
    /// `lastName`
    pub last_name: CellValue,
    /// `firstName`
    pub first_name: CellValue,
    /// `email`
    pub email: CellValue,
    /// [`STATUS_ACTIVE`] or [`STATUS_DISABLED`]
    pub status: &'static str,
    /// First `direction` attribute, or empty
    pub direction: String,
    /// Group names joined with [`GROUP_SEPARATOR`]
    pub groups: String,
    /// LDAP `createTimestamp`, empty unless present
    pub ldap_created_at: String,
    /// LDAP `modifyTimestamp`, empty unless present
    pub ldap_modified_at: String,
}

impl OutputRow {
    /// Value of one column
    #[must_use]
    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::CreatedAt => CellValue::text(&self.created_at),
            Column::Username => self.username.clone(),
            Column::EmailVerified => self.email_verified.clone(),
            Column::LastName => self.last_name.clone(),
            Column::FirstName => self.first_name.clone(),
            Column::Email => self.email.clone(),
            Column::Status => CellValue::text(self.status),
            Column::Direction => CellValue::text(&self.direction),
            Column::Groups => CellValue::text(&self.groups),
            Column::LdapCreatedAt => CellValue::text(&self.ldap_created_at),
            Column::LdapModifiedAt => CellValue::text(&self.ldap_modified_at),
        }
    }
}
