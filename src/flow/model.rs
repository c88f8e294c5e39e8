//! Roles and jurisdictions — the two axes of flow configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::draft::{Draft, fields};

/// The four actor types that can register on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    HiringContact,
    Company,
    School,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Candidate,
        Role::HiringContact,
        Role::Company,
        Role::School,
    ];

    /// The kind of backend detail record this role owns, if any.
    ///
    /// Candidates carry all their data in the registration payload itself;
    /// the other roles have an organization or institution record persisted
    /// separately and reconciled at review time.
    pub fn record_kind(&self) -> Option<RoleRecordKind> {
        match self {
            Role::Candidate => None,
            Role::HiringContact | Role::Company => Some(RoleRecordKind::Organization),
            Role::School => Some(RoleRecordKind::Institution),
        }
    }

    /// Parse a role from its wire name. Used by the review layer when the
    /// role arrives embedded in an auth or registration response.
    pub fn from_wire(value: &str) -> Option<Role> {
        match value {
            "candidate" => Some(Role::Candidate),
            "hiring_contact" => Some(Role::HiringContact),
            "company" => Some(Role::Company),
            "school" => Some(Role::School),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Candidate => "candidate",
            Self::HiringContact => "hiring_contact",
            Self::Company => "company",
            Self::School => "school",
        };
        write!(f, "{s}")
    }
}

/// Which kind of persisted detail record a role reconciles at review time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleRecordKind {
    Organization,
    Institution,
}

impl RoleRecordKind {
    /// Draft field caching the persisted record's id. Presence of this field
    /// is what switches a detail save from create (POST) to update (PATCH).
    pub fn record_id_field(&self) -> &'static str {
        match self {
            RoleRecordKind::Organization => fields::ORG_RECORD_ID,
            RoleRecordKind::Institution => fields::INSTITUTION_RECORD_ID,
        }
    }

    /// The draft fields that belong to this record kind's partial payload.
    pub fn detail_fields(&self) -> &'static [&'static str] {
        match self {
            RoleRecordKind::Organization => &[
                fields::ORG_NAME,
                fields::ORG_EMAIL,
                fields::ORG_WEBSITE,
                fields::CIN,
                fields::GSTIN,
                fields::FOUNDED_MONTH,
                fields::FOUNDED_YEAR,
            ],
            RoleRecordKind::Institution => &[
                fields::INSTITUTION_NAME,
                fields::FOUNDING_YEAR,
                fields::DESCRIPTION,
                fields::POSTAL_ADDRESS,
                fields::FOUNDING_DATE,
            ],
        }
    }

    /// Build the field-specific partial payload for a detail create/update,
    /// carrying only the fields the draft actually holds.
    pub fn detail_payload(&self, draft: &Draft) -> Map<String, Value> {
        let mut payload = Map::new();
        for field in self.detail_fields() {
            if let Some(value) = draft.get(field) {
                payload.insert((*field).to_string(), value.clone());
            }
        }
        payload
    }
}

/// Supported jurisdictions.
///
/// India and the United States are the primary pair with hand-curated flow
/// configurations; the rest are served by the config generator with the
/// document validator parameterized per jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    India,
    UnitedStates,
    UnitedKingdom,
    Canada,
    Australia,
    Singapore,
    UnitedArabEmirates,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 7] = [
        Jurisdiction::India,
        Jurisdiction::UnitedStates,
        Jurisdiction::UnitedKingdom,
        Jurisdiction::Canada,
        Jurisdiction::Australia,
        Jurisdiction::Singapore,
        Jurisdiction::UnitedArabEmirates,
    ];

    /// Whether this jurisdiction has a hand-curated flow configuration.
    pub fn is_primary(&self) -> bool {
        matches!(self, Jurisdiction::India | Jurisdiction::UnitedStates)
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::India => "india",
            Self::UnitedStates => "united_states",
            Self::UnitedKingdom => "united_kingdom",
            Self::Canada => "canada",
            Self::Australia => "australia",
            Self::Singapore => "singapore",
            Self::UnitedArabEmirates => "united_arab_emirates",
        };
        write!(f, "{s}")
    }
}
