//! Per-jurisdiction rule tables.
//!
//! One explicit table per concern, consulted by the generic validators in
//! the parent module, instead of scattered per-jurisdiction conditionals.
//! Adding a jurisdiction means adding rows here; the validators themselves
//! do not change.

use crate::flow::Jurisdiction;

/// A required draft field paired with its field-specific failure message.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
}

/// Document-step requirements for one jurisdiction.
///
/// `captures` are the identity document images the user must provide;
/// `extracted` are the structured fields the extraction service must have
/// populated from those images. Capture succeeding is necessary but not
/// sufficient: the validator checks both sets.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRules {
    pub captures: &'static [FieldRule],
    pub extracted: &'static [FieldRule],
}

const COMMON_EXTRACTED: [FieldRule; 3] = [
    FieldRule {
        field: "firstName",
        message: "First name was not extracted from the document",
    },
    FieldRule {
        field: "lastName",
        message: "Last name was not extracted from the document",
    },
    FieldRule {
        field: "dateOfBirth",
        message: "Date of birth was not extracted from the document",
    },
];

const INDIA_DOCS: DocumentRules = DocumentRules {
    captures: &[
        FieldRule {
            field: "aadhaarCard",
            message: "Aadhaar card image is required",
        },
        FieldRule {
            field: "panCard",
            message: "PAN card image is required",
        },
    ],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "aadhaarNumber",
            message: "Aadhaar number was not extracted from the document",
        },
    ],
};

const UNITED_STATES_DOCS: DocumentRules = DocumentRules {
    captures: &[
        FieldRule {
            field: "driversLicense",
            message: "Driver's license image is required",
        },
        FieldRule {
            field: "socialSecurityCard",
            message: "Social Security card image is required",
        },
    ],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "ssn",
            message: "Social Security number was not extracted from the document",
        },
    ],
};

const UNITED_KINGDOM_DOCS: DocumentRules = DocumentRules {
    captures: &[FieldRule {
        field: "passport",
        message: "Passport image is required",
    }],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "nationalInsuranceNumber",
            message: "National Insurance number was not extracted from the document",
        },
    ],
};

const CANADA_DOCS: DocumentRules = DocumentRules {
    captures: &[FieldRule {
        field: "passport",
        message: "Passport image is required",
    }],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "sin",
            message: "Social Insurance Number was not extracted from the document",
        },
    ],
};

const AUSTRALIA_DOCS: DocumentRules = DocumentRules {
    captures: &[FieldRule {
        field: "passport",
        message: "Passport image is required",
    }],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "tfn",
            message: "Tax File Number was not extracted from the document",
        },
    ],
};

const SINGAPORE_DOCS: DocumentRules = DocumentRules {
    captures: &[FieldRule {
        field: "nricCard",
        message: "NRIC card image is required",
    }],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "nric",
            message: "NRIC number was not extracted from the document",
        },
    ],
};

const UNITED_ARAB_EMIRATES_DOCS: DocumentRules = DocumentRules {
    captures: &[FieldRule {
        field: "emiratesId",
        message: "Emirates ID image is required",
    }],
    extracted: &[
        COMMON_EXTRACTED[0],
        COMMON_EXTRACTED[1],
        COMMON_EXTRACTED[2],
        FieldRule {
            field: "emiratesIdNumber",
            message: "Emirates ID number was not extracted from the document",
        },
    ],
};

/// Document requirements for a jurisdiction. Total over the supported set.
pub fn document_rules(jurisdiction: Jurisdiction) -> &'static DocumentRules {
    match jurisdiction {
        Jurisdiction::India => &INDIA_DOCS,
        Jurisdiction::UnitedStates => &UNITED_STATES_DOCS,
        Jurisdiction::UnitedKingdom => &UNITED_KINGDOM_DOCS,
        Jurisdiction::Canada => &CANADA_DOCS,
        Jurisdiction::Australia => &AUSTRALIA_DOCS,
        Jurisdiction::Singapore => &SINGAPORE_DOCS,
        Jurisdiction::UnitedArabEmirates => &UNITED_ARAB_EMIRATES_DOCS,
    }
}

/// How a company proves its identity in the organization-details step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyIdentityRule {
    /// Domestic registration and tax identifiers (CIN + GSTIN).
    RegistrationIds,
    /// Founding month and year.
    FoundingDate,
}

pub fn company_identity_rule(jurisdiction: Jurisdiction) -> CompanyIdentityRule {
    match jurisdiction {
        Jurisdiction::India => CompanyIdentityRule::RegistrationIds,
        _ => CompanyIdentityRule::FoundingDate,
    }
}

/// Which locale-specific field the institution-details step requires.
/// Mutually exclusive by jurisdiction, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstitutionLocaleRule {
    PostalAddress,
    FoundingDate,
}

pub fn institution_locale_rule(jurisdiction: Jurisdiction) -> InstitutionLocaleRule {
    match jurisdiction {
        Jurisdiction::India => InstitutionLocaleRule::PostalAddress,
        _ => InstitutionLocaleRule::FoundingDate,
    }
}

/// The fixed set of symbols accepted by the password policy.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_jurisdiction_has_document_rules() {
        for jurisdiction in Jurisdiction::ALL {
            let rules = document_rules(jurisdiction);
            assert!(
                !rules.captures.is_empty(),
                "{jurisdiction} must require at least one capture"
            );
            // firstName/lastName/dateOfBirth plus the local identifier
            assert_eq!(rules.extracted.len(), 4, "{jurisdiction}");
        }
    }

    #[test]
    fn locale_rules_are_mutually_exclusive() {
        for jurisdiction in Jurisdiction::ALL {
            let rule = institution_locale_rule(jurisdiction);
            if jurisdiction == Jurisdiction::India {
                assert_eq!(rule, InstitutionLocaleRule::PostalAddress);
            } else {
                assert_eq!(rule, InstitutionLocaleRule::FoundingDate);
            }
        }
    }

    #[test]
    fn company_identity_forks_on_india() {
        assert_eq!(
            company_identity_rule(Jurisdiction::India),
            CompanyIdentityRule::RegistrationIds
        );
        assert_eq!(
            company_identity_rule(Jurisdiction::Canada),
            CompanyIdentityRule::FoundingDate
        );
    }
}
