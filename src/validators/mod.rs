//! Validator library — one pure predicate per step type.
//!
//! Each validator takes the accumulated draft (plus the flow's jurisdiction)
//! and returns [`ValidationOutcome::Pass`] or a set of field-specific
//! failure messages. Validators never panic, never perform I/O, and carry no
//! hidden state: the same draft and jurisdiction always produce the same
//! outcome.

pub mod rules;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::flow::draft::{Draft, fields};
use crate::flow::model::{Jurisdiction, Role};

use self::rules::{CompanyIdentityRule, InstitutionLocaleRule, PASSWORD_SYMBOLS};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?:[ '\-][A-Za-z]+)*$").expect("name regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Field name → human-readable message. Cleared per field on edit, replaced
/// wholesale on a failed advance attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of running a validator: pass, or fail with messages. Never both,
/// never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Pass,
    Fail(ValidationErrors),
}

impl ValidationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationOutcome::Pass)
    }
}

/// The validator attached to a step, dispatched by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Document,
    PersonalInfo,
    WorkHistory,
    Education,
    OrgDetails,
    InstitutionDetails,
    Review,
}

impl Validator {
    /// Run the validator against the draft. Pure and deterministic.
    pub fn run(&self, draft: &Draft, jurisdiction: Jurisdiction) -> ValidationOutcome {
        let mut errors = ValidationErrors::default();
        match self {
            Validator::Document => document(draft, jurisdiction, &mut errors),
            Validator::PersonalInfo => personal_info(draft, &mut errors),
            Validator::WorkHistory => work_history(draft),
            Validator::Education => education(draft, &mut errors),
            Validator::OrgDetails => org_details(draft, jurisdiction, &mut errors),
            Validator::InstitutionDetails => institution_details(draft, jurisdiction, &mut errors),
            Validator::Review => review(draft, &mut errors),
        }
        if errors.is_empty() {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::Fail(errors)
        }
    }
}

/// Document verification: live photo, jurisdiction-specific captures, and
/// the extraction fields the capture service must have populated.
fn document(draft: &Draft, jurisdiction: Jurisdiction, errors: &mut ValidationErrors) {
    if !draft.is_set(fields::LIVE_PHOTO) {
        errors.insert(fields::LIVE_PHOTO, "A live photo is required");
    }

    let rules = rules::document_rules(jurisdiction);
    for rule in rules.captures {
        if !draft.is_set(rule.field) {
            errors.insert(rule.field, rule.message);
        }
    }
    for rule in rules.extracted {
        if draft.str_field(rule.field).is_none() {
            errors.insert(rule.field, rule.message);
        }
    }
}

fn personal_info(draft: &Draft, errors: &mut ValidationErrors) {
    match draft.str_field(fields::FIRST_NAME) {
        None => errors.insert(fields::FIRST_NAME, "First name is required"),
        Some(name) if !NAME_RE.is_match(name) => {
            errors.insert(fields::FIRST_NAME, "First name may only contain letters");
        }
        Some(_) => {}
    }
    match draft.str_field(fields::LAST_NAME) {
        None => errors.insert(fields::LAST_NAME, "Last name is required"),
        Some(name) if !NAME_RE.is_match(name) => {
            errors.insert(fields::LAST_NAME, "Last name may only contain letters");
        }
        Some(_) => {}
    }

    match draft.str_field(fields::EMAIL) {
        None => errors.insert(fields::EMAIL, "Email is required"),
        Some(email) if !EMAIL_RE.is_match(email) => {
            errors.insert(fields::EMAIL, "Enter a valid email address");
        }
        Some(_) => {}
    }

    // Phone is required unless the user explicitly opted out of capture.
    if !draft.bool_field(fields::SKIP_PHONE) && draft.str_field(fields::PHONE).is_none() {
        errors.insert(fields::PHONE, "Phone number is required");
    }

    // Passwords are compared byte-for-byte, untrimmed.
    let password = draft
        .get(fields::PASSWORD)
        .and_then(Value::as_str)
        .unwrap_or("");
    if password.is_empty() {
        errors.insert(fields::PASSWORD, "Password is required");
    } else if let Some(message) = password_policy_failure(password) {
        errors.insert(fields::PASSWORD, message);
    }

    let confirm = draft
        .get(fields::CONFIRM_PASSWORD)
        .and_then(Value::as_str)
        .unwrap_or("");
    if !password.is_empty() && confirm != password {
        errors.insert(fields::CONFIRM_PASSWORD, "Passwords do not match");
    }
}

/// First policy rule the password violates, if any. Checked in a fixed
/// order: length, uppercase, lowercase, digit, symbol.
pub fn password_policy_failure(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        return Some("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain a digit");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Some("Password must contain a symbol (!@#$%^&*()-_=+[]{};:,.?)");
    }
    None
}

/// Work history passes unconditionally: candidates without prior work
/// history may proceed. Business policy, not an oversight.
fn work_history(_draft: &Draft) {}

const EDUCATION_ENTRY_FIELDS: [&str; 5] = [
    "degreeType",
    "programName",
    "institution",
    "fieldOfStudy",
    "graduationYear",
];

fn education(draft: &Draft, errors: &mut ValidationErrors) {
    let entries = match draft.array_field(fields::EDUCATION) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            errors.insert(fields::EDUCATION, "Add at least one education entry");
            return;
        }
    };

    let complete = entries.iter().all(|entry| {
        EDUCATION_ENTRY_FIELDS.iter().all(|key| {
            entry.get(key).is_some_and(|v| match v {
                Value::Null => false,
                // Blank reads as absent, same as Draft::str_field.
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            })
        })
    });
    if !complete {
        errors.insert(
            fields::EDUCATION,
            "Every education entry needs a degree type, program name, institution, \
             field of study, and graduation year",
        );
    }
}

fn org_details(draft: &Draft, jurisdiction: Jurisdiction, errors: &mut ValidationErrors) {
    if draft.str_field(fields::ORG_NAME).is_none() {
        errors.insert(fields::ORG_NAME, "Organization name is required");
    }
    if draft.str_field(fields::ORG_EMAIL).is_none() {
        errors.insert(fields::ORG_EMAIL, "Contact email is required");
    }
    if draft.str_field(fields::ORG_WEBSITE).is_none() {
        errors.insert(fields::ORG_WEBSITE, "Website is required");
    }

    // Company-type organizations prove identity differently per jurisdiction.
    if draft.role() == Some(Role::Company) {
        match rules::company_identity_rule(jurisdiction) {
            CompanyIdentityRule::RegistrationIds => {
                if draft.str_field(fields::CIN).is_none() {
                    errors.insert(fields::CIN, "Corporate identification number is required");
                }
                if draft.str_field(fields::GSTIN).is_none() {
                    errors.insert(fields::GSTIN, "GSTIN is required");
                }
            }
            CompanyIdentityRule::FoundingDate => {
                if draft.str_field(fields::FOUNDED_MONTH).is_none() {
                    errors.insert(fields::FOUNDED_MONTH, "Founding month is required");
                }
                if draft.str_field(fields::FOUNDED_YEAR).is_none() {
                    errors.insert(fields::FOUNDED_YEAR, "Founding year is required");
                }
            }
        }
    }
}

fn institution_details(draft: &Draft, jurisdiction: Jurisdiction, errors: &mut ValidationErrors) {
    if draft.str_field(fields::INSTITUTION_NAME).is_none() {
        errors.insert(fields::INSTITUTION_NAME, "Institution name is required");
    }

    let current_year = chrono::Utc::now().year();
    match founding_year(draft) {
        FoundingYear::Missing => {
            errors.insert(fields::FOUNDING_YEAR, "Founding year is required");
        }
        FoundingYear::Year(year) if (1800..=current_year).contains(&year) => {}
        FoundingYear::Malformed | FoundingYear::Year(_) => {
            errors.insert(
                fields::FOUNDING_YEAR,
                format!("Founding year must be a 4-digit year between 1800 and {current_year}"),
            );
        }
    }

    match draft.str_field(fields::DESCRIPTION) {
        Some(description) if description.len() >= 10 => {}
        _ => errors.insert(
            fields::DESCRIPTION,
            "Description must be at least 10 characters",
        ),
    }

    match rules::institution_locale_rule(jurisdiction) {
        InstitutionLocaleRule::PostalAddress => {
            if draft.str_field(fields::POSTAL_ADDRESS).is_none() {
                errors.insert(fields::POSTAL_ADDRESS, "Postal address is required");
            }
        }
        InstitutionLocaleRule::FoundingDate => {
            if draft.str_field(fields::FOUNDING_DATE).is_none() {
                errors.insert(fields::FOUNDING_DATE, "Founding date is required");
            }
        }
    }
}

/// A founding-year draft value: absent, present but not a 4-digit year, or
/// parsed. Malformed values are reported as out of range rather than missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoundingYear {
    Missing,
    Malformed,
    Year(i32),
}

/// Founding year from the draft, accepting string or numeric values but only
/// exactly four digits.
fn founding_year(draft: &Draft) -> FoundingYear {
    let raw = match draft.get(fields::FOUNDING_YEAR) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => return FoundingYear::Missing,
        Some(Value::String(_)) => return FoundingYear::Missing,
        Some(_) => return FoundingYear::Malformed,
    };
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return FoundingYear::Malformed;
    }
    match raw.parse() {
        Ok(year) => FoundingYear::Year(year),
        Err(_) => FoundingYear::Malformed,
    }
}

fn review(draft: &Draft, errors: &mut ValidationErrors) {
    if !draft.bool_field(fields::TERMS_ACCEPTED) {
        errors.insert(
            fields::TERMS_ACCEPTED,
            "You must accept the terms to continue",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(role: Role, jurisdiction: Jurisdiction) -> Draft {
        Draft::seeded(role, jurisdiction)
    }

    fn fail_messages(outcome: ValidationOutcome) -> ValidationErrors {
        match outcome {
            ValidationOutcome::Pass => panic!("expected failure"),
            ValidationOutcome::Fail(errors) => errors,
        }
    }

    #[test]
    fn password_policy_boundaries() {
        assert_eq!(
            password_policy_failure("Ab1!"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password_policy_failure("abcdefg1!"),
            Some("Password must contain an uppercase letter")
        );
        assert_eq!(
            password_policy_failure("ABCDEFG1!"),
            Some("Password must contain a lowercase letter")
        );
        assert_eq!(
            password_policy_failure("Abcdefgh!"),
            Some("Password must contain a digit")
        );
        assert_eq!(
            password_policy_failure("Abcdefg1"),
            Some("Password must contain a symbol (!@#$%^&*()-_=+[]{};:,.?)")
        );
        assert_eq!(password_policy_failure("Abcdefg1!"), None);
    }

    #[test]
    fn india_document_missing_pan_yields_pan_specific_message() {
        let mut d = draft(Role::Candidate, Jurisdiction::India);
        d.set(fields::LIVE_PHOTO, "selfie.jpg");
        d.set("aadhaarCard", "aadhaar.jpg");
        d.set(fields::FIRST_NAME, "Asha");
        d.set(fields::LAST_NAME, "Rao");
        d.set(fields::DATE_OF_BIRTH, "1994-02-11");
        d.set("aadhaarNumber", "1234 5678 9012");

        let errors = fail_messages(Validator::Document.run(&d, Jurisdiction::India));
        assert_eq!(errors.message("panCard"), Some("PAN card image is required"));
        assert_eq!(errors.len(), 1, "only the PAN capture should be flagged");
    }

    #[test]
    fn document_capture_without_extraction_fails_per_field() {
        let mut d = draft(Role::Candidate, Jurisdiction::UnitedStates);
        d.set(fields::LIVE_PHOTO, "selfie.jpg");
        d.set("driversLicense", "dl.jpg");
        d.set("socialSecurityCard", "ssc.jpg");

        // Captures are present but extraction never populated the fields.
        let errors = fail_messages(Validator::Document.run(&d, Jurisdiction::UnitedStates));
        assert!(errors.message(fields::FIRST_NAME).is_some());
        assert!(errors.message(fields::LAST_NAME).is_some());
        assert!(errors.message(fields::DATE_OF_BIRTH).is_some());
        assert!(errors.message("ssn").is_some());
    }

    #[test]
    fn validators_are_deterministic() {
        let mut d = draft(Role::Candidate, Jurisdiction::India);
        d.set(fields::LIVE_PHOTO, "selfie.jpg");
        let first = Validator::Document.run(&d, Jurisdiction::India);
        let second = Validator::Document.run(&d, Jurisdiction::India);
        assert_eq!(first, second);
    }

    #[test]
    fn personal_info_requires_alphabetic_names() {
        let mut d = draft(Role::Candidate, Jurisdiction::UnitedStates);
        d.set(fields::FIRST_NAME, "J4ne");
        d.set(fields::LAST_NAME, "O'Brien");
        d.set(fields::EMAIL, "jane@example.com");
        d.set(fields::PHONE, "+1 555 0100");
        d.set(fields::PASSWORD, "Abcdefg1!");
        d.set(fields::CONFIRM_PASSWORD, "Abcdefg1!");

        let errors = fail_messages(Validator::PersonalInfo.run(&d, Jurisdiction::UnitedStates));
        assert_eq!(
            errors.message(fields::FIRST_NAME),
            Some("First name may only contain letters")
        );
        assert!(errors.message(fields::LAST_NAME).is_none());
    }

    #[test]
    fn personal_info_phone_optional_when_skipped() {
        let mut d = draft(Role::Candidate, Jurisdiction::UnitedStates);
        d.set(fields::FIRST_NAME, "Jane");
        d.set(fields::LAST_NAME, "Doe");
        d.set(fields::EMAIL, "jane@example.com");
        d.set(fields::SKIP_PHONE, true);
        d.set(fields::PASSWORD, "Abcdefg1!");
        d.set(fields::CONFIRM_PASSWORD, "Abcdefg1!");

        assert!(
            Validator::PersonalInfo
                .run(&d, Jurisdiction::UnitedStates)
                .is_pass()
        );
    }

    #[test]
    fn personal_info_confirmation_must_match_exactly() {
        let mut d = draft(Role::Candidate, Jurisdiction::UnitedStates);
        d.set(fields::FIRST_NAME, "Jane");
        d.set(fields::LAST_NAME, "Doe");
        d.set(fields::EMAIL, "jane@example.com");
        d.set(fields::SKIP_PHONE, true);
        d.set(fields::PASSWORD, "Abcdefg1!");
        d.set(fields::CONFIRM_PASSWORD, "Abcdefg1! ");

        let errors = fail_messages(Validator::PersonalInfo.run(&d, Jurisdiction::UnitedStates));
        assert_eq!(
            errors.message(fields::CONFIRM_PASSWORD),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn work_history_passes_with_no_entries() {
        let d = draft(Role::Candidate, Jurisdiction::India);
        assert!(Validator::WorkHistory.run(&d, Jurisdiction::India).is_pass());
    }

    #[test]
    fn education_requires_one_complete_entry() {
        let mut d = draft(Role::Candidate, Jurisdiction::India);
        assert!(!Validator::Education.run(&d, Jurisdiction::India).is_pass());

        d.set(
            fields::EDUCATION,
            json!([{
                "degreeType": "bachelor",
                "programName": "Computer Science",
                "institution": "IIT Bombay",
                "fieldOfStudy": "Engineering",
            }]),
        );
        let errors = fail_messages(Validator::Education.run(&d, Jurisdiction::India));
        assert!(errors.message(fields::EDUCATION).is_some());

        d.set(
            fields::EDUCATION,
            json!([{
                "degreeType": "bachelor",
                "programName": "Computer Science",
                "institution": "IIT Bombay",
                "fieldOfStudy": "Engineering",
                "graduationYear": "2016",
            }]),
        );
        assert!(Validator::Education.run(&d, Jurisdiction::India).is_pass());
    }

    #[test]
    fn education_rejects_blank_entry_fields() {
        let mut d = draft(Role::Candidate, Jurisdiction::India);
        d.set(
            fields::EDUCATION,
            json!([{
                "degreeType": "bachelor",
                "programName": "Computer Science",
                "institution": "IIT Bombay",
                "fieldOfStudy": "Engineering",
                "graduationYear": "   ",
            }]),
        );
        let errors = fail_messages(Validator::Education.run(&d, Jurisdiction::India));
        assert!(errors.message(fields::EDUCATION).is_some());
    }

    #[test]
    fn company_org_details_fork_by_jurisdiction() {
        let mut d = draft(Role::Company, Jurisdiction::India);
        d.set(fields::ORG_NAME, "Acme Hiring Pvt Ltd");
        d.set(fields::ORG_EMAIL, "hr@acme.in");
        d.set(fields::ORG_WEBSITE, "https://acme.in");

        let errors = fail_messages(Validator::OrgDetails.run(&d, Jurisdiction::India));
        assert!(errors.message(fields::CIN).is_some());
        assert!(errors.message(fields::GSTIN).is_some());

        // Same draft under a non-domestic jurisdiction asks for founding dates.
        let errors = fail_messages(Validator::OrgDetails.run(&d, Jurisdiction::Australia));
        assert!(errors.message(fields::FOUNDED_MONTH).is_some());
        assert!(errors.message(fields::FOUNDED_YEAR).is_some());
        assert!(errors.message(fields::CIN).is_none());
    }

    #[test]
    fn non_company_org_details_skip_identity_fields() {
        let mut d = draft(Role::HiringContact, Jurisdiction::India);
        d.set(fields::ORG_NAME, "Acme Hiring Pvt Ltd");
        d.set(fields::ORG_EMAIL, "hr@acme.in");
        d.set(fields::ORG_WEBSITE, "https://acme.in");
        assert!(Validator::OrgDetails.run(&d, Jurisdiction::India).is_pass());
    }

    #[test]
    fn institution_details_locale_fork() {
        let mut d = draft(Role::School, Jurisdiction::Canada);
        d.set(fields::INSTITUTION_NAME, "Maple Leaf Academy");
        d.set(fields::FOUNDING_YEAR, "1952");
        d.set(fields::DESCRIPTION, "A school for the performing arts.");
        d.set(fields::FOUNDING_DATE, "1952-09-01");

        // Non-domestic jurisdiction: founding date suffices, no address needed.
        assert!(
            Validator::InstitutionDetails
                .run(&d, Jurisdiction::Canada)
                .is_pass()
        );

        // Missing both → the founding-date requirement is cited for Canada.
        let mut d2 = draft(Role::School, Jurisdiction::Canada);
        d2.set(fields::INSTITUTION_NAME, "Maple Leaf Academy");
        d2.set(fields::FOUNDING_YEAR, "1952");
        d2.set(fields::DESCRIPTION, "A school for the performing arts.");
        let errors = fail_messages(Validator::InstitutionDetails.run(&d2, Jurisdiction::Canada));
        assert_eq!(
            errors.message(fields::FOUNDING_DATE),
            Some("Founding date is required")
        );
        assert!(errors.message(fields::POSTAL_ADDRESS).is_none());

        // India wants the postal address instead.
        let errors = fail_messages(Validator::InstitutionDetails.run(&d2, Jurisdiction::India));
        assert_eq!(
            errors.message(fields::POSTAL_ADDRESS),
            Some("Postal address is required")
        );
        assert!(errors.message(fields::FOUNDING_DATE).is_none());
    }

    #[test]
    fn institution_founding_year_bounds() {
        let current_year = chrono::Utc::now().year();
        let mut d = draft(Role::School, Jurisdiction::Canada);
        d.set(fields::INSTITUTION_NAME, "Maple Leaf Academy");
        d.set(fields::DESCRIPTION, "A school for the performing arts.");
        d.set(fields::FOUNDING_DATE, "1952-09-01");

        for bad in ["1799", "952", "20251", "next year"] {
            d.set(fields::FOUNDING_YEAR, bad);
            let errors = fail_messages(Validator::InstitutionDetails.run(&d, Jurisdiction::Canada));
            assert!(
                errors.message(fields::FOUNDING_YEAR).is_some(),
                "{bad} should be rejected"
            );
        }

        d.set(fields::FOUNDING_YEAR, current_year.to_string());
        assert!(
            Validator::InstitutionDetails
                .run(&d, Jurisdiction::Canada)
                .is_pass()
        );

        // Numeric draft values are accepted too.
        d.set(fields::FOUNDING_YEAR, 1900);
        assert!(
            Validator::InstitutionDetails
                .run(&d, Jurisdiction::Canada)
                .is_pass()
        );
    }

    #[test]
    fn founding_year_classifies_missing_malformed_and_parsed() {
        let mut d = draft(Role::School, Jurisdiction::Canada);
        assert_eq!(founding_year(&d), FoundingYear::Missing);

        d.set(fields::FOUNDING_YEAR, "   ");
        assert_eq!(founding_year(&d), FoundingYear::Missing);

        d.set(fields::FOUNDING_YEAR, "19x2");
        assert_eq!(founding_year(&d), FoundingYear::Malformed);

        d.set(fields::FOUNDING_YEAR, "1952");
        assert_eq!(founding_year(&d), FoundingYear::Year(1952));

        d.set(fields::FOUNDING_YEAR, 1900);
        assert_eq!(founding_year(&d), FoundingYear::Year(1900));
    }

    #[test]
    fn review_requires_terms_acceptance() {
        let mut d = draft(Role::Candidate, Jurisdiction::India);
        assert!(!Validator::Review.run(&d, Jurisdiction::India).is_pass());
        d.set(fields::TERMS_ACCEPTED, true);
        assert!(Validator::Review.run(&d, Jurisdiction::India).is_pass());
    }
}
