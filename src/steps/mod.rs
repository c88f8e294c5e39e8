//! Step components — one per step type, all exposing the same contract:
//! a typed form that shallow-merges into the draft, and a renderer that
//! turns the draft back into human-readable summary lines for review.
//!
//! Renderers are dispatched through a tagged lookup keyed by step id,
//! resolved once per step transition.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::SignupApi;
use crate::error::Result;
use crate::flow::draft::{Draft, fields};
use crate::flow::model::Jurisdiction;
use crate::flow::step::StepId;

/// One human-readable line of a step summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub label: &'static str,
    pub value: String,
}

/// Rendering capability for a step, keyed by step id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRenderer {
    DocumentCapture,
    PersonalInfo,
    WorkHistory,
    Education,
    OrgDetails,
    InstitutionDetails,
    Review,
}

/// Resolve the renderer for a step id.
pub fn renderer_for(id: StepId) -> StepRenderer {
    match id {
        StepId::DocumentCapture => StepRenderer::DocumentCapture,
        StepId::PersonalInfo => StepRenderer::PersonalInfo,
        StepId::WorkHistory => StepRenderer::WorkHistory,
        StepId::Education => StepRenderer::Education,
        StepId::OrgDetails => StepRenderer::OrgDetails,
        StepId::InstitutionDetails => StepRenderer::InstitutionDetails,
        StepId::Review => StepRenderer::Review,
    }
}

fn shown(draft: &Draft, field: &str) -> String {
    draft.str_field(field).unwrap_or("—").to_string()
}

impl StepRenderer {
    /// Summarize the draft fields this step owns.
    pub fn summary(&self, draft: &Draft) -> Vec<SummaryEntry> {
        match self {
            StepRenderer::DocumentCapture => vec![
                SummaryEntry {
                    label: "First name",
                    value: shown(draft, fields::FIRST_NAME),
                },
                SummaryEntry {
                    label: "Last name",
                    value: shown(draft, fields::LAST_NAME),
                },
                SummaryEntry {
                    label: "Date of birth",
                    value: shown(draft, fields::DATE_OF_BIRTH),
                },
            ],
            StepRenderer::PersonalInfo => {
                let phone = if draft.bool_field(fields::SKIP_PHONE) {
                    "Skipped".to_string()
                } else {
                    shown(draft, fields::PHONE)
                };
                vec![
                    SummaryEntry {
                        label: "Email",
                        value: shown(draft, fields::EMAIL),
                    },
                    SummaryEntry {
                        label: "Phone",
                        value: phone,
                    },
                ]
            }
            StepRenderer::WorkHistory => {
                let count = draft
                    .array_field(fields::WORK_HISTORY)
                    .map(Vec::len)
                    .unwrap_or(0);
                let value = if count == 0 {
                    "No prior work history".to_string()
                } else {
                    format!("{count} entries")
                };
                vec![SummaryEntry {
                    label: "Work history",
                    value,
                }]
            }
            StepRenderer::Education => {
                let programs: Vec<&str> = draft
                    .array_field(fields::EDUCATION)
                    .map(|entries| {
                        entries
                            .iter()
                            .filter_map(|e| e.get("programName").and_then(Value::as_str))
                            .collect()
                    })
                    .unwrap_or_default();
                let value = if programs.is_empty() {
                    "—".to_string()
                } else {
                    programs.join(", ")
                };
                vec![SummaryEntry {
                    label: "Programs",
                    value,
                }]
            }
            StepRenderer::OrgDetails => vec![
                SummaryEntry {
                    label: "Organization",
                    value: shown(draft, fields::ORG_NAME),
                },
                SummaryEntry {
                    label: "Contact email",
                    value: shown(draft, fields::ORG_EMAIL),
                },
                SummaryEntry {
                    label: "Website",
                    value: shown(draft, fields::ORG_WEBSITE),
                },
            ],
            StepRenderer::InstitutionDetails => vec![
                SummaryEntry {
                    label: "Institution",
                    value: shown(draft, fields::INSTITUTION_NAME),
                },
                SummaryEntry {
                    label: "Founded",
                    value: shown(draft, fields::FOUNDING_YEAR),
                },
            ],
            // Review summarizes the other steps; it has nothing of its own.
            StepRenderer::Review => Vec::new(),
        }
    }
}

fn to_partial<T: Serialize>(form: &T) -> Map<String, Value> {
    match serde_json::to_value(form) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            tracing::warn!("step form did not serialize to an object");
            Map::new()
        }
    }
}

/// Captured document images for the document step.
#[derive(Debug, Clone, Default)]
pub struct DocumentCaptureForm {
    /// Reference to the captured live photo.
    pub live_photo: String,
    /// Document field name → captured image reference, per the
    /// jurisdiction's capture requirements.
    pub documents: Map<String, Value>,
}

/// Run the remote capture/extraction call and produce the draft partial:
/// the captures themselves plus whatever structured fields the service
/// extracted. Extraction populating every expected field is not guaranteed;
/// the document validator re-checks before the flow advances.
pub async fn process_document_capture(
    api: &dyn SignupApi,
    jurisdiction: Jurisdiction,
    form: DocumentCaptureForm,
) -> Result<Map<String, Value>> {
    let mut capture = form.documents;
    capture.insert(
        fields::LIVE_PHOTO.to_string(),
        Value::String(form.live_photo),
    );

    let extracted = api.extract_document(jurisdiction, &capture).await?;

    let mut partial = capture;
    partial.extend(extracted.fields);
    Ok(partial)
}

/// Personal information form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub skip_phone: bool,
    pub password: String,
    pub confirm_password: String,
}

/// Register the account from the personal-information fields and produce the
/// draft partial including the established user id.
pub async fn register_personal_info(
    api: &dyn SignupApi,
    form: PersonalInfoForm,
) -> Result<Map<String, Value>> {
    let payload = to_partial(&form);
    let receipt = api.register_account(&payload).await?;

    let mut partial = payload;
    partial.insert(
        fields::USER_ID.to_string(),
        Value::String(receipt.user_id),
    );
    if let Some(role) = receipt.role {
        partial.insert(
            fields::REGISTERED_ROLE.to_string(),
            Value::String(role.to_string()),
        );
    }
    Ok(partial)
}

/// One prior position in the work history step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub company: String,
    pub title: String,
    pub start_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
}

/// Draft partial for the work history step. An empty entry list is valid.
pub fn work_history_partial(entries: Vec<WorkEntry>, has_no_work_history: bool) -> Map<String, Value> {
    let mut partial = Map::new();
    partial.insert(
        fields::WORK_HISTORY.to_string(),
        serde_json::to_value(entries).unwrap_or_else(|_| Value::Array(Vec::new())),
    );
    partial.insert(
        fields::HAS_NO_WORK_HISTORY.to_string(),
        Value::Bool(has_no_work_history),
    );
    partial
}

/// One education entry. All fields are required by the education validator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree_type: String,
    pub program_name: String,
    pub institution: String,
    pub field_of_study: String,
    pub graduation_year: String,
}

/// Draft partial for the education step.
pub fn education_partial(entries: Vec<EducationEntry>) -> Map<String, Value> {
    let mut partial = Map::new();
    partial.insert(
        fields::EDUCATION.to_string(),
        serde_json::to_value(entries).unwrap_or_else(|_| Value::Array(Vec::new())),
    );
    partial
}

/// Organization details form. The identifier fields only apply to company
/// flows, and which ones are required depends on the jurisdiction.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgDetailsForm {
    pub org_name: String,
    pub org_email: String,
    pub org_website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<String>,
}

impl OrgDetailsForm {
    pub fn into_partial(self) -> Map<String, Value> {
        to_partial(&self)
    }
}

/// Institution details form. `postal_address` and `founding_date` are
/// mutually exclusive by jurisdiction.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionDetailsForm {
    pub institution_name: String,
    pub founding_year: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
}

impl InstitutionDetailsForm {
    pub fn into_partial(self) -> Map<String, Value> {
        to_partial(&self)
    }
}

/// Draft partial recording explicit terms acceptance on the review step.
pub fn accept_terms() -> Map<String, Value> {
    let mut partial = Map::new();
    partial.insert(fields::TERMS_ACCEPTED.to_string(), Value::Bool(true));
    partial
}
