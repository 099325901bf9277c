//! Disbursement lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use super::{bad_request, engine_error_response};
use crate::{AppState, extractors::Actor};
use amanah_core::disbursement::{
    DisbursementCategory, DisbursementStatus, DisbursementType, DraftChanges, NewDisbursement,
    PaymentDetails,
};
use amanah_core::recipient::RecipientRef;
use amanah_db::DisbursementFilter;
use amanah_db::entities::disbursements;
use amanah_db::entities::sea_orm_active_enums as db_enums;
use amanah_shared::types::pagination::PageRequest;

/// Creates the disbursement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/disbursements", get(list_disbursements))
        .route("/disbursements", post(create_disbursement))
        .route("/disbursements/{id}", get(get_disbursement))
        .route("/disbursements/{id}", patch(update_disbursement))
        .route("/disbursements/{id}", delete(delete_disbursement))
        .route("/disbursements/{id}/submit", post(submit_disbursement))
        .route("/disbursements/{id}/approve", post(approve_disbursement))
        .route("/disbursements/{id}/reject", post(reject_disbursement))
        .route("/disbursements/{id}/pay", post(pay_disbursement))
        .route("/disbursements/{id}/resubmit", post(resubmit_disbursement))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing disbursements.
#[derive(Debug, Deserialize)]
pub struct ListDisbursementsQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by disbursement type.
    #[serde(rename = "type")]
    pub disbursement_type: Option<String>,
    /// Filter by category.
    pub category: Option<String>,
    /// Filter by creating actor.
    pub created_by: Option<Uuid>,
    /// Filter by campaign or period reference.
    pub reference_id: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// A recipient reference in a request body.
#[derive(Debug, Deserialize)]
pub struct RecipientPayload {
    /// Recipient kind: a directory kind or "manual".
    pub kind: String,
    /// Directory id, required for directory-backed kinds.
    pub id: Option<Uuid>,
    /// Payee name, manual recipients only.
    pub name: Option<String>,
    /// Payee contact, manual recipients only.
    pub contact: Option<String>,
    /// Bank name, manual recipients only.
    pub bank_name: Option<String>,
    /// Bank account number, manual recipients only.
    pub bank_account: Option<String>,
    /// Name on the bank account, manual recipients only.
    pub bank_account_name: Option<String>,
}

impl RecipientPayload {
    /// Converts the payload into a recipient reference.
    ///
    /// Field completeness for manual recipients is the engine's concern;
    /// only the kind itself is validated here.
    fn into_recipient(self) -> Result<RecipientRef, Response> {
        let Some(id) = self.id else {
            return match self.kind.to_lowercase().as_str() {
                "manual" => Ok(RecipientRef::Manual {
                    name: self.name.unwrap_or_default(),
                    contact: self.contact,
                    bank_name: self.bank_name.unwrap_or_default(),
                    bank_account: self.bank_account.unwrap_or_default(),
                    bank_account_name: self.bank_account_name.unwrap_or_default(),
                }),
                _ => Err(bad_request(
                    "INVALID_RECIPIENT",
                    "Directory recipients need an id",
                )),
            };
        };

        match self.kind.to_lowercase().as_str() {
            "employee" => Ok(RecipientRef::Employee { id }),
            "mustahiq" => Ok(RecipientRef::Mustahiq { id }),
            "vendor" => Ok(RecipientRef::Vendor { id }),
            "fundraiser" => Ok(RecipientRef::Fundraiser { id }),
            "mitra" => Ok(RecipientRef::Mitra { id }),
            "manual" => Err(bad_request(
                "INVALID_RECIPIENT",
                "Manual recipients carry payee fields, not an id",
            )),
            _ => Err(bad_request(
                "INVALID_RECIPIENT_KIND",
                "Unknown recipient kind",
            )),
        }
    }
}

/// Request body for creating a disbursement draft.
#[derive(Debug, Deserialize)]
pub struct CreateDisbursementRequest {
    /// Disbursement type.
    #[serde(rename = "type")]
    pub disbursement_type: String,
    /// Fine-grained category.
    pub category: String,
    /// Amount in whole rupiah, as a decimal string.
    pub amount: String,
    /// Campaign or period reference, when the category requires one.
    pub reference_id: Option<Uuid>,
    /// The recipient. Absent for the developer revenue share.
    pub recipient: Option<RecipientPayload>,
    /// Free-form note.
    pub description: Option<String>,
}

impl CreateDisbursementRequest {
    fn into_input(self) -> Result<NewDisbursement, Response> {
        let Some(disbursement_type) = DisbursementType::parse(&self.disbursement_type) else {
            return Err(bad_request("INVALID_TYPE", "Unknown disbursement type"));
        };
        let Some(category) = DisbursementCategory::parse(&self.category) else {
            return Err(bad_request(
                "INVALID_CATEGORY",
                "Unknown disbursement category",
            ));
        };
        let amount = parse_amount(&self.amount)?;
        let recipient = match self.recipient {
            Some(payload) => Some(payload.into_recipient()?),
            None => None,
        };

        Ok(NewDisbursement {
            disbursement_type,
            category,
            amount,
            reference_id: self.reference_id,
            recipient,
            description: self.description,
        })
    }
}

/// Request body for editing a draft.
#[derive(Debug, Deserialize)]
pub struct UpdateDisbursementRequest {
    /// New amount in whole rupiah, as a decimal string.
    pub amount: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New campaign or period reference.
    pub reference_id: Option<Uuid>,
    /// New recipient.
    pub recipient: Option<RecipientPayload>,
}

impl UpdateDisbursementRequest {
    fn into_changes(self) -> Result<DraftChanges, Response> {
        let amount = match self.amount {
            Some(raw) => Some(parse_amount(&raw)?),
            None => None,
        };
        let recipient = match self.recipient {
            Some(payload) => Some(payload.into_recipient()?),
            None => None,
        };

        Ok(DraftChanges {
            amount,
            description: self.description,
            reference_id: self.reference_id,
            recipient,
        })
    }
}

/// Request body for rejecting a submission.
#[derive(Debug, Deserialize)]
pub struct RejectDisbursementRequest {
    /// Why the submission is refused. Must be non-blank.
    pub reason: String,
}

/// Request body for recording the payout.
#[derive(Debug, Deserialize)]
pub struct PayDisbursementRequest {
    /// Amount actually transferred, as a decimal string.
    pub transferred_amount: String,
    /// Fees on top of the transfer. Defaults to zero.
    pub additional_fees: Option<String>,
    /// Date of the transfer (YYYY-MM-DD).
    pub transfer_date: NaiveDate,
    /// Proof-of-transfer URL.
    pub transfer_proof_url: String,
    /// Platform bank account used for the transfer.
    pub destination_bank_id: Uuid,
}

impl PayDisbursementRequest {
    fn into_details(self) -> Result<PaymentDetails, Response> {
        let transferred_amount = parse_amount(&self.transferred_amount)?;
        let additional_fees = match self.additional_fees {
            Some(raw) => parse_amount(&raw)?,
            None => Decimal::ZERO,
        };

        Ok(PaymentDetails {
            transferred_amount,
            additional_fees,
            transfer_date: self.transfer_date,
            transfer_proof_url: self.transfer_proof_url,
            destination_bank_id: self.destination_bank_id,
        })
    }
}

/// Recipient snapshot in a response.
#[derive(Debug, Serialize)]
pub struct RecipientResponse {
    /// Recipient kind.
    pub kind: String,
    /// Directory id, absent for manual recipients.
    pub directory_id: Option<Uuid>,
    /// Payee name.
    pub name: String,
    /// Payee contact.
    pub contact: Option<String>,
    /// Bank name.
    pub bank_name: Option<String>,
    /// Bank account number.
    pub bank_account: Option<String>,
    /// Name on the bank account.
    pub bank_account_name: Option<String>,
    /// Zakat recipient category, mustahiq entries only.
    pub asnaf: Option<String>,
}

/// Payout details in a response, present once paid.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Amount actually transferred.
    pub transferred_amount: String,
    /// Fees on top of the transfer.
    pub additional_fees: String,
    /// Date of the transfer.
    pub transfer_date: Option<String>,
    /// Proof-of-transfer URL.
    pub transfer_proof_url: Option<String>,
    /// Platform bank account used for the transfer.
    pub destination_bank_id: Option<Uuid>,
}

/// Response for a disbursement.
#[derive(Debug, Serialize)]
pub struct DisbursementResponse {
    /// Disbursement ID.
    pub id: Uuid,
    /// Human-readable number.
    pub disbursement_number: String,
    /// Disbursement type.
    #[serde(rename = "type")]
    pub disbursement_type: String,
    /// Fine-grained category.
    pub category: String,
    /// Amount in whole rupiah.
    pub amount: String,
    /// Campaign or period reference.
    pub reference_id: Option<Uuid>,
    /// Canonical pool key; absent for uncapped categories.
    pub pool_key: Option<String>,
    /// Recipient snapshot.
    pub recipient: RecipientResponse,
    /// Free-form note.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creating actor.
    pub created_by: Uuid,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Submission timestamp.
    pub submitted_at: Option<String>,
    /// Submitting actor.
    pub submitted_by: Option<Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<String>,
    /// Approving actor.
    pub approved_by: Option<Uuid>,
    /// Rejection reason, rejected records only.
    pub rejection_reason: Option<String>,
    /// Payout timestamp.
    pub disbursed_at: Option<String>,
    /// Paying actor.
    pub disbursed_by: Option<Uuid>,
    /// Payout details, paid records only.
    pub payment: Option<PaymentResponse>,
    /// The rejected disbursement this record re-submits.
    pub resubmitted_from: Option<Uuid>,
}

impl DisbursementResponse {
    fn from_model(model: disbursements::Model) -> Self {
        let payment = model.transferred_amount.map(|transferred| PaymentResponse {
            transferred_amount: transferred.to_string(),
            additional_fees: model.additional_fees.unwrap_or(Decimal::ZERO).to_string(),
            transfer_date: model.transfer_date.map(|d| d.to_string()),
            transfer_proof_url: model.transfer_proof_url.clone(),
            destination_bank_id: model.destination_bank_id,
        });

        Self {
            id: model.id,
            disbursement_number: model.disbursement_number,
            disbursement_type: type_to_string(&model.disbursement_type),
            category: category_to_string(&model.category),
            amount: model.amount.to_string(),
            reference_id: model.reference_id,
            pool_key: model.pool_key,
            recipient: RecipientResponse {
                kind: kind_to_string(&model.recipient_kind),
                directory_id: model.recipient_directory_id,
                name: model.recipient_name,
                contact: model.recipient_contact,
                bank_name: model.recipient_bank_name,
                bank_account: model.recipient_bank_account,
                bank_account_name: model.recipient_bank_account_name,
                asnaf: model.recipient_asnaf,
            },
            description: model.description,
            status: status_to_string(&model.status),
            created_by: model.created_by,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
            submitted_at: model.submitted_at.map(|t| t.to_rfc3339()),
            submitted_by: model.submitted_by,
            approved_at: model.approved_at.map(|t| t.to_rfc3339()),
            approved_by: model.approved_by,
            rejection_reason: model.rejection_reason,
            disbursed_at: model.disbursed_at.map(|t| t.to_rfc3339()),
            disbursed_by: model.disbursed_by,
            payment,
            resubmitted_from: model.resubmitted_from,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/disbursements` - List disbursements with filters.
async fn list_disbursements(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Query(query): Query<ListDisbursementsQuery>,
) -> impl IntoResponse {
    let filter = DisbursementFilter {
        status: query.status.as_deref().and_then(DisbursementStatus::parse),
        disbursement_type: query
            .disbursement_type
            .as_deref()
            .and_then(DisbursementType::parse),
        category: query.category.as_deref().and_then(DisbursementCategory::parse),
        created_by: query.created_by,
        reference_id: query.reference_id,
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match state.service.list(&filter, page).await {
        Ok(result) => {
            let items: Vec<DisbursementResponse> = result
                .data
                .into_iter()
                .map(DisbursementResponse::from_model)
                .collect();

            (
                StatusCode::OK,
                Json(json!({ "disbursements": items, "meta": result.meta })),
            )
                .into_response()
        }
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements` - Create a new draft.
async fn create_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(payload): Json<CreateDisbursementRequest>,
) -> impl IntoResponse {
    let input = match payload.into_input() {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.service.create(actor, input).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// GET `/disbursements/{id}` - Get a single disbursement.
async fn get_disbursement(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service.get(id).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// PATCH `/disbursements/{id}` - Edit a draft.
async fn update_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDisbursementRequest>,
) -> impl IntoResponse {
    let changes = match payload.into_changes() {
        Ok(changes) => changes,
        Err(response) => return response,
    };

    match state.service.update(actor, id, changes).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// DELETE `/disbursements/{id}` - Hard-delete a non-committed record.
async fn delete_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service.delete(actor, id).await {
        Ok(()) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements/{id}/submit` - Submit a draft for review.
async fn submit_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service.submit(actor, id).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements/{id}/approve` - Approve a submission.
async fn approve_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service.approve(actor, id).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements/{id}/reject` - Reject a submission with a reason.
async fn reject_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectDisbursementRequest>,
) -> impl IntoResponse {
    match state.service.reject(actor, id, payload.reason).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements/{id}/pay` - Record the payout of an approved record.
async fn pay_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayDisbursementRequest>,
) -> impl IntoResponse {
    let details = match payload.into_details() {
        Ok(details) => details,
        Err(response) => return response,
    };

    match state.service.mark_paid(actor, id, details).await {
        Ok(model) => (
            StatusCode::OK,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

/// POST `/disbursements/{id}/resubmit` - Clone a rejected record into a new draft.
async fn resubmit_disbursement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service.resubmit(actor, id).await {
        Ok(model) => (
            StatusCode::CREATED,
            Json(DisbursementResponse::from_model(model)),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_amount(raw: &str) -> Result<Decimal, Response> {
    Decimal::from_str(raw)
        .map_err(|_| bad_request("INVALID_AMOUNT", "Amount must be a decimal string"))
}

fn status_to_string(status: &db_enums::DisbursementStatus) -> String {
    match status {
        db_enums::DisbursementStatus::Draft => "draft".to_string(),
        db_enums::DisbursementStatus::Submitted => "submitted".to_string(),
        db_enums::DisbursementStatus::Approved => "approved".to_string(),
        db_enums::DisbursementStatus::Rejected => "rejected".to_string(),
        db_enums::DisbursementStatus::Paid => "paid".to_string(),
    }
}

fn type_to_string(disbursement_type: &db_enums::DisbursementType) -> String {
    match disbursement_type {
        db_enums::DisbursementType::Campaign => "campaign".to_string(),
        db_enums::DisbursementType::Zakat => "zakat".to_string(),
        db_enums::DisbursementType::Qurban => "qurban".to_string(),
        db_enums::DisbursementType::Operational => "operational".to_string(),
        db_enums::DisbursementType::Vendor => "vendor".to_string(),
        db_enums::DisbursementType::RevenueShare => "revenue_share".to_string(),
    }
}

fn category_to_string(category: &db_enums::DisbursementCategory) -> String {
    match category {
        db_enums::DisbursementCategory::CampaignToBeneficiary => {
            "campaign_to_beneficiary".to_string()
        }
        db_enums::DisbursementCategory::ZakatToMustahiq => "zakat_to_mustahiq".to_string(),
        db_enums::DisbursementCategory::QurbanPurchaseSapi => "qurban_purchase_sapi".to_string(),
        db_enums::DisbursementCategory::QurbanPurchaseKambing => {
            "qurban_purchase_kambing".to_string()
        }
        db_enums::DisbursementCategory::QurbanExecutionFee => "qurban_execution_fee".to_string(),
        db_enums::DisbursementCategory::OperationalExpense => "operational_expense".to_string(),
        db_enums::DisbursementCategory::VendorPayment => "vendor_payment".to_string(),
        db_enums::DisbursementCategory::RevenueShareMitra => "revenue_share_mitra".to_string(),
        db_enums::DisbursementCategory::RevenueShareFundraiser => {
            "revenue_share_fundraiser".to_string()
        }
        db_enums::DisbursementCategory::RevenueShareDeveloper => {
            "revenue_share_developer".to_string()
        }
    }
}

fn kind_to_string(kind: &db_enums::RecipientKind) -> String {
    match kind {
        db_enums::RecipientKind::Employee => "employee".to_string(),
        db_enums::RecipientKind::Mustahiq => "mustahiq".to_string(),
        db_enums::RecipientKind::Vendor => "vendor".to_string(),
        db_enums::RecipientKind::Fundraiser => "fundraiser".to_string(),
        db_enums::RecipientKind::Mitra => "mitra".to_string(),
        db_enums::RecipientKind::Manual => "manual".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_request_parses_into_input() {
        let body = r#"{
            "type": "campaign",
            "category": "campaign_to_beneficiary",
            "amount": "500000",
            "reference_id": "0191e9a0-0000-7000-8000-000000000001",
            "recipient": { "kind": "employee", "id": "0191e9a0-0000-7000-8000-000000000002" },
            "description": "Dana tahap pertama"
        }"#;

        let request: CreateDisbursementRequest = serde_json::from_str(body).unwrap();
        let input = request.into_input().unwrap();

        assert_eq!(input.disbursement_type, DisbursementType::Campaign);
        assert_eq!(input.category, DisbursementCategory::CampaignToBeneficiary);
        assert_eq!(input.amount, Decimal::from(500_000));
        assert!(matches!(
            input.recipient,
            Some(RecipientRef::Employee { .. })
        ));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let body = r#"{
            "type": "campaign",
            "category": "no_such_category",
            "amount": "100"
        }"#;

        let request: CreateDisbursementRequest = serde_json::from_str(body).unwrap();
        let response = request.into_input().unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_non_decimal_amount_is_rejected() {
        let body = r#"{
            "type": "operational",
            "category": "operational_expense",
            "amount": "lots"
        }"#;

        let request: CreateDisbursementRequest = serde_json::from_str(body).unwrap();
        let response = request.into_input().unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_manual_recipient_passes_fields_through() {
        let payload = RecipientPayload {
            kind: "manual".to_string(),
            id: None,
            name: Some("PT Sewa Kantor Jaya".to_string()),
            contact: None,
            bank_name: Some("BNI".to_string()),
            bank_account: Some("0331407712".to_string()),
            bank_account_name: Some("PT Sewa Kantor Jaya".to_string()),
        };

        match payload.into_recipient().unwrap() {
            RecipientRef::Manual {
                name, bank_account, ..
            } => {
                assert_eq!(name, "PT Sewa Kantor Jaya");
                assert_eq!(bank_account, "0331407712");
            }
            other => panic!("expected manual recipient, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_recipient_without_id_is_rejected() {
        let payload = RecipientPayload {
            kind: "vendor".to_string(),
            id: None,
            name: None,
            contact: None,
            bank_name: None,
            bank_account: None,
            bank_account_name: None,
        };

        let response = payload.into_recipient().unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case("employee")]
    #[case("mustahiq")]
    #[case("vendor")]
    #[case("fundraiser")]
    #[case("mitra")]
    fn test_directory_kinds_round_trip(#[case] kind: &str) {
        let payload = RecipientPayload {
            kind: kind.to_string(),
            id: Some(Uuid::new_v4()),
            name: None,
            contact: None,
            bank_name: None,
            bank_account: None,
            bank_account_name: None,
        };

        let recipient = payload.into_recipient().unwrap();
        assert_eq!(recipient.kind().as_str(), kind);
    }

    #[rstest]
    #[case(db_enums::DisbursementStatus::Draft, "draft")]
    #[case(db_enums::DisbursementStatus::Submitted, "submitted")]
    #[case(db_enums::DisbursementStatus::Approved, "approved")]
    #[case(db_enums::DisbursementStatus::Rejected, "rejected")]
    #[case(db_enums::DisbursementStatus::Paid, "paid")]
    fn test_status_strings_match_engine_labels(
        #[case] status: db_enums::DisbursementStatus,
        #[case] expected: &str,
    ) {
        assert_eq!(status_to_string(&status), expected);
        assert_eq!(DisbursementStatus::parse(expected).unwrap().as_str(), expected);
    }

    #[test]
    fn test_pay_request_defaults_fees_to_zero() {
        let body = r#"{
            "transferred_amount": "250000",
            "transfer_date": "2026-08-25",
            "transfer_proof_url": "https://files.amanah.or.id/transfers/x.jpg",
            "destination_bank_id": "0191e9a0-0000-7000-8000-000000000003"
        }"#;

        let request: PayDisbursementRequest = serde_json::from_str(body).unwrap();
        let details = request.into_details().unwrap();
        assert_eq!(details.additional_fees, Decimal::ZERO);
    }
}
