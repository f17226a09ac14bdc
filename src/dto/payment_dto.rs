//! DTO de captura de pagos vehiculares

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::blob::{BlobMerge, BlobRef};
use crate::models::{PaymentCategory, VehicularPayment};
use crate::utils::errors::AppResult;
use crate::utils::validation::validate_non_negative_amount;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentRequest {
    pub vehicle_id: i64,
    pub category: PaymentCategory,
    #[serde(default)]
    pub permit_subtype: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub document_number: String,
    pub issued_on: NaiveDate,
    pub next_due_on: NaiveDate,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub payment_method: String,
    /// Documentos y comprobantes recién capturados: al editar se agregan
    #[serde(default)]
    pub documents: Vec<BlobRef>,
    #[serde(default)]
    pub receipts: Vec<BlobRef>,
}

impl PaymentRequest {
    pub fn into_record(self, existing: Option<&VehicularPayment>) -> AppResult<VehicularPayment> {
        self.validate()?;
        let (documents, receipts) = match existing {
            Some(stored) => (
                BlobMerge::Append.apply(&stored.documents, self.documents),
                BlobMerge::Append.apply(&stored.receipts, self.receipts),
            ),
            None => (self.documents, self.receipts),
        };

        Ok(VehicularPayment {
            id: existing.map(|p| p.id.clone()).unwrap_or_default(),
            vehicle_id: self.vehicle_id,
            category: self.category,
            permit_subtype: self
                .permit_subtype
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            document_number: self.document_number,
            issued_on: self.issued_on,
            next_due_on: self.next_due_on,
            amount_paid: self.amount_paid,
            payment_method: self.payment_method,
            documents,
            receipts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(documents: Vec<BlobRef>) -> PaymentRequest {
        PaymentRequest {
            vehicle_id: 1,
            category: PaymentCategory::Permit,
            permit_subtype: Some("  ".into()),
            document_number: "P-77".into(),
            issued_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            next_due_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            amount_paid: Decimal::new(900, 0),
            payment_method: String::new(),
            documents,
            receipts: vec![],
        }
    }

    #[test]
    fn test_edit_appends_documents() {
        let created = request(vec![BlobRef::from("doc-1")]).into_record(None).unwrap();
        assert_eq!(created.permit_subtype, None);

        let edited = request(vec![BlobRef::from("doc-2")]).into_record(Some(&created)).unwrap();
        assert_eq!(edited.documents, vec![BlobRef::from("doc-1"), BlobRef::from("doc-2")]);
    }
}
