use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the account statement ledger.
///
/// A statement is built up in place while a credit is processed: the caller
/// supplies the business fields, `fk_account_id` is filled in after account
/// resolution, and `id`, `charged_at` and `transaction_id` are assigned by the
/// store at insert time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AccountStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_account_id: Option<i32>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[sqlx(rename = "type_charge")]
    #[serde(rename = "type_charge")]
    pub charge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charged_at: Option<DateTime<Utc>>,
    pub currency: String,
    pub amount: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[sqlx(default)]
    #[serde(rename = "obs", default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Uuid>,
}

/// Account record as returned by the account service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    #[serde(default)]
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Compensation record shipped to the transfer service when a credit is
/// diverted. Never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub account_id_to: String,
    pub currency: String,
    pub amount: BigDecimal,
}

impl Transfer {
    pub fn from_credit(credit: &AccountStatement) -> Self {
        Transfer {
            account_id_to: credit.account_id.clone(),
            currency: credit.currency.clone(),
            amount: credit.amount.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_credit() -> AccountStatement {
        AccountStatement {
            id: None,
            fk_account_id: None,
            account_id: "ACC-001".to_string(),
            charge_type: "CREDIT".to_string(),
            charged_at: None,
            currency: "USD".to_string(),
            amount: "100.50".parse::<BigDecimal>().unwrap(),
            tenant_id: Some("tenant-1".to_string()),
            observation: None,
            transaction_id: None,
        }
    }

    #[test]
    fn test_transfer_carries_credit_fields() {
        let credit = sample_credit();
        let transfer = Transfer::from_credit(&credit);

        assert_eq!(transfer.account_id_to, "ACC-001");
        assert_eq!(transfer.currency, "USD");
        assert_eq!(transfer.amount, credit.amount);
    }

    #[test]
    fn test_statement_deserializes_wire_names() {
        let payload = r#"{
            "account_id": "ACC-001",
            "type_charge": "CREDIT",
            "currency": "USD",
            "amount": 100.5,
            "tenant_id": "tenant-1"
        }"#;

        let credit: AccountStatement = serde_json::from_str(payload).unwrap();
        assert_eq!(credit.charge_type, "CREDIT");
        assert_eq!(credit.account_id, "ACC-001");
        assert!(credit.id.is_none());
        assert!(credit.charged_at.is_none());
    }

    #[test]
    fn test_statement_serializes_observation_as_obs() {
        let mut credit = sample_credit();
        credit.observation = Some("diverted".to_string());

        let value = serde_json::to_value(&credit).unwrap();
        assert_eq!(value["obs"], "diverted");
        assert_eq!(value["type_charge"], "CREDIT");
        assert!(value.get("id").is_none());
    }
}
