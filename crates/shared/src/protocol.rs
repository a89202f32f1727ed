use serde::{Deserialize, Serialize};

use crate::domain::{parse_service_date, AccountId, CustomerId, Numeric, PacketId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPacket {
    pub id: PacketId,
    pub name: String,
    pub yearly_return: Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub id_customer: CustomerId,
    pub balance: Numeric,
    pub packet: PacketId,
    pub startdate: String,
}

impl Account {
    pub fn start_date(&self) -> Option<chrono::NaiveDate> {
        parse_service_date(&self.startdate)
    }
}

/// Body of `customers/create` and `customers/{id}/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
}

/// Body of `deposito/create` and `deposito/{id}/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPacketForm {
    pub name: String,
    pub yearly_return: String,
}

/// Body of `account/create` and `account/{id}/update`.
///
/// Values are sent as entered; the service validates the references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountForm {
    pub id_customer: String,
    pub balance: String,
    pub packet: String,
    pub startdate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub balance: String,
    pub withdrawdate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    pub balance: String,
    pub depositdate: String,
}

/// Account state echoed back by a withdraw.
///
/// The debit has already happened when this arrives, so every field is
/// optional and read in whatever shape the service sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub id_customer: Option<Numeric>,
    #[serde(default)]
    pub startdate: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    #[serde(default)]
    pub query: TransactionQuery,
    #[serde(default)]
    pub ending_balance: Numeric,
}

impl TransactionResult {
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.query
            .id_customer
            .as_ref()
            .and_then(Numeric::as_i64)
            .map(CustomerId)
    }

    pub fn start_date(&self) -> Option<&str> {
        self.query.startdate.as_deref()
    }
}

/// `{ data, totalPages }` as returned by every paged list call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// `{ data }` as returned by single-record calls and unpaged lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
