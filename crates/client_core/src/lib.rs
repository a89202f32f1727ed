//! Screen controllers for the banking service: a generic paginated list/CRUD
//! controller per resource, plus the account withdraw/deposit workflow.

pub mod account;
pub mod controller;
pub mod error;
pub mod lookup;
pub mod protocol_client;
pub mod resource;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_mocks;

pub use account::{AccountScreen, AccountTransactionController};
pub use controller::ResourceListController;
pub use error::{ClientError, ControllerError, FailureKind};
pub use lookup::LookupProvider;
pub use resource::Resource;
pub use transport::{ApiRequest, ApiResponse, HttpApiClient, HttpMethod, RemoteApi, TransportError};
pub use types::{
    Direction, FormDialog, FormMode, ListState, LoadOutcome, Notice, NoticeLevel,
    TransactionDialog, TransactionForm, TransactionKind, TransactionState,
};

pub type CustomerController = ResourceListController<shared::protocol::Customer>;
pub type DepositPacketController = ResourceListController<shared::protocol::DepositPacket>;
