//! Account screen: the generic list controller plus withdraw/deposit.
//!
//! A successful withdraw chains into a result dialog that shows the account
//! state echoed by the service. A successful deposit only raises a notice;
//! the service's deposit response is not consumed.

use std::sync::Arc;

use shared::{
    domain::AccountId,
    protocol::{Account, Customer, DepositPacket, DepositRequest, TransactionResult, WithdrawRequest},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    controller::ResourceListController,
    error::{ClientError, ControllerError},
    lookup::LookupProvider,
    protocol_client,
    transport::RemoteApi,
    types::{
        ListState, LoadOutcome, Notice, TransactionDialog, TransactionForm, TransactionKind,
        TransactionState,
    },
};

/// Everything the account view renders.
#[derive(Debug, Clone)]
pub struct AccountScreen {
    pub list: ListState<Account>,
    pub transaction: TransactionState,
    pub packets: Vec<DepositPacket>,
    pub customers: Vec<Customer>,
}

pub struct AccountTransactionController {
    api: Arc<dyn RemoteApi>,
    accounts: ResourceListController<Account>,
    packets: LookupProvider<DepositPacket>,
    customers: LookupProvider<Customer>,
    transaction: Mutex<TransactionState>,
}

impl AccountTransactionController {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            accounts: ResourceListController::new(Arc::clone(&api)),
            packets: LookupProvider::new(Arc::clone(&api)),
            customers: LookupProvider::new(Arc::clone(&api)),
            transaction: Mutex::new(TransactionState::default()),
            api,
        }
    }

    /// Screen mount: loads the reference lists once and the first page.
    pub async fn mount(&self) -> Result<LoadOutcome, ClientError> {
        let (_, _, loaded) = tokio::join!(
            self.packets.fetch(),
            self.customers.fetch(),
            self.accounts.load(1)
        );
        loaded
    }

    /// List/CRUD operations shared with the other screens.
    pub fn accounts(&self) -> &ResourceListController<Account> {
        &self.accounts
    }

    pub fn packets(&self) -> &LookupProvider<DepositPacket> {
        &self.packets
    }

    pub fn customers(&self) -> &LookupProvider<Customer> {
        &self.customers
    }

    pub async fn snapshot(&self) -> AccountScreen {
        AccountScreen {
            list: self.accounts.snapshot().await,
            transaction: self.transaction.lock().await.clone(),
            packets: self.packets.items().to_vec(),
            customers: self.customers.items().to_vec(),
        }
    }

    pub async fn open_withdraw(&self, account_id: AccountId) {
        self.open(TransactionKind::Withdraw, account_id).await;
    }

    pub async fn open_deposit(&self, account_id: AccountId) {
        self.open(TransactionKind::Deposit, account_id).await;
    }

    async fn open(&self, kind: TransactionKind, account_id: AccountId) {
        let mut state = self.transaction.lock().await;
        if matches!(state.dialog, TransactionDialog::Submitting { .. }) {
            return;
        }
        state.dialog = TransactionDialog::Open { kind, account_id };
    }

    pub async fn edit_transaction_form<F>(&self, kind: TransactionKind, apply: F)
    where
        F: FnOnce(&mut TransactionForm) + Send,
    {
        let mut state = self.transaction.lock().await;
        apply(state.form_mut(kind));
    }

    /// Closes the withdraw/deposit dialog or the withdraw result dialog.
    /// Ignored while a transaction is in flight.
    pub async fn close_transaction_dialog(&self) {
        let mut state = self.transaction.lock().await;
        if !matches!(state.dialog, TransactionDialog::Submitting { .. }) {
            state.dialog = TransactionDialog::Idle;
        }
    }

    /// Marks a transaction as submitting. Rejected when one is already in
    /// flight, or when the dialog for this kind and account is not open. Returns the page to reload afterwards.
    async fn begin(
        &self,
        kind: TransactionKind,
        account_id: AccountId,
        amount: &str,
        date: &str,
    ) -> Result<u32, ControllerError> {
        {
            let mut state = self.transaction.lock().await;
            if let TransactionDialog::Submitting { kind: active, .. } = state.dialog {
                return Err(ControllerError::InFlight(active.operation()));
            }
            if state.dialog != (TransactionDialog::Open { kind, account_id }) {
                return Err(ControllerError::NotOpen(kind.operation()));
            }
            *state.form_mut(kind) = TransactionForm {
                amount: amount.to_string(),
                date: date.to_string(),
            };
            state.dialog = TransactionDialog::Submitting { kind, account_id };
        }
        Ok(self.accounts.current_page().await)
    }

    async fn fail(
        &self,
        kind: TransactionKind,
        account_id: AccountId,
        err: ClientError,
    ) -> ControllerError {
        warn!(%account_id, error = %err, "{} failed", kind.operation());
        self.transaction.lock().await.dialog = TransactionDialog::Open { kind, account_id };
        self.accounts
            .post_notice(Notice::error(format!("Failed to {}", kind.operation())))
            .await;
        err.into()
    }

    /// Withdraws `amount` on `date`. On success the withdraw dialog gives way
    /// to the result dialog carrying the echoed account state, and the
    /// current page is reloaded. An accepted withdraw whose echo cannot be
    /// decoded still closes the dialog and reloads, but returns the decode
    /// error since there is no result to show.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: &str,
        date: &str,
    ) -> Result<TransactionResult, ControllerError> {
        let kind = TransactionKind::Withdraw;
        let page = self.begin(kind, account_id, amount, date).await?;
        let request = WithdrawRequest {
            balance: amount.to_string(),
            withdrawdate: date.to_string(),
        };

        match protocol_client::withdraw(self.api.as_ref(), account_id, &request).await {
            Ok(result) => {
                info!(
                    %account_id,
                    ending_balance = %result.ending_balance,
                    "withdraw applied"
                );
                self.transaction.lock().await.dialog =
                    TransactionDialog::ResponseOpen(result.clone());
                let _ = self.accounts.load(page).await;
                Ok(result)
            }
            Err(err @ ClientError::Decode { .. }) => {
                // The service accepted the debit; only its echo is unreadable.
                warn!(%account_id, error = %err, "withdraw applied with unreadable echo");
                self.transaction.lock().await.dialog = TransactionDialog::Idle;
                self.accounts
                    .post_notice(Notice::success("Withdraw successful"))
                    .await;
                let _ = self.accounts.load(page).await;
                Err(err.into())
            }
            Err(err) => Err(self.fail(kind, account_id, err).await),
        }
    }

    /// Deposits `amount` on `date`. Success closes the dialog with a plain
    /// notice; no result dialog follows.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: &str,
        date: &str,
    ) -> Result<(), ControllerError> {
        let kind = TransactionKind::Deposit;
        let page = self.begin(kind, account_id, amount, date).await?;
        let request = DepositRequest {
            balance: amount.to_string(),
            depositdate: date.to_string(),
        };

        match protocol_client::deposit(self.api.as_ref(), account_id, &request).await {
            Ok(()) => {
                info!(%account_id, "deposit applied");
                self.transaction.lock().await.dialog = TransactionDialog::Idle;
                self.accounts
                    .post_notice(Notice::success("Deposit successful"))
                    .await;
                let _ = self.accounts.load(page).await;
                Ok(())
            }
            Err(err) => Err(self.fail(kind, account_id, err).await),
        }
    }
}

#[cfg(test)]
#[path = "tests/account_tests.rs"]
mod tests;
