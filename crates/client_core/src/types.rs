//! Screen state handed to the view for rendering. The view never mutates it.

use shared::{domain::AccountId, protocol::TransactionResult};

use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Lifecycle of the create/update dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormDialog {
    #[default]
    Idle,
    Open(FormMode),
    Submitting(FormMode),
}

impl FormDialog {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormDialog::Submitting(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Blocking notice shown after a mutation resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListState<R: Resource> {
    pub items: Vec<R>,
    /// 1-indexed; always within `1..=total_pages`.
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub refreshing: bool,
    pub dialog: FormDialog,
    pub form: R::Form,
    pub selected: Option<R>,
    pub notice: Option<Notice>,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            refreshing: false,
            dialog: FormDialog::Idle,
            form: R::Form::default(),
            selected: None,
            notice: None,
        }
    }
}

/// What happened to the response of a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer fetch was issued before this one resolved.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Withdraw,
    Deposit,
}

impl TransactionKind {
    pub(crate) fn operation(self) -> &'static str {
        match self {
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Deposit => "deposit",
        }
    }
}

/// Lifecycle of the withdraw/deposit dialogs, including the withdraw
/// result dialog chained after a successful withdraw.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TransactionDialog {
    #[default]
    Idle,
    Open {
        kind: TransactionKind,
        account_id: AccountId,
    },
    Submitting {
        kind: TransactionKind,
        account_id: AccountId,
    },
    ResponseOpen(TransactionResult),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionState {
    pub dialog: TransactionDialog,
    pub withdraw_form: TransactionForm,
    pub deposit_form: TransactionForm,
}

impl TransactionState {
    pub fn form_mut(&mut self, kind: TransactionKind) -> &mut TransactionForm {
        match kind {
            TransactionKind::Withdraw => &mut self.withdraw_form,
            TransactionKind::Deposit => &mut self.deposit_form,
        }
    }
}
