use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    AccountTransactionController, HttpApiClient, RemoteApi, ResourceListController,
    TransactionKind,
};
use shared::{
    domain::{parse_service_date, AccountId, CustomerId, PacketId},
    protocol::{AccountForm, Customer, DepositPacket},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;
use render::{print_accounts, print_list, Row};

#[derive(Parser, Debug)]
#[command(name = "bank_console", about = "Manage customers, deposit packets and accounts")]
struct Cli {
    /// Overrides the configured service base URL.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Page to load, and to reload after a change.
    #[arg(long, global = true, default_value_t = 1)]
    page: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    Packets {
        #[command(subcommand)]
        action: PacketAction,
    },
    Accounts {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand, Debug)]
enum CustomerAction {
    List,
    Create {
        #[arg(long)]
        name: String,
    },
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PacketAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        yearly_return: String,
    },
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        yearly_return: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
struct AccountFields {
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    balance: Option<String>,
    #[arg(long)]
    packet: Option<String>,
    #[arg(long)]
    start_date: Option<String>,
}

#[derive(Args, Debug)]
struct TransactionArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    amount: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: String,
}

#[derive(Subcommand, Debug)]
enum AccountAction {
    List,
    Create(AccountFields),
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: AccountFields,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    Withdraw(TransactionArgs),
    Deposit(TransactionArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.server_url.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(base_url = %settings.base_url, "using banking service");
    let api: Arc<dyn RemoteApi> = Arc::new(HttpApiClient::with_timeout(
        &settings.base_url,
        settings.request_timeout(),
    )?);

    let page = cli.page.max(1);
    let outcome = match cli.command {
        Command::Customers { action } => run_customers(api, page, action).await,
        Command::Packets { action } => run_packets(api, page, action).await,
        Command::Accounts { action } => run_accounts(api, page, action).await,
    };

    if let Err(err) = &outcome {
        error!(error = %err, "command failed");
    }
    outcome
}

async fn run_customers(api: Arc<dyn RemoteApi>, page: u32, action: CustomerAction) -> Result<()> {
    let controller = ResourceListController::<Customer>::new(api);
    controller.load(page).await?;

    let result: Result<()> = match action {
        CustomerAction::List => Ok(()),
        CustomerAction::Create { name } => {
            create(&controller, |form| form.name = name).await
        }
        CustomerAction::Update { id, name } => {
            update(&controller, CustomerId(id), |form| form.name = name).await
        }
        CustomerAction::Delete { id } => controller.remove(CustomerId(id)).await.map_err(Into::into),
    };

    print_list(&controller.snapshot().await);
    result
}

async fn run_packets(api: Arc<dyn RemoteApi>, page: u32, action: PacketAction) -> Result<()> {
    let controller = ResourceListController::<DepositPacket>::new(api);
    controller.load(page).await?;

    let result: Result<()> = match action {
        PacketAction::List => Ok(()),
        PacketAction::Create {
            name,
            yearly_return,
        } => {
            create(&controller, |form| {
                form.name = name;
                form.yearly_return = yearly_return;
            })
            .await
        }
        PacketAction::Update {
            id,
            name,
            yearly_return,
        } => {
            update(&controller, PacketId(id), |form| {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(yearly_return) = yearly_return {
                    form.yearly_return = yearly_return;
                }
            })
            .await
        }
        PacketAction::Delete { id } => controller.remove(PacketId(id)).await.map_err(Into::into),
    };

    print_list(&controller.snapshot().await);
    result
}

async fn run_accounts(api: Arc<dyn RemoteApi>, page: u32, action: AccountAction) -> Result<()> {
    let controller = AccountTransactionController::new(api);
    controller.mount().await?;
    if page != 1 {
        controller.accounts().load(page).await?;
    }
    let accounts = controller.accounts();

    let result: Result<()> = match action {
        AccountAction::List => Ok(()),
        AccountAction::Create(fields) => create(accounts, |form| fields.apply(form)).await,
        AccountAction::Update { id, fields } => {
            update(accounts, AccountId(id), |form| fields.apply(form)).await
        }
        AccountAction::Delete { id } => accounts.remove(AccountId(id)).await.map_err(Into::into),
        AccountAction::Withdraw(args) => {
            transact(&controller, TransactionKind::Withdraw, args).await
        }
        AccountAction::Deposit(args) => transact(&controller, TransactionKind::Deposit, args).await,
    };

    print_accounts(&controller.snapshot().await);
    result
}

impl AccountFields {
    fn apply(self, form: &mut AccountForm) {
        if let Some(v) = self.customer {
            form.id_customer = v;
        }
        if let Some(v) = self.balance {
            form.balance = v;
        }
        if let Some(v) = self.packet {
            form.packet = v;
        }
        if let Some(v) = self.start_date {
            form.startdate = v;
        }
    }
}

async fn create<R, F>(controller: &ResourceListController<R>, fill: F) -> Result<()>
where
    R: Row,
    F: FnOnce(&mut R::Form) + Send,
{
    controller.open_create_form().await;
    controller.edit_form(fill).await;
    controller.submit_form().await?;
    Ok(())
}

/// Edits a record from the loaded page.
async fn update<R, F>(controller: &ResourceListController<R>, id: R::Id, edit: F) -> Result<()>
where
    R: Row,
    F: FnOnce(&mut R::Form) + Send,
{
    let state = controller.snapshot().await;
    let Some(record) = state.items.into_iter().find(|item| item.id() == id) else {
        bail!(
            "{} {id} is not on page {} / {}",
            R::LABEL.to_lowercase(),
            state.page,
            state.total_pages
        );
    };

    controller.open_edit_form(record).await;
    controller.edit_form(edit).await;
    controller.submit_form().await?;
    Ok(())
}

async fn transact(
    controller: &AccountTransactionController,
    kind: TransactionKind,
    args: TransactionArgs,
) -> Result<()> {
    let TransactionArgs { id, amount, date } = args;
    if parse_service_date(&date).is_none() {
        bail!("'{date}' is not a date (expected YYYY-MM-DD)");
    }
    let account_id = AccountId(id);

    match kind {
        TransactionKind::Withdraw => controller.open_withdraw(account_id).await,
        TransactionKind::Deposit => controller.open_deposit(account_id).await,
    }
    controller
        .edit_transaction_form(kind, |form| {
            form.amount = amount.clone();
            form.date = date.clone();
        })
        .await;

    match kind {
        TransactionKind::Withdraw => {
            controller.withdraw(account_id, &amount, &date).await?;
        }
        TransactionKind::Deposit => controller.deposit(account_id, &amount, &date).await?,
    }
    Ok(())
}
