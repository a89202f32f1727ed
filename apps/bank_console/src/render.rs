use client_core::{
    AccountScreen, FormDialog, ListState, Notice, NoticeLevel, Resource, TransactionDialog,
};
use shared::protocol::{Account, Customer, DepositPacket, TransactionResult};

/// One printable line per record.
pub trait Row: Resource {
    fn row(&self) -> String;
}

impl Row for Customer {
    fn row(&self) -> String {
        format!("{:>6}  {}", self.id, self.name)
    }
}

impl Row for DepositPacket {
    fn row(&self) -> String {
        format!("{:>6}  {:<24} {}%", self.id, self.name, self.yearly_return)
    }
}

impl Row for Account {
    fn row(&self) -> String {
        format!(
            "{:>6}  customer {:<6} packet {:<6} balance {:<12} since {}",
            self.id,
            self.id_customer,
            self.packet,
            self.balance,
            self.start_date()
                .map_or_else(|| self.startdate.clone(), |date| date.to_string())
        )
    }
}

pub fn print_list<R: Row>(state: &ListState<R>) {
    if state.items.is_empty() {
        println!("(no {} records)", R::LABEL.to_lowercase());
    }
    for item in &state.items {
        println!("{}", item.row());
    }
    println!("page {} / {}", state.page, state.total_pages);
    if state.dialog != FormDialog::Idle {
        println!("form: {:?}", state.dialog);
    }
    if let Some(notice) = &state.notice {
        print_notice(notice);
    }
}

/// Accounts with their customer and packet names resolved from the lookups.
pub fn print_accounts(screen: &AccountScreen) {
    print_list(&screen.list);

    let names: Vec<String> = screen
        .list
        .items
        .iter()
        .map(|account| {
            let customer = screen
                .customers
                .iter()
                .find(|customer| customer.id == account.id_customer)
                .map_or("?", |customer| customer.name.as_str());
            let packet = screen
                .packets
                .iter()
                .find(|packet| packet.id == account.packet)
                .map_or("?", |packet| packet.name.as_str());
            format!("{:>6}  {customer} / {packet}", account.id)
        })
        .collect();
    if !names.is_empty() {
        println!("owners:");
        for line in names {
            println!("{line}");
        }
    }

    match &screen.transaction.dialog {
        TransactionDialog::Idle => {}
        TransactionDialog::ResponseOpen(result) => print_transaction_result(result),
        other => println!("transaction: {other:?}"),
    }
}

pub fn print_transaction_result(result: &TransactionResult) {
    println!("withdraw result:");
    for line in transaction_lines(result) {
        println!("  {line}");
    }
}

fn transaction_lines(result: &TransactionResult) -> [String; 3] {
    let customer = result
        .query
        .id_customer
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    [
        format!("customer       {customer}"),
        format!("ending balance {}", result.ending_balance),
        format!("start date     {}", result.start_date().unwrap_or("-")),
    ]
}

pub fn print_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "!!",
    };
    println!("[{marker}] {}: {}", notice.title, notice.message);
}
