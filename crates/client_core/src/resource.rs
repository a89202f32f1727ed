//! Per-resource endpoint set and form mapping.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{AccountId, CustomerId, PacketId},
    protocol::{Account, AccountForm, Customer, CustomerForm, DepositPacket, DepositPacketForm},
};

/// A record type with its own CRUD endpoint set under `COLLECTION`.
pub trait Resource: fmt::Debug + Clone + Send + Sync + DeserializeOwned + 'static {
    type Id: fmt::Debug + fmt::Display + Copy + PartialEq + Send + Sync + 'static;
    /// Editable text fields, doubling as the create/update request body.
    type Form: fmt::Debug + Clone + Default + PartialEq + Serialize + Send + Sync + 'static;

    const COLLECTION: &'static str;
    /// Human label used in notices, e.g. "Deposit Type".
    const LABEL: &'static str;

    fn id(&self) -> Self::Id;

    fn to_form(&self) -> Self::Form;
}

impl Resource for Customer {
    type Id = CustomerId;
    type Form = CustomerForm;

    const COLLECTION: &'static str = "customers";
    const LABEL: &'static str = "Customer";

    fn id(&self) -> CustomerId {
        self.id
    }

    fn to_form(&self) -> CustomerForm {
        CustomerForm {
            name: self.name.clone(),
        }
    }
}

impl Resource for DepositPacket {
    type Id = PacketId;
    type Form = DepositPacketForm;

    const COLLECTION: &'static str = "deposito";
    const LABEL: &'static str = "Deposit Type";

    fn id(&self) -> PacketId {
        self.id
    }

    fn to_form(&self) -> DepositPacketForm {
        DepositPacketForm {
            name: self.name.clone(),
            yearly_return: self.yearly_return.to_string(),
        }
    }
}

impl Resource for Account {
    type Id = AccountId;
    type Form = AccountForm;

    const COLLECTION: &'static str = "account";
    const LABEL: &'static str = "Account";

    fn id(&self) -> AccountId {
        self.id
    }

    fn to_form(&self) -> AccountForm {
        AccountForm {
            id_customer: self.id_customer.to_string(),
            balance: self.balance.to_string(),
            packet: self.packet.to_string(),
            startdate: self.startdate.clone(),
        }
    }
}
