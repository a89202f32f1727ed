//! Typed calls over [`RemoteApi`], one per service endpoint.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::AccountId,
    protocol::{
        Account, DataEnvelope, DepositRequest, ListEnvelope, TransactionResult, WithdrawRequest,
    },
};

use crate::{
    error::ClientError,
    resource::Resource,
    transport::{ApiRequest, ApiResponse, RemoteApi},
};

/// One page of a resource as the service reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub total_pages: u32,
}

fn item_path<R: Resource>(id: R::Id, action: &str) -> String {
    format!("{}/{id}/{action}", R::COLLECTION)
}

fn encode<T: Serialize>(path: &str, body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|source| ClientError::Encode {
        path: path.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(path: &str, response: ApiResponse) -> Result<T, ClientError> {
    serde_json::from_value(response.body).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

pub async fn fetch_page<R: Resource>(
    api: &dyn RemoteApi,
    page: u32,
) -> Result<Page<R>, ClientError> {
    let response = api
        .execute(ApiRequest::get(R::COLLECTION).with_page(page))
        .await?;
    let envelope: ListEnvelope<R> = decode(R::COLLECTION, response)?;
    Ok(Page {
        items: envelope.data,
        page_number: page,
        total_pages: envelope.total_pages,
    })
}

/// Unpaged list; the service answers with its default page.
pub async fn fetch_all<R: Resource>(api: &dyn RemoteApi) -> Result<Vec<R>, ClientError> {
    let response = api.execute(ApiRequest::get(R::COLLECTION)).await?;
    let envelope: DataEnvelope<Vec<R>> = decode(R::COLLECTION, response)?;
    Ok(envelope.data)
}

pub async fn create<R: Resource>(api: &dyn RemoteApi, form: &R::Form) -> Result<(), ClientError> {
    let path = format!("{}/create", R::COLLECTION);
    let body = encode(&path, form)?;
    api.execute(ApiRequest::post(path, body)).await?;
    Ok(())
}

pub async fn update<R: Resource>(
    api: &dyn RemoteApi,
    id: R::Id,
    form: &R::Form,
) -> Result<(), ClientError> {
    let path = item_path::<R>(id, "update");
    let body = encode(&path, form)?;
    api.execute(ApiRequest::put(path, body)).await?;
    Ok(())
}

/// Only a 200 counts as deleted. Any other 2xx resolves into
/// [`ClientError::Application`] rather than success.
pub async fn delete<R: Resource>(api: &dyn RemoteApi, id: R::Id) -> Result<(), ClientError> {
    let path = item_path::<R>(id, "delete");
    let response = api.execute(ApiRequest::delete(path.clone())).await?;
    if response.status != 200 {
        return Err(ClientError::Application {
            path,
            status: response.status,
        });
    }
    Ok(())
}

pub async fn withdraw(
    api: &dyn RemoteApi,
    account_id: AccountId,
    request: &WithdrawRequest,
) -> Result<TransactionResult, ClientError> {
    let path = item_path::<Account>(account_id, "withdraw");
    let body = encode(&path, request)?;
    let response = api.execute(ApiRequest::put(path.clone(), body)).await?;
    let envelope: DataEnvelope<TransactionResult> = decode(&path, response)?;
    Ok(envelope.data)
}

/// The deposit response body is not consumed.
pub async fn deposit(
    api: &dyn RemoteApi,
    account_id: AccountId,
    request: &DepositRequest,
) -> Result<(), ClientError> {
    let path = item_path::<Account>(account_id, "deposit");
    let body = encode(&path, request)?;
    api.execute(ApiRequest::put(path, body)).await?;
    Ok(())
}
