use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::{protocol_client, resource::Resource, transport::RemoteApi};

/// Reference data fetched at most once, for foreign-key selectors.
///
/// The first [`fetch`](Self::fetch) decides the contents for the provider's
/// lifetime. A failed fetch leaves the selector empty and is not retried;
/// records created elsewhere later are not picked up either.
pub struct LookupProvider<R: Resource> {
    api: Arc<dyn RemoteApi>,
    items: OnceCell<Vec<R>>,
}

impl<R: Resource> LookupProvider<R> {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            api,
            items: OnceCell::new(),
        }
    }

    pub async fn fetch(&self) -> &[R] {
        self.items
            .get_or_init(|| async {
                match protocol_client::fetch_all::<R>(self.api.as_ref()).await {
                    Ok(items) => {
                        debug!(collection = R::COLLECTION, count = items.len(), "lookup loaded");
                        items
                    }
                    Err(err) => {
                        error!(collection = R::COLLECTION, error = %err, "failed to load lookup");
                        Vec::new()
                    }
                }
            })
            .await
    }

    /// Items fetched so far; empty until the first fetch resolves.
    pub fn items(&self) -> &[R] {
        self.items.get().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, id: R::Id) -> Option<&R> {
        self.items().iter().find(|item| item.id() == id)
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
