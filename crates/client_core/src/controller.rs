//! Paginated list + CRUD state machine shared by every resource screen.
//!
//! State lives behind a tokio mutex that is never held across a service
//! call, so intents from the view interleave freely. List fetches are fenced
//! by a monotonically increasing token: only the latest issued fetch may
//! write the list. Mutations always reload the page from the service instead
//! of patching the list locally.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    error::{ClientError, ControllerError},
    protocol_client,
    resource::Resource,
    transport::RemoteApi,
    types::{Direction, FormDialog, FormMode, ListState, LoadOutcome, Notice},
};

struct ControllerInner<R: Resource> {
    view: ListState<R>,
    latest_token: u64,
}

pub struct ResourceListController<R: Resource> {
    api: Arc<dyn RemoteApi>,
    inner: Mutex<ControllerInner<R>>,
}

impl<R: Resource> ResourceListController<R> {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(ControllerInner {
                view: ListState::default(),
                latest_token: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> ListState<R> {
        self.inner.lock().await.view.clone()
    }

    pub async fn current_page(&self) -> u32 {
        self.inner.lock().await.view.page
    }

    /// Fetches `page` and replaces the list with it.
    ///
    /// A failed fetch only clears the loading flag and is logged; the prior
    /// list stays on screen and no notice is raised. The error is still
    /// returned to the caller.
    pub async fn load(&self, page: u32) -> Result<LoadOutcome, ClientError> {
        let mut page = page.max(1);
        loop {
            let token = {
                let mut inner = self.inner.lock().await;
                inner.latest_token += 1;
                inner.view.page = page;
                inner.view.loading = true;
                inner.latest_token
            };
            debug!(collection = R::COLLECTION, page, token, "loading page");

            let result = protocol_client::fetch_page::<R>(self.api.as_ref(), page).await;

            let mut inner = self.inner.lock().await;
            if token != inner.latest_token {
                match &result {
                    Ok(_) => debug!(
                        collection = R::COLLECTION,
                        page, token, "discarding superseded page"
                    ),
                    Err(err) => debug!(
                        collection = R::COLLECTION,
                        page, token, error = %err, "discarding superseded page failure"
                    ),
                }
                return Ok(LoadOutcome::Superseded);
            }

            inner.view.loading = false;
            let fetched = match result {
                Ok(fetched) => fetched,
                Err(err) => {
                    error!(collection = R::COLLECTION, page, error = %err, "failed to load page");
                    return Err(err);
                }
            };

            let last_page = fetched.total_pages.max(1);
            inner.view.total_pages = last_page;
            if page > last_page {
                debug!(
                    collection = R::COLLECTION,
                    page, last_page, "page beyond the end, reloading last page"
                );
                page = last_page;
                continue;
            }

            inner.view.items = fetched.items;
            return Ok(LoadOutcome::Applied);
        }
    }

    /// Pull-to-refresh: reloads page 1 and lowers the refreshing flag once
    /// this fetch resolves, whatever its outcome.
    pub async fn refresh(&self) -> Result<LoadOutcome, ClientError> {
        self.inner.lock().await.view.refreshing = true;
        let result = self.load(1).await;
        self.inner.lock().await.view.refreshing = false;
        result
    }

    pub async fn reload_current(&self) -> Result<LoadOutcome, ClientError> {
        let page = self.current_page().await;
        self.load(page).await
    }

    /// Moves one page in `direction`, clamped to `1..=total_pages`.
    ///
    /// Returns `None` without issuing a request when already at the edge.
    pub async fn paginate(
        &self,
        direction: Direction,
    ) -> Result<Option<LoadOutcome>, ClientError> {
        let target = {
            let inner = self.inner.lock().await;
            let page = inner.view.page;
            match direction {
                Direction::Next if page < inner.view.total_pages => page + 1,
                Direction::Prev if page > 1 => page - 1,
                _ => return Ok(None),
            }
        };
        self.load(target).await.map(Some)
    }

    pub async fn open_create_form(&self) {
        let mut inner = self.inner.lock().await;
        if inner.view.dialog.is_submitting() {
            return;
        }
        inner.view.form = R::Form::default();
        inner.view.selected = None;
        inner.view.dialog = FormDialog::Open(FormMode::Create);
    }

    pub async fn open_edit_form(&self, record: R) {
        let mut inner = self.inner.lock().await;
        if inner.view.dialog.is_submitting() {
            return;
        }
        inner.view.form = record.to_form();
        inner.view.selected = Some(record);
        inner.view.dialog = FormDialog::Open(FormMode::Update);
    }

    /// Applies a text-entry change to the open form.
    pub async fn edit_form<F>(&self, apply: F)
    where
        F: FnOnce(&mut R::Form) + Send,
    {
        let mut inner = self.inner.lock().await;
        apply(&mut inner.view.form);
    }

    /// Closes an open form. Ignored while a submission is in flight.
    pub async fn close_form(&self) {
        let mut inner = self.inner.lock().await;
        if let FormDialog::Open(_) = inner.view.dialog {
            inner.view.dialog = FormDialog::Idle;
        }
    }

    pub async fn dismiss_notice(&self) {
        self.inner.lock().await.view.notice = None;
    }

    pub(crate) async fn post_notice(&self, notice: Notice) {
        self.inner.lock().await.view.notice = Some(notice);
    }

    /// Creates, or updates the selected record, from the form fields.
    ///
    /// Only an open form can be submitted. On success the page active at
    /// submission is reloaded and the dialog returns to idle. On failure the dialog reopens with the entered values
    /// intact.
    pub async fn submit_form(&self) -> Result<(), ControllerError> {
        let (mode, target, form, page) = {
            let mut inner = self.inner.lock().await;
            if inner.view.dialog.is_submitting() {
                return Err(ControllerError::InFlight("form submission"));
            }
            if !matches!(inner.view.dialog, FormDialog::Open(_)) {
                return Err(ControllerError::NotOpen("form submission"));
            }
            let target = inner.view.selected.as_ref().map(|record| record.id());
            let mode = if target.is_some() {
                FormMode::Update
            } else {
                FormMode::Create
            };
            inner.view.dialog = FormDialog::Submitting(mode);
            (mode, target, inner.view.form.clone(), inner.view.page)
        };

        let result = match target {
            Some(id) => protocol_client::update::<R>(self.api.as_ref(), id, &form).await,
            None => protocol_client::create::<R>(self.api.as_ref(), &form).await,
        };
        let (verb, past) = match mode {
            FormMode::Create => ("create", "created"),
            FormMode::Update => ("update", "updated"),
        };

        match result {
            Ok(()) => {
                info!(collection = R::COLLECTION, ?target, "{} {past}", R::LABEL);
                {
                    let mut inner = self.inner.lock().await;
                    inner.view.dialog = FormDialog::Idle;
                    inner.view.form = R::Form::default();
                    inner.view.selected = None;
                    inner.view.notice =
                        Some(Notice::success(format!("{} {past} successfully", R::LABEL)));
                }
                let _ = self.load(page).await;
                Ok(())
            }
            Err(err) => {
                warn!(collection = R::COLLECTION, ?target, error = %err, "failed to {verb} record");
                let mut inner = self.inner.lock().await;
                inner.view.dialog = FormDialog::Open(mode);
                inner.view.notice = Some(Notice::error(format!(
                    "Failed to {verb} {}",
                    R::LABEL.to_lowercase()
                )));
                Err(err.into())
            }
        }
    }

    /// Deletes a record. Only a 200 response reloads the list; a thrown
    /// error and a non-200 resolution both end in the failure notice.
    pub async fn remove(&self, id: R::Id) -> Result<(), ClientError> {
        debug!(collection = R::COLLECTION, %id, "deleting record");
        let page = self.current_page().await;
        let label = R::LABEL.to_lowercase();

        match protocol_client::delete::<R>(self.api.as_ref(), id).await {
            Ok(()) => {
                info!(collection = R::COLLECTION, %id, "{} deleted", R::LABEL);
                let _ = self.load(page).await;
                self.post_notice(Notice::success(format!(
                    "{} deleted successfully",
                    R::LABEL
                )))
                .await;
                Ok(())
            }
            Err(err) => {
                warn!(collection = R::COLLECTION, %id, error = %err, "failed to delete record");
                let message = match &err {
                    ClientError::Application { status, .. } => {
                        format!("Failed to delete {label}: {status}")
                    }
                    _ => format!("Failed to delete {label}"),
                };
                self.post_notice(Notice::error(message)).await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
