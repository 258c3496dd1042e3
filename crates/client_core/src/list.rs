//! Blog list screen: pagination, search and row deletion.

use std::sync::Arc;

use shared::{
    domain::{BlogEntity, BlogId},
    protocol::{Filter, ListQuery, PageResponse, SearchField, SortDirection, SortField},
};
use tracing::{debug, info, warn};

use crate::{
    error::ClientResult,
    pagination::{page_window, PageLink},
    state::{RequestSequencer, Ticket, ViewState},
    BlogApi, Confirm,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
const PAGE_WINDOW_RADIUS: u32 = 1;
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this blog?";

/// A `list` request issued by [`ListController::begin_load`] and not yet
/// applied.
#[derive(Debug)]
pub struct LoadTicket {
    ticket: Ticket,
    query: ListQuery,
}

impl LoadTicket {
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub struct ListController {
    api: Arc<dyn BlogApi>,
    page_size: u32,
    state: ViewState<Vec<BlogEntity>>,
    search_field: SearchField,
    search_value: String,
    active_filter: Option<Filter>,
    current_page: u32,
    total_pages: u32,
    total_elements: u64,
    delete_error: Option<String>,
    requests: RequestSequencer,
}

impl ListController {
    pub fn new(api: Arc<dyn BlogApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            state: ViewState::Idle,
            search_field: SearchField::default(),
            search_value: String::new(),
            active_filter: None,
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            delete_error: None,
            requests: RequestSequencer::default(),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<BlogEntity>> {
        &self.state
    }

    /// Rows of the last successful load, or nothing while loading or failed.
    pub fn blogs(&self) -> &[BlogEntity] {
        self.state.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Message of the last failed load or delete. A failed delete leaves the
    /// shown rows in place.
    pub fn error(&self) -> Option<&str> {
        self.delete_error.as_deref().or_else(|| self.state.error())
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn search_field(&self) -> SearchField {
        self.search_field
    }

    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.active_filter.as_ref()
    }

    pub fn set_search_field(&mut self, field: SearchField) {
        self.search_field = field;
    }

    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.search_value = value.into();
    }

    pub fn page_numbers(&self) -> Vec<PageLink> {
        page_window(self.total_pages, self.current_page, PAGE_WINDOW_RADIUS)
    }

    /// Marks the list as loading and returns the request to issue. Any
    /// earlier outstanding request becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.delete_error = None;
        self.state = ViewState::Loading;
        let query = ListQuery::new(self.current_page, self.page_size)
            .sorted(SortField::CreatedAt, SortDirection::Desc)
            .filtered(self.active_filter.clone());
        LoadTicket {
            ticket: self.requests.issue(),
            query,
        }
    }

    /// Applies the response to `ticket`. Returns `false` and leaves state
    /// untouched when a newer request has been issued since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ClientResult<PageResponse<BlogEntity>>,
    ) -> bool {
        if !self.requests.is_current(ticket.ticket) {
            debug!(page = ticket.query.page, "blog list: discarding stale response");
            return false;
        }

        match result {
            Ok(page) => {
                debug!(
                    page = self.current_page,
                    rows = page.content.len(),
                    total_pages = page.total_pages,
                    "blog list: loaded"
                );
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
                self.state = ViewState::Loaded(page.content);
            }
            Err(err) => {
                warn!(error = %err, page = self.current_page, "blog list: load failed");
                let context = if ticket.query.filter.is_some() {
                    "Failed to search blogs"
                } else {
                    "Failed to load blogs"
                };
                self.state = ViewState::Errored(err.describe(context));
            }
        }
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.api.list(ticket.query()).await;
        self.finish_load(ticket, result);
    }

    /// Restarts from the first page with the current search input. A blank
    /// value clears the filter.
    pub async fn search(&mut self) {
        self.current_page = 0;
        self.active_filter = Filter::new(self.search_field, &self.search_value).ok();
        self.load().await;
    }

    pub async fn clear_search(&mut self) {
        self.search_value.clear();
        self.active_filter = None;
        self.current_page = 0;
        self.load().await;
    }

    /// Loads `page` keeping the active filter. Returns `false` without any
    /// state change or request when `page` is out of range or already shown.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        if page >= self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.load().await;
        true
    }

    pub async fn next_page(&mut self) -> bool {
        match self.current_page.checked_add(1) {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    pub async fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page).await,
            None => false,
        }
    }

    /// Deletes `id` after confirmation and reloads the current page, stepping
    /// back to the new last page if the current one no longer exists.
    pub async fn delete_blog(&mut self, id: BlogId, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        self.requests.issue();
        self.delete_error = None;
        if let Err(err) = self.api.delete(id).await {
            warn!(error = %err, blog_id = id.0, "blog list: delete failed");
            self.delete_error = Some(err.describe("Failed to delete blog"));
            return DeleteOutcome::Failed;
        }
        info!(blog_id = id.0, "blog list: deleted");

        self.load().await;
        if self.landed_past_last_page() {
            self.current_page = self.total_pages.saturating_sub(1);
            debug!(page = self.current_page, "blog list: page emptied by delete");
            self.load().await;
        }
        DeleteOutcome::Deleted
    }

    fn landed_past_last_page(&self) -> bool {
        self.current_page > 0
            && self.current_page >= self.total_pages
            && self.state.data().is_some_and(Vec::is_empty)
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
