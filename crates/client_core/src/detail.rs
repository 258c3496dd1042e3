use std::sync::Arc;

use shared::domain::{BlogEntity, BlogId};
use tracing::{info, warn};

use crate::{list::DELETE_PROMPT, routes::Route, state::ViewState, BlogApi, Confirm};

/// Single-blog screen.
pub struct DetailController {
    api: Arc<dyn BlogApi>,
    state: ViewState<BlogEntity>,
    delete_error: Option<String>,
}

impl DetailController {
    pub fn new(api: Arc<dyn BlogApi>) -> Self {
        Self {
            api,
            state: ViewState::Idle,
            delete_error: None,
        }
    }

    pub fn state(&self) -> &ViewState<BlogEntity> {
        &self.state
    }

    pub fn blog(&self) -> Option<&BlogEntity> {
        self.state.data()
    }

    /// Message of the last failed load or delete. A failed delete keeps the
    /// blog on screen so the user can retry.
    pub fn error(&self) -> Option<&str> {
        self.delete_error.as_deref().or_else(|| self.state.error())
    }

    pub async fn activate(&mut self, id: BlogId) {
        self.delete_error = None;
        self.state = ViewState::Loading;
        self.state = match self.api.get_by_id(id).await {
            Ok(blog) => ViewState::Loaded(blog),
            Err(err) => {
                warn!(error = %err, blog_id = id.0, "blog detail: load failed");
                ViewState::Errored(err.describe("Failed to load blog"))
            }
        };
    }

    /// Deletes the shown blog after confirmation and returns where to go next.
    /// `None` means stay: nothing loaded, declined, or the delete failed.
    pub async fn delete(&mut self, confirm: &dyn Confirm) -> Option<Route> {
        let id = self.blog().and_then(|blog| blog.id)?;
        if !confirm.confirm(DELETE_PROMPT) {
            return None;
        }

        self.delete_error = None;
        match self.api.delete(id).await {
            Ok(_) => {
                info!(blog_id = id.0, "blog detail: deleted");
                Some(Route::BlogList)
            }
            Err(err) => {
                warn!(error = %err, blog_id = id.0, "blog detail: delete failed");
                self.delete_error = Some(err.describe("Failed to delete blog"));
                None
            }
        }
    }

    pub fn go_back(&self) -> Route {
        Route::BlogList
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
