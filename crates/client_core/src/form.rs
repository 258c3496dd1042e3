//! Create/edit form for a single blog.

use std::{collections::HashSet, sync::Arc};

use shared::domain::{BlogDraft, BlogId};
use thiserror::Error;
use tracing::{info, warn};

use crate::{routes::Route, state::ViewState, BlogApi};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 1024;
const CONTENT_MIN: usize = 3;
const TAGS_MIN: usize = 3;
const TAGS_MAX: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BlogId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Content,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::Title, Self::Content, Self::Tags];

    fn bounds(self) -> (usize, Option<usize>) {
        match self {
            Self::Title => (TITLE_MIN, Some(TITLE_MAX)),
            Self::Content => (CONTENT_MIN, None),
            Self::Tags => (TAGS_MIN, Some(TAGS_MAX)),
        }
    }

    /// Checks `value` against this field's rules. Lengths count characters.
    pub fn validate(self, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Required);
        }

        let (min, max) = self.bounds();
        let len = value.chars().count();
        if len < min {
            return Err(ValidationError::TooShort { min });
        }
        match max {
            Some(max) if len > max => Err(ValidationError::TooLong { max }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Minimum {min} characters")]
    TooShort { min: usize },
    #[error("Maximum {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Saved { id: BlogId, navigate: Route },
    /// The request failed; the error is in [`FormController::error`].
    Failed,
}

pub struct FormController {
    api: Arc<dyn BlogApi>,
    mode: FormMode,
    draft: BlogDraft,
    touched: HashSet<FormField>,
    status: ViewState<()>,
}

impl FormController {
    /// Opens the form. A route id selects edit mode and pre-fills the draft
    /// from the backend; otherwise the form starts empty in create mode.
    pub async fn activate(api: Arc<dyn BlogApi>, route_id: Option<BlogId>) -> Self {
        let mode = route_id.map_or(FormMode::Create, FormMode::Edit);
        let mut form = Self {
            api,
            mode,
            draft: BlogDraft::default(),
            touched: HashSet::new(),
            status: ViewState::Idle,
        };

        if let FormMode::Edit(id) = mode {
            form.load(id).await;
        }
        form
    }

    async fn load(&mut self, id: BlogId) {
        self.status = ViewState::Loading;
        match self.api.get_by_id(id).await {
            Ok(blog) => {
                self.draft = blog.to_draft();
                self.status = ViewState::Loaded(());
            }
            Err(err) => {
                warn!(error = %err, blog_id = id.0, "blog form: load failed");
                self.status = ViewState::Errored(err.describe("Failed to load blog"));
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &BlogDraft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.draft.title,
            FormField::Content => &self.draft.content,
            FormField::Tags => &self.draft.tags,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.draft.title = value,
            FormField::Content => self.draft.content = value,
            FormField::Tags => self.draft.tags = value,
        }
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn mark_all_touched(&mut self) {
        self.touched.extend(FormField::ALL);
    }

    pub fn is_valid(&self) -> bool {
        FormField::ALL
            .iter()
            .all(|field| field.validate(self.field_value(*field)).is_ok())
    }

    /// Validation error to display for `field`; untouched fields show none.
    pub fn field_error(&self, field: FormField) -> Option<ValidationError> {
        if !self.is_touched(field) {
            return None;
        }
        field.validate(self.field_value(field)).err()
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.is_valid() {
            self.mark_all_touched();
            return SubmitOutcome::Invalid;
        }

        self.status = ViewState::Loading;
        let result = match self.mode {
            FormMode::Create => self.api.create(&self.draft).await,
            FormMode::Edit(id) => self.api.update(id, &self.draft).await,
        };

        match result {
            Ok(id) => {
                info!(blog_id = id.0, mode = ?self.mode, "blog form: saved");
                self.status = ViewState::Loaded(());
                SubmitOutcome::Saved {
                    id,
                    navigate: Route::BlogList,
                }
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "blog form: save failed");
                self.status = ViewState::Errored(err.describe("Failed to save blog"));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::BlogList
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
