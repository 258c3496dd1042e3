use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Paginated envelope returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
}

impl<T> PageResponse<T> {
    /// Builds the envelope for one page slice, deriving the flags.
    pub fn from_slice(content: Vec<T>, total_elements: u64, size: u32, number: u32) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        let number_of_elements = content.len() as u32;
        Self {
            empty: content.is_empty(),
            first: number == 0,
            last: total_pages == 0 || number + 1 >= total_pages,
            content,
            total_elements,
            total_pages,
            size,
            number,
            number_of_elements,
        }
    }

    pub fn is_consistent(&self) -> bool {
        let page_in_range = self.total_elements == 0 || self.number < self.total_pages;
        page_in_range && self.content.len() <= self.size as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Title,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Property name the backend sorts by.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "titulo",
            Self::CreatedAt => "fechaCreacion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    Title,
    Content,
    Tags,
}

impl SearchField {
    /// Query parameter carrying the filter on `GET {base}`.
    pub fn query_param(self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::Content => "contenido",
            Self::Tags => "category",
        }
    }

    /// Path segment used by the `GET {base}/{segment}/{value}` search endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::Content => "contenido",
            Self::Tags => "categoria",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Tags => "tags",
        };
        f.write_str(name)
    }
}

/// A single server-side search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: SearchField,
    value: String,
}

impl Filter {
    pub fn new(field: SearchField, value: &str) -> Result<Self, FilterError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FilterError::EmptyValue);
        }
        Ok(Self {
            field,
            value: value.to_string(),
        })
    }

    pub fn field(&self) -> SearchField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parameters of one `list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub filter: Option<Filter>,
}

impl ListQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort_by: SortField::default(),
            sort_dir: SortDirection::default(),
            filter: None,
        }
    }

    pub fn sorted(mut self, sort_by: SortField, sort_dir: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_dir = sort_dir;
        self
    }

    pub fn filtered(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    /// Query string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortDir", self.sort_dir.as_str().to_string()),
        ];
        if let Some(filter) = &self.filter {
            pairs.push((filter.field().query_param(), filter.value().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
