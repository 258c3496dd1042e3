use std::fmt;

use shared::domain::BlogId;

/// Navigable screens. Unknown paths redirect to [`Route::Home`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    BlogList,
    NewBlog,
    EditBlog(BlogId),
    BlogDetail(BlogId),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["blogs"] => Self::BlogList,
            ["blogs", "new"] => Self::NewBlog,
            ["blogs", "edit", id] => parse_id(id).map_or(Self::Home, Self::EditBlog),
            ["blogs", id] => parse_id(id).map_or(Self::Home, Self::BlogDetail),
            _ => Self::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::BlogList => "/blogs".to_string(),
            Self::NewBlog => "/blogs/new".to_string(),
            Self::EditBlog(id) => format!("/blogs/edit/{id}"),
            Self::BlogDetail(id) => format!("/blogs/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<BlogId> {
    raw.parse::<i64>().ok().map(BlogId)
}
