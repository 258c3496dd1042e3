//! Plain-text views of controller state.

use std::fmt::Write as _;

use client_core::{
    form::{FormController, FormField},
    pagination::PageLink,
    ListController,
};
use shared::domain::BlogEntity;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn home() -> String {
    "Blog manager\n  blog list            browse blogs\n  blog new --title ..  write a blog\n".to_string()
}

pub fn page_links(links: &[PageLink], current: u32) -> String {
    links
        .iter()
        .map(|link| match link {
            // Pages are shown one-based.
            PageLink::Page(page) if *page == current => format!("[{}]", page + 1),
            PageLink::Page(page) => (page + 1).to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn blog_list(list: &ListController) -> String {
    let mut out = String::new();
    if let Some(error) = list.error() {
        let _ = writeln!(out, "error: {error}");
        if list.state().data().is_none() {
            return out;
        }
    }
    if let Some(filter) = list.active_filter() {
        let _ = writeln!(out, "search: {} contains \"{}\"", filter.field(), filter.value());
    }
    if list.blogs().is_empty() {
        out.push_str("no blogs found\n");
        return out;
    }

    for blog in list.blogs() {
        let id = blog.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(out, "{id:>6}  {}  [{}]", blog.title, blog.tags);
    }
    let _ = writeln!(
        out,
        "page {} of {} ({} blogs)   {}",
        list.current_page() + 1,
        list.total_pages().max(1),
        list.total_elements(),
        page_links(&list.page_numbers(), list.current_page())
    );
    out
}

/// Note for a one-based `requested` page the list cannot show.
pub fn page_unavailable(requested: u32, total_pages: u32) -> String {
    format!(
        "page {requested} is past the last page ({}); showing page 1",
        total_pages.max(1)
    )
}

pub fn blog_detail(blog: &BlogEntity) -> String {
    let mut out = String::new();
    if let Some(id) = blog.id {
        let _ = writeln!(out, "#{id}");
    }
    let _ = writeln!(out, "{}", blog.title);
    let _ = writeln!(out, "tags: {}", blog.tags);
    if let Some(created) = blog.created_at {
        let _ = writeln!(out, "created: {}", created.format(TIMESTAMP_FORMAT));
    }
    if let Some(modified) = blog.modified_at {
        let _ = writeln!(out, "modified: {}", modified.format(TIMESTAMP_FORMAT));
    }
    let _ = writeln!(out, "\n{}", blog.content);
    out
}

pub fn form(form: &FormController) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        let label = match field {
            FormField::Title => "title",
            FormField::Content => "content",
            FormField::Tags => "tags",
        };
        let _ = writeln!(out, "{label}: {}", form.field_value(field));
        if let Some(err) = form.field_error(field) {
            let _ = writeln!(out, "  ! {err}");
        }
    }
    if let Some(error) = form.error() {
        let _ = writeln!(out, "error: {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::pagination::page_window;

    #[test]
    fn page_links_mark_current_and_gaps() {
        let links = page_window(10, 5, 1);
        assert_eq!(page_links(&links, 5), "1 … 5 [6] 7 … 10");
    }

    #[test]
    fn unavailable_page_note_names_the_page_count() {
        assert_eq!(
            page_unavailable(7, 3),
            "page 7 is past the last page (3); showing page 1"
        );
        assert_eq!(
            page_unavailable(2, 0),
            "page 2 is past the last page (1); showing page 1"
        );
    }

    #[test]
    fn detail_lists_fields() {
        let blog = shared::domain::BlogDraft::new("Hello", "Body text", "intro")
            .into_entity(Some(shared::domain::BlogId(3)));
        let text = blog_detail(&blog);
        assert!(text.starts_with("#3\nHello\ntags: intro\n"));
        assert!(text.ends_with("\nBody text\n"));
    }
}
