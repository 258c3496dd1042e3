//! In-memory `BlogApi` for controller tests.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use shared::{
    domain::{BlogDraft, BlogEntity, BlogId},
    protocol::{ListQuery, PageResponse, SearchField, SortDirection, SortField},
};

use crate::{error::ClientError, BlogApi, ClientResult, Confirm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ListQuery),
    Get(BlogId),
    Create(BlogDraft),
    Update(BlogId, BlogDraft),
    Delete(BlogId),
}

#[derive(Default)]
struct Store {
    blogs: Vec<BlogEntity>,
    next_id: i64,
    calls: Vec<Call>,
    failures: VecDeque<ClientError>,
}

#[derive(Default)]
pub struct FakeBlogApi {
    store: Mutex<Store>,
}

impl FakeBlogApi {
    /// Seeds `count` blogs with ids `1..=count`.
    pub fn with_blogs(count: i64) -> Self {
        let api = Self::default();
        {
            let mut store = api.store.lock().expect("store");
            for n in 1..=count {
                store.blogs.push(blog(n));
            }
            store.next_id = count + 1;
        }
        api
    }

    /// The next call fails with `err` instead of touching the store.
    pub fn fail_next(&self, err: ClientError) {
        self.store.lock().expect("store").failures.push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().expect("store").calls.clone()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.store
            .lock()
            .expect("store")
            .blogs
            .iter()
            .filter_map(|blog| blog.id.map(|id| id.0))
            .collect()
    }

    fn record(&self, call: Call) -> ClientResult<std::sync::MutexGuard<'_, Store>> {
        let mut store = self.store.lock().expect("store");
        store.calls.push(call);
        match store.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(store),
        }
    }
}

pub fn blog(n: i64) -> BlogEntity {
    BlogEntity {
        id: Some(BlogId(n)),
        title: format!("Post {n}"),
        content: format!("Body of post {n}"),
        tags: if n % 2 == 0 { "even".into() } else { "odd".into() },
        created_at: None,
        modified_at: None,
    }
}

fn matches_filter(blog: &BlogEntity, field: SearchField, value: &str) -> bool {
    let haystack = match field {
        SearchField::Title => &blog.title,
        SearchField::Content => &blog.content,
        SearchField::Tags => &blog.tags,
    };
    haystack.to_lowercase().contains(&value.to_lowercase())
}

fn page_of(mut rows: Vec<BlogEntity>, page: u32, size: u32) -> PageResponse<BlogEntity> {
    let total = rows.len() as u64;
    let start = (page as usize).saturating_mul(size as usize).min(rows.len());
    let end = start.saturating_add(size as usize).min(rows.len());
    let content = rows.drain(start..end).collect();
    PageResponse::from_slice(content, total, size, page)
}

#[async_trait]
impl BlogApi for FakeBlogApi {
    async fn list(&self, query: &ListQuery) -> ClientResult<PageResponse<BlogEntity>> {
        let store = self.record(Call::List(query.clone()))?;
        let mut rows: Vec<BlogEntity> = store
            .blogs
            .iter()
            .filter(|blog| {
                query
                    .filter
                    .as_ref()
                    .map_or(true, |f| matches_filter(blog, f.field(), f.value()))
            })
            .cloned()
            .collect();
        // Newest first: ids grow with creation time.
        if query.sort_dir == SortDirection::Desc {
            rows.reverse();
        }
        Ok(page_of(rows, query.page, query.size))
    }

    async fn get_by_id(&self, id: BlogId) -> ClientResult<BlogEntity> {
        let store = self.record(Call::Get(id))?;
        store
            .blogs
            .iter()
            .find(|blog| blog.id == Some(id))
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn create(&self, draft: &BlogDraft) -> ClientResult<BlogId> {
        let mut store = self.record(Call::Create(draft.clone()))?;
        let id = BlogId(store.next_id.max(1));
        store.next_id = id.0 + 1;
        store.blogs.push(draft.clone().into_entity(Some(id)));
        Ok(id)
    }

    async fn update(&self, id: BlogId, draft: &BlogDraft) -> ClientResult<BlogId> {
        let mut store = self.record(Call::Update(id, draft.clone()))?;
        let blog = store
            .blogs
            .iter_mut()
            .find(|blog| blog.id == Some(id))
            .ok_or(ClientError::NotFound)?;
        blog.title = draft.title.clone();
        blog.content = draft.content.clone();
        blog.tags = draft.tags.clone();
        Ok(id)
    }

    async fn delete(&self, id: BlogId) -> ClientResult<String> {
        let mut store = self.record(Call::Delete(id))?;
        let before = store.blogs.len();
        store.blogs.retain(|blog| blog.id != Some(id));
        if store.blogs.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(format!("Blog {id} deleted"))
    }

    async fn search_by_path(
        &self,
        field: SearchField,
        value: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<PageResponse<BlogEntity>> {
        let query = ListQuery::new(page, size).filtered(shared::protocol::Filter::new(field, value).ok());
        self.list(&query).await
    }

    async fn list_simple(
        &self,
        page: u32,
        size: u32,
        sort_by: SortField,
        sort_dir: SortDirection,
    ) -> ClientResult<PageResponse<BlogEntity>> {
        self.list(&ListQuery::new(page, size).sorted(sort_by, sort_dir))
            .await
    }

    async fn list_all(&self) -> ClientResult<Vec<BlogEntity>> {
        Ok(self.store.lock().expect("store").blogs.clone())
    }

    async fn generate_random(&self) -> ClientResult<BlogId> {
        self.create(&BlogDraft::new("Random", "Random body", "random"))
            .await
    }

    async fn generate_many(&self) -> ClientResult<String> {
        Ok("generated".to_string())
    }

    async fn ping(&self) -> ClientResult<String> {
        Ok("hello".to_string())
    }
}

/// Confirmation stub answering with a fixed value and counting prompts.
pub struct FixedConfirm {
    answer: bool,
    prompts: Mutex<u32>,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(0),
        }
    }

    pub fn prompts(&self) -> u32 {
        *self.prompts.lock().expect("prompts")
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        *self.prompts.lock().expect("prompts") += 1;
        self.answer
    }
}
