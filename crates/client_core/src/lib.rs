use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{BlogDraft, BlogEntity, BlogId},
    protocol::{ListQuery, PageResponse, SearchField, SortDirection, SortField},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod detail;
pub mod error;
pub mod form;
pub mod list;
pub mod pagination;
pub mod routes;
pub mod state;

pub use detail::DetailController;
pub use error::{ClientError, ClientResult};
pub use form::FormController;
pub use list::ListController;
pub use routes::Route;

pub const DEFAULT_API_URL: &str = "http://localhost:8089/api/blogs";

/// Data access for the blog resource. One call per backend capability; every
/// call yields exactly one result or one classified failure.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> ClientResult<PageResponse<BlogEntity>>;
    async fn get_by_id(&self, id: BlogId) -> ClientResult<BlogEntity>;
    async fn create(&self, draft: &BlogDraft) -> ClientResult<BlogId>;
    async fn update(&self, id: BlogId, draft: &BlogDraft) -> ClientResult<BlogId>;
    async fn delete(&self, id: BlogId) -> ClientResult<String>;
    async fn search_by_path(
        &self,
        field: SearchField,
        value: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<PageResponse<BlogEntity>>;
    async fn list_simple(
        &self,
        page: u32,
        size: u32,
        sort_by: SortField,
        sort_dir: SortDirection,
    ) -> ClientResult<PageResponse<BlogEntity>>;
    async fn list_all(&self) -> ClientResult<Vec<BlogEntity>>;
    async fn generate_random(&self) -> ClientResult<BlogId>;
    async fn generate_many(&self) -> ClientResult<String>;
    async fn ping(&self) -> ClientResult<String>;
}

/// Interactive yes/no gate in front of destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub struct HttpBlogClient {
    http: Client,
    base_url: Url,
}

impl HttpBlogClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()));
        }

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<String> {
        let response = request.send().await.map_err(|err| {
            let err = ClientError::from_transport(err);
            warn!(error = %err, "blog api: request failed before a response");
            err
        })?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_transport)?;
        if !status.is_success() {
            let err = ClientError::from_response(status, &body);
            warn!(status = status.as_u16(), error = %err, "blog api: non-success response");
            return Err(err);
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body)
            .map_err(|err| ClientError::Generic(format!("invalid response body: {err}")))
    }

    async fn get_page(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> ClientResult<PageResponse<BlogEntity>> {
        debug!(%url, ?query, "blog api: GET page");
        self.send_json(self.http.get(url).query(query)).await
    }
}

#[async_trait]
impl BlogApi for HttpBlogClient {
    async fn list(&self, query: &ListQuery) -> ClientResult<PageResponse<BlogEntity>> {
        self.get_page(self.endpoint(&[]), &query.query_pairs())
            .await
    }

    async fn get_by_id(&self, id: BlogId) -> ClientResult<BlogEntity> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        debug!(%url, blog_id = id.0, "blog api: GET blog");
        self.send_json(self.http.get(url)).await
    }

    async fn create(&self, draft: &BlogDraft) -> ClientResult<BlogId> {
        let url = self.endpoint(&[]);
        debug!(%url, "blog api: POST blog");
        let id: BlogId = self.send_json(self.http.post(url).json(draft)).await?;
        info!(blog_id = id.0, "blog api: created blog");
        Ok(id)
    }

    async fn update(&self, id: BlogId, draft: &BlogDraft) -> ClientResult<BlogId> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        debug!(%url, blog_id = id.0, "blog api: PUT blog");
        let affected: BlogId = self.send_json(self.http.put(url).json(draft)).await?;
        info!(blog_id = affected.0, "blog api: updated blog");
        Ok(affected)
    }

    async fn delete(&self, id: BlogId) -> ClientResult<String> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        debug!(%url, blog_id = id.0, "blog api: DELETE blog");
        let confirmation = self.send(self.http.delete(url)).await?;
        info!(blog_id = id.0, "blog api: deleted blog");
        Ok(confirmation)
    }

    async fn search_by_path(
        &self,
        field: SearchField,
        value: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<PageResponse<BlogEntity>> {
        let url = self.endpoint(&[field.path_segment(), value.trim()]);
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.get_page(url, &query).await
    }

    async fn list_simple(
        &self,
        page: u32,
        size: u32,
        sort_by: SortField,
        sort_dir: SortDirection,
    ) -> ClientResult<PageResponse<BlogEntity>> {
        let query = ListQuery::new(page, size).sorted(sort_by, sort_dir);
        self.get_page(self.endpoint(&["list"]), &query.query_pairs())
            .await
    }

    async fn list_all(&self) -> ClientResult<Vec<BlogEntity>> {
        let url = self.endpoint(&["all"]);
        debug!(%url, "blog api: GET all blogs");
        self.send_json(self.http.get(url)).await
    }

    async fn generate_random(&self) -> ClientResult<BlogId> {
        let url = self.endpoint(&["frasealeatoria"]);
        debug!(%url, "blog api: generate random blog");
        self.send_json(self.http.get(url)).await
    }

    async fn generate_many(&self) -> ClientResult<String> {
        let url = self.endpoint(&["generarvarios"]);
        debug!(%url, "blog api: generate many blogs");
        self.send(self.http.get(url)).await
    }

    async fn ping(&self) -> ClientResult<String> {
        let url = self.endpoint(&["saludar"]);
        debug!(%url, "blog api: ping");
        self.send(self.http.get(url)).await
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
