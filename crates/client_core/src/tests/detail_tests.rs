use std::sync::Arc;

use super::*;
use crate::{
    error::ClientError,
    test_support::{Call, FakeBlogApi, FixedConfirm},
};

#[tokio::test]
async fn activate_loads_the_blog() {
    let api = Arc::new(FakeBlogApi::with_blogs(3));
    let mut detail = DetailController::new(api.clone());

    detail.activate(BlogId(2)).await;

    let blog = detail.blog().expect("blog");
    assert_eq!(blog.title, "Post 2");
    assert_eq!(api.calls(), vec![Call::Get(BlogId(2))]);
}

#[tokio::test]
async fn missing_blog_shows_not_found() {
    let api = Arc::new(FakeBlogApi::with_blogs(1));
    let mut detail = DetailController::new(api);

    detail.activate(BlogId(99)).await;

    assert_eq!(detail.error(), Some("Blog not found"));
    assert!(detail.blog().is_none());
}

#[tokio::test]
async fn delete_navigates_to_list_after_confirmation() {
    let api = Arc::new(FakeBlogApi::with_blogs(2));
    let mut detail = DetailController::new(api.clone());
    detail.activate(BlogId(1)).await;

    let route = detail.delete(&FixedConfirm::new(true)).await;

    assert_eq!(route, Some(Route::BlogList));
    assert_eq!(api.ids(), vec![2]);
}

#[tokio::test]
async fn declined_delete_stays_and_sends_nothing() {
    let api = Arc::new(FakeBlogApi::with_blogs(2));
    let mut detail = DetailController::new(api.clone());
    detail.activate(BlogId(1)).await;

    assert_eq!(detail.delete(&FixedConfirm::new(false)).await, None);
    assert!(detail.blog().is_some());
    assert_eq!(api.ids(), vec![1, 2]);
}

#[tokio::test]
async fn delete_without_a_loaded_blog_is_a_no_op() {
    let api = Arc::new(FakeBlogApi::with_blogs(1));
    let mut detail = DetailController::new(api.clone());
    let confirm = FixedConfirm::new(true);

    assert_eq!(detail.delete(&confirm).await, None);
    assert_eq!(confirm.prompts(), 0);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn failed_delete_surfaces_error() {
    let api = Arc::new(FakeBlogApi::with_blogs(1));
    let mut detail = DetailController::new(api.clone());
    detail.activate(BlogId(1)).await;
    api.fail_next(ClientError::Generic("HTTP 500".into()));

    assert_eq!(detail.delete(&FixedConfirm::new(true)).await, None);
    assert_eq!(
        detail.error(),
        Some("Failed to delete blog: HTTP 500")
    );
    assert_eq!(detail.blog().map(|blog| blog.title.as_str()), Some("Post 1"));
}

#[tokio::test]
async fn delete_can_be_retried_after_a_failure() {
    let api = Arc::new(FakeBlogApi::with_blogs(1));
    let mut detail = DetailController::new(api.clone());
    detail.activate(BlogId(1)).await;
    api.fail_next(ClientError::Generic("HTTP 500".into()));
    assert_eq!(detail.delete(&FixedConfirm::new(true)).await, None);

    let confirm = FixedConfirm::new(true);
    let route = detail.delete(&confirm).await;

    assert_eq!(route, Some(Route::BlogList));
    assert_eq!(confirm.prompts(), 1);
    assert!(detail.error().is_none());
    assert!(api.ids().is_empty());
}

#[test]
fn go_back_returns_to_list_without_network() {
    let api = Arc::new(FakeBlogApi::default());
    let detail = DetailController::new(api.clone());

    assert_eq!(detail.go_back(), Route::BlogList);
    assert!(api.calls().is_empty());
}
