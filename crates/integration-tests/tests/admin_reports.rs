//! Report adjudication against the live store, including the
//! rejected-report deletion cascade and terminal-state enforcement.

use chrono::Utc;

use cb_core::admin::{resolve_and_apply, ReportAction};
use cb_core::engagement::submit_report;
use cb_core::error::AppError;
use cb_core::models::{Category, Report, ReportStatus};
use cb_core::submission::{prepare_post, NewPost};
use cb_core::traits::BoardStore;
use cb_store_memory::MemoryBoardStore;

async fn seed_post(store: &MemoryBoardStore) -> String {
    let draft = NewPost {
        title: "confession".to_string(),
        content: "something happened".to_string(),
        category: Category::General,
    };
    let post = prepare_post(draft, "author", Utc::now()).unwrap();
    store.insert_post(post).await.unwrap()
}

async fn seed_report(store: &MemoryBoardStore, post_id: &str) -> Report {
    let report = submit_report(post_id, "reporter", "Spam", Utc::now());
    let id = store.file_report(report).await.unwrap();
    store.get_report(&id).await.unwrap().unwrap()
}

#[tokio::test]
async fn rejection_deletes_the_post_and_closes_the_report() {
    let store = MemoryBoardStore::new();
    let post_id = seed_post(&store).await;
    let report = seed_report(&store, &post_id).await;

    resolve_and_apply(&store, &report, ReportAction::Rejected, Utc::now())
        .await
        .unwrap();

    assert!(store.get_post(&post_id).await.unwrap().is_none());
    let updated = store.get_report(&report.id).await.unwrap().unwrap();
    assert_eq!(updated.status, ReportStatus::Rejected);
    assert!(updated.admin_action.is_some());
}

#[tokio::test]
async fn approval_dismisses_and_keeps_the_post() {
    let store = MemoryBoardStore::new();
    let post_id = seed_post(&store).await;
    let report = seed_report(&store, &post_id).await;

    resolve_and_apply(&store, &report, ReportAction::Approved, Utc::now())
        .await
        .unwrap();

    assert!(store.get_post(&post_id).await.unwrap().is_some());
    let updated = store.get_report(&report.id).await.unwrap().unwrap();
    assert_eq!(updated.status, ReportStatus::Approved);
    assert!(updated.admin_action.is_some());
}

#[tokio::test]
async fn reports_outlive_their_posts() {
    let store = MemoryBoardStore::new();
    let post_id = seed_post(&store).await;
    let report = seed_report(&store, &post_id).await;

    // The author deletes the post before the admin gets to the report.
    store.delete_post(&post_id).await.unwrap();

    // Rejection still resolves cleanly; deletion is idempotent.
    resolve_and_apply(&store, &report, ReportAction::Rejected, Utc::now())
        .await
        .unwrap();
    let updated = store.get_report(&report.id).await.unwrap().unwrap();
    assert_eq!(updated.status, ReportStatus::Rejected);
}

#[tokio::test]
async fn resolved_reports_are_terminal() {
    let store = MemoryBoardStore::new();
    let post_id = seed_post(&store).await;
    let report = seed_report(&store, &post_id).await;

    resolve_and_apply(&store, &report, ReportAction::Approved, Utc::now())
        .await
        .unwrap();

    let resolved = store.get_report(&report.id).await.unwrap().unwrap();
    let err = resolve_and_apply(&store, &resolved, ReportAction::Rejected, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    // The first resolution stands.
    let still = store.get_report(&report.id).await.unwrap().unwrap();
    assert_eq!(still.status, ReportStatus::Approved);
}
