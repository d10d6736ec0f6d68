//! # Admin Report Resolver
//!
//! Report adjudication state machine:
//! `pending --approved--> approved` (report dismissed, post untouched),
//! `pending --rejected--> rejected` (post deleted, then report closed).
//! Terminal states are final; both branches stamp `admin_action`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Report, ReportPatch, ReportStatus};
use crate::traits::BoardStore;

/// Admin decision on a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Approved,
    Rejected,
}

/// The writes a resolution implies. Produced by the pure transition,
/// applied against the store by [`resolve_and_apply`].
#[derive(Debug, Clone)]
pub struct Resolution {
    pub report_patch: ReportPatch,
    /// Post to delete when the report is rejected.
    pub delete_post: Option<String>,
}

/// Pure transition. Verifies the report is still pending; anything else
/// is an `InvalidTransition`.
pub fn resolve_report(
    report: &Report,
    action: ReportAction,
    now: DateTime<Utc>,
) -> Result<Resolution> {
    if report.status.is_terminal() {
        return Err(AppError::InvalidTransition(format!(
            "report {} already resolved",
            report.id
        )));
    }

    let (status, delete_post) = match action {
        ReportAction::Approved => (ReportStatus::Approved, None),
        ReportAction::Rejected => (ReportStatus::Rejected, Some(report.post_id.clone())),
    };

    Ok(Resolution {
        report_patch: ReportPatch {
            status: Some(status),
            admin_action: Some(now),
        },
        delete_post,
    })
}

/// Resolves a report and applies the outcome to the store. The post is
/// removed before the report is closed; deletion is idempotent, so a
/// report against an already-gone post still resolves cleanly.
pub async fn resolve_and_apply(
    store: &dyn BoardStore,
    report: &Report,
    action: ReportAction,
    now: DateTime<Utc>,
) -> Result<()> {
    let resolution = resolve_report(report, action, now)?;

    if let Some(post_id) = &resolution.delete_post {
        store.delete_post(post_id).await?;
    }
    store.patch_report(&report.id, resolution.report_patch).await
}
