//! # cb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and core
//! operations: validation and moderation on the way in, feed
//! composition on the way out, admin gating on the report endpoints.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use cb_core::admin::{resolve_and_apply, ReportAction};
use cb_core::error::AppError;
use cb_core::models::{Category, CategorySelection, RankingMode, ReportStatus};
use cb_core::traits::{AuthProvider, BoardStore};
use cb_core::{engagement, feed, stats, submission};

/// The feed returns at most this many posts unless the client asks
/// for fewer.
const DEFAULT_FEED_LIMIT: usize = 50;

/// State shared across all workers.
pub struct AppState {
    pub store: Arc<dyn BoardStore>,
    pub auth: Arc<dyn AuthProvider>,
    /// Argon2 hash of the admin password. `None` disables the admin
    /// endpoints entirely.
    pub admin_password_hash: Option<String>,
}

/// Maps core errors onto HTTP responses. Submission failures carry the
/// specific reason; everything else gets the variant's own message.
fn error_response(err: AppError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        AppError::ValidationError(_) | AppError::ModerationRejected(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AppError::Unauthorized(_) => HttpResponse::Forbidden().json(body),
        AppError::NotFound(_, _) => HttpResponse::NotFound().json(body),
        AppError::InvalidTransition(_) => HttpResponse::Conflict().json(body),
        AppError::StoreUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
    }
}

async fn require_admin(req: &HttpRequest, data: &AppState) -> Result<(), HttpResponse> {
    let Some(hash) = data.admin_password_hash.as_deref() else {
        return Err(error_response(AppError::Unauthorized(
            "admin access is not configured".to_string(),
        )));
    };
    let password = req
        .headers()
        .get("x-admin-password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if password.is_empty() || !data.auth.verify_admin_password(password, hash).await {
        return Err(error_response(AppError::Unauthorized(
            "invalid admin credentials".to_string(),
        )));
    }
    Ok(())
}

/// Issues a fresh anonymous session identity.
pub async fn create_session(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let client_key = req
        .peer_addr()
        .map(|a| a.ip().to_string())
        .unwrap_or_default();
    let id = data.auth.generate_session_id(&client_key);
    HttpResponse::Ok().json(serde_json::json!({ "anonymousUserId": id }))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub sort: Option<String>,
    /// Comma-separated category slugs; "all" or absent means no filter.
    pub categories: Option<String>,
    pub limit: Option<usize>,
}

/// The live feed: expiry filter, then category selection and ranking.
pub async fn list_posts(data: web::Data<AppState>, query: web::Query<FeedQuery>) -> HttpResponse {
    let posts = match data.store.list_posts().await {
        Ok(posts) => posts,
        Err(err) => return error_response(err),
    };

    let now = Utc::now();
    let live = feed::filter_live(&posts, now);
    let selection = match query.categories.as_deref() {
        Some(raw) => CategorySelection::from_slugs(raw.split(',')),
        None => CategorySelection::All,
    };
    let mode = query
        .sort
        .as_deref()
        .map(RankingMode::parse)
        .unwrap_or_default();

    let mut composed = feed::compose_feed(&live, &selection, mode, now);
    composed.truncate(query.limit.unwrap_or(DEFAULT_FEED_LIMIT));
    HttpResponse::Ok().json(composed)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPost {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub anonymous_user_id: Option<String>,
}

pub async fn create_post(
    data: web::Data<AppState>,
    payload: web::Json<SubmitPost>,
) -> HttpResponse {
    let payload = payload.into_inner();
    let author = payload.anonymous_user_id.unwrap_or_default();
    // Unrecognized or absent categories fall back to "general".
    let category = payload
        .category
        .as_deref()
        .and_then(Category::from_slug)
        .unwrap_or_default();

    let draft = submission::NewPost {
        title: payload.title,
        content: payload.content,
        category,
    };
    let mut post = match submission::prepare_post(draft, &author, Utc::now()) {
        Ok(post) => post,
        Err(err) => return error_response(err),
    };

    match data.store.insert_post(post.clone()).await {
        Ok(id) => {
            post.id = id;
            log::info!("post {} created in {}", post.id, post.category.as_slug());
            HttpResponse::Created().json(post)
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorPayload {
    pub anonymous_user_id: String,
}

/// Owner-only deletion; admins go through the report resolver instead.
pub async fn delete_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ActorPayload>,
) -> HttpResponse {
    let id = path.into_inner();
    let post = match data.store.get_post(&id).await {
        Ok(Some(post)) => post,
        Ok(None) => return error_response(AppError::NotFound("post".to_string(), id)),
        Err(err) => return error_response(err),
    };

    if post.anonymous_user_id != payload.anonymous_user_id {
        return error_response(AppError::Unauthorized(
            "you can only delete your own posts".to_string(),
        ));
    }

    match data.store.delete_post(&id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "post deleted" })),
        Err(err) => error_response(err),
    }
}

pub async fn toggle_like(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ActorPayload>,
) -> HttpResponse {
    let id = path.into_inner();
    let post = match data.store.get_post(&id).await {
        Ok(Some(post)) => post,
        Ok(None) => return error_response(AppError::NotFound("post".to_string(), id)),
        Err(err) => return error_response(err),
    };

    let patch = engagement::toggle_like(&post, &payload.anonymous_user_id);
    if let Err(err) = data.store.patch_post(&id, patch).await {
        return error_response(err);
    }

    match data.store.get_post(&id).await {
        Ok(Some(updated)) => HttpResponse::Ok().json(updated),
        Ok(None) => error_response(AppError::NotFound("post".to_string(), id)),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub anonymous_user_id: String,
    pub reason: String,
}

/// Files a pending report. The post id is kept as a weak reference;
/// the post may expire or be deleted before an admin gets to it.
pub async fn report_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ReportPayload>,
) -> HttpResponse {
    if payload.anonymous_user_id.is_empty() {
        return error_response(AppError::ValidationError(
            "anonymous user id is required".to_string(),
        ));
    }

    let mut report = engagement::submit_report(
        &path.into_inner(),
        &payload.anonymous_user_id,
        &payload.reason,
        Utc::now(),
    );
    match data.store.file_report(report.clone()).await {
        Ok(id) => {
            report.id = id;
            HttpResponse::Created().json(report)
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub status: Option<ReportStatus>,
}

pub async fn list_reports(
    data: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ReportQuery>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&req, &data).await {
        return resp;
    }

    match data.store.list_reports().await {
        Ok(reports) => {
            let filtered: Vec<_> = match query.status {
                Some(status) => reports.into_iter().filter(|r| r.status == status).collect(),
                None => reports,
            };
            HttpResponse::Ok().json(filtered)
        }
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolvePayload {
    pub action: ReportAction,
}

pub async fn resolve_report(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<ResolvePayload>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&req, &data).await {
        return resp;
    }

    let id = path.into_inner();
    let report = match data.store.get_report(&id).await {
        Ok(Some(report)) => report,
        Ok(None) => return error_response(AppError::NotFound("report".to_string(), id)),
        Err(err) => return error_response(err),
    };

    if let Err(err) = resolve_and_apply(&*data.store, &report, payload.action, Utc::now()).await {
        return error_response(err);
    }
    log::info!("report {} resolved as {:?}", report.id, payload.action);

    match data.store.get_report(&id).await {
        Ok(Some(updated)) => HttpResponse::Ok().json(updated),
        Ok(None) => error_response(AppError::NotFound("report".to_string(), id)),
        Err(err) => error_response(err),
    }
}

pub async fn analytics(data: web::Data<AppState>) -> HttpResponse {
    let posts = match data.store.list_posts().await {
        Ok(posts) => posts,
        Err(err) => return error_response(err),
    };
    let reports = match data.store.list_reports().await {
        Ok(reports) => reports,
        Err(err) => return error_response(err),
    };
    HttpResponse::Ok().json(stats::board_stats(&posts, &reports, Utc::now()))
}
