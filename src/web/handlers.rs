use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::forms::{CommentForm, FieldError, LoginForm, PostForm};
use crate::models::{Comment, Post};
use crate::Result;

use super::session::{AuthUser, SESSION_COOKIE, SESSION_TTL_DAYS};
use super::AppState;

#[derive(Template)]
#[template(path = "post_list.html")]
struct PostListTemplate {
    posts: Vec<Post>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
struct PostDetailTemplate {
    post: Post,
    comments: Vec<Comment>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "post_form.html")]
struct PostFormTemplate {
    heading: &'static str,
    action: String,
    form: PostForm,
    errors: Vec<FieldError>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "post_confirm_delete.html")]
struct PostConfirmDeleteTemplate {
    post: Post,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "post_draft_list.html")]
struct DraftListTemplate {
    posts: Vec<Post>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "comment_form.html")]
struct CommentFormTemplate {
    post: Post,
    form: CommentForm,
    errors: Vec<FieldError>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    next: String,
    error: Option<&'static str>,
    logged_in: bool,
}

fn post_detail_url(id: Uuid) -> String {
    format!("/posts/{}", id)
}

// Only same-site return targets are honored.
fn sanitize_next(next: Option<String>) -> String {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

// Posts

pub async fn post_list(
    State(state): State<Arc<AppState>>,
    user: Option<AuthUser>,
) -> Result<Response> {
    let posts = state.repo.list_published(Utc::now()).await?;

    let template = PostListTemplate {
        posts,
        logged_in: user.is_some(),
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn post_detail(
    State(state): State<Arc<AppState>>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let post = state.repo.get_post(id).await?;
    let comments = state.repo.comments_for_post(id).await?;

    let template = PostDetailTemplate {
        post,
        comments,
        logged_in: user.is_some(),
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn draft_list(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
) -> Result<Response> {
    let posts = state.repo.list_drafts().await?;

    let template = DraftListTemplate {
        posts,
        logged_in: true,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn post_new_form(AuthUser(_user): AuthUser) -> Result<Response> {
    let template = PostFormTemplate {
        heading: "New post",
        action: "/posts/new".to_string(),
        form: PostForm::default(),
        errors: Vec::new(),
        logged_in: true,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn post_create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        let template = PostFormTemplate {
            heading: "New post",
            action: "/posts/new".to_string(),
            form,
            errors,
            logged_in: true,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let post = state.repo.create_post(user.id, &form).await?;
    tracing::debug!("Created post {}", post.id);

    Ok(Redirect::to(&post_detail_url(post.id)).into_response())
}

pub async fn post_edit_form(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let post = state.repo.get_post(id).await?;

    let template = PostFormTemplate {
        heading: "Edit post",
        action: format!("/posts/{}/edit", post.id),
        form: PostForm {
            title: post.title,
            text: post.text,
        },
        errors: Vec::new(),
        logged_in: true,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn post_update(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        let template = PostFormTemplate {
            heading: "Edit post",
            action: format!("/posts/{}/edit", id),
            form,
            errors,
            logged_in: true,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let post = state.repo.update_post(id, &form).await?;

    Ok(Redirect::to(&post_detail_url(post.id)).into_response())
}

pub async fn post_delete_confirm(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let post = state.repo.get_post(id).await?;

    let template = PostConfirmDeleteTemplate {
        post,
        logged_in: true,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn post_delete(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.repo.delete_post(id).await?;
    tracing::debug!("Deleted post {}", id);

    Ok(Redirect::to("/").into_response())
}

pub async fn post_publish(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let post = state.repo.publish_post(id, Utc::now()).await?;
    tracing::debug!("Published post {}", post.id);

    Ok(Redirect::to(&post_detail_url(post.id)).into_response())
}

// Comments

pub async fn comment_form(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Response> {
    let post = state.repo.get_post(post_id).await?;

    let template = CommentFormTemplate {
        post,
        form: CommentForm::default(),
        errors: Vec::new(),
        logged_in: true,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn comment_add(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(post_id): Path<Uuid>,
    Form(form): Form<CommentForm>,
) -> Result<Response> {
    // The parent must exist before the submission is even considered.
    let post = state.repo.get_post(post_id).await?;

    let errors = form.validate();
    if !errors.is_empty() {
        let template = CommentFormTemplate {
            post,
            form,
            errors,
            logged_in: true,
        };
        return Ok(Html(template.render()?).into_response());
    }

    state.repo.create_comment(post.id, &form).await?;

    Ok(Redirect::to(&post_detail_url(post.id)).into_response())
}

pub async fn comment_approve(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let comment = state.repo.approve_comment(id).await?;

    Ok(Redirect::to(&post_detail_url(comment.post_id)).into_response())
}

pub async fn comment_remove(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let post_id = state.repo.delete_comment(id).await?;

    Ok(Redirect::to(&post_detail_url(post_id)).into_response())
}

// Accounts

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

pub async fn login_form(Query(query): Query<LoginQuery>) -> Result<Response> {
    let template = LoginTemplate {
        next: sanitize_next(query.next),
        error: None,
        logged_in: false,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = sanitize_next(form.next.clone());

    let user = state.repo.user_by_username(&form.username).await?;
    let verified = match &user {
        Some(user) => AuthService::verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::debug!("Failed login attempt for {:?}", form.username);
        let template = LoginTemplate {
            next,
            error: Some("Invalid username or password"),
            logged_in: false,
        };
        return Ok(Html(template.render()?).into_response());
    };

    let token = AuthService::generate_session_token();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    state.repo.create_session(user.id, &token, expires_at).await?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    tracing::info!("User {} logged in", user.username);
    Ok(Redirect::to(&next).into_response())
}

pub async fn logout(State(state): State<Arc<AppState>>, cookies: Cookies) -> Result<Response> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.repo.delete_session(cookie.value()).await?;
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Ok(Redirect::to("/").into_response())
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
