// File: src/routes.rs
// Purpose: HTTP handlers rendering the sample form

use crate::config::{AssetsConfig, Config};
use crate::sample_form::parsley_test_form;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use maud::{html, Markup, DOCTYPE};
use parsley_forms::{Form, FormData};
use std::sync::Arc;
use tracing::{debug, error};

pub const FORM_PATH: &str = "/parsley_testform";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route(FORM_PATH, get(form_handler).post(form_handler))
        .with_state(state)
}

async fn index_handler() -> Redirect {
    Redirect::to(FORM_PATH)
}

async fn form_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut form = match parsley_test_form() {
        Ok(form) => form,
        Err(e) => {
            error!("Failed to build sample form: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Form Error", &e.to_string());
        }
    };

    let submitted = method == Method::POST;
    if submitted {
        let data = if is_urlencoded(&headers) {
            FormData::from_urlencoded(&String::from_utf8_lossy(&body))
        } else {
            FormData::new()
        };
        debug!(fields = data.len(), "form submitted");
        form.process(&data);
    }

    // Content negotiation: JSON response with the generated attributes
    if accepts_json(&headers) {
        return Json(form.attribute_maps()).into_response();
    }

    Html(render_page(&form, &state.config.assets, submitted).into_string()).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    header_str(headers, header::CONTENT_TYPE)
        .map(|ct| ct.contains("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn accepts_json(headers: &HeaderMap) -> bool {
    header_str(headers, header::ACCEPT)
        .map(|accept| accept.contains("json"))
        .unwrap_or(false)
}

fn render_page(form: &Form, assets: &AssetsConfig, submitted: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Parsley.js Form Sample" }
                script src=(assets.jquery_url) {}
                script src=(assets.parsley_url) {}
            }
            body {
                h1 { "Parsley.js Form Sample" }
                @if submitted {
                    p class="notice" { "Form submitted." }
                }
                form method="post" action=(FORM_PATH) data-validate="parsley" {
                    @for field in form.fields() {
                        div class="field" {
                            (field.render_label())
                            (field)
                        }
                    }
                    input type="submit" value="Submit";
                }
            }
        }
    }
}

fn error_response(status: StatusCode, title: &str, message: &str) -> Response {
    let markup = html! {
        (DOCTYPE)
        html {
            head { title { (title) } }
            body {
                h1 { (status.as_u16()) " " (title) }
                p { (message) }
                a href=(FORM_PATH) { "Back to the form" }
            }
        }
    };
    (status, Html(markup.into_string())).into_response()
}
