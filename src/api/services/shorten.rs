use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::errors::ShortlnkError;
use crate::storage::{LinkStore, NewLink};
use crate::utils::short_hash;

const LANDING_TEXT: &str = "\
Hello, this project is a preview of the shortlnk project.
a full version will be released soon.
this project is open source and you can find it on github.
is a simple url shortener.
";

#[derive(Debug, Deserialize)]
struct CreateRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    url: String,
    id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    views: u64,
}

pub struct ShortenService {}

impl ShortenService {
    pub async fn landing() -> impl Responder {
        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(LANDING_TEXT)
    }

    pub async fn handle_create(
        body: web::Bytes,
        store: web::Data<Arc<dyn LinkStore>>,
    ) -> Result<HttpResponse, ShortlnkError> {
        if body.is_empty() {
            return Err(ShortlnkError::validation("Bad request"));
        }

        let request: CreateRequest = serde_json::from_slice(&body)
            .map_err(|_| ShortlnkError::validation("Bad request"))?;

        let url = match request.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ShortlnkError::validation("Missing url field")),
        };

        // Existence check by exact url equality. Not transactional with the
        // insert below: two concurrent creations of the same url can both
        // pass this check and both insert. Accepted weakness; a stronger
        // variant would put a unique constraint on `url` and map the
        // violation to this same response.
        match store.count_by_url(&url).await {
            Ok(0) => {}
            Ok(_) => return Err(ShortlnkError::already_exists("Url already exists")),
            Err(e) => {
                error!("Database error during url existence check: {}", e);
                return Err(e);
            }
        }

        let new_link = NewLink {
            hash: short_hash(&url),
            url,
            created_at: Utc::now(),
        };

        match store.insert(new_link).await {
            Ok(link) => Ok(HttpResponse::Ok().json(CreateResponse {
                url: link.url,
                id: link.id,
                created_at: link.created_at,
                views: link.views,
            })),
            // Creation failure keeps its own response text instead of the
            // generic database-error body.
            Err(e) => {
                error!("Failed to create link: {}", e);
                Ok(HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                    .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                    .body("Cannot create link"))
            }
        }
    }
}

/// Root route configuration: landing page and link creation.
pub fn shorten_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(ShortenService::landing))
        .route("/", web::post().to(ShortenService::handle_create));
}
