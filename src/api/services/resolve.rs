use actix_web::http::StatusCode;
use actix_web::http::header::{Accept, Header, Quality};
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::ShortlnkError;
use crate::storage::{Link, LinkStore};
use crate::views::get_view_counter;

/// How the caller wants the resolution answered, decided once per request
/// from the Accept header before branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Browser-renderable: 301 redirect to the stored URL.
    Html,
    /// Structured payload containing the URL.
    Json,
}

/// Pick between the HTML and JSON representations the way Express
/// `req.accepts(['html', 'json'])` does: acceptable media ranges are ranked
/// by quality (header order breaks ties), and the first range matching
/// either representation wins. A full wildcard picks HTML, the first
/// offered representation. No Accept header means HTML; an Accept header
/// matching neither representation falls through to JSON.
pub fn negotiate(req: &HttpRequest) -> ResponseFormat {
    let accept = match Accept::parse(req) {
        Ok(accept) => accept,
        Err(_) => return ResponseFormat::Html,
    };
    if accept.is_empty() {
        return ResponseFormat::Html;
    }

    let mut ranked: Vec<_> = accept
        .iter()
        .filter(|item| item.quality > Quality::ZERO)
        .collect();
    // sort_by is stable, so equal qualities keep the header's order
    ranked.sort_by(|a, b| b.quality.cmp(&a.quality));

    for item in ranked {
        let mime = &item.item;
        match (mime.type_().as_str(), mime.subtype().as_str()) {
            ("text", "html") | ("text", "*") | ("*", "*") => return ResponseFormat::Html,
            ("application", "json") | ("application", "*") => return ResponseFormat::Json,
            _ => continue,
        }
    }

    ResponseFormat::Json
}

pub struct ResolveService {}

impl ResolveService {
    pub async fn handle_resolve(
        req: HttpRequest,
        path: web::Path<String>,
        store: web::Data<Arc<dyn LinkStore>>,
    ) -> Result<HttpResponse, ShortlnkError> {
        let hash = path.into_inner();

        // Browser favicon probing noise; never reaches the store.
        if hash == "favicon.ico" {
            return Err(ShortlnkError::not_found("Not found"));
        }

        match store.find_by_hash(&hash).await {
            Ok(Some(link)) => {
                Self::record_view(&link.hash);
                Ok(Self::finish_resolve(&req, link))
            }
            Ok(None) => {
                debug!("Link not found: {}", hash);
                Err(ShortlnkError::not_found("Not found"))
            }
            Err(e) => {
                error!("Database error during resolve lookup: {}", e);
                Err(e)
            }
        }
    }

    /// Record one view without blocking the response path. The counter
    /// buffers in memory and persists later; failures there are logged and
    /// never surface here.
    #[inline]
    fn record_view(hash: &str) {
        match get_view_counter() {
            Some(counter) => counter.increment(hash),
            None => {
                debug!("View counter not initialized, skipping increment for {}", hash);
            }
        }
    }

    fn finish_resolve(req: &HttpRequest, link: Link) -> HttpResponse {
        match negotiate(req) {
            ResponseFormat::Html => HttpResponse::build(StatusCode::MOVED_PERMANENTLY)
                .insert_header(("Location", link.url))
                .finish(),
            ResponseFormat::Json => {
                HttpResponse::Ok().json(serde_json::json!({ "url": link.url }))
            }
        }
    }
}

/// Resolution route configuration. Registered after the root routes so a
/// bare `/` never reaches the hash matcher.
pub fn resolve_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{hash}", web::get().to(ResolveService::handle_resolve))
        .route("/{hash}", web::head().to(ResolveService::handle_resolve));
}
