use actix_files::Files;
use actix_web::web;

/// Serve a prebuilt frontend from `dir` at the site root. Registered after
/// the API so `/api/*` keeps priority.
pub fn init(cfg: &mut web::ServiceConfig, dir: &str) {
    cfg.service(Files::new("/", dir).index_file("index.html"));
}
