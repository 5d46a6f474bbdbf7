pub mod messages;
pub mod static_files;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    messages::init(cfg);
}
