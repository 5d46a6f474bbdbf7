use std::fs;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};

use message_board::databases::messages::{MemoryMessageStore, MessageStore};
use message_board::routes;

#[actix_web::test]
async fn serves_index_without_shadowing_api() {
    let dir = std::env::temp_dir().join(format!("message-board-static-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.html"), "<h1>Message board</h1>").unwrap();
    let dir_str = dir.to_string_lossy().to_string();

    let store: Arc<dyn MessageStore> = Arc::new(MemoryMessageStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .configure(routes::init)
            .configure(|cfg| routes::static_files::init(cfg, &dir_str)),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "<h1>Message board</h1>".as_bytes());

    let req = test::TestRequest::get().uri("/api/messages").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete().uri("/api/messages").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    fs::remove_dir_all(&dir).ok();
}
