use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use todo_api::config::Config;
use todo_api::csv::UploadDir;
use todo_api::routes;
use todo_api::store::{PgStore, TodoStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    let store = Arc::new(PgStore::new(pool));
    let todo_store: Arc<dyn TodoStore> = store.clone();
    let user_store: Arc<dyn UserStore> = store;
    let upload_dir = config.upload_dir.clone();

    log::info!("Starting todo API server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(todo_store.clone()))
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::new(UploadDir(upload_dir.clone())))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
