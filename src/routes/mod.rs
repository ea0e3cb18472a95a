pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index)
        .service(health::health)
        .service(users::register)
        .service(users::login)
        .service(
            // The fixed-path routes must be registered ahead of the `{id}`
            // matchers.
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::filter_todos)
                .service(todos::download_todos)
                .service(todos::upload_todos)
                .service(todos::get_todos)
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}
