#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};

#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::ticket::DieselTicketRepository;
#[cfg(feature = "server")]
use crate::routes::api::{
    api_append_attachment, api_client_tickets, api_clients, api_delete_client, api_delete_ticket,
    api_set_ticket_status, api_submit_ticket, api_ticket, api_tickets,
};
#[cfg(feature = "server")]
use crate::routes::main::show_index;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

/// Role granting read and status-update access to the ticket surface.
pub const SERVICE_ACCESS_ROLE: &str = "helpdesk";
/// Role additionally granting the destructive deletes.
pub const SERVICE_ADMIN_ROLE: &str = "helpdesk_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselTicketRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(api_clients)
                    .service(api_client_tickets)
                    .service(api_delete_client)
                    .service(api_tickets)
                    .service(api_submit_ticket)
                    .service(api_ticket)
                    .service(api_set_ticket_status)
                    .service(api_delete_ticket)
                    .service(api_append_attachment),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
