use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::ticket::DieselTicketRepository;
use crate::routes::error_response;
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match main_service::load_dashboard(repo.get_ref(), &user) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response("Failed to load dashboard", &e),
    }
}
