use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::api::{
    AttachmentUpload, ClientsQuery, DeleteOutcome, StatusUpdate, TicketSubmission, TicketsQuery,
};
use crate::repository::ticket::DieselTicketRepository;
use crate::routes::error_response;
use crate::services::{clients, tickets};

#[get("/clients")]
pub async fn api_clients(
    params: web::Query<ClientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    let query = params.into_inner();
    match clients::list_clients(repo.get_ref(), &user, query.q.as_deref().unwrap_or("")) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(e) => error_response("Failed to list clients", &e),
    }
}

#[get("/clients/{email}/tickets")]
pub async fn api_client_tickets(
    email: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match clients::list_client_tickets(repo.get_ref(), &user, &email.into_inner()) {
        Ok(tickets) => HttpResponse::Ok().json(tickets),
        Err(e) => error_response("Failed to list client tickets", &e),
    }
}

#[delete("/clients/{email}")]
pub async fn api_delete_client(
    email: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match clients::delete_client(repo.get_ref(), &user, &email.into_inner()) {
        Ok(deleted) => HttpResponse::Ok().json(DeleteOutcome { deleted }),
        Err(e) => error_response("Failed to delete client", &e),
    }
}

#[get("/tickets")]
pub async fn api_tickets(
    params: web::Query<TicketsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::list_tickets(repo.get_ref(), &user, params.into_inner()) {
        Ok(tickets) => HttpResponse::Ok().json(tickets),
        Err(e) => error_response("Failed to list tickets", &e),
    }
}

#[post("/tickets")]
pub async fn api_submit_ticket(
    payload: web::Json<TicketSubmission>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::submit_ticket(repo.get_ref(), &user, payload.into_inner()) {
        Ok(_) => HttpResponse::Created().finish(),
        Err(e) => error_response("Failed to submit ticket", &e),
    }
}

#[get("/tickets/{id}")]
pub async fn api_ticket(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::get_ticket(repo.get_ref(), &user, &id.into_inner()) {
        Ok(ticket) => HttpResponse::Ok().json(ticket),
        Err(e) => error_response("Failed to get ticket", &e),
    }
}

#[patch("/tickets/{id}/status")]
pub async fn api_set_ticket_status(
    id: web::Path<String>,
    payload: web::Json<StatusUpdate>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::set_ticket_status(repo.get_ref(), &user, &id.into_inner(), payload.into_inner())
    {
        Ok(ticket) => HttpResponse::Ok().json(ticket),
        Err(e) => error_response("Failed to update ticket status", &e),
    }
}

#[delete("/tickets/{id}")]
pub async fn api_delete_ticket(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::delete_ticket(repo.get_ref(), &user, &id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("Failed to delete ticket", &e),
    }
}

#[post("/tickets/{id}/attachments")]
pub async fn api_append_attachment(
    id: web::Path<String>,
    payload: web::Json<AttachmentUpload>,
    user: AuthenticatedUser,
    repo: web::Data<DieselTicketRepository>,
) -> impl Responder {
    match tickets::append_ticket_attachment(
        repo.get_ref(),
        &user,
        &id.into_inner(),
        payload.into_inner(),
    ) {
        Ok(ticket) => HttpResponse::Ok().json(ticket),
        Err(e) => error_response("Failed to append attachment", &e),
    }
}
