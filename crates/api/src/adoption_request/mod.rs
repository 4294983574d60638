mod delete_adoption_request;
mod get_adoption_request;
mod get_foundation_adoption_requests;
mod get_my_adoption_requests;
pub mod set_adoption_request_status;
pub mod submit_adoption_request;

use actix_web::web;
use delete_adoption_request::delete_adoption_request_controller;
use get_adoption_request::get_adoption_request_controller;
use get_foundation_adoption_requests::get_foundation_adoption_requests_controller;
use get_my_adoption_requests::get_my_adoption_requests_controller;
use pawhome_domain::{AdoptionRequest, User};
use set_adoption_request_status::set_adoption_request_status_controller;
use submit_adoption_request::submit_adoption_request_controller;

/// Requests are visible to the applicant and to members of the foundation handling it
fn is_visible_to(request: &AdoptionRequest, user: &User) -> bool {
    request.user_id.as_ref() == Some(&user.id)
        || user.foundation_id.as_ref() == Some(&request.foundation_id)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/adoption-requests",
        web::post().to(submit_adoption_request_controller),
    );
    cfg.route(
        "/adoption-requests",
        web::get().to(get_my_adoption_requests_controller),
    );
    cfg.route(
        "/foundation/adoption-requests",
        web::get().to(get_foundation_adoption_requests_controller),
    );
    cfg.route(
        "/adoption-requests/{request_id}",
        web::get().to(get_adoption_request_controller),
    );
    cfg.route(
        "/adoption-requests/{request_id}",
        web::delete().to(delete_adoption_request_controller),
    );
    cfg.route(
        "/adoption-requests/{request_id}/status",
        web::put().to(set_adoption_request_status_controller),
    );
}
