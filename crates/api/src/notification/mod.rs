pub mod fan_out;
mod get_my_notifications;
mod mark_notification_read;
pub mod templates;

use actix_web::web;
use get_my_notifications::get_my_notifications_controller;
use mark_notification_read::mark_notification_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(get_my_notifications_controller));
    cfg.route(
        "/notifications/{notification_id}/read",
        web::put().to(mark_notification_read_controller),
    );
}
