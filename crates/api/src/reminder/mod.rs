mod get_reminder_settings;
mod get_unread_reminders;
mod mark_all_reminders_read;
mod mark_reminder_read;
pub mod run_reminder_scan;
mod update_reminder_settings;

use actix_web::web;
use get_reminder_settings::get_reminder_settings_controller;
use get_unread_reminders::get_unread_reminders_controller;
use mark_all_reminders_read::mark_all_reminders_read_controller;
use mark_reminder_read::mark_reminder_read_controller;
use run_reminder_scan::run_reminder_scan_controller;
use update_reminder_settings::update_reminder_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/scan", web::post().to(run_reminder_scan_controller));
    cfg.route("/reminders", web::get().to(get_unread_reminders_controller));
    cfg.route(
        "/reminders/read",
        web::put().to(mark_all_reminders_read_controller),
    );
    cfg.route(
        "/reminders/settings",
        web::get().to(get_reminder_settings_controller),
    );
    cfg.route(
        "/reminders/settings",
        web::put().to(update_reminder_settings_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/read",
        web::put().to(mark_reminder_read_controller),
    );
}
