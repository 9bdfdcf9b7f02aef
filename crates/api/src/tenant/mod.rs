mod add_benefit;
mod create_tenant;
mod get_tenant;
mod set_reminder_settings;
mod set_reminder_template;

use actix_web::web;
use add_benefit::add_benefit_controller;
use create_tenant::create_tenant_controller;
use get_tenant::get_tenant_controller;
use set_reminder_settings::set_reminder_settings_controller;
use set_reminder_template::set_reminder_template_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tenant", web::post().to(create_tenant_controller));
    cfg.route("/tenant/{tenant_id}", web::get().to(get_tenant_controller));
    cfg.route(
        "/tenant/{tenant_id}/reminder-settings",
        web::put().to(set_reminder_settings_controller),
    );
    cfg.route(
        "/tenant/{tenant_id}/template",
        web::put().to(set_reminder_template_controller),
    );
    cfg.route(
        "/tenant/{tenant_id}/benefit",
        web::post().to(add_benefit_controller),
    );
}
