mod send_all_reminders;
mod send_tenant_reminders;

use actix_web::web;
use send_all_reminders::run_dispatch_controller;

pub use send_all_reminders::SendAllRemindersUseCase;
pub use send_tenant_reminders::SendTenantRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/dispatch/run", web::post().to(run_dispatch_controller));
}
