use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use chrono_tz::Tz;
use pawhome_api::configure_server_api;
use pawhome_infra::{IEmailService, ISys, InMemoryEmailService, PawContext, StaticTimeSys};
use std::sync::Arc;

/// 2024-03-10T12:00:00Z
pub const NOW: i64 = 1710072000000;

pub struct TestApp {
    pub ctx: PawContext,
    pub email: Arc<InMemoryEmailService>,
}

// Inmemory repositories, a frozen clock and an inspectable email outbox
pub fn spawn_context() -> TestApp {
    let email = Arc::new(InMemoryEmailService::new());
    let email_service: Arc<dyn IEmailService> = email.clone();
    let sys: Arc<dyn ISys> = Arc::new(StaticTimeSys { timestamp: NOW });

    let mut ctx = PawContext::create_inmemory();
    ctx.email = email_service;
    ctx.sys = sys;
    ctx.config.timezone = Tz::UTC;

    TestApp { ctx, email }
}

pub fn create_app(
    ctx: &PawContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ctx.clone()))
        .service(web::scope("/api/v1").configure(configure_server_api))
}
