use chrono::NaiveDate;
use chrono_tz::Tz;
use pawhome_domain::{ApplicantDetails, Pet, User, ID};
use pawhome_infra::{IEmailService, ISys, InMemoryEmailService, PawContext, StaticTimeSys};
use std::sync::Arc;

/// 2024-03-10T12:00:00Z
pub const NOW: i64 = 1710072000000;

pub struct TestContext {
    pub ctx: PawContext,
    pub email: Arc<InMemoryEmailService>,
}

/// Inmemory context frozen at `NOW` with an inspectable email outbox
pub fn setup_context() -> TestContext {
    let email = Arc::new(InMemoryEmailService::new());
    let email_service: Arc<dyn IEmailService> = email.clone();
    let sys: Arc<dyn ISys> = Arc::new(StaticTimeSys { timestamp: NOW });

    let mut ctx = PawContext::create_inmemory();
    ctx.email = email_service;
    ctx.sys = sys;
    ctx.config.timezone = Tz::UTC;

    TestContext { ctx, email }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

pub async fn insert_pet(ctx: &PawContext, name: &str) -> Pet {
    let pet = Pet::new(name, "dog", Some(ID::default()));
    ctx.repos.pets.insert(&pet).await.unwrap();
    pet
}

pub async fn insert_user(ctx: &PawContext, name: &str, email: &str) -> User {
    let user = User::new(name, email);
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

pub async fn insert_foundation_member(ctx: &PawContext, pet: &Pet) -> User {
    let foundation_id = pet.foundation_id.clone().unwrap();
    let member = User::foundation_member("Rescue team", "team@rescue.org", foundation_id);
    ctx.repos.users.insert(&member).await.unwrap();
    member
}

pub fn applicant(user: &User) -> ApplicantDetails {
    ApplicantDetails {
        full_name: user.name.clone(),
        email: user.email.clone(),
        phone: "+57 300 000 0000".into(),
        address: "Calle 10 #20-30".into(),
        city: "Medellin".into(),
        housing_type: "house".into(),
        has_yard: true,
        has_other_pets: false,
        has_children: false,
        motivation: "We have plenty of room and time for a dog".into(),
    }
}
