use crate::error::PawError;
use crate::notification::templates::reminder_digest_email;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use itertools::Itertools;
use pawhome_api_structs::run_reminder_scan::*;
use pawhome_domain::{
    find_due_care_events, AdoptionRequestStatus, Reminder, ReminderSettings, User, ID,
};
use pawhome_infra::PawContext;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use tracing::{info, warn};

pub async fn run_reminder_scan_controller(
    http_req: HttpRequest,
    ctx: web::Data<PawContext>,
) -> Result<HttpResponse, PawError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = RunReminderScanUseCase {};
    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                pets_processed: report.pets_processed,
                reminders_created: report.reminders_created,
                emails_sent: report.emails_sent,
                errors: report.errors.len(),
                error_messages: report.errors,
            })
        })
        .map_err(|e: Infallible| -> PawError { match e {} })
}

/// Statistics of a single scan
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReminderScanReport {
    pub pets_processed: usize,
    pub reminders_created: usize,
    pub emails_sent: usize,
    pub errors: Vec<String>,
}

impl ReminderScanReport {
    fn record_error(&mut self, error: String) {
        warn!("Reminder scan: {}", error);
        self.errors.push(error);
    }
}

struct Recipient {
    user: User,
    settings: ReminderSettings,
}

/// Creates the care reminders of every adopted pet for today and sends
/// each adopter a single email with their new reminders.
///
/// A failing pet, reminder or email is counted in the report and the scan
/// moves on to the next one, so the scan as a whole never fails.
#[derive(Debug)]
pub struct RunReminderScanUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for RunReminderScanUseCase {
    type Response = ReminderScanReport;

    type Error = Infallible;

    const NAME: &'static str = "RunReminderScan";

    async fn execute(&mut self, ctx: &PawContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.today();
        let now = ctx.sys.get_timestamp_millis();
        let mut report = ReminderScanReport::default();

        let approved_requests = match ctx
            .repos
            .adoption_requests
            .find_by_status(AdoptionRequestStatus::Approved)
            .await
        {
            Ok(requests) => requests,
            Err(e) => {
                report.record_error(format!("Unable to find approved requests: {:?}", e));
                return Ok(report);
            }
        };

        let mut scanned_pets = HashSet::new();
        let mut pet_names: HashMap<ID, String> = HashMap::new();
        let mut recipients: HashMap<ID, Recipient> = HashMap::new();
        let mut created: Vec<Reminder> = Vec::new();

        for request in approved_requests {
            if !scanned_pets.insert(request.pet_id.clone()) {
                continue;
            }
            let pet = match ctx.repos.pets.find(&request.pet_id).await {
                Some(pet) if !pet.is_available() => pet,
                // Approved but still listed, the adoption is not completed
                Some(_) => continue,
                None => {
                    report.record_error(format!(
                        "Pet {} of approved request {} was not found",
                        request.pet_id, request.id
                    ));
                    continue;
                }
            };
            report.pets_processed += 1;

            // Nobody to remind
            let user_id = match &request.user_id {
                Some(user_id) => user_id.clone(),
                None => continue,
            };
            let settings = match recipients.get(&user_id) {
                Some(recipient) => recipient.settings.clone(),
                None => {
                    let user = match ctx.repos.users.find(&user_id).await {
                        Some(user) => user,
                        None => {
                            report.record_error(format!(
                                "Adopter {} of pet {} was not found",
                                user_id, pet.id
                            ));
                            continue;
                        }
                    };
                    let settings = ctx
                        .repos
                        .reminder_settings
                        .find(&user_id)
                        .await
                        .unwrap_or_else(|| ReminderSettings::new(user_id.clone()));
                    recipients.insert(
                        user_id.clone(),
                        Recipient {
                            user,
                            settings: settings.clone(),
                        },
                    );
                    settings
                }
            };

            let records = match ctx.repos.carnet.find_by_pet(&pet.id).await {
                Ok(records) => records,
                Err(e) => {
                    report.record_error(format!(
                        "Unable to read the carnet of pet {}: {:?}",
                        pet.id, e
                    ));
                    continue;
                }
            };

            for event in find_due_care_events(&records, &settings, today) {
                let reminder = event.into_reminder(&pet, &user_id, now);
                match ctx.repos.reminders.insert_if_absent(&reminder).await {
                    Ok(true) => {
                        report.reminders_created += 1;
                        created.push(reminder);
                    }
                    // Already reminded with this lead time
                    Ok(false) => {}
                    Err(e) => report.record_error(format!(
                        "Unable to store {} reminder of pet {}: {:?}",
                        reminder.reminder_type, pet.id, e
                    )),
                }
            }
            pet_names.insert(pet.id.clone(), pet.name);
        }

        let batches = created
            .into_iter()
            .map(|reminder| (reminder.user_id.clone(), reminder))
            .into_group_map();
        for (user_id, reminders) in batches {
            let recipient = match recipients.get(&user_id) {
                Some(recipient) => recipient,
                None => continue,
            };
            if !recipient.settings.email_enabled {
                continue;
            }

            let items: Vec<(String, Reminder)> = reminders
                .into_iter()
                .map(|r| (pet_names.get(&r.pet_id).cloned().unwrap_or_default(), r))
                .collect();
            let email = reminder_digest_email(&recipient.user.name, &items);
            let res = ctx
                .email
                .send(&recipient.user.email, &email.subject, &email.html)
                .await;
            if !res.success {
                report.record_error(format!(
                    "Unable to email {} reminder(s) to user {}: {}",
                    items.len(),
                    user_id,
                    res.error.unwrap_or_default()
                ));
                continue;
            }
            report.emails_sent += 1;

            let reminder_ids: Vec<ID> = items.iter().map(|(_, r)| r.id.clone()).collect();
            if let Err(e) = ctx.repos.reminders.mark_email_sent(&reminder_ids).await {
                report.record_error(format!(
                    "Unable to flag reminders of user {} as emailed: {:?}",
                    user_id, e
                ));
            }
        }

        info!(
            "Reminder scan for {} done: {} pets processed, {} reminders created, {} emails sent, {} errors",
            today,
            report.pets_processed,
            report.reminders_created,
            report.emails_sent,
            report.errors.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{applicant, insert_user, setup_context, today, TestContext};
    use chrono::Duration;
    use pawhome_domain::{AdoptionRequest, CareType, CarnetRecord, Pet, PetAvailability};

    /// Inserts a `Pet` adopted through an approved request of `user`
    async fn adopt(ctx: &PawContext, name: &str, user: Option<&User>) -> Pet {
        let mut pet = Pet::new(name, "dog", Some(ID::default()));
        pet.availability = PetAvailability::Unavailable;
        ctx.repos.pets.insert(&pet).await.unwrap();

        let details = match user {
            Some(user) => applicant(user),
            None => applicant(&User::new("Anonymous", "anon@example.com")),
        };
        let mut request = AdoptionRequest::new(
            pet.id.clone(),
            pet.foundation_id.clone().unwrap(),
            user.map(|u| u.id.clone()),
            details,
            0,
        );
        request
            .set_status(AdoptionRequestStatus::Approved, None, 0)
            .unwrap();
        ctx.repos.adoption_requests.insert(&request).await.unwrap();
        pet
    }

    async fn add_record(
        ctx: &PawContext,
        pet: &Pet,
        record_type: CareType,
        name: &str,
        applied_in_days: i64,
        due_in_days: Option<i64>,
    ) {
        let record = CarnetRecord::new(
            pet.id.clone(),
            record_type,
            name,
            today() + Duration::days(applied_in_days),
            due_in_days.map(|d| today() + Duration::days(d)),
        );
        ctx.repos.carnet.insert(&record).await.unwrap();
    }

    async fn scan(test: &TestContext) -> ReminderScanReport {
        RunReminderScanUseCase {}.execute(&test.ctx).await.unwrap()
    }

    #[actix_web::test]
    async fn vaccine_window_is_inclusive() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -358, Some(7)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Parvovirus", -357, Some(8)).await;

        let report = scan(&test).await;
        assert_eq!(report.pets_processed, 1);
        assert_eq!(report.reminders_created, 1);
        assert!(report.errors.is_empty());

        let reminders = ctx.repos.reminders.find_by_pet(&luna.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].reminder_type, CareType::Vaccine);
        assert_eq!(reminders[0].days_before, 7);
        assert_eq!(reminders[0].due_date, today() + Duration::days(7));
        assert!(reminders[0].message.contains("Rabies"));
        assert!(reminders[0].message.contains("in 7 days"));
    }

    #[actix_web::test]
    async fn scanning_twice_on_the_same_day_creates_nothing_new() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -360, Some(5)).await;
        add_record(ctx, &luna, CareType::Deworming, "Drontal", -85, Some(5)).await;
        add_record(ctx, &luna, CareType::Medication, "Antibiotics", -4, Some(3)).await;

        let first = scan(&test).await;
        assert_eq!(first.reminders_created, 3);
        assert_eq!(first.emails_sent, 1);

        let second = scan(&test).await;
        assert_eq!(second.pets_processed, 1);
        assert_eq!(second.reminders_created, 0);
        assert_eq!(second.emails_sent, 0);
        assert_eq!(
            ctx.repos.reminders.find_by_pet(&luna.id).await.unwrap().len(),
            3
        );
        assert_eq!(test.email.sent_to("ana@example.com").len(), 1);
    }

    #[actix_web::test]
    async fn bath_threshold_follows_frequency() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let due = adopt(ctx, "Luna", Some(&ana)).await;
        let not_due = adopt(ctx, "Max", Some(&ana)).await;
        let never_bathed = adopt(ctx, "Kira", Some(&ana)).await;
        add_record(ctx, &due, CareType::Bath, "", -27, None).await;
        add_record(ctx, &not_due, CareType::Bath, "", -26, None).await;
        add_record(ctx, &never_bathed, CareType::Vaccine, "Rabies", -300, Some(30)).await;

        let report = scan(&test).await;
        assert_eq!(report.pets_processed, 3);
        assert_eq!(report.reminders_created, 1);

        let reminders = ctx.repos.reminders.find_by_pet(&due.id).await.unwrap();
        assert_eq!(reminders[0].reminder_type, CareType::Bath);
        assert_eq!(reminders[0].days_before, 3);
        assert!(ctx.repos.reminders.find_by_pet(&not_due.id).await.unwrap().is_empty());
        assert!(ctx
            .repos
            .reminders
            .find_by_pet(&never_bathed.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn batches_one_email_per_recipient() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        let max = adopt(ctx, "Max", Some(&ana)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -358, Some(7)).await;
        add_record(ctx, &max, CareType::Deworming, "Drontal", -88, Some(2)).await;

        let report = scan(&test).await;
        assert_eq!(report.reminders_created, 2);
        assert_eq!(report.emails_sent, 1);

        let sent = test.email.sent_to("ana@example.com");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("Vaccine due for Luna"));
        assert!(sent[0].html.contains("Deworming due for Max"));

        let unread = ctx.repos.reminders.find_unread_by_user(&ana.id).await.unwrap();
        assert_eq!(unread.len(), 2);
        assert!(unread.iter().all(|r| r.email_sent));
    }

    #[actix_web::test]
    async fn email_failure_of_one_recipient_does_not_block_others() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let leo = insert_user(ctx, "Leo", "leo@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        let max = adopt(ctx, "Max", Some(&leo)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -358, Some(7)).await;
        add_record(ctx, &luna, CareType::Medication, "Antibiotics", -5, Some(1)).await;
        add_record(ctx, &max, CareType::Vaccine, "Rabies", -360, Some(5)).await;
        test.email.fail_for("ana@example.com");

        let report = scan(&test).await;
        assert_eq!(report.reminders_created, 3);
        assert_eq!(report.emails_sent, 1);
        assert_eq!(report.errors.len(), 1);

        assert_eq!(test.email.sent_to("leo@example.com").len(), 1);
        let ana_reminders = ctx.repos.reminders.find_unread_by_user(&ana.id).await.unwrap();
        assert_eq!(ana_reminders.len(), 2);
        assert!(ana_reminders.iter().all(|r| !r.email_sent));
    }

    #[actix_web::test]
    async fn only_completed_adoptions_are_scanned() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;

        // Approved, but the pet is still listed as available
        let listed = adopt(ctx, "Luna", Some(&ana)).await;
        ctx.repos
            .pets
            .set_availability(&listed.id, PetAvailability::Available)
            .await
            .unwrap();
        add_record(ctx, &listed, CareType::Vaccine, "Rabies", -358, Some(7)).await;

        // Unavailable, but the request is only pending
        let mut pending_pet = Pet::new("Max", "dog", Some(ID::default()));
        pending_pet.availability = PetAvailability::Unavailable;
        ctx.repos.pets.insert(&pending_pet).await.unwrap();
        let request = AdoptionRequest::new(
            pending_pet.id.clone(),
            pending_pet.foundation_id.clone().unwrap(),
            Some(ana.id.clone()),
            applicant(&ana),
            0,
        );
        ctx.repos.adoption_requests.insert(&request).await.unwrap();
        add_record(ctx, &pending_pet, CareType::Vaccine, "Rabies", -358, Some(7)).await;

        let report = scan(&test).await;
        assert_eq!(report.pets_processed, 0);
        assert_eq!(report.reminders_created, 0);
        assert!(test.email.outbox().is_empty());
    }

    #[actix_web::test]
    async fn adoption_without_user_is_counted_but_not_reminded() {
        let test = setup_context();
        let ctx = &test.ctx;
        let luna = adopt(ctx, "Luna", None).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -358, Some(7)).await;

        let report = scan(&test).await;
        assert_eq!(report.pets_processed, 1);
        assert_eq!(report.reminders_created, 0);
        assert!(report.errors.is_empty());
    }

    #[actix_web::test]
    async fn user_settings_drive_windows_and_email() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        // Outside the default 7 day window
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -355, Some(10)).await;

        let mut settings = ReminderSettings::new(ana.id.clone());
        settings.vaccine_days_before = 10;
        settings.email_enabled = false;
        ctx.repos.reminder_settings.insert(&settings).await.unwrap();

        let report = scan(&test).await;
        assert_eq!(report.reminders_created, 1);
        assert_eq!(report.emails_sent, 0);
        assert!(report.errors.is_empty());
        assert!(test.email.outbox().is_empty());

        let reminders = ctx.repos.reminders.find_by_pet(&luna.id).await.unwrap();
        assert_eq!(reminders[0].days_before, 10);
        assert!(!reminders[0].email_sent);
    }

    #[actix_web::test]
    async fn default_windows_apply_without_settings() {
        let test = setup_context();
        let ctx = &test.ctx;
        let ana = insert_user(ctx, "Ana", "ana@example.com").await;
        let luna = adopt(ctx, "Luna", Some(&ana)).await;
        add_record(ctx, &luna, CareType::Vaccine, "Rabies", -355, Some(10)).await;
        add_record(ctx, &luna, CareType::Deworming, "Drontal", -85, Some(5)).await;
        add_record(ctx, &luna, CareType::Deworming, "Drontal", -84, Some(6)).await;
        add_record(ctx, &luna, CareType::Medication, "Antibiotics", -5, Some(4)).await;

        let report = scan(&test).await;
        assert_eq!(report.reminders_created, 1);
        // Settings are read, never created by the scan
        assert!(ctx.repos.reminder_settings.find(&ana.id).await.is_none());
    }
}
