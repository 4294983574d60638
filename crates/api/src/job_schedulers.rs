use crate::{reminder::run_reminder_scan::RunReminderScanUseCase, shared::usecase::execute};
use actix_web::rt::time::sleep;
use chrono::{Duration as ChronoDuration, TimeZone, Timelike};
use chrono_tz::Tz;
use pawhome_infra::PawContext;
use std::time::Duration;
use tracing::info;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Seconds from `now_ts` until the next time the local clock in `tz`
/// shows `scan_hour` o'clock. Exactly on the hour counts as the next day.
/// When that hour is skipped by a DST gap the first valid hour after it is used.
pub fn get_start_delay(now_ts: i64, tz: &Tz, scan_hour: u32) -> u64 {
    let now = match tz.timestamp_millis_opt(now_ts).single() {
        Some(now) => now,
        None => return SECS_PER_DAY,
    };
    let mut next_date = now.date_naive();
    if now.hour() >= scan_hour {
        next_date += ChronoDuration::days(1);
    }
    let next_run = (scan_hour..24).find_map(|hour| {
        next_date
            .and_hms_opt(hour, 0, 0)
            .and_then(|local| tz.from_local_datetime(&local).earliest())
    });

    match next_run {
        Some(next_run) => {
            let millis = next_run.timestamp_millis() - now_ts;
            (millis.max(0) as u64 + 999) / 1000
        }
        None => SECS_PER_DAY,
    }
}

pub fn start_reminder_scan_job(ctx: PawContext) {
    actix_web::rt::spawn(async move {
        loop {
            let now = ctx.sys.get_timestamp_millis();
            let delay = get_start_delay(now, &ctx.config.timezone, ctx.config.scan_hour);
            info!("Next reminder scan in {} seconds", delay);
            sleep(Duration::from_secs(delay)).await;

            if let Ok(report) = execute(RunReminderScanUseCase {}, &ctx).await {
                info!(
                    pets_processed = report.pets_processed,
                    reminders_created = report.reminders_created,
                    emails_sent = report.emails_sent,
                    errors = report.errors.len(),
                    "Scheduled reminder scan finished"
                );
            }
        }
    });
}
