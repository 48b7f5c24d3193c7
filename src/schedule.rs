//! Daily trigger for the binary's long-running mode.
//!
//! Runs are awaited one after another, so two runs never overlap; a failed run
//! simply waits for the next tick.

use crate::config::ScheduleSettings;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use std::future::Future;
use tokio::time::sleep;
use tracing::{info, warn};

/// Next occurrence of `hour:minute` strictly after `now`, in `now`'s zone.
///
/// A time skipped by a DST jump falls forward to the next valid instant on
/// that day.
pub fn next_tick<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let at = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let tz = now.timezone();
    let today = now.date_naive();

    for day in 0..=2 {
        let naive = (today + Duration::days(day)).and_time(at);
        let candidate = tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest());
        if let Some(candidate) = candidate {
            if candidate > *now {
                return Some(candidate);
            }
        }
    }
    None
}

/// Call `job` every day at the configured local time, forever.
pub async fn run_daily<F, Fut>(schedule: ScheduleSettings, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Local::now();
        let Some(next) = next_tick(&now, schedule.hour, schedule.minute) else {
            warn!(hour = schedule.hour, minute = schedule.minute, "Cannot compute next run; retrying in an hour");
            sleep(std::time::Duration::from_secs(3600)).await;
            continue;
        };
        let wait = (next.clone() - now).to_std().unwrap_or_default();
        info!(next = %next.to_rfc3339(), wait_secs = wait.as_secs(), "Waiting for next scheduled run");
        sleep(wait).await;
        job().await;
    }
}
