use crate::{dispatch::SendAllRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep};
use fidelo_infra::FideloContext;
use std::time::Duration;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the reminder dispatch once a minute, aligned to the top of the
/// minute. Repeated ticks inside a tenant's schedule window are harmless:
/// the send ledger makes every (benefit, kind) pair at-most-once.
pub fn start_reminder_dispatch_job(ctx: FideloContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            let usecase = SendAllRemindersUseCase { force: false };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
