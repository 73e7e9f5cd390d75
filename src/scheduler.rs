use std::{thread, time::Duration};

use chrono::{Local, Timelike};

use crate::{compositor, data_loaders::settings, info, wallpaper, DEBUG_NAME};

const TICK_INTERVAL: Duration = Duration::from_secs(60);
const PERSIST_CADENCE_MINUTES: u32 = 5;

/// The steady-state loop: render a fresh frame every tick, but only touch the
/// disk and the OS wallpaper on the persist cadence. Snapshot of the user's
/// wallpaper happens exactly once, before the first overwrite. Settings,
/// render, and file-write errors propagate fatally; termination paths (tray
/// Exit, console interrupt) live outside this loop and exit the process.
pub fn run() -> Result<(), String> {
    wallpaper::snapshot_current();

    let mut last_persisted_minute: Option<u32> = None;
    loop {
        let settings = settings::load()?;
        let frame = compositor::render_wallpaper(&settings)?;

        let minute = Local::now().minute();
        if should_persist(last_persisted_minute, minute) {
            wallpaper::apply(&frame)?;
            last_persisted_minute = Some(minute);
            info!("[{}][TICK] Persisted and applied wallpaper at minute {minute:02}", DEBUG_NAME);
        }

        thread::sleep(TICK_INTERVAL);
    }
}

/// Persist on the first tick, then whenever the wall-clock minute lands on
/// the cadence and was not already persisted. Keyed off minute-of-hour, so
/// with sleep drift the "every 5 minutes" guarantee is approximate.
pub(crate) fn should_persist(last_persisted: Option<u32>, minute: u32) -> bool {
    match last_persisted {
        None => true,
        Some(previous) => minute % PERSIST_CADENCE_MINUTES == 0 && previous != minute,
    }
}

#[cfg(test)]
mod tests {
    use super::should_persist;

    #[test]
    fn first_tick_always_persists() {
        assert!(should_persist(None, 7));
        assert!(should_persist(None, 0));
    }

    #[test]
    fn persists_on_cadence_minutes_only() {
        assert!(should_persist(Some(3), 5));
        assert!(should_persist(Some(5), 10));
        assert!(!should_persist(Some(5), 7));
        assert!(!should_persist(Some(10), 11));
    }

    #[test]
    fn same_minute_is_not_persisted_twice() {
        assert!(!should_persist(Some(5), 5));
        assert!(!should_persist(Some(0), 0));
    }

    #[test]
    fn minute_zero_counts_as_cadence() {
        assert!(should_persist(Some(55), 0));
    }
}
