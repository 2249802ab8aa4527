use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Datelike, Local, Timelike};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed)
}

pub fn enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

fn timestamp(time: &(impl Datelike + Timelike)) -> String {
    format!(
        "{:02}.{:02} {:02}:{:02}:{:02}",
        time.day(),
        time.month(),
        time.hour(),
        time.minute(),
        time.second()
    )
}

// Diagnostics go to stderr so stdout only carries verdicts
pub fn write_message(message: &str) {
    let human_readable = timestamp(&Local::now());
    eprintln!("[{human_readable}] {message}")
}

// Arguments are only evaluated when verbose
macro_rules! log{
    ($($e:expr),+) => {
        if crate::log::enabled() {
            crate::log::write_message(&format!($($e),+))
        }
    }
}

pub(crate) use log;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn timestamp_is_padded() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(9, 5, 1))
            .unwrap();

        assert_eq!(timestamp(&time), "07.03 09:05:01");
    }

    #[test]
    fn quiet_log_skips_its_arguments() {
        set_verbose(false);

        let mut evaluated = false;
        log!("{}", { evaluated = true; 1 });

        assert!(!evaluated);
    }
}
