//! Offline crack-time estimate

/// Assumed offline guess rate (guesses per second)
pub const GUESSES_PER_SECOND: f64 = 1e9;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;
const MILLENNIUM: f64 = YEAR * 1000.0;

/// Average seconds to find a password with `entropy` bits at the assumed rate
pub fn average_seconds(entropy: f64) -> f64 {
    if entropy <= 0.0 {
        return 0.0;
    }
    2f64.powf(entropy) / (2.0 * GUESSES_PER_SECOND)
}

/// Map an entropy value to a human-readable bucket
pub fn estimate(entropy: f64) -> String {
    if entropy <= 0.0 {
        return "Instantly".to_string();
    }

    let seconds = average_seconds(entropy);
    if seconds < 1.0 {
        "Instantly".to_string()
    } else if seconds < MINUTE {
        "Less than a minute".to_string()
    } else if seconds < HOUR {
        format!("{:.0} minutes", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{:.0} hours", seconds / HOUR)
    } else if seconds < MONTH {
        format!("{:.0} days", seconds / DAY)
    } else if seconds < YEAR {
        format!("{:.0} months", seconds / MONTH)
    } else if seconds < MILLENNIUM {
        format!("{:.0} years", seconds / YEAR)
    } else {
        "Centuries".to_string()
    }
}
