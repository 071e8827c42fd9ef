use std::fmt;

use crate::bands::BandEnergy;

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Loading,
    Playing,
    Paused,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Loading => f.write_str("LOADING"),
            Status::Playing => f.write_str("PLAYING"),
            Status::Paused => f.write_str("PAUSED"),
            Status::Error(_) => f.write_str("ERROR"),
        }
    }
}

/// `m:ss`, with anything non-finite or negative shown as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn info_lines(
    status: &Status,
    track: &str,
    elapsed: f64,
    duration: f64,
    bands: BandEnergy,
) -> [String; 3] {
    let head = match status {
        Status::Error(msg) => format!("STATUS: {status} ({msg})"),
        _ => format!("STATUS: {status} [{track}]"),
    };
    [
        head,
        format!("{} / {}", format_time(elapsed), format_time(duration)),
        format!(
            "BASS {:>3.0}  MID {:>3.0}  TREBLE {:>3.0}",
            bands.bass, bands.mid, bands.treble
        ),
    ]
}
