//! Default values for configuration fields

use std::path::PathBuf;

pub fn default_output_path() -> PathBuf {
    PathBuf::from("out/schedule.csv")
}

pub fn default_response_timezone() -> String {
    // Turkish channel sites report wall-clock times in Turkey time
    "+03:00".to_string()
}

pub fn default_days_ahead() -> u32 {
    7
}

pub fn default_connect_timeout_secs() -> u64 {
    10
}

pub fn default_channels() -> Vec<String> {
    vec![
        "trt1".to_string(),
        "dost-tv".to_string(),
        "ekol-tv".to_string(),
        "star-tv".to_string(),
    ]
}
