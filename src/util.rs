pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn default_avatar_url(username: &str) -> String {
    format!("https://unavatar.io/twitter/{username}")
}

pub fn initial_letter(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_owned())
}
