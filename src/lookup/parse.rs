use anyhow::{Context, Result};
use serde::Deserialize;

use crate::users::{Badge, FullUser, TempUser, lenient_optional_string};
use crate::util::default_avatar_url;

const DEFAULT_TWITTER_SCORE: i64 = 20;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawChartUser {
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(super) id: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(super) username: Option<String>,
    #[serde(default)]
    pub(super) profile_image_url: Option<String>,
    #[serde(default)]
    pub(super) twitter_score: Option<f64>,
    #[serde(default)]
    pub(super) wallet_score: Option<f64>,
    #[serde(default)]
    pub(super) telegram_score: Option<f64>,
    #[serde(default)]
    pub(super) total_score: Option<f64>,
    #[serde(default)]
    pub(super) badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub(super) is_verified: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawTwitterDetails {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub(super) username: Option<String>,
    #[serde(default)]
    pub(super) profile_image_url: Option<String>,
    #[serde(default)]
    pub(super) twitter_score: Option<f64>,
    #[serde(default)]
    pub(super) total_score: Option<f64>,
    #[serde(default)]
    pub(super) badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

pub(super) fn parse_chart_user(raw: &str) -> Result<RawChartUser> {
    serde_json::from_str(raw).context("invalid JSON from chart user endpoint")
}

pub(super) fn parse_twitter_details(raw: &str) -> Result<RawTwitterDetails> {
    serde_json::from_str(raw).context("invalid JSON from twitter details endpoint")
}

fn score(value: Option<f64>) -> i64 {
    value.map(|value| value.round() as i64).unwrap_or(0)
}

fn nonzero_score(value: Option<f64>) -> Option<i64> {
    Some(score(value)).filter(|value| *value != 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

pub(super) fn full_user_from_chart(raw: RawChartUser, submitted: &str, now_millis: i64) -> FullUser {
    FullUser {
        id: non_empty(raw.id).unwrap_or_else(|| format!("user-{now_millis}")),
        username: non_empty(raw.username).unwrap_or_else(|| submitted.to_owned()),
        profile_image_url: raw
            .profile_image_url
            .unwrap_or_else(|| default_avatar_url(submitted)),
        twitter_score: score(raw.twitter_score),
        wallet_score: score(raw.wallet_score),
        telegram_score: score(raw.telegram_score),
        total_score: score(raw.total_score),
        badges: raw.badges.unwrap_or_default(),
        is_verified: raw.is_verified.unwrap_or(false),
    }
}

pub(super) fn temp_user_from_details(
    raw: RawTwitterDetails,
    submitted: &str,
    now_millis: i64,
) -> TempUser {
    let twitter_score = nonzero_score(raw.twitter_score);
    let total_score = nonzero_score(raw.total_score)
        .or(twitter_score)
        .unwrap_or(DEFAULT_TWITTER_SCORE);

    TempUser {
        id: format!("twitter-{now_millis}"),
        username: non_empty(raw.username).unwrap_or_else(|| submitted.to_owned()),
        profile_image_url: non_empty(raw.profile_image_url)
            .unwrap_or_else(|| default_avatar_url(submitted)),
        twitter_score: twitter_score.unwrap_or(DEFAULT_TWITTER_SCORE),
        total_score,
        badges: raw
            .badges
            .unwrap_or_else(|| vec![Badge::new("twitter-basic", "Twitter User", "🐦")]),
    }
}
