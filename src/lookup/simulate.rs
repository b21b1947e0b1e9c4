use rand::Rng;

use crate::users::{Badge, FullUser, TempUser, compute_total_score};

use super::resolve::{LookupError, Resolution, ResolvedUser};

const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/100x100";
const FULL_USER_PROBABILITY: f64 = 0.7;
const VERIFIED_PROBABILITY: f64 = 0.3;
const BADGE_PROBABILITY: f64 = 0.5;

fn badge_pool() -> [Badge; 3] {
    [
        Badge::new("1", "Early Adopter", "🌟"),
        Badge::new("2", "Content Creator", "📝"),
        Badge::new("3", "Community Builder", "🏗️"),
    ]
}

pub fn simulate_user<R: Rng + ?Sized>(
    rng: &mut R,
    username: &str,
    now_millis: i64,
) -> Result<Resolution, LookupError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(LookupError::EmptyUsername);
    }

    let twitter_score = rng.random_range(0..100);
    let wallet_score = rng.random_range(0..100);
    let telegram_score = rng.random_range(0..100);
    let badges = badge_pool()
        .into_iter()
        .filter(|_| rng.random_bool(BADGE_PROBABILITY))
        .collect::<Vec<_>>();

    if rng.random_bool(FULL_USER_PROBABILITY) {
        let user = FullUser {
            id: now_millis.to_string(),
            username: username.to_owned(),
            profile_image_url: PLACEHOLDER_IMAGE_URL.to_owned(),
            twitter_score,
            wallet_score,
            telegram_score,
            total_score: compute_total_score(twitter_score, wallet_score, telegram_score),
            badges,
            is_verified: rng.random_bool(VERIFIED_PROBABILITY),
        };
        return Ok(Resolution {
            message: format!("@{username} has been added to the graph with full data."),
            user: ResolvedUser::Full(user),
        });
    }

    let user = TempUser {
        id: format!("temp-{now_millis}"),
        username: username.to_owned(),
        profile_image_url: PLACEHOLDER_IMAGE_URL.to_owned(),
        twitter_score,
        total_score: twitter_score,
        badges: badges.into_iter().take(1).collect(),
    };
    Ok(Resolution {
        message: format!(
            "@{username} has been added with Twitter data only. Connect wallet and Telegram for full score."
        ),
        user: ResolvedUser::Temporary(user),
    })
}
