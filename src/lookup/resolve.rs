use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::users::{FullUser, TempUser};

use super::parse::{
    full_user_from_chart, parse_chart_user, parse_twitter_details, temp_user_from_details,
};
use super::transport::Transport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub chart_user_url: String,
    pub twitter_details_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedUser {
    Full(FullUser),
    Temporary(TempUser),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub user: ResolvedUser,
    pub message: String,
}

/// Lookup failures. `Display` is the operator-facing notification text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a valid username.")]
    EmptyUsername,
    #[error("Server error. Please try again later.")]
    Server { detail: String },
    #[error("❌ Error: Twitter user data retrieval failed.")]
    FallbackStatus { status: u16 },
    #[error("❌ Error: Twitter API error. User data retrieval failed.")]
    FallbackTransport { detail: String },
    #[error("❌ Error: {}", .message.as_deref().unwrap_or("Could not retrieve Twitter data"))]
    Rejected { message: Option<String> },
}

/// Resolves `username` against the chart endpoint, falling back to the
/// twitter-details endpoint when the chart endpoint answers with a non-OK
/// status. One attempt per stage.
pub fn resolve_username(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    username: &str,
    now_millis: i64,
) -> Result<Resolution, LookupError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(LookupError::EmptyUsername);
    }

    let body = json!({ "username": username });
    let response = transport
        .post_json(&endpoints.chart_user_url, &body)
        .map_err(|error| {
            warn!("chart user lookup for {username} failed: {error:#}");
            LookupError::Server {
                detail: format!("{error:#}"),
            }
        })?;

    if response.is_ok() {
        let raw = parse_chart_user(&response.body).map_err(|error| {
            warn!("chart user response for {username} was unusable: {error:#}");
            LookupError::Server {
                detail: format!("{error:#}"),
            }
        })?;
        debug!(?raw, "chart user data received");

        let user = full_user_from_chart(raw, username, now_millis);
        let message = if user.has_full_data() {
            format!("✅ @{} added with full score data.", user.username)
        } else {
            format!(
                "⚠️ @{} added with partial data. Connect additional services to increase your score!",
                user.username
            )
        };
        info!(username = %user.username, total = user.total_score, "resolved full user");
        return Ok(Resolution {
            user: ResolvedUser::Full(user),
            message,
        });
    }

    info!(
        status = response.status,
        "{username} not found on chart endpoint, trying twitter details"
    );
    resolve_twitter_details(transport, endpoints, username, now_millis)
}

fn resolve_twitter_details(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    username: &str,
    now_millis: i64,
) -> Result<Resolution, LookupError> {
    let body = json!({ "username": username });
    let response = transport
        .post_json(&endpoints.twitter_details_url, &body)
        .map_err(|error| {
            warn!("twitter details lookup for {username} failed: {error:#}");
            LookupError::FallbackTransport {
                detail: format!("{error:#}"),
            }
        })?;

    if !response.is_ok() {
        warn!(status = response.status, "twitter details lookup for {username} rejected");
        return Err(LookupError::FallbackStatus {
            status: response.status,
        });
    }

    let raw = parse_twitter_details(&response.body).map_err(|error| {
        warn!("twitter details response for {username} was unusable: {error:#}");
        LookupError::FallbackTransport {
            detail: format!("{error:#}"),
        }
    })?;

    if !raw.success {
        return Err(LookupError::Rejected {
            message: raw.message.filter(|message| !message.is_empty()),
        });
    }

    let user = temp_user_from_details(raw, username, now_millis);
    info!(username = %user.username, total = user.total_score, "resolved temporary user");
    Ok(Resolution {
        message: format!(
            "⚠️ @{username} added with Twitter score. Connect your wallet and Telegram to get a full profile!"
        ),
        user: ResolvedUser::Temporary(user),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::lookup::transport::fake::FakeTransport;
    use crate::users::Badge;

    const CHART: &str = "https://api.test/chart/user";
    const DETAILS: &str = "https://api.test/twitter/details";

    fn endpoints() -> Endpoints {
        Endpoints {
            chart_user_url: CHART.to_owned(),
            twitter_details_url: DETAILS.to_owned(),
        }
    }

    #[test]
    fn empty_username_never_hits_the_network() {
        let transport = FakeTransport::default();
        let result = resolve_username(&transport, &endpoints(), "   ", 0);

        assert_eq!(result, Err(LookupError::EmptyUsername));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn chart_user_with_wallet_and_telegram_is_full() {
        let transport = FakeTransport::default().respond(
            CHART,
            200,
            r#"{"id":"1","username":"elonmusk","totalScore":75,
                "badges":[{"id":"b1","name":"OG","icon":"🌟"}],
                "walletScore":30,"telegramScore":10}"#,
        );
        let resolution = resolve_username(&transport, &endpoints(), "elonmusk", 0).unwrap();

        assert_eq!(resolution.message, "✅ @elonmusk added with full score data.");
        let ResolvedUser::Full(user) = resolution.user else {
            panic!("expected a full user");
        };
        assert_eq!(user.total_score, 75);
        assert_eq!(user.badges, vec![Badge::new("b1", "OG", "🌟")]);
        assert_eq!(
            transport.calls(),
            vec![(CHART.to_owned(), json!({ "username": "elonmusk" }))]
        );
    }

    #[test]
    fn chart_user_without_telegram_is_partial() {
        let transport = FakeTransport::default().respond(
            CHART,
            200,
            r#"{"username":"jack","walletScore":30,"telegramScore":0}"#,
        );
        let resolution = resolve_username(&transport, &endpoints(), "jack", 0).unwrap();

        assert_eq!(
            resolution.message,
            "⚠️ @jack added with partial data. Connect additional services to increase your score!"
        );
        assert!(matches!(resolution.user, ResolvedUser::Full(_)));
    }

    #[test]
    fn non_ok_chart_falls_back_with_same_username() {
        let transport = FakeTransport::default()
            .respond(CHART, 404, "not found")
            .respond(DETAILS, 200, r#"{"success":true,"twitterScore":44}"#);
        let resolution = resolve_username(&transport, &endpoints(), "vercel", 7).unwrap();

        assert_eq!(
            resolution.message,
            "⚠️ @vercel added with Twitter score. Connect your wallet and Telegram to get a full profile!"
        );
        let ResolvedUser::Temporary(user) = resolution.user else {
            panic!("expected a temporary user");
        };
        assert_eq!(user.id, "twitter-7");
        assert_eq!(user.total_score, 44);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], (DETAILS.to_owned(), json!({ "username": "vercel" })));
    }

    #[test]
    fn failing_fallback_reports_retrieval_error() {
        let transport = FakeTransport::default()
            .respond(CHART, 500, "")
            .respond(DETAILS, 503, "");
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();

        assert_eq!(error, LookupError::FallbackStatus { status: 503 });
        assert_eq!(
            error.to_string(),
            "❌ Error: Twitter user data retrieval failed."
        );
    }

    #[test]
    fn fallback_transport_error_is_reported() {
        let transport = FakeTransport::default()
            .respond(CHART, 404, "")
            .fail(DETAILS, "connection reset");
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();

        assert_eq!(
            error.to_string(),
            "❌ Error: Twitter API error. User data retrieval failed."
        );
    }

    #[test]
    fn fallback_rejection_surfaces_message() {
        let transport = FakeTransport::default()
            .respond(CHART, 404, "")
            .respond(DETAILS, 200, r#"{"success":false,"message":"User suspended"}"#);
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();
        assert_eq!(error.to_string(), "❌ Error: User suspended");

        let transport = FakeTransport::default()
            .respond(CHART, 404, "")
            .respond(DETAILS, 200, r#"{"success":false}"#);
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();
        assert_eq!(error.to_string(), "❌ Error: Could not retrieve Twitter data");
    }

    #[test]
    fn chart_transport_error_skips_fallback() {
        let transport = FakeTransport::default().fail(CHART, "dns failure");
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();

        assert_eq!(error.to_string(), "Server error. Please try again later.");
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn chart_garbage_body_is_a_server_error() {
        let transport = FakeTransport::default().respond(CHART, 200, "<html>");
        let error = resolve_username(&transport, &endpoints(), "jack", 0).unwrap_err();

        assert!(matches!(error, LookupError::Server { .. }));
        assert_eq!(transport.calls().len(), 1);
    }
}
