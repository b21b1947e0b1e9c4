mod parse;
mod resolve;
mod simulate;
pub(crate) mod transport;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub use resolve::{Endpoints, LookupError, Resolution, ResolvedUser, resolve_username};
pub use simulate::simulate_user;
pub use transport::{HttpTransport, Transport};

use crate::util::unix_millis;

pub type LookupResult = Result<Resolution, LookupError>;

#[derive(Clone)]
pub enum LookupClient {
    Remote {
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
    },
    Simulated,
}

impl LookupClient {
    pub fn lookup(&self, username: &str) -> LookupResult {
        match self {
            Self::Remote {
                transport,
                endpoints,
            } => resolve_username(transport.as_ref(), endpoints, username, unix_millis()),
            Self::Simulated => simulate_user(&mut rand::rng(), username, unix_millis()),
        }
    }

    pub fn spawn(&self, username: String) -> Receiver<LookupResult> {
        let (tx, rx) = mpsc::channel();
        let client = self.clone();

        thread::spawn(move || {
            let result = client.lookup(&username);
            let _ = tx.send(result);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::transport::fake::FakeTransport;
    use super::*;

    #[test]
    fn spawned_lookup_reports_back_over_channel() {
        let transport = FakeTransport::default().respond(
            "chart",
            200,
            r#"{"username":"jack","walletScore":1,"telegramScore":1}"#,
        );
        let client = LookupClient::Remote {
            transport: Arc::new(transport),
            endpoints: Endpoints {
                chart_user_url: "chart".to_owned(),
                twitter_details_url: "details".to_owned(),
            },
        };

        let rx = client.spawn("jack".to_owned());
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            result,
            Ok(Resolution {
                user: ResolvedUser::Full(_),
                ..
            })
        ));
    }

    #[test]
    fn simulated_client_resolves_offline() {
        let rx = LookupClient::Simulated.spawn("nextjs".to_owned());
        let resolution = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        let username = match resolution.user {
            ResolvedUser::Full(user) => user.username,
            ResolvedUser::Temporary(user) => user.username,
        };
        assert_eq!(username, "nextjs");
    }
}
