use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui::Context;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::lookup::{LookupClient, LookupError, LookupResult, ResolvedUser, Transport};
use crate::users::{FileStorage, KeyValueStore, UserStore};

mod graph;
mod notification;
mod render_utils;
mod ui;

use self::graph::GraphRenderer;
use self::notification::{CLEAR_NOTICE_SECS, NotificationLine, SUBMISSION_NOTICE_SECS};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ScoreGraphApp {
    lookup: LookupClient,
    offline: bool,
    store: UserStore,
    renderer: GraphRenderer,
    notification: NotificationLine,
    submission: Submission,
    input: String,
    show_user_panel: bool,
    user_filter: String,
}

enum Submission {
    Idle,
    Submitting {
        username: String,
        rx: Receiver<LookupResult>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmissionOutcome {
    ResolvedFull,
    ResolvedTemp,
    Failed,
}

impl ScoreGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let lookup = if config.offline {
            LookupClient::Simulated
        } else {
            LookupClient::Remote {
                transport: Arc::clone(&transport),
                endpoints: config.endpoints(),
            }
        };
        let storage = FileStorage::new(config.data_dir);
        info!(data_dir = %storage.dir().display(), offline = config.offline, "starting");

        Self::with_parts(lookup, config.offline, Box::new(storage), transport)
    }

    fn with_parts(
        lookup: LookupClient,
        offline: bool,
        storage: Box<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            lookup,
            offline,
            store: UserStore::load(storage),
            renderer: GraphRenderer::new(transport),
            notification: NotificationLine::default(),
            submission: Submission::Idle,
            input: String::new(),
            show_user_panel: false,
            user_filter: String::new(),
        }
    }

    fn is_submitting(&self) -> bool {
        matches!(self.submission, Submission::Submitting { .. })
    }

    fn submit(&mut self, now: f64) {
        let username = self.input.trim().to_owned();
        self.input.clear();

        if username.is_empty() {
            self.notification
                .show(LookupError::EmptyUsername.to_string(), now, SUBMISSION_NOTICE_SECS);
            return;
        }

        self.notification.clear();
        info!(%username, "submitting lookup");
        let rx = self.lookup.spawn(username.clone());
        self.submission = Submission::Submitting { username, rx };
    }

    fn poll_submission(&mut self, now: f64) -> Option<SubmissionOutcome> {
        let Submission::Submitting { rx, .. } = &self.submission else {
            return None;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LookupError::Server {
                detail: "lookup worker disconnected".to_owned(),
            }),
        };

        Some(self.finish_submission(result, now))
    }

    fn finish_submission(&mut self, result: LookupResult, now: f64) -> SubmissionOutcome {
        let username = match std::mem::replace(&mut self.submission, Submission::Idle) {
            Submission::Submitting { username, .. } => username,
            Submission::Idle => String::new(),
        };

        match result {
            Ok(resolution) => {
                self.notification
                    .show(resolution.message, now, SUBMISSION_NOTICE_SECS);
                match resolution.user {
                    ResolvedUser::Full(user) => {
                        self.store.push_full(user);
                        SubmissionOutcome::ResolvedFull
                    }
                    ResolvedUser::Temporary(user) => {
                        self.store.push_temp(user);
                        SubmissionOutcome::ResolvedTemp
                    }
                }
            }
            Err(lookup_error) => {
                error!("lookup for {username} failed: {lookup_error:?}");
                self.notification
                    .show(lookup_error.to_string(), now, SUBMISSION_NOTICE_SECS);
                SubmissionOutcome::Failed
            }
        }
    }

    fn clear_users(&mut self, now: f64) {
        self.store.clear_all();
        self.notification
            .show("All users have been cleared.", now, CLEAR_NOTICE_SECS);
    }

    fn clear_temp_users(&mut self, now: f64) {
        self.store.clear_temporary();
        self.notification
            .show("All temporary users have been cleared.", now, CLEAR_NOTICE_SECS);
    }
}

impl eframe::App for ScoreGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|input| input.time);

        if let Some(outcome) = self.poll_submission(now) {
            info!(?outcome, "submission finished");
        }

        let notice_remaining = self.notification.tick(now);

        self.show(ctx, now);

        if self.is_submitting() || self.renderer.images_loading() {
            ctx.request_repaint_after(POLL_INTERVAL);
        } else if let Some(remaining) = notice_remaining {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }
}
