pub(in crate::app) const SUBMISSION_NOTICE_SECS: f64 = 5.0;
pub(in crate::app) const CLEAR_NOTICE_SECS: f64 = 3.0;

struct Notice {
    text: String,
    expires_at: f64,
}

#[derive(Default)]
pub(in crate::app) struct NotificationLine {
    current: Option<Notice>,
}

impl NotificationLine {
    pub(in crate::app) fn show(&mut self, text: impl Into<String>, now: f64, lifetime_secs: f64) {
        self.current = Some(Notice {
            text: text.into(),
            expires_at: now + lifetime_secs,
        });
    }

    pub(in crate::app) fn clear(&mut self) {
        self.current = None;
    }

    pub(in crate::app) fn tick(&mut self, now: f64) -> Option<f64> {
        let remaining = self.current.as_ref()?.expires_at - now;
        if remaining <= 0.0 {
            self.current = None;
            return None;
        }
        Some(remaining)
    }

    pub(in crate::app) fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.text.as_str())
    }
}
