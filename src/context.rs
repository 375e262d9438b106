//! Application Context
//!
//! Shared signals provided via the Leptos Context API: the transient
//! notification (toast), the list reload trigger, and the queue revision
//! counter that keeps queue-derived views current.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a toast stays up before auto-dismissing.
const NOTICE_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "toast info",
            Severity::Success => "toast success",
            Severity::Warning => "toast warning",
            Severity::Error => "toast error",
        }
    }
}

/// One transient, dismissible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub seq: u32,
    pub message: String,
    pub severity: Severity,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current toast, if any - read
    pub notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
    /// Trigger to reload the active page's data - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Bumped after every queue mutation - read
    pub queue_revision: ReadSignal<u32>,
    set_queue_revision: WriteSignal<u32>,
    /// Monotonic toast sequence, so a stale dismiss timer never clears a
    /// newer toast
    notice_seq: ReadSignal<u32>,
    set_notice_seq: WriteSignal<u32>,
}

impl AppContext {
    pub fn new() -> Self {
        let (notice, set_notice) = signal(None::<Notice>);
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (queue_revision, set_queue_revision) = signal(0u32);
        let (notice_seq, set_notice_seq) = signal(0u32);
        Self {
            notice,
            set_notice,
            reload_trigger,
            set_reload_trigger,
            queue_revision,
            set_queue_revision,
            notice_seq,
            set_notice_seq,
        }
    }

    /// Show a toast and schedule its auto-dismiss. A newer toast supersedes
    /// the pending dismissal of an older one.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let seq = self.notice_seq.get_untracked().wrapping_add(1);
        self.set_notice_seq.set(seq);
        self.set_notice.set(Some(Notice {
            seq,
            message: message.into(),
            severity,
        }));

        let notice = self.notice;
        let set_notice = self.set_notice;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            if notice.get_untracked().is_some_and(|n| n.seq == seq) {
                set_notice.set(None);
            }
        });
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(Severity::Error, message);
    }

    pub fn dismiss_notice(&self) {
        self.set_notice.set(None);
    }

    /// Ask the active page to refetch its lists.
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Record that the visit queue changed.
    pub fn queue_changed(&self) {
        self.set_queue_revision.update(|v| *v += 1);
    }
}

/// Get the app context, panicking if the provider is missing.
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
