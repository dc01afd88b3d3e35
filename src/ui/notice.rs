//! Transient one-line notices (share confirmation, rejected images)

use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};

use crate::core::share::ShareOutcome;

/// Used when the requested duration cannot be represented
const FALLBACK_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message that disappears after a fixed time
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind, duration: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now.checked_add(duration).unwrap_or_else(|| {
            tracing::warn!("Notice duration {:?} out of range, using {:?}", duration, FALLBACK_DURATION);
            now + FALLBACK_DURATION
        });
        Self {
            message: message.into(),
            kind,
            expires_at,
        }
    }

    pub fn from_share(outcome: &ShareOutcome, duration: Duration) -> Self {
        match outcome {
            ShareOutcome::Copied(_) => Self::new("링크가 복사되었습니다!", NoticeKind::Info, duration),
            ShareOutcome::Failed => Self::new("링크 복사에 실패했습니다.", NoticeKind::Error, duration),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Draw the notice above the floating buttons
    pub fn show(&self, ctx: &egui::Context) {
        let fill = match self.kind {
            NoticeKind::Info => Color32::from_rgb(31, 41, 55),
            NoticeKind::Error => Color32::from_rgb(185, 28, 28),
        };
        egui::Area::new(egui::Id::new("notice"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -140.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.message).color(Color32::WHITE));
                    });
            });
    }
}

/// Drop an expired notice, otherwise draw it and schedule the repaint that removes it
pub fn show_notice(ctx: &egui::Context, notice: &mut Option<Notice>) {
    let now = Instant::now();
    if notice.as_ref().is_some_and(|n| n.is_expired(now)) {
        *notice = None;
    }
    if let Some(ref current) = notice {
        current.show(ctx);
        ctx.request_repaint_after(current.remaining(now));
    }
}
