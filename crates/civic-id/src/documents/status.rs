use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{DocumentRecord, DocumentStatus, ExpiryDate};

/// Default look-ahead, in days, for flagging a credential as expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 90;

/// UI-facing status derived at render time. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Active,
    Expired,
    Pending,
    Attention,
    Suspended,
    Unknown,
}

impl DisplayStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::Expired => "expired",
            DisplayStatus::Pending => "pending",
            DisplayStatus::Attention => "attention",
            DisplayStatus::Suspended => "suspended",
            DisplayStatus::Unknown => "unknown",
        }
    }

    pub const fn badge_text(self) -> &'static str {
        match self {
            DisplayStatus::Active => "Active",
            DisplayStatus::Expired => "Expired",
            DisplayStatus::Pending => "Pending",
            DisplayStatus::Attention => "Expiring Soon",
            DisplayStatus::Suspended => "Suspended",
            DisplayStatus::Unknown => "Unknown",
        }
    }

    pub const fn palette(self) -> StatusPalette {
        match self {
            DisplayStatus::Active => StatusPalette::GREEN,
            DisplayStatus::Expired => StatusPalette::RED,
            DisplayStatus::Pending | DisplayStatus::Attention => StatusPalette::AMBER,
            DisplayStatus::Suspended => StatusPalette::BROWN,
            DisplayStatus::Unknown => StatusPalette::NEUTRAL,
        }
    }
}

impl From<DocumentStatus> for DisplayStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Active => DisplayStatus::Active,
            DocumentStatus::Expired => DisplayStatus::Expired,
            DocumentStatus::Pending => DisplayStatus::Pending,
            DocumentStatus::Suspended => DisplayStatus::Suspended,
            DocumentStatus::Unknown => DisplayStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Green,
    Red,
    Amber,
    Brown,
    Neutral,
}

/// Foreground/background pair for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPalette {
    pub tone: StatusTone,
    pub foreground: &'static str,
    pub background: &'static str,
}

impl StatusPalette {
    pub const GREEN: Self = Self {
        tone: StatusTone::Green,
        foreground: "#2E7D32",
        background: "#E8F5E9",
    };
    pub const RED: Self = Self {
        tone: StatusTone::Red,
        foreground: "#C62828",
        background: "#FFEBEE",
    };
    pub const AMBER: Self = Self {
        tone: StatusTone::Amber,
        foreground: "#EF6C00",
        background: "#FFF3E0",
    };
    pub const BROWN: Self = Self {
        tone: StatusTone::Brown,
        foreground: "#6D4C41",
        background: "#EFEBE9",
    };
    pub const NEUTRAL: Self = Self {
        tone: StatusTone::Neutral,
        foreground: "#616161",
        background: "#F5F5F5",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStatus {
    pub display_status: DisplayStatus,
    pub badge_text: &'static str,
    pub palette: StatusPalette,
    pub expiring_soon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
}

/// Derivation rules parameterized by the expiring-soon window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    window_days: i64,
}

impl StatusPolicy {
    /// Non-positive windows fall back to the default.
    pub fn new(window_days: i64) -> Self {
        let window_days = if window_days > 0 {
            window_days
        } else {
            EXPIRING_SOON_WINDOW_DAYS
        };
        Self { window_days }
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Whole days from `today` until expiry. `None` for permanent or unparseable dates;
    /// the latter is logged and treated as not expiring.
    pub fn days_until_expiry(&self, record: &DocumentRecord, today: NaiveDate) -> Option<i64> {
        match &record.expiry_date {
            ExpiryDate::Permanent => None,
            ExpiryDate::On(date) => Some(date.signed_duration_since(today).num_days()),
            ExpiryDate::Unparsed(raw) => {
                warn!(
                    document_id = %record.id,
                    expiry_date = %raw,
                    "unparseable expiry date; treating document as not expiring"
                );
                None
            }
        }
    }

    pub fn expiring_soon(&self, record: &DocumentRecord, today: NaiveDate) -> bool {
        self.days_until_expiry(record, today)
            .is_some_and(|days| self.within_window(days))
    }

    pub fn derive(&self, record: &DocumentRecord, today: NaiveDate) -> DerivedStatus {
        if record.expiry_date.is_permanent() && record.status == DocumentStatus::Expired {
            warn!(
                document_id = %record.id,
                "permanent document stored as expired; displaying as active"
            );
        }

        let stored = record.effective_status();
        let days_until_expiry = self.days_until_expiry(record, today);
        let expiring_soon = days_until_expiry.is_some_and(|days| self.within_window(days));

        let display_status = if expiring_soon && stored != DocumentStatus::Expired {
            DisplayStatus::Attention
        } else {
            DisplayStatus::from(stored)
        };

        DerivedStatus {
            display_status,
            badge_text: display_status.badge_text(),
            palette: display_status.palette(),
            expiring_soon,
            days_until_expiry,
        }
    }

    fn within_window(&self, days: i64) -> bool {
        (0..=self.window_days).contains(&days)
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::new(EXPIRING_SOON_WINDOW_DAYS)
    }
}

/// Derive the display status using the default 90-day window.
pub fn derive_status(record: &DocumentRecord, today: NaiveDate) -> DerivedStatus {
    StatusPolicy::default().derive(record, today)
}
