//! A single work order and the rules that rank it.
//!
//! Rank is a function of the requester's tier and how long the order has
//! been waiting, so it is never stored: every call re-derives it from the
//! submission instant and the instant of evaluation.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

/// Format used for caller-supplied submission dates and for responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d_%H:%M";

/// Date specifier meaning "the current instant".
pub const NOW: &str = "now";

const PRIORITY_DIVISOR: i64 = 3;
const VIP_DIVISOR: i64 = 5;

const PRIORITY_FLOOR: f64 = 3.0;
const VIP_FLOOR: f64 = 4.0;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Requester classification, fixed by the requester id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Normal,
    Priority,
    Vip,
    Manager,
}

impl Tier {
    /// Classify an id: multiples of 15 are managers, of 5 VIPs, of 3
    /// priority, everyone else normal.
    pub fn for_id(id: i64) -> Self {
        let by_priority = id % PRIORITY_DIVISOR == 0;
        let by_vip = id % VIP_DIVISOR == 0;

        match (by_priority, by_vip) {
            (true, true) => Tier::Manager,
            (false, true) => Tier::Vip,
            (true, false) => Tier::Priority,
            (false, false) => Tier::Normal,
        }
    }

    /// Rank for an order of this tier that has waited `wait` seconds.
    pub fn rank(self, wait: f64) -> f64 {
        match self {
            Tier::Normal | Tier::Manager => wait,
            Tier::Priority => clamped_n_log_n(wait, 1.0, PRIORITY_FLOOR),
            Tier::Vip => clamped_n_log_n(wait, 2.0, VIP_FLOOR),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Priority => "priority",
            Tier::Vip => "vip",
            Tier::Manager => "manager",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `max(floor, factor * n * ln(n))`, with `ln` of a non-positive wait
/// resolved to the floor instead of NaN / -inf.
fn clamped_n_log_n(wait: f64, factor: f64, floor: f64) -> f64 {
    if wait <= 0.0 || !wait.is_finite() {
        return floor;
    }
    let raw = factor * wait * wait.ln();
    if raw.is_finite() && raw > floor {
        raw
    } else {
        floor
    }
}

// ---------------------------------------------------------------------------
// WorkOrder
// ---------------------------------------------------------------------------

/// A requester's queued request.
///
/// Identity is the requester: two orders with the same id are equal no
/// matter when they were submitted.
#[derive(Debug, Clone)]
pub struct WorkOrder {
    id: i64,
    submitted_at: DateTime<Utc>,
    tier: Tier,
}

impl WorkOrder {
    /// Create an order from a date specifier: `now` (any case) or a date in
    /// `yyyy-MM-dd_HH:mm` form, read as local time. Anything unparseable is
    /// treated as `now`.
    pub fn new(id: i64, date: &str) -> Self {
        let submitted_at = if date.eq_ignore_ascii_case(NOW) {
            Utc::now()
        } else {
            match parse_date(date) {
                Some(instant) => instant,
                None => {
                    warn!(id, date, "unparseable submission date, using current time");
                    Utc::now()
                }
            }
        };

        Self::submitted_at(id, submitted_at)
    }

    /// Create an order submitted at an explicit instant.
    pub fn submitted_at(id: i64, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            submitted_at,
            tier: Tier::for_id(id),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn submitted(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Submission instant as `yyyy-MM-dd_HH:mm` in local time.
    pub fn date_string(&self) -> String {
        self.submitted_at
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string()
    }

    /// Seconds waited so far.
    pub fn wait_time(&self) -> f64 {
        self.wait_time_at(Utc::now())
    }

    /// Seconds waited as of `now`, at millisecond resolution.
    pub fn wait_time_at(&self, now: DateTime<Utc>) -> f64 {
        (now - self.submitted_at).num_milliseconds() as f64 / 1000.0
    }

    /// Current rank; higher is served first.
    pub fn rank(&self) -> f64 {
        self.rank_at(Utc::now())
    }

    pub fn rank_at(&self, now: DateTime<Utc>) -> f64 {
        self.tier.rank(self.wait_time_at(now))
    }

    /// Service order between two orders as of `now`. `Greater` means `self`
    /// is served before `other`.
    ///
    /// A manager always beats a non-manager; otherwise rank decides. Equal
    /// ranks compare `Equal`, there is no secondary key.
    pub fn cmp_at(&self, other: &Self, now: DateTime<Utc>) -> Ordering {
        match (self.tier == Tier::Manager, other.tier == Tier::Manager) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => self.rank_at(now).total_cmp(&other.rank_at(now)),
        }
    }
}

impl PartialEq for WorkOrder {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WorkOrder {}

fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(date, DATE_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// WorkOrderResponse
// ---------------------------------------------------------------------------

/// Wire representation of an order returned to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkOrderResponse {
    pub id: i64,
    pub date: String,
}

impl From<&WorkOrder> for WorkOrderResponse {
    fn from(order: &WorkOrder) -> Self {
        Self {
            id: order.id(),
            date: order.date_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
