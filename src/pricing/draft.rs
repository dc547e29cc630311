//! Reservation draft held by the booking form.
//!
//! Every field write emits a change notification, and every notification
//! schedules a debounced recomputation of the total. The recomputed total
//! is itself written back into the draft, so that one write is made with
//! echo suppression: it emits nothing and cannot schedule another round.

use std::time::Instant;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::debounce::{Debouncer, PRICE_RECOMPUTE_DELAY};

use super::calculators::{calculate_total, min_check_out};

/// A single form field write
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    PropertyId(Option<i64>),
    CheckIn(Option<NaiveDateTime>),
    CheckOut(Option<NaiveDateTime>),
    GuestCount(Option<i32>),
    Rate(Option<Decimal>),
    TotalPrice(Option<Decimal>),
}

/// In-memory draft of a reservation being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationDraft {
    pub property_id: Option<i64>,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub guest_count: Option<i32>,
    pub rate_per_guest_per_day: Option<Decimal>,
    pub total_price: Option<Decimal>,
    suppress_echo: bool,
}

impl ReservationDraft {
    pub fn new(property_id: i64, rate_per_guest_per_day: Option<Decimal>) -> Self {
        Self {
            property_id: Some(property_id),
            guest_count: Some(1),
            rate_per_guest_per_day,
            ..Self::default()
        }
    }

    /// Apply a field write. Returns whether a change notification was
    /// emitted; a write made under echo suppression returns false and
    /// clears the suppression.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        match edit {
            FieldEdit::PropertyId(v) => self.property_id = v,
            FieldEdit::CheckIn(v) => self.set_check_in(v),
            FieldEdit::CheckOut(v) => self.check_out = v,
            FieldEdit::GuestCount(v) => self.guest_count = v,
            FieldEdit::Rate(v) => self.rate_per_guest_per_day = v,
            FieldEdit::TotalPrice(v) => self.total_price = v,
        }

        !std::mem::take(&mut self.suppress_echo)
    }

    /// Earliest check-out the form should offer
    pub fn min_check_out(&self) -> Option<NaiveDateTime> {
        self.check_in.map(min_check_out)
    }

    /// Total derived from the current fields, without touching the draft
    pub fn derived_total(&self) -> Option<Decimal> {
        calculate_total(
            self.check_in?,
            self.check_out?,
            self.guest_count?,
            self.rate_per_guest_per_day?,
        )
    }

    /// Recompute the total and store it.
    ///
    /// On success the total is written with echo suppression. When no total
    /// can be derived the stored one is left as it was and `None` returned.
    pub fn recompute(&mut self) -> Option<Decimal> {
        let total = self.derived_total()?;
        self.suppress_echo = true;
        let echoed = self.apply(FieldEdit::TotalPrice(Some(total)));
        debug_assert!(!echoed);
        Some(total)
    }

    fn set_check_in(&mut self, check_in: Option<NaiveDateTime>) {
        self.check_in = check_in;
        // a check-out that is not after the new check-in is cleared
        if let (Some(check_in), Some(check_out)) = (check_in, self.check_out) {
            if check_out <= check_in {
                self.check_out = None;
            }
        }
    }
}

/// Booking form: a draft plus its debounced recomputation
#[derive(Debug, Clone)]
pub struct DraftForm {
    draft: ReservationDraft,
    recompute: Debouncer<()>,
    recompute_count: u64,
}

impl DraftForm {
    pub fn new(draft: ReservationDraft) -> Self {
        Self::with_debouncer(draft, Debouncer::new(PRICE_RECOMPUTE_DELAY))
    }

    /// Form recomputing after the configured `PRICE_DEBOUNCE_MS`
    pub fn from_config(draft: ReservationDraft, config: &Config) -> Self {
        Self::with_debouncer(draft, Debouncer::new(config.price_debounce))
    }

    pub fn with_debouncer(draft: ReservationDraft, recompute: Debouncer<()>) -> Self {
        Self {
            draft,
            recompute,
            recompute_count: 0,
        }
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    /// Number of recomputations run so far
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    pub fn has_pending_recompute(&self) -> bool {
        self.recompute.is_pending()
    }

    /// Apply a user edit, scheduling a recomputation if it was notified
    pub fn edit(&mut self, edit: FieldEdit, now: Instant) {
        if self.draft.apply(edit) {
            self.recompute.push((), now);
        }
    }

    /// Run the recomputation once the debounce window has passed.
    ///
    /// Returns the new total when one was written.
    pub fn tick(&mut self, now: Instant) -> Option<Decimal> {
        self.recompute.poll(now)?;
        self.recompute_count += 1;

        let total = self.draft.recompute();
        match total {
            Some(total) => tracing::debug!(%total, "Draft total recomputed"),
            None => tracing::debug!("Draft total unchanged, inputs incomplete"),
        }
        total
    }

    /// Hand the draft over, e.g. for submission
    pub fn into_draft(self) -> ReservationDraft {
        self.draft
    }
}
