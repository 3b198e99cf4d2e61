//! Slot allocator
//!
//! Guarantees at most one booking per (date, time, service type) triple.
//! The check-then-reserve is a single atomic operation against the shared
//! slot store: `DashMap::entry` holds the shard lock across the vacancy
//! check and the insert, so of two racing bookings exactly one wins and
//! the loser receives a `SlotTaken` conflict it can remediate.

use super::timetable;
use crate::utils::time::is_closed_day;
use chrono::{NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AppointmentSlot, SlotOption};
use shared::order::ServiceType;
use shared::types::now_millis;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    service_type: ServiceType,
    date: NaiveDate,
    time: String,
}

/// Day-partitioned store of booked appointment slots
#[derive(Debug, Default)]
pub struct SlotAllocator {
    /// (date, time, service type) -> slot id; the uniqueness constraint
    bookings: DashMap<SlotKey, Uuid>,
    /// slot id -> booking record
    slots: DashMap<Uuid, AppointmentSlot>,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a slot. Fails with `ClosedDay` on Sundays, `SlotUnavailable`
    /// for unpublished times, `SlotInPast` for elapsed dates/times, and
    /// `SlotTaken` when another booking already holds the triple.
    pub fn book_slot(
        &self,
        service_type: ServiceType,
        date: NaiveDate,
        time: &str,
        booked_by: Option<String>,
        now: NaiveDateTime,
    ) -> AppResult<AppointmentSlot> {
        if is_closed_day(date) {
            return Err(AppError::new(ErrorCode::ClosedDay).with_detail("date", date.to_string()));
        }

        let time = time.trim();
        if !timetable::is_published(service_type, time) {
            return Err(AppError::new(ErrorCode::SlotUnavailable)
                .with_detail("service_type", service_type.as_str())
                .with_detail("time", time));
        }

        if date < now.date() {
            return Err(AppError::new(ErrorCode::SlotInPast).with_detail("date", date.to_string()));
        }
        if date == now.date()
            && let Ok(slot_time) = crate::utils::time::parse_slot_time(time)
            && slot_time <= now.time()
        {
            return Err(AppError::new(ErrorCode::SlotInPast).with_detail("time", time));
        }

        let key = SlotKey {
            service_type,
            date,
            time: time.to_string(),
        };

        match self.bookings.entry(key) {
            Entry::Occupied(_) => Err(AppError::slot_taken(date.to_string(), time)),
            Entry::Vacant(vacancy) => {
                let slot = AppointmentSlot {
                    slot_id: Uuid::new_v4(),
                    service_type,
                    date,
                    time: time.to_string(),
                    booked_by,
                    booked_at: now_millis(),
                };
                vacancy.insert(slot.slot_id);
                self.slots.insert(slot.slot_id, slot.clone());
                tracing::debug!(
                    slot_id = %slot.slot_id,
                    service_type = %service_type,
                    date = %date,
                    time,
                    "Slot booked"
                );
                Ok(slot)
            }
        }
    }

    /// Remaining bookable times for a date.
    ///
    /// Sundays are rejected before any lookup. Already-booked times and,
    /// for the current day, times at or before `now` are excluded.
    pub fn available_slots(
        &self,
        service_type: ServiceType,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<Vec<SlotOption>> {
        if is_closed_day(date) {
            return Err(AppError::new(ErrorCode::ClosedDay).with_detail("date", date.to_string()));
        }
        if date < now.date() {
            return Ok(Vec::new());
        }

        let mut available = Vec::new();
        for &time in timetable::slot_times(service_type) {
            let key = SlotKey {
                service_type,
                date,
                time: time.to_string(),
            };
            if self.bookings.contains_key(&key) {
                continue;
            }
            if date == now.date()
                && let Ok(slot_time) = crate::utils::time::parse_slot_time(time)
                && slot_time <= now.time()
            {
                continue;
            }
            available.push(SlotOption {
                value: time.to_string(),
                display: timetable::display_time(time),
            });
        }
        Ok(available)
    }

    /// Free a booked slot for re-booking. Returns `false` when the slot is
    /// already free; freeing the slot behind a cancelled request is an
    /// expected, non-erroneous path.
    pub fn cancel_slot(&self, slot_id: Uuid) -> bool {
        if let Some((_, slot)) = self.slots.remove(&slot_id) {
            self.bookings.remove(&SlotKey {
                service_type: slot.service_type,
                date: slot.date,
                time: slot.time.clone(),
            });
            tracing::debug!(slot_id = %slot_id, "Slot freed");
            true
        } else {
            false
        }
    }

    /// Look up a booking by id
    pub fn get(&self, slot_id: Uuid) -> Option<AppointmentSlot> {
        self.slots.get(&slot_id).map(|s| s.clone())
    }
}
