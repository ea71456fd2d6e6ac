//! Event placement: quantize events onto the slot grid and stack overlapping
//! events side by side.
//!
//! Placement is recomputed from scratch on every call. For each event the
//! engine computes the slot it starts in, the number of slots it spans, and a
//! priority hint. A second pass gives every event a depth: its rank, by
//! length descending, among the events found in the slots it occupies.
//!
//! Overlap groups are local. An event only sees the events present in its own
//! slots, not every event reachable through a chain of overlaps, so two events
//! that overlap each other can still end up with the same depth when their
//! groups were built from different windows.

use std::ops::Range;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::Event;
use crate::grid::SlotGridConfig;

/// Geometry computed for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementRecord {
    /// Slot the event starts in. May be negative or past the last slot.
    pub offset_slots: i64,
    /// Slots spanned, rounded up. Always at least 1.
    pub length_slots: i64,
    /// `slots - length_slots`; larger for shorter events.
    pub priority: i64,
    /// Stacking rank within the event's overlap group, `None` when the event
    /// occupies no slot of the grid.
    pub depth: Option<usize>,
}

impl PlacementRecord {
    pub fn is_out_of_grid(&self) -> bool {
        self.depth.is_none()
    }

    /// Depth with `-1` standing in for "not on the grid".
    pub fn depth_index(&self) -> i64 {
        self.depth
            .and_then(|d| i64::try_from(d).ok())
            .unwrap_or(-1)
    }

    /// Slot indices this event covers, clipped to a grid of `slots` slots.
    pub fn grid_span(&self, slots: i64) -> Range<usize> {
        clipped_span(self.offset_slots, self.length_slots, slots)
    }
}

/// Placement results, index-aligned with the events passed to [`place`].
#[derive(Debug)]
pub struct Layout {
    pub entries: Vec<ScheduleResult<PlacementRecord>>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleResult<PlacementRecord>> {
        self.entries.get(index)
    }

    /// Successfully placed events with their input index.
    pub fn placed(&self) -> impl Iterator<Item = (usize, &PlacementRecord)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().ok().map(|record| (i, record)))
    }

    /// Rejected events with their input index.
    pub fn rejected(&self) -> impl Iterator<Item = (usize, &ScheduleError)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().err().map(|err| (i, err)))
    }

    /// Number of side-by-side columns needed to draw the in-grid events.
    pub fn columns(&self) -> usize {
        self.placed()
            .filter_map(|(_, record)| record.depth)
            .map(|depth| depth + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Quantized position of one valid event.
#[derive(Debug, Clone)]
struct Quantized {
    offset: i64,
    length: i64,
    span: Range<usize>,
}

/// Place `events` on the grid described by `config`.
///
/// A config with a non-positive slot length fails the whole pass. An event
/// with a non-positive duration fails only its own entry and takes no part in
/// overlap detection for the others.
pub fn place(config: &SlotGridConfig, events: &[Event]) -> ScheduleResult<Layout> {
    place_entries(config, events.iter().map(Ok).collect())
}

/// Like [`place`], for inputs where some events were already rejected
/// upstream. Rejected inputs keep their position in the layout.
pub(crate) fn place_entries(
    config: &SlotGridConfig,
    events: Vec<ScheduleResult<&Event>>,
) -> ScheduleResult<Layout> {
    config.validate()?;

    let mins_per_slot = config.minutes_per_slot();
    let mins_top = config.minutes_top();

    debug!(
        events = events.len(),
        slots = config.slots,
        mins_per_slot,
        "placing events"
    );

    let quantized: Vec<ScheduleResult<Quantized>> = events
        .into_iter()
        .enumerate()
        .map(|(index, event)| -> ScheduleResult<Quantized> {
            quantize(index, event?, mins_per_slot, mins_top, config.slots)
        })
        .collect();

    // Occupied slot range of each event; empty for rejected ones.
    let spans: Vec<Range<usize>> = quantized
        .iter()
        .map(|q| q.as_ref().map(|q| q.span.clone()).unwrap_or(0..0))
        .collect();

    let lengths: Vec<i64> = quantized
        .iter()
        .map(|q| q.as_ref().map(|q| q.length).unwrap_or(0))
        .collect();

    let entries = quantized
        .into_iter()
        .enumerate()
        .map(|(index, q)| -> ScheduleResult<PlacementRecord> {
            let q = q?;
            let others = overlap_group(index, &spans);
            let depth = stacking_depth(index, others, &lengths);

            if depth.is_none() {
                warn!(index, offset = q.offset, "event falls outside the grid");
            }

            Ok(PlacementRecord {
                offset_slots: q.offset,
                length_slots: q.length,
                priority: config.slots.saturating_sub(q.length),
                depth,
            })
        })
        .collect();

    Ok(Layout { entries })
}

fn quantize(
    index: usize,
    event: &Event,
    mins_per_slot: i64,
    mins_top: i64,
    slots: i64,
) -> ScheduleResult<Quantized> {
    let length = event.duration_minutes();
    if length <= 0 {
        return Err(reject(index, event));
    }

    let length = (length + mins_per_slot - 1).div_euclid(mins_per_slot);
    let offset = (event.start.total_minutes() - mins_top).div_euclid(mins_per_slot);
    let span = clipped_span(offset, length, slots);

    trace!(index, offset, length, ?span, "quantized event");

    Ok(Quantized {
        offset,
        length,
        span,
    })
}

fn reject(index: usize, event: &Event) -> ScheduleError {
    let reason = format!(
        "'{}' ends at {} which is not after its start {}",
        event.title, event.end, event.start
    );
    warn!(index, "{}", reason);
    ScheduleError::InvalidEvent { index, reason }
}

fn clipped_span(offset: i64, length: i64, slots: i64) -> Range<usize> {
    let lo = offset.max(0);
    let hi = offset.saturating_add(length).min(slots);
    if lo >= hi {
        return 0..0;
    }
    // Both bounds lie in 0..=slots here.
    lo as usize..hi as usize
}

/// Events sharing at least one slot with `index`, in the order a slot-by-slot
/// scan of its span would first meet them: slots ascending, input order within
/// a slot. Another event is first met at the later of the two span starts.
fn overlap_group(index: usize, spans: &[Range<usize>]) -> Vec<usize> {
    let own = &spans[index];

    let mut group: Vec<(usize, usize)> = spans
        .iter()
        .enumerate()
        .filter_map(|(other, span)| {
            let first = own.start.max(span.start);
            (first < own.end.min(span.end)).then_some((first, other))
        })
        .collect();

    group.sort_unstable();
    group.into_iter().map(|(_, other)| other).collect()
}

/// Position of `index` in `group` once sorted by length descending. The sort
/// is stable, so equal-length events keep their first-seen order.
fn stacking_depth(index: usize, mut group: Vec<usize>, lengths: &[i64]) -> Option<usize> {
    group.sort_by(|&a, &b| lengths[b].cmp(&lengths[a]));
    group.iter().position(|&i| i == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(start: &str, length: &str, slots: i64) -> SlotGridConfig {
        SlotGridConfig::parse(start, length, slots).unwrap()
    }

    fn event(start: &str, end: &str, title: &str) -> Event {
        Event::parse(start, end, title).unwrap()
    }

    fn record(layout: &Layout, index: usize) -> PlacementRecord {
        *layout.get(index).unwrap().as_ref().unwrap()
    }

    #[test]
    fn single_event_is_alone_in_its_group() {
        let config = grid("9:00", "1:00", 8);
        let layout = place(&config, &[event("10:00", "12:00", "Solo")]).unwrap();

        assert_eq!(
            record(&layout, 0),
            PlacementRecord {
                offset_slots: 1,
                length_slots: 2,
                priority: 6,
                depth: Some(0),
            }
        );
        assert_eq!(layout.columns(), 1);
    }

    #[test]
    fn overlapping_events_stack_by_length() {
        let config = grid("9:00", "1:00", 8);
        let events = [
            event("9:00", "10:00", "Short"),
            event("9:30", "11:00", "Long"),
        ];
        let layout = place(&config, &events).unwrap();

        let short = record(&layout, 0);
        assert_eq!((short.offset_slots, short.length_slots), (0, 1));
        assert_eq!(short.depth, Some(1));

        let long = record(&layout, 1);
        assert_eq!((long.offset_slots, long.length_slots), (0, 2));
        assert_eq!(long.depth, Some(0));
        assert_eq!(layout.columns(), 2);
    }

    #[test]
    fn equal_lengths_keep_input_order() {
        let config = grid("9:00", "0:30", 8);
        let events = [
            event("9:00", "10:00", "A"),
            event("9:00", "10:00", "B"),
        ];
        let layout = place(&config, &events).unwrap();

        assert_eq!(record(&layout, 0).depth, Some(0));
        assert_eq!(record(&layout, 1).depth, Some(1));
    }

    #[test]
    fn overlap_groups_are_not_transitive() {
        // A spans slots 0-1, B spans 1-2, C spans 2. A and C never meet.
        let config = grid("9:00", "1:00", 8);
        let events = [
            event("9:00", "11:00", "A"),
            event("10:00", "12:00", "B"),
            event("11:00", "12:00", "C"),
        ];
        let layout = place(&config, &events).unwrap();

        // A's group is {A, B}; C is not part of it.
        assert_eq!(record(&layout, 0).depth, Some(0));
        // B's group is {A, B, C}, sorted A, B, C.
        assert_eq!(record(&layout, 1).depth, Some(1));
        // C's group is {B, C}; C lands on the same depth as B.
        assert_eq!(record(&layout, 2).depth, Some(1));
    }

    #[test]
    fn offsets_floor_and_lengths_ceil() {
        let config = grid("9:00", "0:30", 8);
        let layout = place(&config, &[event("9:10", "9:50", "Odd")]).unwrap();

        let r = record(&layout, 0);
        assert_eq!(r.offset_slots, 0);
        assert_eq!(r.length_slots, 2);
        assert_eq!(r.priority, 6);
    }

    #[test]
    fn event_before_grid_has_negative_offset() {
        let config = grid("9:00", "1:00", 4);
        let layout = place(&config, &[event("7:30", "8:00", "Early")]).unwrap();

        let r = record(&layout, 0);
        assert_eq!(r.offset_slots, -2);
        assert_eq!(r.length_slots, 1);
        assert!(r.is_out_of_grid());
        assert_eq!(r.depth_index(), -1);
        assert_eq!(r.grid_span(config.slots), 0..0);
        assert_eq!(layout.columns(), 0);
    }

    #[test]
    fn event_after_grid_is_out_of_grid() {
        let config = grid("9:00", "1:00", 4);
        let layout = place(&config, &[event("14:00", "15:00", "Late")]).unwrap();

        let r = record(&layout, 0);
        assert_eq!(r.offset_slots, 5);
        assert_eq!(r.depth, None);
    }

    #[test]
    fn partially_visible_event_is_tracked_in_visible_slots() {
        let config = grid("9:00", "1:00", 3);
        let events = [
            event("8:00", "10:00", "Straddles start"),
            event("9:00", "10:00", "Inside"),
        ];
        let layout = place(&config, &events).unwrap();

        let straddle = record(&layout, 0);
        assert_eq!(straddle.offset_slots, -1);
        assert_eq!(straddle.grid_span(config.slots), 0..1);
        assert_eq!(straddle.depth, Some(0));
        assert_eq!(record(&layout, 1).depth, Some(1));
    }

    #[test]
    fn non_positive_duration_rejects_only_that_event() {
        let config = grid("9:00", "1:00", 8);
        let events = [
            event("10:00", "9:00", "Backwards"),
            event("9:00", "10:00", "Fine"),
            event("9:00", "9:00", "Empty"),
        ];
        let layout = place(&config, &events).unwrap();

        assert!(matches!(
            layout.get(0),
            Some(Err(ScheduleError::InvalidEvent { index: 0, .. }))
        ));
        assert!(matches!(
            layout.get(2),
            Some(Err(ScheduleError::InvalidEvent { index: 2, .. }))
        ));
        assert_eq!(record(&layout, 1).depth, Some(0));
        assert_eq!(layout.placed().count(), 1);
        assert_eq!(layout.rejected().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn zero_slot_length_fails_the_pass() {
        let config = grid("9:00", "0:00", 8);
        let result = place(&config, &[event("9:00", "10:00", "Any")]);
        assert!(matches!(result, Err(ScheduleError::InvalidConfig(_))));
    }

    #[test]
    fn empty_grid_places_everything_out_of_grid() {
        let config = grid("9:00", "1:00", 0);
        let layout = place(&config, &[event("9:00", "10:00", "Nowhere")]).unwrap();

        let r = record(&layout, 0);
        assert_eq!(r.priority, -1);
        assert!(r.is_out_of_grid());
    }

    #[test]
    fn placement_is_deterministic() {
        let config = grid("8:00", "0:15", 40);
        let events = [
            event("8:00", "9:00", "A"),
            event("8:30", "8:45", "B"),
            event("8:40", "10:00", "C"),
            event("9:00", "9:30", "D"),
        ];
        let first = place(&config, &events).unwrap();
        let second = place(&config, &events).unwrap();

        let a: Vec<_> = first.placed().map(|(_, r)| *r).collect();
        let b: Vec<_> = second.placed().map(|(_, r)| *r).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn record_serializes_out_of_grid_depth_as_null() {
        let record = PlacementRecord {
            offset_slots: -2,
            length_slots: 1,
            priority: 3,
            depth: None,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["offset_slots"], -2);
        assert!(json["depth"].is_null());
    }

    #[test]
    fn first_seen_order_breaks_length_ties() {
        // B starts earlier in A's span than C does, even though C comes first
        // in the input, so B ranks ahead of C inside A's group.
        let config = grid("9:00", "1:00", 8);
        let events = [
            event("9:00", "13:00", "A"),
            event("11:00", "12:00", "C"),
            event("10:00", "11:00", "B"),
        ];
        let layout = place(&config, &events).unwrap();

        // C's group {A, C}: depth 1. B's group {A, B}: depth 1.
        assert_eq!(record(&layout, 0).depth, Some(0));
        assert_eq!(record(&layout, 1).depth, Some(1));
        assert_eq!(record(&layout, 2).depth, Some(1));
        assert_eq!(overlap_group(0, &[0..4, 2..3, 1..2]), vec![0, 2, 1]);
    }

    #[test]
    fn priority_saturates_on_extreme_slot_counts() {
        let config = grid("9:00", "1:00", i64::MIN);
        let layout = place(&config, &[event("9:00", "11:00", "Any")]).unwrap();

        let r = record(&layout, 0);
        assert_eq!(r.priority, i64::MIN);
        assert!(r.is_out_of_grid());
    }

    #[test]
    fn huge_grid_places_without_a_slot_table() {
        let config = grid("9:00", "1:00", 10_000_000_000);
        let events = [
            event("9:00", "10:00", "Short"),
            event("9:30", "11:00", "Long"),
        ];
        let layout = place(&config, &events).unwrap();

        assert_eq!(record(&layout, 0).depth, Some(1));
        assert_eq!(record(&layout, 1).depth, Some(0));
        assert_eq!(record(&layout, 1).priority, 10_000_000_000 - 2);
    }

    #[test]
    fn upstream_rejections_keep_their_position() {
        let config = grid("9:00", "1:00", 8);
        let good = event("9:00", "10:00", "Good");
        let backwards = event("10:00", "9:00", "Backwards");
        let entries = vec![
            Err(ScheduleError::InvalidConfig("stand-in".into())),
            Ok(&backwards),
            Ok(&good),
        ];
        let layout = place_entries(&config, entries).unwrap();

        assert!(matches!(layout.get(0), Some(Err(ScheduleError::InvalidConfig(_)))));
        assert!(matches!(
            layout.get(1),
            Some(Err(ScheduleError::InvalidEvent { index: 1, .. }))
        ));
        assert_eq!(record(&layout, 2).depth, Some(0));
    }
}
