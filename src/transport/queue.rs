//! Ordered segment collections.
//!
//! Reassembly buffers and retransmission queues are plain `Vec<Segment>`s
//! owned by the connection. These functions keep such a vector ascending by
//! sequence number with no duplicates, as long as it is only mutated through
//! them.
//!
//! Sequence numbers are compared as plain unsigned integers; a segment at 0
//! sorts before one at `u32::MAX` even after the sequence space wraps.

use super::segment::Segment;

/// Insert `segment` before the first entry with a greater sequence number.
///
/// If an entry with the same sequence number is already present the new
/// segment is dropped and the existing entry kept. Returns whether the
/// segment was inserted.
pub fn insert_in_order(segments: &mut Vec<Segment>, segment: Segment) -> bool {
    let sequence_number = segment.sequence_number();
    let index = segments
        .iter()
        .position(|existing| existing.sequence_number() >= sequence_number);

    match index {
        Some(i) if segments[i].sequence_number() == sequence_number => {
            tracing::trace!(sequence_number, "dropping duplicate segment");
            false
        }
        Some(i) => {
            segments.insert(i, segment);
            true
        }
        None => {
            segments.push(segment);
            true
        }
    }
}

/// Remove the segment with `sequence_number`, if present.
pub fn remove(segments: &mut Vec<Segment>, sequence_number: u32) -> Option<Segment> {
    let index = segments
        .iter()
        .position(|segment| segment.sequence_number() == sequence_number)?;
    Some(segments.remove(index))
}

/// Remove every segment matching `condition`.
///
/// Both the removed segments and the ones left behind keep their original
/// relative order.
pub fn remove_all_where<F>(segments: &mut Vec<Segment>, mut condition: F) -> Vec<Segment>
where
    F: FnMut(&Segment) -> bool,
{
    let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(segments)
        .into_iter()
        .partition(|segment| condition(segment));
    *segments = kept;
    removed
}

/// Remove and return the lowest-sequence segment.
///
/// # Panics
///
/// Panics if `segments` is empty. Popping an empty queue is a caller bug;
/// check `is_empty()` first.
#[track_caller]
pub fn pop_front(segments: &mut Vec<Segment>) -> Segment {
    assert!(!segments.is_empty(), "pop_front on an empty segment queue");
    segments.remove(0)
}
