use chrono::{DateTime, Utc};
use rand::Rng;

use super::{Base64Ext, CustomIdEncoding, ElementId, Timestamp, TimestampIdCodec, SHIFT_DAYS};

/// A source of uniformly distributed numbers in `[0, 1)`.
pub trait UnitRandom {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UnitRandom for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

// number of distinct day offsets in the window, both ends included
const OFFSET_CHOICES: i64 = 2 * SHIFT_DAYS + 1;

/// Maps a draw from `[0, 1)` onto a whole number of days in
/// `[-SHIFT_DAYS, SHIFT_DAYS]`. Every offset in that range is reachable, and
/// nothing outside of it is, even for a misbehaving source.
fn day_offset(unit: f64) -> i64 {
    let bucket = (unit * OFFSET_CHOICES as f64).floor() as i64;
    bucket.clamp(0, OFFSET_CHOICES - 1) - SHIFT_DAYS
}

fn jittered<R, E>(codec: &TimestampIdCodec<E>, random: &mut R, timestamp: Timestamp) -> ElementId
where
    R: UnitRandom + ?Sized,
    E: CustomIdEncoding,
{
    let shift_days = day_offset(random.next_unit());
    tracing::trace!(timestamp, shift_days, "generating event element id");
    codec.encode(timestamp, shift_days)
}

/// Hands out element ids for newly created events.
///
/// Each id is the event's timestamp shifted by a random number of whole days
/// within the jitter window, so events created at the same moment rarely
/// share an id, while the id still lies between
/// [`TimestampIdCodec::min_id`] and [`TimestampIdCodec::max_id`] of the
/// timestamp.
#[derive(Debug, Clone)]
pub struct EventIdGenerator<R, E = Base64Ext> {
    codec: TimestampIdCodec<E>,
    random: R,
}

impl<R: UnitRandom> EventIdGenerator<R> {
    pub fn new(random: R) -> Self {
        Self::with_codec(TimestampIdCodec::new(), random)
    }
}

impl<R: UnitRandom, E: CustomIdEncoding> EventIdGenerator<R, E> {
    pub fn with_codec(codec: TimestampIdCodec<E>, random: R) -> Self {
        Self { codec, random }
    }

    pub fn codec(&self) -> &TimestampIdCodec<E> {
        &self.codec
    }

    pub fn generate(&mut self, timestamp: Timestamp) -> ElementId {
        jittered(&self.codec, &mut self.random, timestamp)
    }

    pub fn generate_for(&mut self, start: &DateTime<Utc>) -> ElementId {
        self.generate(start.timestamp_millis())
    }
}

/// Generates an element id for an event anchored at `timestamp`, drawing the
/// jitter from `random` and using the default encoding.
pub fn generate_event_element_id<R: UnitRandom + ?Sized>(
    timestamp: Timestamp,
    random: &mut R,
) -> ElementId {
    jittered(&TimestampIdCodec::new(), random, timestamp)
}
