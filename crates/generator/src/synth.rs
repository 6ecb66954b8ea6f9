//! Event synthesis
//!
//! Field distributions match the production traffic shape: event types
//! are weighted (play dominates), devices are uniform, regions come
//! from a world country-code set, content and user ids are drawn from
//! fixed synthetic pools.

use chrono::Utc;
use intake_events::{Device, Event, EventType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Two-letter country codes the region field is drawn from
const REGIONS: &[&str] = &[
    "AR", "AT", "AU", "BE", "BR", "CA", "CH", "CL", "CN", "CO", "CZ", "DE", "DK", "EG", "ES",
    "FI", "FR", "GB", "GR", "HU", "ID", "IE", "IL", "IN", "IT", "JP", "KE", "KR", "MX", "MY",
    "NG", "NL", "NO", "NZ", "PE", "PH", "PL", "PT", "RO", "SA", "SE", "SG", "TH", "TR", "TW",
    "UA", "US", "VN", "ZA",
];

/// Draws events with the configured field distributions
pub struct EventSynthesizer {
    rng: StdRng,
    content_pool: usize,
    user_population: u64,
}

impl EventSynthesizer {
    /// Create a synthesizer with the given pool sizes
    pub fn new(content_pool: usize, user_population: u64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            content_pool: content_pool.max(1),
            user_population: user_population.max(1),
        }
    }

    /// Construct the next event: fresh id, current UTC timestamp
    pub fn next_event(&mut self) -> Event {
        Event {
            event_id: Uuid::new_v4().to_string(),
            user_id: format!("u_{}", self.rng.gen_range(1..=self.user_population)),
            content_id: format!("m_{}", self.rng.gen_range(0..self.content_pool)),
            event_type: self.next_event_type(),
            device: self.next_device(),
            region: REGIONS[self.rng.gen_range(0..REGIONS.len())].to_string(),
            event_time: Utc::now(),
        }
    }

    /// Weighted draw: play 50%, pause 15%, seek 10%, stop 20%, rate 5%
    fn next_event_type(&mut self) -> EventType {
        match self.rng.gen_range(0..100u32) {
            0..=49 => EventType::Play,
            50..=64 => EventType::Pause,
            65..=74 => EventType::Seek,
            75..=94 => EventType::Stop,
            _ => EventType::Rate,
        }
    }

    /// Uniform draw over the device classes
    fn next_device(&mut self) -> Device {
        match self.rng.gen_range(0..3u32) {
            0 => Device::Tv,
            1 => Device::Mobile,
            _ => Device::Web,
        }
    }
}
