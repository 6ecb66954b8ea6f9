//! Event field enums
//!
//! Matches the fixed vocabularies emitted by the event producer.

use std::str::FromStr;

use crate::error::ParseError;

/// Playback interaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Playback started or resumed
    Play,
    /// Playback paused
    Pause,
    /// Position jump within the content
    Seek,
    /// Playback ended
    Stop,
    /// Content rating submitted
    Rate,
}

impl EventType {
    /// All variants, in wire order
    pub const ALL: [EventType; 5] = [
        EventType::Play,
        EventType::Pause,
        EventType::Seek,
        EventType::Stop,
        EventType::Rate,
    ];

    /// Get wire representation
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Seek => "seek",
            Self::Stop => "stop",
            Self::Rate => "rate",
        }
    }
}

impl FromStr for EventType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "seek" => Ok(Self::Seek),
            "stop" => Ok(Self::Stop),
            "rate" => Ok(Self::Rate),
            _ => Err(ParseError::invalid_event_type(s)),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Device class the event originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    /// Living-room device (smart TV, set-top box)
    Tv,
    /// Phone or tablet app
    Mobile,
    /// Browser player
    Web,
}

impl Device {
    /// All variants, in wire order
    pub const ALL: [Device; 3] = [Device::Tv, Device::Mobile, Device::Web];

    /// Get wire representation
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tv => "tv",
            Self::Mobile => "mobile",
            Self::Web => "web",
        }
    }
}

impl FromStr for Device {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tv" => Ok(Self::Tv),
            "mobile" => Ok(Self::Mobile),
            "web" => Ok(Self::Web),
            _ => Err(ParseError::invalid_device(s)),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
