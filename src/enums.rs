use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical sprite names - one per image the player can be drawn with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Run1,
    Run2,
    Run3,
    Slide,
    Jump1,
    Jump2,
}

impl SpriteKey {
    /// Every sprite the registry must load before the player is ready
    pub const ALL: [SpriteKey; 6] = [
        SpriteKey::Run1,
        SpriteKey::Run2,
        SpriteKey::Run3,
        SpriteKey::Slide,
        SpriteKey::Jump1,
        SpriteKey::Jump2,
    ];

    /// Default three-frame running cycle
    pub const RUNNING_CYCLE: [SpriteKey; 3] = [SpriteKey::Run1, SpriteKey::Run2, SpriteKey::Run3];
}

/// How the player's x coordinate behaves over time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAnchor {
    /// x stays at the configured initial value
    #[default]
    Fixed,
    /// x advances every tick and wraps around the surface
    Scrolling,
}

/// Commands produced by the input adapter
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Jump,
    StartSlide,
    EndSlide,
    Reset,
}

/// Derived motion state - never stored, computed from the player's flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Running,
    Sliding,
    Jumping(u8),
}

/// What the render driver should paint this frame
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpriteChoice {
    Frame(SpriteKey),
    #[default]
    Placeholder,
}
