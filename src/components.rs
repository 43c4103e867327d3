use crate::config::PlayerConfig;
use crate::enums::{MotionState, PlayerCommand, SpriteKey};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Position - surface coordinates, origin at the top-left corner, y grows downward
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Body size - the rectangle the sprite is drawn into
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySize {
    pub width: f32,
    pub height: f32,
}

impl BodySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Drawing surface dimensions, tracks the window size
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// The player's motion and animation state machine.
///
/// States are not stored as an enum; [`PlayerState::motion_state`] derives
/// them from the flags below with the priority jumping > sliding > running > idle.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    /// Pixels per tick, negative = up
    pub vertical_velocity: f32,
    pub size: BodySize,
    pub jump_count: u8,
    pub is_jumping: bool,
    pub is_sliding: bool,
    /// Slide key latch; a second StartSlide while held is ignored
    pub slide_held: bool,
    pub running: bool,
    /// Ticks spent drawing the running cycle
    pub frame_index: u64,
    /// Current running frame set; a jump replaces it with the jump frame until landing
    pub running_frames: Vec<SpriteKey>,
}

impl PlayerState {
    /// Startup state: standing at the initial x, bottom edge flush with the surface.
    /// The first tick clamps it up onto the ground line.
    pub fn new(config: &PlayerConfig, surface: &Surface) -> Self {
        Self {
            position: Position::new(config.initial_x, surface.height - config.standing_height),
            vertical_velocity: 0.0,
            size: BodySize::new(config.standing_width, config.standing_height),
            jump_count: 0,
            is_jumping: false,
            is_sliding: false,
            slide_held: false,
            running: false,
            frame_index: 0,
            running_frames: SpriteKey::RUNNING_CYCLE.to_vec(),
        }
    }

    /// Largest y the player may occupy
    pub fn ground_y(&self, config: &PlayerConfig, surface: &Surface) -> f32 {
        surface.height - self.size.height - config.ground_margin
    }

    pub fn is_grounded(&self, config: &PlayerConfig, surface: &Surface) -> bool {
        self.position.y >= self.ground_y(config, surface)
    }

    pub fn motion_state(&self) -> MotionState {
        if self.is_jumping {
            MotionState::Jumping(self.jump_count)
        } else if self.is_sliding {
            MotionState::Sliding
        } else if self.running {
            MotionState::Running
        } else {
            MotionState::Idle
        }
    }

    /// Apply a single input command. Returns false when the command was a no-op.
    pub fn apply(
        &mut self,
        command: PlayerCommand,
        config: &PlayerConfig,
        surface: &Surface,
    ) -> bool {
        match command {
            PlayerCommand::Jump => self.jump(config),
            PlayerCommand::StartSlide => self.start_slide(config),
            PlayerCommand::EndSlide => {
                self.end_slide(config);
                true
            }
            PlayerCommand::Reset => {
                self.reset(config, surface);
                true
            }
        }
    }

    /// Jump, or double jump while airborne. Ignored once the jump cap is reached.
    /// Sliding does not block jumping.
    pub fn jump(&mut self, config: &PlayerConfig) -> bool {
        if self.jump_count >= config.max_jumps {
            return false;
        }

        self.vertical_velocity = config.jump_velocity;
        self.is_jumping = true;
        self.jump_count += 1;
        self.running_frames = vec![jump_sprite(self.jump_count)];
        true
    }

    /// Begin sliding. Ignored while jumping or while the slide is already held.
    pub fn start_slide(&mut self, config: &PlayerConfig) -> bool {
        if self.slide_held || self.is_jumping {
            return false;
        }

        self.slide_held = true;
        self.is_sliding = true;
        self.update_size(config);
        true
    }

    pub fn end_slide(&mut self, config: &PlayerConfig) {
        self.slide_held = false;
        self.is_sliding = false;
        self.update_size(config);
    }

    /// Put the player back on the ground line at the initial x and start running.
    /// Sliding state and the running frame set are left alone.
    pub fn reset(&mut self, config: &PlayerConfig, surface: &Surface) {
        self.position.x = config.initial_x;
        self.position.y = self.ground_y(config, surface);
        self.vertical_velocity = 0.0;
        self.is_jumping = false;
        self.jump_count = 0;
        self.running = true;
    }

    pub fn update_size(&mut self, config: &PlayerConfig) {
        self.size = if self.is_sliding {
            BodySize::new(config.sliding_width, config.sliding_height)
        } else {
            BodySize::new(config.standing_width, config.standing_height)
        };
    }

    /// Index into `running_frames` for the current tick
    pub fn running_frame_index(&self, config: &PlayerConfig) -> usize {
        if self.running_frames.is_empty() {
            return 0;
        }
        let interval = u64::from(config.frame_interval.max(1));
        ((self.frame_index / interval) % self.running_frames.len() as u64) as usize
    }
}

/// Jump sprite for a given jump count: the first jump gets its own frame,
/// every later jump uses the second
pub fn jump_sprite(jump_count: u8) -> SpriteKey {
    if jump_count <= 1 {
        SpriteKey::Jump1
    } else {
        SpriteKey::Jump2
    }
}
