use crate::components::{PlayerState, jump_sprite};
use crate::config::{GameConfig, PlayerConfig};
use crate::enums::{MotionState, SpriteChoice, SpriteKey};
use crate::plugins::physics::TickSet;
use bevy::prelude::*;

/// Plugin for sprite selection and the running-cycle flipbook
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_sprite_choice_system.in_set(TickSet::Animation),
        );
    }
}

/// Pick this tick's sprite for every player
fn update_sprite_choice_system(
    config: Res<GameConfig>,
    mut query: Query<(&mut PlayerState, &mut SpriteChoice)>,
) {
    for (mut state, mut choice) in query.iter_mut() {
        let next = select_sprite(&mut state, &config.player);
        if *choice != next {
            *choice = next;
        }
    }
}

/// Sprite for the current state. Jumping beats sliding, sliding beats running,
/// and anything else falls back to the placeholder rectangle.
///
/// The running branch advances the flipbook counter, so call this exactly once per tick.
pub fn select_sprite(state: &mut PlayerState, config: &PlayerConfig) -> SpriteChoice {
    match state.motion_state() {
        MotionState::Jumping(count) => SpriteChoice::Frame(jump_sprite(count)),
        MotionState::Sliding => SpriteChoice::Frame(SpriteKey::Slide),
        MotionState::Running => {
            let index = state.running_frame_index(config);
            state.frame_index = state.frame_index.wrapping_add(1);
            state
                .running_frames
                .get(index)
                .copied()
                .map_or(SpriteChoice::Placeholder, SpriteChoice::Frame)
        }
        MotionState::Idle => SpriteChoice::Placeholder,
    }
}
