use crate::components::{PlayerState, Surface};
use crate::config::{GameConfig, PlayerConfig};
use crate::enums::{HorizontalAnchor, SpriteKey};
use bevy::prelude::*;

/// Ordering of the per-tick work inside `FixedUpdate`
#[derive(SystemSet, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickSet {
    Physics,
    Animation,
}

/// Plugin for the fixed-rate tick: gravity, ground clamp and horizontal anchor
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        let tick_hz = app
            .world
            .get_resource::<GameConfig>()
            .map_or(60.0, |config| config.tick_hz);

        app.insert_resource(Time::<Fixed>::from_hz(tick_hz));
        app.configure_sets(FixedUpdate, (TickSet::Physics, TickSet::Animation).chain());
        app.add_systems(FixedUpdate, physics_tick_system.in_set(TickSet::Physics));
    }
}

fn physics_tick_system(
    config: Res<GameConfig>,
    surface: Res<Surface>,
    mut query: Query<&mut PlayerState>,
) {
    for mut state in query.iter_mut() {
        step_physics(&mut state, &config.player, &surface);
    }
}

/// One physics tick: integrate, clamp to ground, recompute size, move horizontally
pub fn step_physics(state: &mut PlayerState, config: &PlayerConfig, surface: &Surface) {
    integrate_gravity(state, config);
    clamp_to_ground(state, config, surface);
    state.update_size(config);
    advance_horizontal(state, config, surface);
}

/// Velocity picks up gravity before it moves the player
pub fn integrate_gravity(state: &mut PlayerState, config: &PlayerConfig) {
    state.vertical_velocity += config.gravity;
    state.position.y += state.vertical_velocity;
}

/// Landing clears the jump and, unless sliding, restores the running cycle.
/// Returns true when the player is on the ground after the clamp.
pub fn clamp_to_ground(state: &mut PlayerState, config: &PlayerConfig, surface: &Surface) -> bool {
    if !state.is_grounded(config, surface) {
        return false;
    }

    state.position.y = state.ground_y(config, surface);
    state.vertical_velocity = 0.0;
    state.is_jumping = false;
    state.jump_count = 0;
    if !state.is_sliding {
        state.running_frames = SpriteKey::RUNNING_CYCLE.to_vec();
    }
    true
}

pub fn advance_horizontal(state: &mut PlayerState, config: &PlayerConfig, surface: &Surface) {
    match config.anchor {
        HorizontalAnchor::Fixed => {}
        HorizontalAnchor::Scrolling => {
            state.position.x += config.scroll_speed;
            if state.position.x > surface.width {
                state.position.x = -state.size.width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;

    fn setup() -> (PlayerConfig, Surface, PlayerState) {
        let config = PlayerConfig::default();
        let surface = Surface::new(1280.0, 720.0);
        let state = PlayerState::new(&config, &surface);
        (config, surface, state)
    }

    #[test]
    fn test_gravity_integration() {
        let (config, _surface, mut state) = setup();
        state.position.y = 100.0;

        integrate_gravity(&mut state, &config);
        assert_eq!(state.vertical_velocity, 0.5);
        assert_eq!(state.position.y, 100.5);

        integrate_gravity(&mut state, &config);
        assert_eq!(state.vertical_velocity, 1.0);
        assert_eq!(state.position.y, 101.5);
    }

    #[test]
    fn test_first_tick_snaps_to_ground() {
        let (config, surface, mut state) = setup();

        step_physics(&mut state, &config, &surface);
        assert_eq!(state.position.y, 270.0);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_rest_stays_on_ground() {
        let (config, surface, mut state) = setup();

        for _ in 0..500 {
            step_physics(&mut state, &config, &surface);
            assert!(state.position.y <= state.ground_y(&config, &surface));
        }
        assert_eq!(state.position.y, 270.0);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let (config, surface, mut state) = setup();
        step_physics(&mut state, &config, &surface);
        state.jump(&config);

        step_physics(&mut state, &config, &surface);
        assert!(state.position.y < 270.0);
        assert!(state.is_jumping);

        let mut ticks = 1;
        while state.is_jumping {
            step_physics(&mut state, &config, &surface);
            ticks += 1;
            assert!(ticks < 1000, "player never landed");
        }

        assert_eq!(state.position.y, 270.0);
        assert_eq!(state.jump_count, 0);
        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(state.running_frames, SpriteKey::RUNNING_CYCLE.to_vec());
    }

    #[test]
    fn test_landing_after_forced_position() {
        let (config, surface, mut state) = setup();
        state.jump(&config);
        assert_eq!(state.jump_count, 1);

        state.position.y = 400.0;
        step_physics(&mut state, &config, &surface);

        assert_eq!(state.jump_count, 0);
        assert!(!state.is_jumping);
        assert_eq!(state.running_frames, SpriteKey::RUNNING_CYCLE.to_vec());
    }

    #[test]
    fn test_landing_while_sliding_keeps_jump_frames() {
        let (config, surface, mut state) = setup();
        state.start_slide(&config);
        state.jump(&config);

        state.position.y = 400.0;
        step_physics(&mut state, &config, &surface);

        assert!(!state.is_jumping);
        assert!(state.is_sliding);
        assert_eq!(state.running_frames, vec![SpriteKey::Jump1]);
    }

    #[test]
    fn test_clamp_not_applied_in_air() {
        let (config, surface, mut state) = setup();
        state.position.y = 100.0;
        state.vertical_velocity = -4.0;
        state.is_jumping = true;
        state.jump_count = 1;

        assert!(!clamp_to_ground(&mut state, &config, &surface));
        assert_eq!(state.position.y, 100.0);
        assert!(state.is_jumping);
        assert_eq!(state.jump_count, 1);
    }

    #[test]
    fn test_fixed_anchor_does_not_move() {
        let (config, surface, mut state) = setup();
        for _ in 0..100 {
            step_physics(&mut state, &config, &surface);
        }
        assert_eq!(state.position.x, 400.0);
    }

    #[test]
    fn test_scrolling_anchor_moves_and_wraps() {
        let (mut config, surface, mut state) = setup();
        config.anchor = HorizontalAnchor::Scrolling;
        config.scroll_speed = 10.0;

        step_physics(&mut state, &config, &surface);
        assert_eq!(state.position.x, 410.0);

        state.position = Position::new(1275.0, state.position.y);
        step_physics(&mut state, &config, &surface);
        assert_eq!(state.position.x, -400.0);
    }

    #[test]
    fn test_deterministic_tick() {
        let run_simulation = || {
            let (config, surface, mut state) = setup();
            step_physics(&mut state, &config, &surface);
            state.jump(&config);
            for tick in 0..40 {
                if tick == 10 {
                    state.jump(&config);
                }
                step_physics(&mut state, &config, &surface);
            }
            state
        };

        assert_eq!(run_simulation(), run_simulation());
    }

    #[test]
    fn test_fixed_update_ticks_player() {
        use crate::enums::SpriteChoice;
        use crate::plugins::AnimationPlugin;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig::default())
            .insert_resource(Surface::new(1280.0, 720.0))
            .add_plugins(PhysicsPlugin)
            .add_plugins(AnimationPlugin);

        let (config, surface, mut state) = setup();
        state.running = true;
        let player = app.world.spawn((state, SpriteChoice::default())).id();

        for _ in 0..25 {
            app.world.run_schedule(FixedUpdate);
        }

        let state = app.world.get::<PlayerState>(player).unwrap();
        assert_eq!(state.position.y, state.ground_y(&config, &surface));
        assert_eq!(state.frame_index, 25);
        assert_eq!(
            *app.world.get::<SpriteChoice>(player).unwrap(),
            SpriteChoice::Frame(SpriteKey::Run3)
        );
    }
}
