use crate::components::{Player, PlayerState, Surface};
use crate::config::GameConfig;
use crate::enums::{PlayerCommand, SpriteChoice};
use bevy::prelude::*;
use bevy::window::WindowResized;

/// Keys mapped to player commands
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct InputBindings {
    pub jump: KeyCode,
    pub slide: KeyCode,
    pub reset: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            jump: KeyCode::Up,
            slide: KeyCode::Down,
            reset: KeyCode::R,
        }
    }
}

/// Plugin for player spawning, input and command handling
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world.contains_resource::<Surface>() {
            let surface = app
                .world
                .get_resource::<GameConfig>()
                .map_or(Surface::new(1280.0, 720.0), |config| {
                    Surface::new(config.window.width, config.window.height)
                });
            app.insert_resource(surface);
        }

        app.init_resource::<InputBindings>()
            .add_event::<PlayerCommand>()
            .add_event::<WindowResized>()
            .add_systems(Startup, spawn_player_system)
            .add_systems(
                Update,
                (
                    process_input_system,
                    handle_resize_system,
                    apply_player_commands_system,
                )
                    .chain(),
            );
    }
}

fn spawn_player_system(mut commands: Commands, config: Res<GameConfig>, surface: Res<Surface>) {
    commands.spawn((
        Player,
        PlayerState::new(&config.player, &surface),
        SpriteChoice::default(),
        SpriteBundle::default(),
    ));
}

/// Translate key presses and releases into player commands
fn process_input_system(
    keyboard: Res<Input<KeyCode>>,
    bindings: Res<InputBindings>,
    mut commands: EventWriter<PlayerCommand>,
) {
    if keyboard.just_pressed(bindings.jump) {
        commands.send(PlayerCommand::Jump);
    }
    if keyboard.just_pressed(bindings.slide) {
        commands.send(PlayerCommand::StartSlide);
    }
    if keyboard.just_released(bindings.slide) {
        commands.send(PlayerCommand::EndSlide);
    }
    if keyboard.just_pressed(bindings.reset) {
        commands.send(PlayerCommand::Reset);
    }
}

/// Track the window size and re-center the player when it changes
fn handle_resize_system(
    mut resize_events: EventReader<WindowResized>,
    config: Res<GameConfig>,
    mut surface: ResMut<Surface>,
    mut commands: EventWriter<PlayerCommand>,
) {
    let Some(last) = resize_events.read().last() else {
        return;
    };

    let resized = Surface::new(last.width, last.height);
    if resized == *surface {
        return;
    }

    *surface = resized;
    info!("Surface resized to {}x{}", last.width, last.height);

    if config.player.recenter_on_resize {
        commands.send(PlayerCommand::Reset);
    }
}

fn apply_player_commands_system(
    mut player_commands: EventReader<PlayerCommand>,
    config: Res<GameConfig>,
    surface: Res<Surface>,
    mut query: Query<&mut PlayerState, With<Player>>,
) {
    for command in player_commands.read() {
        for mut state in query.iter_mut() {
            let applied = state.apply(*command, &config.player, &surface);
            if *command == PlayerCommand::Reset {
                info!("Player reset to ({}, {})", state.position.x, state.position.y);
            } else if !applied {
                debug!("Ignored {:?} in state {:?}", command, state.motion_state());
            }
        }
    }
}
