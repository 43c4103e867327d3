use crate::components::{BodySize, Player, PlayerState, Position, Surface};
use crate::config::GameConfig;
use crate::enums::SpriteChoice;
use crate::plugins::assets::SpriteRegistry;
use bevy::prelude::*;
use bevy::transform::TransformSystem;

/// Fill colour of the placeholder rectangle drawn before sprites are available
pub const PLACEHOLDER_COLOR: Color = Color::RED;

/// Render plugin - clears the surface and paints the player
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        let clear = app
            .world
            .get_resource::<GameConfig>()
            .map_or([1.0, 1.0, 1.0], |config| config.window.clear_color);

        app.insert_resource(ClearColor(Color::rgb(clear[0], clear[1], clear[2])))
            .add_systems(Startup, setup_camera)
            .add_systems(
                PostUpdate,
                paint_player_system.before(TransformSystem::TransformPropagate),
            );
    }
}

/// Camera marker component
#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), GameCamera));
}

/// Copy the player's sprite choice, size and position onto its sprite
#[allow(clippy::type_complexity)]
fn paint_player_system(
    registry: Res<SpriteRegistry>,
    surface: Res<Surface>,
    mut query: Query<
        (
            &PlayerState,
            &SpriteChoice,
            &mut Sprite,
            &mut Handle<Image>,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    for (state, choice, mut sprite, mut texture, mut transform) in query.iter_mut() {
        let (next_texture, color) = match choice {
            SpriteChoice::Frame(key) => match registry.handle(*key) {
                Some(handle) => (handle.clone(), Color::WHITE),
                // Nothing to draw until the registry knows the sprite
                None => (Handle::default(), Color::NONE),
            },
            SpriteChoice::Placeholder => (Handle::default(), PLACEHOLDER_COLOR),
        };

        if *texture != next_texture {
            *texture = next_texture;
        }
        sprite.color = color;
        sprite.custom_size = Some(Vec2::new(state.size.width, state.size.height));
        transform.translation = surface_to_world(state.position, state.size, &surface)
            .extend(transform.translation.z);
    }
}

/// Convert a top-left, y-down surface rectangle into the centre point of the
/// same rectangle in world space (origin at the surface centre, y up)
pub fn surface_to_world(position: Position, size: BodySize, surface: &Surface) -> Vec2 {
    Vec2::new(
        position.x + size.width / 2.0 - surface.width / 2.0,
        surface.height / 2.0 - (position.y + size.height / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::enums::SpriteKey;

    #[test]
    fn test_surface_to_world_top_left() {
        let surface = Surface::new(1280.0, 720.0);
        let world = surface_to_world(
            Position::new(0.0, 0.0),
            BodySize::new(100.0, 100.0),
            &surface,
        );
        assert_eq!(world, Vec2::new(-590.0, 310.0));
    }

    #[test]
    fn test_surface_to_world_grounded_player() {
        let surface = Surface::new(1280.0, 720.0);
        let world = surface_to_world(
            Position::new(400.0, 270.0),
            BodySize::new(400.0, 400.0),
            &surface,
        );
        assert_eq!(world, Vec2::new(-40.0, -110.0));
    }

    fn test_app(choice: SpriteChoice, registry: SpriteRegistry) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig::default())
            .insert_resource(Surface::new(1280.0, 720.0))
            .insert_resource(registry)
            .add_systems(PostUpdate, paint_player_system);

        let mut state = PlayerState::new(&PlayerConfig::default(), &Surface::new(1280.0, 720.0));
        state.position = Position::new(400.0, 270.0);
        let player = app
            .world
            .spawn((Player, state, choice, SpriteBundle::default()))
            .id();
        (app, player)
    }

    #[test]
    fn test_placeholder_painted_red() {
        let (mut app, player) = test_app(SpriteChoice::Placeholder, SpriteRegistry::default());
        app.update();

        let sprite = app.world.get::<Sprite>(player).unwrap();
        assert_eq!(sprite.color, PLACEHOLDER_COLOR);
        assert_eq!(sprite.custom_size, Some(Vec2::new(400.0, 400.0)));

        let transform = app.world.get::<Transform>(player).unwrap();
        assert_eq!(transform.translation.x, -40.0);
        assert_eq!(transform.translation.y, -110.0);
    }

    #[test]
    fn test_frame_uses_registry_handle() {
        let mut registry = SpriteRegistry::default();
        let handle: Handle<Image> = Handle::weak_from_u128(7);
        registry.insert(SpriteKey::Slide, handle.clone());

        let (mut app, player) = test_app(SpriteChoice::Frame(SpriteKey::Slide), registry);
        app.update();

        assert_eq!(*app.world.get::<Handle<Image>>(player).unwrap(), handle);
        assert_eq!(app.world.get::<Sprite>(player).unwrap().color, Color::WHITE);
    }

    #[test]
    fn test_global_transform_matches_same_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(bevy::transform::TransformPlugin)
            .insert_resource(GameConfig::default())
            .insert_resource(Surface::new(1280.0, 720.0))
            .init_resource::<SpriteRegistry>()
            .add_systems(
                PostUpdate,
                paint_player_system.before(TransformSystem::TransformPropagate),
            );

        let mut state = PlayerState::new(&PlayerConfig::default(), &Surface::new(1280.0, 720.0));
        state.position = Position::new(400.0, 270.0);
        let player = app
            .world
            .spawn((Player, state, SpriteChoice::Placeholder, SpriteBundle::default()))
            .id();

        app.update();

        let global = app.world.get::<GlobalTransform>(player).unwrap();
        assert_eq!(global.translation().x, -40.0);
        assert_eq!(global.translation().y, -110.0);
    }

    #[test]
    fn test_unknown_frame_draws_nothing() {
        let (mut app, player) =
            test_app(SpriteChoice::Frame(SpriteKey::Run1), SpriteRegistry::default());
        app.update();

        assert_eq!(app.world.get::<Sprite>(player).unwrap().color, Color::NONE);
    }
}
