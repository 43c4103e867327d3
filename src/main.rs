use bevy::prelude::*;
use sidescroll_runner::config::{DEFAULT_CONFIG_PATH, load_config_or_default, report_config_source};
use sidescroll_runner::plugins::{
    AnimationPlugin, AssetRegistryPlugin, PhysicsPlugin, PlayerPlugin, RenderPlugin,
};

fn main() {
    let (config, source) = load_config_or_default(DEFAULT_CONFIG_PATH);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window.title.clone(),
                resolution: (config.window.width, config.window.height).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        .insert_resource(source)
        .add_systems(Startup, report_config_source)
        .add_plugins(PlayerPlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(AnimationPlugin)
        .add_plugins(AssetRegistryPlugin)
        .add_plugins(RenderPlugin)
        .run();
}
