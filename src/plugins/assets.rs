use crate::components::PlayerState;
use crate::config::GameConfig;
use crate::enums::SpriteKey;
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

/// Loaded-resource table: one image handle per logical sprite plus completion tracking
#[derive(Resource, Clone, Debug, Default)]
pub struct SpriteRegistry {
    handles: HashMap<SpriteKey, Handle<Image>>,
    loaded: HashSet<AssetId<Image>>,
    failed: HashSet<SpriteKey>,
}

impl SpriteRegistry {
    pub fn insert(&mut self, key: SpriteKey, handle: Handle<Image>) {
        self.handles.insert(key, handle);
    }

    pub fn handle(&self, key: SpriteKey) -> Option<&Handle<Image>> {
        self.handles.get(&key)
    }

    /// Count a completed load. Returns false for assets that are not ours or already counted.
    pub fn mark_loaded(&mut self, id: AssetId<Image>) -> bool {
        if !self.handles.values().any(|handle| handle.id() == id) {
            return false;
        }
        self.loaded.insert(id)
    }

    pub fn is_loaded(&self, key: SpriteKey) -> bool {
        self.handle(key)
            .is_some_and(|handle| self.loaded.contains(&handle.id()))
    }

    pub fn loaded_count(&self) -> usize {
        SpriteKey::ALL
            .iter()
            .filter(|key| self.is_loaded(**key))
            .count()
    }

    /// True once every required sprite has finished loading
    pub fn ready(&self) -> bool {
        SpriteKey::ALL.iter().all(|key| self.is_loaded(*key))
    }
}

/// Plugin for the sprite asset registry
pub struct AssetRegistryPlugin;

impl Plugin for AssetRegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteRegistry>()
            .add_systems(Startup, load_sprites_system)
            .add_systems(Update, track_sprite_loads_system);
    }
}

/// Kick off loading every sprite named in the config
fn load_sprites_system(
    asset_server: Option<Res<AssetServer>>,
    config: Res<GameConfig>,
    mut registry: ResMut<SpriteRegistry>,
) {
    let Some(asset_server) = asset_server else {
        warn!("No asset server available, sprites will not load");
        return;
    };

    for key in SpriteKey::ALL {
        let path = config.sprites.path(key).to_string();
        registry.insert(key, asset_server.load(path));
    }

    info!("Loading {} sprites", SpriteKey::ALL.len());
}

/// Count load completions and start the player running once everything is in
fn track_sprite_loads_system(
    mut asset_events: EventReader<AssetEvent<Image>>,
    asset_server: Option<Res<AssetServer>>,
    mut registry: ResMut<SpriteRegistry>,
    mut player_query: Query<&mut PlayerState>,
    mut announced_ready: Local<bool>,
) {
    for event in asset_events.read() {
        if let AssetEvent::LoadedWithDependencies { id } = event
            && registry.mark_loaded(*id)
        {
            info!(
                "Sprite loaded ({}/{})",
                registry.loaded_count(),
                SpriteKey::ALL.len()
            );
        }
    }

    if let Some(asset_server) = asset_server {
        for key in SpriteKey::ALL {
            if registry.failed.contains(&key) {
                continue;
            }
            let Some(handle) = registry.handle(key) else {
                continue;
            };
            if matches!(asset_server.get_load_state(handle.id()), Some(LoadState::Failed)) {
                warn!("Failed to load sprite {:?}", key);
                registry.failed.insert(key);
            }
        }
    }

    if !*announced_ready && registry.ready() {
        *announced_ready = true;
        for mut state in player_query.iter_mut() {
            state.running = true;
        }
        info!("All sprites loaded, player running");
    }
}
