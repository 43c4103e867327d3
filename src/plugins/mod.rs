pub mod animation;
pub mod assets;
pub mod physics;
pub mod player;
pub mod render;

pub use animation::AnimationPlugin;
pub use assets::AssetRegistryPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
pub use render::RenderPlugin;
