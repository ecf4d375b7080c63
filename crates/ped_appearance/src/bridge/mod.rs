//! Bridge к движку и внешним сервисам
//!
//! # Архитектура
//!
//! ```text
//! ECS systems (plaster, cloth)
//!     ↓ &mut dyn Trait
//! Engine / Network / ModelAssets / Remote / Menu / Progress (resources)
//!     ↓
//! host implementation (natives) | HeadlessBackend (in-memory)
//! ```
//!
//! Каждый collaborator - отдельный resource с boxed trait object'ом, чтобы
//! system брала ровно те, что ей нужны.

use bevy::prelude::*;

pub mod engine;
pub mod handles;
pub mod headless;

pub use engine::*;
pub use handles::*;
pub use headless::{HeadlessBackend, HeadlessObject, RemoteCall};

#[derive(Resource)]
pub struct Engine(pub Box<dyn EngineAdapter>);

impl Engine {
    pub fn adapter(&mut self) -> &mut dyn EngineAdapter {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct Network(pub Box<dyn NetworkRegistry>);

impl Network {
    pub fn registry(&mut self) -> &mut dyn NetworkRegistry {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct ModelAssets(pub Box<dyn AssetLoader>);

impl ModelAssets {
    pub fn loader(&mut self) -> &mut dyn AssetLoader {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct Remote(pub Box<dyn RemoteMessaging>);

impl Remote {
    pub fn messaging(&mut self) -> &mut dyn RemoteMessaging {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct Menu(pub Box<dyn MenuPresenter>);

impl Menu {
    pub fn presenter(&mut self) -> &mut dyn MenuPresenter {
        self.0.as_mut()
    }
}

#[derive(Resource)]
pub struct Progress(pub Box<dyn ProgressRunner>);

impl Progress {
    pub fn runner(&mut self) -> &mut dyn ProgressRunner {
        self.0.as_mut()
    }
}
