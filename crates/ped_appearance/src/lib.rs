//! Ped Appearance Core
//!
//! ECS-ядро внешнего вида игрока на Bevy 0.16:
//! - cloth: outfit ↔ per-slot вариации педа, каталоги, glove/hair правила
//! - plaster: server-authoritative attachments (гипсы), action gate,
//!   request flow медика
//!
//! HYBRID ARCHITECTURE:
//! - ECS = state + правила (reconciliation, codec, gate)
//! - Engine = entity/object/input API за trait'ами в `bridge`
//!
//! Всё состояние выводимо из последнего authoritative snapshot'а игрока.

use bevy::prelude::*;

pub mod bridge;
pub mod cloth;
pub mod logger;
pub mod plaster;
pub mod player;
pub mod settings;

pub use bridge::{
    AssetLoader, EngineAdapter, HeadlessBackend, MenuPresenter, ModelHash, ModelLoad,
    NetworkRegistry, NetworkedObject, ProgressRunner, RemoteMessaging, ServerId,
};
pub use cloth::{ApplyOutfitIntent, ClothingPlugin, Component, Outfit, OutfitItem, Prop};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use plaster::{PlasterLocation, PlasterPlugin, PlasterReconciler};
pub use player::{PlayerEvent, PlayerPlugin, PlayerSnapshot, PlayerState};
pub use settings::AppearanceSettings;

/// Главный plugin (cloth + plaster)
pub struct AppearancePlugin;

impl Plugin for AppearancePlugin {
    fn build(&self, app: &mut App) {
        // Settings могли вставить до plugin'а - уважаем их log level
        let log_level = app
            .world_mut()
            .get_resource_or_insert_with(AppearanceSettings::default)
            .log_level;
        logger::set_log_level(log_level);

        app.add_plugins((PlayerPlugin, ClothingPlugin, PlasterPlugin));
    }
}

/// Minimal Bevy App для headless прогона (demo, тесты)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    app
}
