//! Cloth module - outfit ↔ per-slot вариации педа
//!
//! # Architecture
//!
//! **Catalogs** (`catalog`): закрытые enum'ы Component/Prop + варианты
//! каталогов (Standard / Showroom).
//!
//! **Codec** (`service`): apply/capture outfit'а, max options.
//!
//! **Rules** (`hair`, `gloves`): data-таблицы (hair под маской, перчатки
//! по arm drawable'у).
//!
//! **ECS:** `ApplyOutfitIntent` → `process_apply_outfit` (Update).

use bevy::prelude::*;

pub mod catalog;
pub mod gloves;
pub mod hair;
pub mod outfit;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use catalog::{
    CatalogError, Component, ComponentCatalog, PropCatalog, Prop, SlotRef, FFS_COMPONENTS,
};
pub use gloves::{check_wearing_gloves, is_gloved};
pub use hair::keeps_hair_with_mask;
pub use outfit::*;
pub use service::*;

use crate::bridge::Engine;
use crate::logger::{log, log_warning};
use crate::player::{PlayerPlugin, PlayerSnapshotSet, PlayerState};

/// Надеть outfit на ped игрока
#[derive(Event, Clone, Debug)]
pub struct ApplyOutfitIntent {
    pub outfit: Outfit,
}

/// Process apply outfit intents
pub fn process_apply_outfit(
    mut events: EventReader<ApplyOutfitIntent>,
    player: Res<PlayerState>,
    mut engine: ResMut<Engine>,
) {
    for intent in events.read() {
        // Hair type берём из snapshot'а - без игрока применять нечего
        let Some(snapshot) = player.get() else {
            log_warning("apply outfit: player not loaded, intent dropped");
            continue;
        };

        let engine = engine.adapter();
        let ped = engine.player_ped();
        apply_outfit(engine, ped, &intent.outfit, snapshot.skin.hair_type);

        log(&format!(
            "apply outfit: {} components, {} props on {:?}",
            intent.outfit.components.len(),
            intent.outfit.props.len(),
            ped
        ));
    }
}

/// Clothing plugin
pub struct ClothingPlugin;

impl Plugin for ClothingPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }

        app.add_event::<ApplyOutfitIntent>()
            .add_systems(Update, process_apply_outfit.after(PlayerSnapshotSet));
    }
}
