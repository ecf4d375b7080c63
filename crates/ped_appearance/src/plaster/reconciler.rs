//! Plaster reconciler - local cache ↔ authoritative список
//!
//! # State machine (per location)
//!
//! ```text
//! Absent ──snapshot содержит──► Pending ──model Ready──► Attached
//!    ▲                            │ Failed / нет prop        │
//!    └────────────────────────────┴──────snapshot без────────┘
//! ```
//!
//! - `Pending` живёт, пока asset loader отвечает `Loading`; каждый frame
//!   `poll_pending` спрашивает снова.
//! - `Failed` убирает entry целиком → следующий snapshot попробует снова.
//! - Повторный snapshot с теми же location'ами ничего не трогает.
//!
//! Cache принадлежит только reconciler'у; authoritative список read-only.

use bevy::prelude::*;
use std::collections::BTreeMap;

use super::config::{PlasterConfig, PlasterConfigs, PlasterLocation};
use crate::bridge::{
    AssetLoader, AttachParams, EngineAdapter, ModelHash, ModelLoad, NetworkRegistry,
    NetworkedObject,
};
use crate::logger::{log, log_error, log_warning};

/// Состояние одной location в local cache (Absent = нет entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentState {
    /// Model запрошена, объекта ещё нет
    Pending { prop_model: ModelHash },
    Attached { object: NetworkedObject },
}

/// Collaborator'ы на один reconciliation pass
pub struct AttachContext<'a> {
    pub engine: &'a mut dyn EngineAdapter,
    pub network: &'a mut dyn NetworkRegistry,
    pub assets: &'a mut dyn AssetLoader,
    pub configs: &'a PlasterConfigs,
}

/// Владелец attachment cache
///
/// `cache == None` до `PlayerEvent::Loaded`: обновления до загрузки игрока
/// игнорируются.
#[derive(Resource, Debug, Default)]
pub struct PlasterReconciler {
    cache: Option<BTreeMap<PlasterLocation, AttachmentState>>,
}

impl PlasterReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.cache.is_some()
    }

    pub fn state(&self, location: PlasterLocation) -> Option<AttachmentState> {
        self.cache.as_ref()?.get(&location).copied()
    }

    /// Location'ы в cache (Pending + Attached)
    pub fn locations(&self) -> Vec<PlasterLocation> {
        self.cache
            .as_ref()
            .map(|cache| cache.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn attached_objects(&self) -> Vec<(PlasterLocation, NetworkedObject)> {
        let Some(cache) = &self.cache else {
            return Vec::new();
        };

        cache
            .iter()
            .filter_map(|(location, state)| match state {
                AttachmentState::Attached { object } => Some((*location, *object)),
                AttachmentState::Pending { .. } => None,
            })
            .collect()
    }

    /// Первый snapshot сессии: создаёт cache и сразу reconcile'ит
    pub fn on_player_loaded(
        &mut self,
        plasters: &[PlasterLocation],
        body_model: ModelHash,
        ctx: &mut AttachContext,
    ) {
        if self.cache.is_none() {
            self.cache = Some(BTreeMap::new());
            log(&format!("plaster: cache initialised ({} authoritative)", plasters.len()));
        }

        self.reconcile(plasters, body_model, ctx);
    }

    /// Очередной snapshot (no-op до загрузки игрока)
    pub fn on_snapshot(
        &mut self,
        plasters: &[PlasterLocation],
        body_model: ModelHash,
        ctx: &mut AttachContext,
    ) {
        if self.cache.is_none() {
            log("plaster: snapshot before player load ignored");
            return;
        }

        self.reconcile(plasters, body_model, ctx);
    }

    /// Ped пересоздан: объекты висят на старом педе, пересоздаём всё
    pub fn on_ped_changed(
        &mut self,
        plasters: &[PlasterLocation],
        body_model: ModelHash,
        ctx: &mut AttachContext,
    ) {
        if self.cache.is_none() {
            return;
        }

        self.teardown_all(ctx);
        self.reconcile(plasters, body_model, ctx);
    }

    /// Игрок выгружен: teardown + cache снова неактивен
    pub fn on_player_unloaded(&mut self, ctx: &mut AttachContext) {
        self.teardown_all(ctx);
        self.cache = None;
    }

    /// Diff cache против authoritative списка
    pub fn reconcile(
        &mut self,
        plasters: &[PlasterLocation],
        body_model: ModelHash,
        ctx: &mut AttachContext,
    ) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        let missing: Vec<PlasterLocation> = plasters
            .iter()
            .copied()
            .filter(|location| !cache.contains_key(location))
            .collect();
        let stale: Vec<PlasterLocation> = cache
            .keys()
            .copied()
            .filter(|location| !plasters.contains(location))
            .collect();

        for location in missing {
            // Дубликаты в списке: вторая копия уже в cache
            if self.state(location).is_none() {
                self.begin_attach(location, body_model, ctx);
            }
        }

        for location in stale {
            self.teardown(location, ctx);
        }
    }

    /// Повторно спрашивает loader для всех Pending location'ов
    pub fn poll_pending(&mut self, ctx: &mut AttachContext) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        let pending: Vec<(PlasterLocation, ModelHash)> = cache
            .iter()
            .filter_map(|(location, state)| match state {
                AttachmentState::Pending { prop_model } => Some((*location, *prop_model)),
                AttachmentState::Attached { .. } => None,
            })
            .collect();

        for (location, prop_model) in pending {
            self.advance(location, prop_model, ctx);
        }
    }

    /// Убирает location: unregister net id, delete объект (или release model
    /// для Pending), удалить entry.
    /// Отсутствующая location - no-op.
    pub fn teardown(&mut self, location: PlasterLocation, ctx: &mut AttachContext) -> bool {
        let Some(state) = self.cache.as_mut().and_then(|cache| cache.remove(&location)) else {
            return false;
        };

        match state {
            AttachmentState::Attached { object } => {
                ctx.network.unregister_attached(object.net_id);
                ctx.engine.delete_object(object.handle);
                log(&format!(
                    "plaster: removed {:?} (object {:?}, net {:?})",
                    location, object.handle, object.net_id
                ));
            }
            AttachmentState::Pending { prop_model } => {
                // Объекта ещё нет, но model уже запрошена
                ctx.assets.release_model(prop_model);
                log(&format!("plaster: dropped pending {:?}", location));
            }
        }

        true
    }

    pub fn teardown_all(&mut self, ctx: &mut AttachContext) {
        for location in self.locations() {
            self.teardown(location, ctx);
        }
    }

    // === Helpers ===

    fn begin_attach(&mut self, location: PlasterLocation, body_model: ModelHash, ctx: &mut AttachContext) {
        let configs = ctx.configs;
        let Some(config) = configs.get(location) else {
            log_error(&format!("plaster: no config for {:?}", location));
            return;
        };

        let Some(prop_model) = config.prop_for(body_model) else {
            log_warning(&format!(
                "plaster: no prop for {:?} on model {:?}, retry on next snapshot",
                location, body_model
            ));
            return;
        };

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(location, AttachmentState::Pending { prop_model });
        }

        self.advance(location, prop_model, ctx);
    }

    fn advance(&mut self, location: PlasterLocation, prop_model: ModelHash, ctx: &mut AttachContext) {
        match ctx.assets.request_model(prop_model) {
            ModelLoad::Loading => {}
            ModelLoad::Failed => {
                if let Some(cache) = self.cache.as_mut() {
                    cache.remove(&location);
                }
                log_warning(&format!(
                    "plaster: model {:?} for {:?} failed to load, retry on next snapshot",
                    prop_model, location
                ));
            }
            ModelLoad::Ready => {
                let configs = ctx.configs;
                let Some(config) = configs.get(location) else {
                    return;
                };

                let object = spawn_attached(config, prop_model, ctx);
                ctx.assets.release_model(prop_model);

                if let Some(cache) = self.cache.as_mut() {
                    cache.insert(location, AttachmentState::Attached { object });
                }

                log(&format!(
                    "plaster: attached {:?} (object {:?}, net {:?})",
                    location, object.handle, object.net_id
                ));
            }
        }
    }
}

/// Spawn prop у педа, регистрация в network registry, attach к кости
fn spawn_attached(config: &PlasterConfig, prop_model: ModelHash, ctx: &mut AttachContext) -> NetworkedObject {
    let ped = ctx.engine.player_ped();
    let coords = ctx.engine.entity_coords(ped);

    let handle = ctx.engine.create_object(prop_model, coords);
    let net_id = ctx.network.object_to_net(handle);
    ctx.network.register_attached(net_id);

    ctx.engine.set_object_collision(handle, false, true);
    ctx.engine.set_mission_entity(handle);
    ctx.network.set_network_id_can_migrate(net_id, false);

    let bone_index = ctx.engine.ped_bone_index(ped, config.bone);
    ctx.engine.attach_object_to_ped(
        handle,
        ped,
        &AttachParams::rigid(bone_index, config.position(), config.rotation()),
    );

    NetworkedObject { handle, net_id }
}
