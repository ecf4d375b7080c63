//! Collaborator traits (engine, network registry, assets, remote side, UI)
//!
//! Core logic никогда не зовёт движок напрямую: каждая операция получает
//! нужные collaborator'ы аргументом. Реализации: game client host (natives)
//! и `HeadlessBackend` (in-memory, для тестов и demo).

use bevy::math::Vec3;

use super::handles::{
    BoneId, ControlAction, ModelHash, NetworkId, ObjectHandle, PedHandle, ServerId,
};
use crate::cloth::{Component, Prop};
use crate::plaster::{PlasterChange, PlasterLocation, ProgressRequest};

/// Параметры attach объекта к кости педа
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachParams {
    pub bone_index: i32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub soft_pinning: bool,
    /// Collision response с другими entity
    pub collision: bool,
    pub is_ped: bool,
    pub vertex_index: i32,
    pub fixed_rotation: bool,
}

impl AttachParams {
    /// Жёсткий attach: без collision, rotation зафиксирован
    pub fn rigid(bone_index: i32, position: Vec3, rotation: Vec3) -> Self {
        Self {
            bone_index,
            position,
            rotation,
            soft_pinning: true,
            collision: false,
            is_ped: true,
            vertex_index: 0,
            fixed_rotation: true,
        }
    }
}

/// Entity/engine adapter
pub trait EngineAdapter: Send + Sync {
    // === Player ===

    fn player_ped(&self) -> PedHandle;
    fn local_server_id(&self) -> ServerId;
    fn entity_model(&self, ped: PedHandle) -> ModelHash;
    fn entity_coords(&self, ped: PedHandle) -> Vec3;
    fn ped_bone_index(&self, ped: PedHandle, bone: BoneId) -> i32;

    // === Component variations ===

    fn drawable_variation(&self, ped: PedHandle, component: Component) -> i32;
    fn texture_variation(&self, ped: PedHandle, component: Component) -> i32;
    fn set_component_variation(
        &mut self,
        ped: PedHandle,
        component: Component,
        drawable: i32,
        texture: i32,
        palette: i32,
    );
    fn drawable_variation_count(&self, ped: PedHandle, component: Component) -> i32;
    fn texture_variation_count(&self, ped: PedHandle, component: Component, drawable: i32) -> i32;

    // === Prop variations ===

    /// -1 если prop не надет
    fn prop_index(&self, ped: PedHandle, prop: Prop) -> i32;
    fn prop_texture_index(&self, ped: PedHandle, prop: Prop) -> i32;
    fn set_prop_index(&mut self, ped: PedHandle, prop: Prop, drawable: i32, texture: i32);
    fn clear_prop(&mut self, ped: PedHandle, prop: Prop);
    fn prop_drawable_variation_count(&self, ped: PedHandle, prop: Prop) -> i32;
    fn prop_texture_variation_count(&self, ped: PedHandle, prop: Prop, drawable: i32) -> i32;

    // === Objects ===

    /// Networked объект на координатах
    fn create_object(&mut self, model: ModelHash, coords: Vec3) -> ObjectHandle;
    fn delete_object(&mut self, object: ObjectHandle);
    fn set_object_collision(&mut self, object: ObjectHandle, enabled: bool, keep_physics: bool);
    /// Mission entity - движок не auto-cleanup'ит объект
    fn set_mission_entity(&mut self, object: ObjectHandle);
    fn attach_object_to_ped(&mut self, object: ObjectHandle, ped: PedHandle, params: &AttachParams);

    // === Input ===

    /// Disable action на текущий frame
    fn disable_control_action(&mut self, group: i32, action: ControlAction);
}

/// Networked-object registry
pub trait NetworkRegistry: Send + Sync {
    fn object_to_net(&self, object: ObjectHandle) -> NetworkId;
    fn set_network_id_can_migrate(&mut self, net_id: NetworkId, can_migrate: bool);
    /// Сообщить authoritative стороне, что net id - attached объект
    fn register_attached(&mut self, net_id: NetworkId);
    fn unregister_attached(&mut self, net_id: NetworkId);
}

/// Результат запроса модели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLoad {
    Ready,
    /// Ещё грузится - спросить снова на следующем frame
    Loading,
    Failed,
}

/// Asset loader (scoped acquisition вокруг создания объекта)
pub trait AssetLoader: Send + Sync {
    fn request_model(&mut self, model: ModelHash) -> ModelLoad;
    fn release_model(&mut self, model: ModelHash);
}

/// Remote messaging. Ответы приходят событиями (`AuthorizationReply`,
/// `PlasterLocationsReply`), здесь только отправка.
pub trait RemoteMessaging: Send + Sync {
    fn request_authorization(&mut self);
    fn request_player_plasters(&mut self, target: ServerId);
    fn notify_plaster_change(&mut self, target: ServerId, location: PlasterLocation, change: PlasterChange);
}

/// UI presentation
pub trait MenuPresenter: Send + Sync {
    fn open_plaster_menu(&mut self, target: ServerId, locations: &[PlasterLocation]);
    fn close_menu(&mut self);
}

/// Timed interruptible progress action. Завершение - `ProgressFinished`.
pub trait ProgressRunner: Send + Sync {
    fn start(&mut self, request: &ProgressRequest);
}
