//! HeadlessBackend - in-memory реализация всех collaborator trait'ов
//!
//! Один shared state за `Arc<Mutex<..>>`: `install` кладёт клоны в
//! resources, а вызывающий код оставляет себе ещё один клон, чтобы
//! скриптовать ответы (model loads) и проверять side effects.

use bevy::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::*;
use super::handles::*;
use super::{Engine, Menu, ModelAssets, Network, Progress, Remote};
use crate::cloth::{Component, Prop};
use crate::plaster::{PlasterChange, PlasterLocation, ProgressRequest};

/// Объект, созданный через `create_object`
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessObject {
    pub model: ModelHash,
    pub coords: Vec3,
    pub collision: bool,
    pub mission_entity: bool,
    pub attached_to: Option<(PedHandle, AttachParams)>,
}

/// Исходящие remote вызовы
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Authorization,
    PlayerPlasters(ServerId),
    PlasterChange(ServerId, PlasterLocation, PlasterChange),
}

#[derive(Debug)]
pub struct HeadlessState {
    pub player_ped: PedHandle,
    pub server_id: ServerId,
    pub model: ModelHash,
    pub coords: Vec3,

    pub components: HashMap<(PedHandle, Component), (i32, i32, i32)>,
    pub props: HashMap<(PedHandle, Prop), (i32, i32)>,
    pub drawable_counts: HashMap<Component, i32>,
    pub texture_counts: HashMap<(Component, i32), i32>,
    pub prop_drawable_counts: HashMap<Prop, i32>,
    pub prop_texture_counts: HashMap<(Prop, i32), i32>,
    /// Сколько раз спрашивали texture count (component / prop)
    pub texture_count_queries: usize,
    pub prop_texture_count_queries: usize,

    pub objects: BTreeMap<ObjectHandle, HeadlessObject>,
    next_object: i32,
    pub created_count: usize,
    pub deleted_count: usize,

    pub migratable: HashMap<NetworkId, bool>,
    pub registered: BTreeSet<NetworkId>,
    pub register_calls: usize,
    pub unregister_calls: usize,

    /// Скриптованные ответы loader'а (по умолчанию Ready)
    pub model_loads: HashMap<ModelHash, ModelLoad>,
    pub model_requests: Vec<ModelHash>,
    pub released_models: Vec<ModelHash>,

    pub disabled_controls: Vec<(i32, ControlAction)>,

    pub remote_calls: Vec<RemoteCall>,
    pub open_menu: Option<(ServerId, Vec<PlasterLocation>)>,
    pub menu_open_count: usize,
    pub menu_close_count: usize,
    pub progress_started: Vec<ProgressRequest>,
}

impl Default for HeadlessState {
    fn default() -> Self {
        Self {
            player_ped: PedHandle(1),
            server_id: ServerId(1),
            model: crate::cloth::gloves::MALE_FREEMODE,
            coords: Vec3::ZERO,
            components: HashMap::new(),
            props: HashMap::new(),
            drawable_counts: HashMap::new(),
            texture_counts: HashMap::new(),
            prop_drawable_counts: HashMap::new(),
            prop_texture_counts: HashMap::new(),
            texture_count_queries: 0,
            prop_texture_count_queries: 0,
            objects: BTreeMap::new(),
            next_object: 100,
            created_count: 0,
            deleted_count: 0,
            migratable: HashMap::new(),
            registered: BTreeSet::new(),
            register_calls: 0,
            unregister_calls: 0,
            model_loads: HashMap::new(),
            model_requests: Vec::new(),
            released_models: Vec::new(),
            disabled_controls: Vec::new(),
            remote_calls: Vec::new(),
            open_menu: None,
            menu_open_count: 0,
            menu_close_count: 0,
            progress_started: Vec::new(),
        }
    }
}

/// Net id объекта = handle со сдвигом (разные namespace'ы не совпадают)
const NET_ID_OFFSET: i32 = 5000;

#[derive(Clone, Default)]
pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap()
    }

    /// Вставляет все collaborator resources в app
    pub fn install(&self, app: &mut App) {
        app.insert_resource(Engine(Box::new(self.clone())))
            .insert_resource(Network(Box::new(self.clone())))
            .insert_resource(ModelAssets(Box::new(self.clone())))
            .insert_resource(Remote(Box::new(self.clone())))
            .insert_resource(Menu(Box::new(self.clone())))
            .insert_resource(Progress(Box::new(self.clone())));
    }

    pub fn set_model_load(&self, model: ModelHash, load: ModelLoad) {
        self.state().model_loads.insert(model, load);
    }

    /// Все disabled actions с прошлого drain'а
    pub fn drain_disabled_controls(&self) -> Vec<(i32, ControlAction)> {
        std::mem::take(&mut self.state().disabled_controls)
    }

    pub fn drain_remote_calls(&self) -> Vec<RemoteCall> {
        std::mem::take(&mut self.state().remote_calls)
    }
}

impl EngineAdapter for HeadlessBackend {
    fn player_ped(&self) -> PedHandle {
        self.state().player_ped
    }

    fn local_server_id(&self) -> ServerId {
        self.state().server_id
    }

    fn entity_model(&self, _ped: PedHandle) -> ModelHash {
        self.state().model
    }

    fn entity_coords(&self, _ped: PedHandle) -> Vec3 {
        self.state().coords
    }

    fn ped_bone_index(&self, _ped: PedHandle, bone: BoneId) -> i32 {
        // Стабильный index на bone id (реальный движок резолвит по скелету)
        bone.0 % 100
    }

    fn drawable_variation(&self, ped: PedHandle, component: Component) -> i32 {
        self.state().components.get(&(ped, component)).map_or(0, |v| v.0)
    }

    fn texture_variation(&self, ped: PedHandle, component: Component) -> i32 {
        self.state().components.get(&(ped, component)).map_or(0, |v| v.1)
    }

    fn set_component_variation(
        &mut self,
        ped: PedHandle,
        component: Component,
        drawable: i32,
        texture: i32,
        palette: i32,
    ) {
        self.state().components.insert((ped, component), (drawable, texture, palette));
    }

    fn drawable_variation_count(&self, _ped: PedHandle, component: Component) -> i32 {
        self.state().drawable_counts.get(&component).copied().unwrap_or(0)
    }

    fn texture_variation_count(&self, _ped: PedHandle, component: Component, drawable: i32) -> i32 {
        let mut state = self.state();
        state.texture_count_queries += 1;
        state.texture_counts.get(&(component, drawable)).copied().unwrap_or(0)
    }

    fn prop_index(&self, ped: PedHandle, prop: Prop) -> i32 {
        self.state().props.get(&(ped, prop)).map_or(-1, |v| v.0)
    }

    fn prop_texture_index(&self, ped: PedHandle, prop: Prop) -> i32 {
        self.state().props.get(&(ped, prop)).map_or(-1, |v| v.1)
    }

    fn set_prop_index(&mut self, ped: PedHandle, prop: Prop, drawable: i32, texture: i32) {
        self.state().props.insert((ped, prop), (drawable, texture));
    }

    fn clear_prop(&mut self, ped: PedHandle, prop: Prop) {
        self.state().props.remove(&(ped, prop));
    }

    fn prop_drawable_variation_count(&self, _ped: PedHandle, prop: Prop) -> i32 {
        self.state().prop_drawable_counts.get(&prop).copied().unwrap_or(0)
    }

    fn prop_texture_variation_count(&self, _ped: PedHandle, prop: Prop, drawable: i32) -> i32 {
        let mut state = self.state();
        state.prop_texture_count_queries += 1;
        state.prop_texture_counts.get(&(prop, drawable)).copied().unwrap_or(0)
    }

    fn create_object(&mut self, model: ModelHash, coords: Vec3) -> ObjectHandle {
        let mut state = self.state();
        let handle = ObjectHandle(state.next_object);
        state.next_object += 1;
        state.created_count += 1;
        state.objects.insert(
            handle,
            HeadlessObject {
                model,
                coords,
                collision: true,
                mission_entity: false,
                attached_to: None,
            },
        );
        handle
    }

    fn delete_object(&mut self, object: ObjectHandle) {
        let mut state = self.state();
        if state.objects.remove(&object).is_some() {
            state.deleted_count += 1;
        }
    }

    fn set_object_collision(&mut self, object: ObjectHandle, enabled: bool, _keep_physics: bool) {
        if let Some(obj) = self.state().objects.get_mut(&object) {
            obj.collision = enabled;
        }
    }

    fn set_mission_entity(&mut self, object: ObjectHandle) {
        if let Some(obj) = self.state().objects.get_mut(&object) {
            obj.mission_entity = true;
        }
    }

    fn attach_object_to_ped(&mut self, object: ObjectHandle, ped: PedHandle, params: &AttachParams) {
        if let Some(obj) = self.state().objects.get_mut(&object) {
            obj.attached_to = Some((ped, *params));
        }
    }

    fn disable_control_action(&mut self, group: i32, action: ControlAction) {
        self.state().disabled_controls.push((group, action));
    }
}

impl NetworkRegistry for HeadlessBackend {
    fn object_to_net(&self, object: ObjectHandle) -> NetworkId {
        NetworkId(object.0 + NET_ID_OFFSET)
    }

    fn set_network_id_can_migrate(&mut self, net_id: NetworkId, can_migrate: bool) {
        self.state().migratable.insert(net_id, can_migrate);
    }

    fn register_attached(&mut self, net_id: NetworkId) {
        let mut state = self.state();
        state.register_calls += 1;
        state.registered.insert(net_id);
    }

    fn unregister_attached(&mut self, net_id: NetworkId) {
        let mut state = self.state();
        state.unregister_calls += 1;
        state.registered.remove(&net_id);
    }
}

impl AssetLoader for HeadlessBackend {
    fn request_model(&mut self, model: ModelHash) -> ModelLoad {
        let mut state = self.state();
        state.model_requests.push(model);
        state.model_loads.get(&model).copied().unwrap_or(ModelLoad::Ready)
    }

    fn release_model(&mut self, model: ModelHash) {
        self.state().released_models.push(model);
    }
}

impl RemoteMessaging for HeadlessBackend {
    fn request_authorization(&mut self) {
        self.state().remote_calls.push(RemoteCall::Authorization);
    }

    fn request_player_plasters(&mut self, target: ServerId) {
        self.state().remote_calls.push(RemoteCall::PlayerPlasters(target));
    }

    fn notify_plaster_change(&mut self, target: ServerId, location: PlasterLocation, change: PlasterChange) {
        self.state()
            .remote_calls
            .push(RemoteCall::PlasterChange(target, location, change));
    }
}

impl MenuPresenter for HeadlessBackend {
    fn open_plaster_menu(&mut self, target: ServerId, locations: &[PlasterLocation]) {
        let mut state = self.state();
        state.menu_open_count += 1;
        state.open_menu = Some((target, locations.to_vec()));
    }

    fn close_menu(&mut self) {
        let mut state = self.state();
        state.menu_close_count += 1;
        state.open_menu = None;
    }
}

impl ProgressRunner for HeadlessBackend {
    fn start(&mut self, request: &ProgressRequest) {
        self.state().progress_started.push(request.clone());
    }
}
