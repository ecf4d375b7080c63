//! Player data (push model)
//!
//! Внешний player-data provider присылает полный snapshot игрока при
//! загрузке (`PlayerEvent::Loaded`) и на каждое обновление (`PlayerEvent::Updated`).
//! `PlayerState` хранит последний snapshot; системы передают его дальше
//! явно, глобального доступа к игроку нет.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bridge::{ModelHash, ServerId};
use crate::plaster::PlasterLocation;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMetadata {
    /// Authoritative список гипсов
    #[serde(default)]
    pub plaster: Vec<PlasterLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSkin {
    pub model: ModelHash,
    pub hair_type: i32,
}

/// Snapshot игрока от authoritative стороны
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub server_id: ServerId,
    pub metadata: PlayerMetadata,
    pub skin: PlayerSkin,
}

impl PlayerSnapshot {
    pub fn new(server_id: ServerId, model: ModelHash, hair_type: i32) -> Self {
        Self {
            server_id,
            metadata: PlayerMetadata::default(),
            skin: PlayerSkin { model, hair_type },
        }
    }

    pub fn with_plasters(mut self, plasters: impl IntoIterator<Item = PlasterLocation>) -> Self {
        self.metadata.plaster = plasters.into_iter().collect();
        self
    }
}

/// Последний полученный snapshot (None до загрузки игрока)
#[derive(Resource, Debug, Default)]
pub struct PlayerState {
    pub snapshot: Option<PlayerSnapshot>,
}

impl PlayerState {
    pub fn get(&self) -> Option<&PlayerSnapshot> {
        self.snapshot.as_ref()
    }
}

/// Поток событий player-data provider'а (один тип, чтобы порядок прихода
/// сохранялся между loaded/updated/unloaded)
#[derive(Event, Clone, Debug)]
pub enum PlayerEvent {
    /// Игрок загружен (один раз за сессию)
    Loaded(PlayerSnapshot),
    /// Новый snapshot игрока
    Updated(PlayerSnapshot),
    /// Ped игрока пересоздан (respawn / смена модели)
    PedChanged,
    /// Игрок выгружен (logout)
    Unloaded,
}

/// Запоминает последний snapshot в порядке прихода
pub fn track_player_snapshots(mut events: EventReader<PlayerEvent>, mut state: ResMut<PlayerState>) {
    for event in events.read() {
        match event {
            PlayerEvent::Loaded(snapshot) | PlayerEvent::Updated(snapshot) => {
                state.snapshot = Some(snapshot.clone());
            }
            PlayerEvent::Unloaded => state.snapshot = None,
            PlayerEvent::PedChanged => {}
        }
    }
}

/// Set, после которого `PlayerState` отражает события текущего frame'а
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSnapshotSet;

/// Player data plugin (event stream + последний snapshot)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerEvent>()
            .init_resource::<PlayerState>()
            .add_systems(Update, track_player_snapshots.in_set(PlayerSnapshotSet));
    }
}
