//! Plaster request events
//!
//! Transport (RPC, NUI callbacks, progress service) конвертирует свои ответы
//! в эти события; `process_plaster_requests` двигает flow.

use bevy::prelude::*;

use super::config::PlasterLocation;
use crate::bridge::ServerId;

/// `/plaster` команда. `None` = сам игрок.
#[derive(Event, Clone, Debug, Default)]
pub struct PlasterCommand {
    pub target: Option<ServerId>,
}

/// Ответ authoritative стороны на проверку прав
#[derive(Event, Clone, Debug)]
pub struct AuthorizationReply {
    pub allowed: bool,
    pub reason: String,
}

/// Текущие гипсы target игрока (remote query)
#[derive(Event, Clone, Debug)]
pub struct PlasterLocationsReply {
    pub target: ServerId,
    pub locations: Vec<PlasterLocation>,
}

/// Выбор location в меню
#[derive(Event, Clone, Debug)]
pub struct PlasterMenuSelected {
    pub target: ServerId,
    pub location: PlasterLocation,
}

/// Меню закрыто извне
#[derive(Event, Clone, Debug)]
pub struct PlasterMenuDismissed;

/// Progress action завершён (`completed == false` - прерван)
#[derive(Event, Clone, Debug)]
pub struct ProgressFinished {
    pub completed: bool,
}
