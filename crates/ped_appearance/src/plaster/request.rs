//! Plaster request flow (команда медика → authoritative сторона)
//!
//! # Flow
//!
//! ```text
//! Idle ─command─► AwaitingAuthorization ─allowed─► AwaitingLocations
//!                        │ denied                        │ reply
//!                        ▼                               ▼
//!                       Idle                          MenuOpen ◄─cancelled─┐
//!                                                        │ selection        │
//!                                                        ▼                  │
//!                                                    InProgress ────────────┘
//!                                                        │ completed
//!                                                        ▼
//!                                         notify server + close menu → Idle
//! ```
//!
//! Dismiss меню во время progress'а flow не сбрасывает: завершённый
//! progress всё равно уходит на сервер, отменённый возвращает в Idle.
//!
//! Flow никогда не трогает attachment cache: новый гипс появится у
//! reconciler'а со следующим snapshot'ом игрока.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::PlasterLocation;
use crate::bridge::{MenuPresenter, ProgressRunner, RemoteMessaging, ServerId};
use crate::logger::{log, log_info, log_warning};

/// Что authoritative сторона должна сделать с location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlasterChange {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressAnimation {
    pub dictionary: String,
    pub name: String,
    pub repeat: bool,
}

/// Параметры timed progress action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRequest {
    pub name: String,
    pub label: String,
    pub duration_ms: u32,
    pub animation: Option<ProgressAnimation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlasterFlowState {
    #[default]
    Idle,
    AwaitingAuthorization {
        target: ServerId,
    },
    AwaitingLocations {
        target: ServerId,
    },
    MenuOpen {
        target: ServerId,
        locations: Vec<PlasterLocation>,
    },
    InProgress {
        target: ServerId,
        locations: Vec<PlasterLocation>,
        location: PlasterLocation,
        change: PlasterChange,
        /// false после dismiss: отмена progress'а уже не вернёт в меню
        menu_open: bool,
    },
}

#[derive(Resource, Debug, Default)]
pub struct PlasterRequestFlow {
    state: PlasterFlowState,
}

impl PlasterRequestFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlasterFlowState {
        &self.state
    }

    /// Старт flow. false если flow уже занят.
    pub fn on_command(&mut self, target: ServerId, remote: &mut dyn RemoteMessaging) -> bool {
        if self.state != PlasterFlowState::Idle {
            log_warning(&format!("plaster request: busy ({:?}), command ignored", self.state));
            return false;
        }

        remote.request_authorization();
        self.state = PlasterFlowState::AwaitingAuthorization { target };
        true
    }

    pub fn on_authorization(&mut self, allowed: bool, reason: &str, remote: &mut dyn RemoteMessaging) {
        let PlasterFlowState::AwaitingAuthorization { target } = self.state else {
            log_warning("plaster request: unexpected authorization reply");
            return;
        };

        if !allowed {
            log_info(&format!("plaster request: denied ({})", reason));
            self.state = PlasterFlowState::Idle;
            return;
        }

        remote.request_player_plasters(target);
        self.state = PlasterFlowState::AwaitingLocations { target };
    }

    pub fn on_locations(
        &mut self,
        target: ServerId,
        locations: Vec<PlasterLocation>,
        menu: &mut dyn MenuPresenter,
    ) {
        if self.state != (PlasterFlowState::AwaitingLocations { target }) {
            log_warning(&format!("plaster request: unexpected locations reply for {:?}", target));
            return;
        }

        menu.open_plaster_menu(target, &locations);
        self.state = PlasterFlowState::MenuOpen { target, locations };
    }

    /// Выбор в меню: location уже есть → Remove, иначе Add
    pub fn on_menu_selected(
        &mut self,
        target: ServerId,
        location: PlasterLocation,
        progress: &mut dyn ProgressRunner,
        request: &ProgressRequest,
    ) {
        let PlasterFlowState::MenuOpen { target: open_target, locations } = &self.state else {
            log_warning("plaster request: selection without open menu");
            return;
        };

        if *open_target != target {
            log_warning(&format!(
                "plaster request: selection for {:?}, menu open for {:?}",
                target, open_target
            ));
            return;
        }

        let change = if locations.contains(&location) {
            PlasterChange::Remove
        } else {
            PlasterChange::Add
        };
        let locations = locations.clone();

        progress.start(request);
        self.state = PlasterFlowState::InProgress {
            target,
            locations,
            location,
            change,
            menu_open: true,
        };
    }

    /// Закрытие меню. Запущенный progress от меню не зависит: flow ждёт
    /// его конца и всё равно отправит изменение.
    pub fn on_menu_dismissed(&mut self) {
        match self.state {
            PlasterFlowState::Idle => {}
            PlasterFlowState::InProgress { ref mut menu_open, .. } => {
                log("plaster request: menu dismissed, progress keeps running");
                *menu_open = false;
            }
            _ => {
                log("plaster request: menu dismissed");
                self.state = PlasterFlowState::Idle;
            }
        }
    }

    /// Конец progress action. Отмена - без side effect'ов, возврат в меню
    /// (если его не закрыли).
    pub fn on_progress_finished(
        &mut self,
        completed: bool,
        remote: &mut dyn RemoteMessaging,
        menu: &mut dyn MenuPresenter,
    ) {
        if !matches!(self.state, PlasterFlowState::InProgress { .. }) {
            log_warning("plaster request: progress finished without request");
            return;
        }

        let PlasterFlowState::InProgress { target, locations, location, change, menu_open } =
            std::mem::take(&mut self.state)
        else {
            return;
        };

        if !completed {
            log(&format!("plaster request: {:?} on {:?} cancelled", change, location));
            if menu_open {
                self.state = PlasterFlowState::MenuOpen { target, locations };
            }
            return;
        }

        remote.notify_plaster_change(target, location, change);
        if menu_open {
            menu.close_menu();
        }
        log_info(&format!("plaster request: {:?} {:?} for {:?}", change, location, target));
    }
}
