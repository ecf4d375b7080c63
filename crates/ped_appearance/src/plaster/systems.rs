//! Plaster ECS systems
//!
//! # Systems (Update, chained)
//!
//! - `reconcile_plasters` - PlayerEvent → reconciler (в порядке прихода)
//! - `poll_pending_plasters` - Pending location'ы ждут model
//! - `block_plaster_actions` - action gate, каждый frame
//! - `process_plaster_requests` - request flow

use bevy::prelude::*;

use super::events::*;
use super::gate::apply_action_gate;
use super::reconciler::{AttachContext, PlasterReconciler};
use super::request::PlasterRequestFlow;
use super::config::PlasterConfigs;
use crate::bridge::{Engine, Menu, ModelAssets, Network, Progress, Remote};
use crate::player::{PlayerEvent, PlayerSnapshot, PlayerState};
use crate::settings::AppearanceSettings;

/// Прогоняет каждый player event через reconciler
///
/// `latest` - последний snapshot в порядке прихода событий (`PlayerState`
/// к этому моменту уже содержит финальный snapshot frame'а).
#[allow(clippy::too_many_arguments)]
pub fn reconcile_plasters(
    mut events: EventReader<PlayerEvent>,
    mut latest: Local<Option<PlayerSnapshot>>,
    mut reconciler: ResMut<PlasterReconciler>,
    configs: Res<PlasterConfigs>,
    mut engine: ResMut<Engine>,
    mut network: ResMut<Network>,
    mut assets: ResMut<ModelAssets>,
) {
    let mut ctx = AttachContext {
        engine: engine.adapter(),
        network: network.registry(),
        assets: assets.loader(),
        configs: &configs,
    };

    for event in events.read() {
        match event {
            PlayerEvent::Loaded(snapshot) => {
                reconciler.on_player_loaded(&snapshot.metadata.plaster, snapshot.skin.model, &mut ctx);
                *latest = Some(snapshot.clone());
            }
            PlayerEvent::Updated(snapshot) => {
                reconciler.on_snapshot(&snapshot.metadata.plaster, snapshot.skin.model, &mut ctx);
                *latest = Some(snapshot.clone());
            }
            PlayerEvent::PedChanged => {
                if let Some(snapshot) = latest.as_ref() {
                    reconciler.on_ped_changed(&snapshot.metadata.plaster, snapshot.skin.model, &mut ctx);
                }
            }
            PlayerEvent::Unloaded => {
                reconciler.on_player_unloaded(&mut ctx);
                *latest = None;
            }
        }
    }
}

pub fn poll_pending_plasters(
    mut reconciler: ResMut<PlasterReconciler>,
    configs: Res<PlasterConfigs>,
    mut engine: ResMut<Engine>,
    mut network: ResMut<Network>,
    mut assets: ResMut<ModelAssets>,
) {
    let mut ctx = AttachContext {
        engine: engine.adapter(),
        network: network.registry(),
        assets: assets.loader(),
        configs: &configs,
    };

    reconciler.poll_pending(&mut ctx);
}

pub fn block_plaster_actions(
    player: Res<PlayerState>,
    configs: Res<PlasterConfigs>,
    settings: Res<AppearanceSettings>,
    mut engine: ResMut<Engine>,
) {
    apply_action_gate(player.get(), &configs, settings.control_group, engine.adapter());
}

/// Двигает request flow по ответам transport'а
#[allow(clippy::too_many_arguments)]
pub fn process_plaster_requests(
    mut commands: EventReader<PlasterCommand>,
    mut authorizations: EventReader<AuthorizationReply>,
    mut replies: EventReader<PlasterLocationsReply>,
    mut selections: EventReader<PlasterMenuSelected>,
    mut dismissals: EventReader<PlasterMenuDismissed>,
    mut progress_done: EventReader<ProgressFinished>,
    mut flow: ResMut<PlasterRequestFlow>,
    settings: Res<AppearanceSettings>,
    engine: Res<Engine>,
    mut remote: ResMut<Remote>,
    mut menu: ResMut<Menu>,
    mut progress: ResMut<Progress>,
) {
    for command in commands.read() {
        let target = command.target.unwrap_or_else(|| engine.0.local_server_id());
        flow.on_command(target, remote.messaging());
    }

    for reply in authorizations.read() {
        flow.on_authorization(reply.allowed, &reply.reason, remote.messaging());
    }

    for reply in replies.read() {
        flow.on_locations(reply.target, reply.locations.clone(), menu.presenter());
    }

    for selection in selections.read() {
        flow.on_menu_selected(
            selection.target,
            selection.location,
            progress.runner(),
            &settings.plaster_progress,
        );
    }

    for _ in dismissals.read() {
        flow.on_menu_dismissed();
    }

    for done in progress_done.read() {
        flow.on_progress_finished(done.completed, remote.messaging(), menu.presenter());
    }
}
