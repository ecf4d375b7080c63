//! Plaster integration test
//!
//! Полный headless App (AppearancePlugin + HeadlessBackend):
//! - snapshot'ы игрока → attached objects
//! - action gate каждый frame, в том числе пока model грузится
//! - request flow через events
//! - convergence: случайные последовательности snapshot'ов (seed) сходятся
//!   к последнему authoritative snapshot'у

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

use ped_appearance::bridge::{ControlAction, HeadlessBackend, ModelLoad, RemoteCall};
use ped_appearance::cloth::gloves::MALE_FREEMODE;
use ped_appearance::plaster::*;
use ped_appearance::{create_headless_app, AppearancePlugin, PlayerEvent, PlayerSnapshot, ServerId};

/// Helper: App с headless collaborator'ами
fn create_plaster_app() -> (App, HeadlessBackend) {
    let backend = HeadlessBackend::new();
    let mut app = create_headless_app();
    backend.install(&mut app);
    app.add_plugins(AppearancePlugin);
    (app, backend)
}

fn snapshot(plasters: &[PlasterLocation]) -> PlayerSnapshot {
    PlayerSnapshot::new(ServerId(1), MALE_FREEMODE, 4).with_plasters(plasters.iter().copied())
}

fn push(app: &mut App, event: PlayerEvent) {
    app.world_mut().send_event(event);
    app.update();
}

fn attached_locations(app: &App) -> BTreeSet<PlasterLocation> {
    app.world()
        .resource::<PlasterReconciler>()
        .attached_objects()
        .into_iter()
        .map(|(location, _)| location)
        .collect()
}

fn prop_model(location: PlasterLocation) -> ped_appearance::ModelHash {
    PlasterConfigs::default()
        .get(location)
        .and_then(|config| config.prop_for(MALE_FREEMODE))
        .expect("default config has male prop")
}

#[test]
fn test_snapshots_drive_attachments() {
    let (mut app, backend) = create_plaster_app();

    push(&mut app, PlayerEvent::Loaded(snapshot(&[PlasterLocation::ArmLeft])));
    assert_eq!(attached_locations(&app), BTreeSet::from([PlasterLocation::ArmLeft]));

    push(
        &mut app,
        PlayerEvent::Updated(snapshot(&[PlasterLocation::ArmLeft, PlasterLocation::Head])),
    );
    assert_eq!(
        attached_locations(&app),
        BTreeSet::from([PlasterLocation::Head, PlasterLocation::ArmLeft])
    );
    assert_eq!(backend.state().objects.len(), 2);

    push(&mut app, PlayerEvent::Updated(snapshot(&[])));
    assert!(attached_locations(&app).is_empty());
    assert!(backend.state().objects.is_empty());
    assert!(backend.state().registered.is_empty());
}

#[test]
fn test_events_in_one_frame_apply_in_order() {
    let (mut app, backend) = create_plaster_app();

    app.world_mut().send_event(PlayerEvent::Loaded(snapshot(&[PlasterLocation::Neck])));
    app.world_mut().send_event(PlayerEvent::Updated(snapshot(&[PlasterLocation::LegLeft])));
    app.update();

    assert_eq!(attached_locations(&app), BTreeSet::from([PlasterLocation::LegLeft]));
    assert_eq!(backend.state().created_count, 2);
    assert_eq!(backend.state().deleted_count, 1);
}

#[test]
fn test_gate_blocks_while_model_loading() {
    let (mut app, backend) = create_plaster_app();
    backend.set_model_load(prop_model(PlasterLocation::LegRight), ModelLoad::Loading);

    push(&mut app, PlayerEvent::Loaded(snapshot(&[PlasterLocation::LegRight])));

    let reconciler = app.world().resource::<PlasterReconciler>();
    assert!(matches!(
        reconciler.state(PlasterLocation::LegRight),
        Some(AttachmentState::Pending { .. })
    ));
    let disabled: Vec<ControlAction> = backend.drain_disabled_controls().into_iter().map(|(_, a)| a).collect();
    assert!(disabled.contains(&ControlAction(21)));
    assert!(disabled.contains(&ControlAction(22)));

    // Gate работает каждый frame, без новых событий
    app.update();
    assert_eq!(backend.drain_disabled_controls().len(), 2);

    backend.set_model_load(prop_model(PlasterLocation::LegRight), ModelLoad::Ready);
    app.update();
    assert_eq!(attached_locations(&app), BTreeSet::from([PlasterLocation::LegRight]));
}

#[test]
fn test_gate_stops_after_unload() {
    let (mut app, backend) = create_plaster_app();

    push(&mut app, PlayerEvent::Loaded(snapshot(&[PlasterLocation::ArmRight])));
    assert!(!backend.drain_disabled_controls().is_empty());

    push(&mut app, PlayerEvent::Unloaded);
    backend.drain_disabled_controls();
    app.update();

    assert!(backend.drain_disabled_controls().is_empty());
    assert!(!app.world().resource::<PlasterReconciler>().is_active());
    assert!(backend.state().objects.is_empty());
}

#[test]
fn test_ped_changed_reattaches_to_new_ped() {
    let (mut app, backend) = create_plaster_app();
    push(&mut app, PlayerEvent::Loaded(snapshot(&[PlasterLocation::Head])));

    backend.state().player_ped = ped_appearance::bridge::PedHandle(2);
    push(&mut app, PlayerEvent::PedChanged);

    let state = backend.state();
    assert_eq!(state.objects.len(), 1);
    let object = state.objects.values().next().expect("one object");
    assert_eq!(object.attached_to.map(|(ped, _)| ped), Some(ped_appearance::bridge::PedHandle(2)));
}

#[test]
fn test_ped_changed_uses_snapshot_current_at_arrival() {
    let (mut app, backend) = create_plaster_app();

    app.world_mut().send_event(PlayerEvent::Loaded(snapshot(&[PlasterLocation::Head])));
    app.world_mut().send_event(PlayerEvent::PedChanged);
    app.world_mut().send_event(PlayerEvent::Updated(snapshot(&[PlasterLocation::Neck])));
    app.update();

    // Head: attach, re-attach на новом педе, потом снят update'ом; Neck: attach
    let state = backend.state();
    assert_eq!(state.created_count, 3);
    assert_eq!(state.deleted_count, 2);
    assert_eq!(state.objects.len(), 1);
    drop(state);
    assert_eq!(attached_locations(&app), BTreeSet::from([PlasterLocation::Neck]));
}

#[test]
fn test_request_flow_through_events() {
    let (mut app, backend) = create_plaster_app();
    let target = ServerId(12);

    app.world_mut().send_event(PlasterCommand { target: Some(target) });
    app.update();
    app.world_mut().send_event(AuthorizationReply { allowed: true, reason: String::new() });
    app.update();
    assert_eq!(
        backend.drain_remote_calls(),
        vec![RemoteCall::Authorization, RemoteCall::PlayerPlasters(target)]
    );

    app.world_mut().send_event(PlasterLocationsReply {
        target,
        locations: vec![PlasterLocation::Neck],
    });
    app.update();
    app.world_mut().send_event(PlasterMenuSelected { target, location: PlasterLocation::Neck });
    app.update();
    assert_eq!(backend.state().progress_started.len(), 1);

    app.world_mut().send_event(ProgressFinished { completed: true });
    app.update();

    assert_eq!(
        backend.drain_remote_calls(),
        vec![RemoteCall::PlasterChange(target, PlasterLocation::Neck, PlasterChange::Remove)]
    );
    assert_eq!(*app.world().resource::<PlasterRequestFlow>().state(), PlasterFlowState::Idle);
    // Локальный cache меняется только через snapshot
    assert!(!app.world().resource::<PlasterReconciler>().is_active());
}

#[test]
fn test_menu_dismissed_during_progress_still_notifies() {
    let (mut app, backend) = create_plaster_app();
    let target = ServerId(3);

    app.world_mut().send_event(PlasterCommand { target: Some(target) });
    app.world_mut().send_event(AuthorizationReply { allowed: true, reason: String::new() });
    app.update();
    app.world_mut().send_event(PlasterLocationsReply { target, locations: vec![] });
    app.update();
    app.world_mut().send_event(PlasterMenuSelected { target, location: PlasterLocation::Head });
    app.update();
    backend.drain_remote_calls();

    app.world_mut().send_event(PlasterMenuDismissed);
    app.update();
    app.world_mut().send_event(ProgressFinished { completed: true });
    app.update();

    assert_eq!(
        backend.drain_remote_calls(),
        vec![RemoteCall::PlasterChange(target, PlasterLocation::Head, PlasterChange::Add)]
    );
}

#[test]
fn test_command_without_target_uses_local_player() {
    let (mut app, backend) = create_plaster_app();

    app.world_mut().send_event(PlasterCommand::default());
    app.world_mut().send_event(AuthorizationReply { allowed: true, reason: String::new() });
    app.update();

    let local = backend.state().server_id;
    assert_eq!(
        backend.drain_remote_calls(),
        vec![RemoteCall::Authorization, RemoteCall::PlayerPlasters(local)]
    );
}

/// Случайная последовательность snapshot'ов + model load'ов, затем
/// финальный snapshot. Возвращает object'ы после сходимости.
fn run_random_session(seed: u64, steps: usize) -> (BTreeSet<PlasterLocation>, Vec<PlasterLocation>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (mut app, backend) = create_plaster_app();
    let mut last = Vec::new();

    for step in 0..steps {
        for location in PlasterLocation::ALL {
            let load = match rng.gen_range(0..4) {
                0 => ModelLoad::Loading,
                1 => ModelLoad::Failed,
                _ => ModelLoad::Ready,
            };
            backend.set_model_load(prop_model(location), load);
        }

        let mut plasters: Vec<PlasterLocation> =
            PlasterLocation::ALL.into_iter().filter(|_| rng.gen_bool(0.5)).collect();
        if let Some(first) = plasters.first().copied() {
            if rng.gen_bool(0.2) {
                plasters.push(first);
            }
        }

        let event = if step == 0 {
            PlayerEvent::Loaded(snapshot(&plasters))
        } else {
            PlayerEvent::Updated(snapshot(&plasters))
        };
        push(&mut app, event);
        last = plasters;
    }

    // Assets доступны, server пушит последний snapshot ещё раз
    for location in PlasterLocation::ALL {
        backend.set_model_load(prop_model(location), ModelLoad::Ready);
    }
    push(&mut app, PlayerEvent::Updated(snapshot(&last)));
    app.update();

    let state = backend.state();
    assert_eq!(state.objects.len(), state.registered.len());
    assert_eq!(state.created_count - state.deleted_count, state.objects.len());
    drop(state);

    (attached_locations(&app), last)
}

#[test]
fn test_random_sessions_converge_to_last_snapshot() {
    for seed in 0..20 {
        let (attached, last) = run_random_session(seed, 30);
        let expected: BTreeSet<PlasterLocation> = last.into_iter().collect();

        assert_eq!(attached, expected, "seed {} не сошёлся к последнему snapshot'у", seed);
    }
}

#[test]
fn test_random_session_is_deterministic() {
    const SEED: u64 = 42;

    let first = run_random_session(SEED, 50);
    let second = run_random_session(SEED, 50);

    assert_eq!(first, second, "прогоны с seed {} разошлись", SEED);
}
