//! Clothing integration test
//!
//! `ApplyOutfitIntent` через App: outfit применяется к ped'у игрока,
//! hair берётся из snapshot'а.

use bevy::prelude::*;

use ped_appearance::bridge::HeadlessBackend;
use ped_appearance::cloth::{capture_standard, check_wearing_gloves, gloves::MALE_FREEMODE};
use ped_appearance::{
    create_headless_app, AppearancePlugin, ApplyOutfitIntent, Component, EngineAdapter, Outfit,
    OutfitItem, PlayerEvent, PlayerSnapshot, Prop, ServerId,
};

fn create_clothing_app() -> (App, HeadlessBackend) {
    let backend = HeadlessBackend::new();
    let mut app = create_headless_app();
    backend.install(&mut app);
    app.add_plugins(AppearancePlugin);
    (app, backend)
}

#[test]
fn test_apply_outfit_intent_dresses_player() {
    let (mut app, backend) = create_clothing_app();
    app.world_mut()
        .send_event(PlayerEvent::Loaded(PlayerSnapshot::new(ServerId(1), MALE_FREEMODE, 33)));

    let outfit = Outfit::new()
        .with_component(Component::Mask, OutfitItem::new(0, 0))
        .with_component(Component::Torso, OutfitItem::new(20, 0))
        .with_prop(Prop::Hat, OutfitItem::new(5, 2));
    app.world_mut().send_event(ApplyOutfitIntent { outfit });
    app.update();

    let ped = backend.player_ped();
    let captured = capture_standard(&backend, ped);
    assert_eq!(captured.components[&Component::Torso].drawable, 20);
    // Маска 0 оставляет причёску из snapshot'а
    assert_eq!(captured.components[&Component::Hair].drawable, 33);
    assert_eq!(captured.props[&Prop::Hat], OutfitItem::new(5, 2));
    assert!(check_wearing_gloves(&backend, ped));
}

#[test]
fn test_intent_without_player_is_dropped() {
    let (mut app, backend) = create_clothing_app();

    app.world_mut().send_event(ApplyOutfitIntent {
        outfit: Outfit::new().with_component(Component::Legs, OutfitItem::new(9, 0)),
    });
    app.update();

    assert!(backend.state().components.is_empty());
}
