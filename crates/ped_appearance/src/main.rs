//! Headless demo ped appearance core
//!
//! Загружает игрока, пушит несколько snapshot'ов, надевает outfit и
//! печатает состояние после каждого frame'а.

use ped_appearance::bridge::{HeadlessBackend, ServerId};
use ped_appearance::cloth::{capture_standard, gloves::MALE_FREEMODE, is_gloved};
use ped_appearance::{
    create_headless_app, AppearancePlugin, ApplyOutfitIntent, Component, EngineAdapter, Outfit,
    OutfitItem, PlasterLocation, PlasterReconciler, PlayerEvent, PlayerSnapshot, Prop,
};

fn main() {
    println!("Starting ped appearance headless demo");

    let backend = HeadlessBackend::new();
    let mut app = create_headless_app();
    backend.install(&mut app);
    app.add_plugins(AppearancePlugin);

    let base = PlayerSnapshot::new(ServerId(1), MALE_FREEMODE, 14);
    let timeline = [
        vec![PlasterLocation::ArmLeft],
        vec![PlasterLocation::ArmLeft, PlasterLocation::LegRight],
        vec![PlasterLocation::LegRight],
        vec![],
    ];

    for (frame, plasters) in timeline.into_iter().enumerate() {
        let snapshot = base.clone().with_plasters(plasters);
        let event = if frame == 0 {
            PlayerEvent::Loaded(snapshot)
        } else {
            PlayerEvent::Updated(snapshot)
        };
        app.world_mut().send_event(event);
        app.update();

        let attached = app.world().resource::<PlasterReconciler>().attached_objects();
        let blocked = backend.drain_disabled_controls().len();
        println!("Frame {}: attached {:?}, {} actions blocked", frame, attached, blocked);
    }

    let outfit = Outfit::new()
        .with_component(Component::Mask, OutfitItem::new(0, 0))
        .with_component(Component::Torso, OutfitItem::new(20, 1))
        .with_component(Component::Tops, OutfitItem::new(15, 2))
        .with_prop(Prop::Hat, OutfitItem::cleared());
    app.world_mut().send_event(ApplyOutfitIntent { outfit });
    app.update();

    let ped = backend.player_ped();
    let captured = capture_standard(&backend, ped);
    let arms = captured.components.get(&Component::Torso).map_or(0, |item| item.drawable);
    println!("Captured outfit: {:?}", captured);
    println!("Gloves: {}", is_gloved(MALE_FREEMODE, arms));

    println!("Demo complete!");
}
