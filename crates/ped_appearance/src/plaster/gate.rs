//! Action gate - блокировка input'а пока есть гипс
//!
//! Читает authoritative список из snapshot'а игрока, а не local cache:
//! блокировка действует и в Pending окне, до появления объекта.

use super::config::{PlasterConfigs, PlasterLocation};
use crate::bridge::{ControlAction, EngineAdapter};
use crate::player::PlayerSnapshot;

/// Все actions, которые нужно заблокировать для данного списка гипсов
pub fn blocked_actions<'a>(
    plasters: &'a [PlasterLocation],
    configs: &'a PlasterConfigs,
) -> impl Iterator<Item = ControlAction> + 'a {
    plasters
        .iter()
        .filter_map(|location| configs.get(*location))
        .flat_map(|config| config.blocked_actions.iter().copied())
}

/// Один frame gate'а. Без snapshot'а - no-op.
pub fn apply_action_gate(
    snapshot: Option<&PlayerSnapshot>,
    configs: &PlasterConfigs,
    control_group: i32,
    engine: &mut dyn EngineAdapter,
) {
    let Some(snapshot) = snapshot else {
        return;
    };

    for action in blocked_actions(&snapshot.metadata.plaster, configs) {
        engine.disable_control_action(control_group, action);
    }
}
