//! Plaster module - server-authoritative attachments (гипсы)
//!
//! # Architecture
//!
//! **Reconciliation:**
//! - Player-data provider пушит snapshot (`PlayerEvent`)
//! - `PlasterReconciler` diff'ит local cache против `metadata.plaster`
//! - Attach: load model → create object → net id → register → attach к кости
//! - Teardown: unregister net id → delete object → удалить entry
//!
//! **Action gate:**
//! - Каждый frame блокирует actions из `PlasterConfig::blocked_actions`
//!   для каждой authoritative location
//!
//! **Request flow:**
//! - `/plaster` → authorization → remote query → меню → progress → notify
//!   server. Cache напрямую не меняется.

use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod gate;
pub mod reconciler;
pub mod request;
pub mod systems;


pub use config::*;
pub use events::*;
pub use gate::*;
pub use reconciler::*;
pub use request::*;
pub use systems::*;

use crate::player::{PlayerPlugin, PlayerSnapshotSet};
use crate::settings::AppearanceSettings;

/// Plaster plugin (reconciler + gate + request flow)
///
/// Collaborator resources (`Engine`, `Network`, `ModelAssets`, `Remote`,
/// `Menu`, `Progress`) вставляет host.
pub struct PlasterPlugin;

impl Plugin for PlasterPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }

        app
            // Events
            .add_event::<PlasterCommand>()
            .add_event::<AuthorizationReply>()
            .add_event::<PlasterLocationsReply>()
            .add_event::<PlasterMenuSelected>()
            .add_event::<PlasterMenuDismissed>()
            .add_event::<ProgressFinished>()
            // Resources
            .init_resource::<PlasterReconciler>()
            .init_resource::<PlasterRequestFlow>()
            .init_resource::<PlasterConfigs>()
            .init_resource::<AppearanceSettings>()
            .add_systems(
                Update,
                (
                    reconcile_plasters,
                    poll_pending_plasters,
                    block_plaster_actions,
                    process_plaster_requests,
                )
                    .chain()
                    .after(PlayerSnapshotSet),
            );
    }
}
