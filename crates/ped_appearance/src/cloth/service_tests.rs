//! Tests for outfit codec.

#[cfg(test)]
mod tests {
    use super::super::catalog::*;
    use super::super::outfit::{Outfit, OutfitItem};
    use super::super::service::*;
    use crate::bridge::{EngineAdapter, HeadlessBackend};

    #[test]
    fn test_apply_then_capture_returns_outfit() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        let outfit = Outfit::new()
            .with_component(Component::Legs, OutfitItem::new(4, 2))
            .with_component(Component::Shoes, OutfitItem::new(7, 0))
            .with_prop(Prop::Watch, OutfitItem::new(3, 1));

        apply_outfit(&mut backend, ped, &outfit, 0);
        let captured = capture_standard(&backend, ped);

        assert_eq!(captured.components.len(), 12);
        assert_eq!(captured.props.len(), 5);
        assert_eq!(captured.components[&Component::Legs], OutfitItem::new(4, 2));
        assert_eq!(captured.components[&Component::Shoes], OutfitItem::new(7, 0));
        assert_eq!(captured.props[&Prop::Watch], OutfitItem::new(3, 1));
        // Не надетый prop читается как -1
        assert_eq!(captured.props[&Prop::Hat].drawable, -1);
    }

    #[test]
    fn test_capture_ignores_palette() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        let outfit = Outfit::new().with_component(Component::Tops, OutfitItem::new(15, 1).with_palette(2));

        apply_outfit(&mut backend, ped, &outfit, 0);

        assert_eq!(backend.state().components[&(ped, Component::Tops)], (15, 1, 2));
        assert_eq!(capture_standard(&backend, ped).components[&Component::Tops].palette, 0);
    }

    #[test]
    fn test_mask_keeping_hair_restores_hair_type() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        let outfit = Outfit::new().with_component(Component::Mask, OutfitItem::new(11, 0));

        apply_outfit(&mut backend, ped, &outfit, 21);

        assert_eq!(backend.drawable_variation(ped, Component::Hair), 21);
    }

    #[test]
    fn test_mask_hiding_hair_sets_bald() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        backend.set_component_variation(ped, Component::Hair, 21, 3, 0);
        let outfit = Outfit::new().with_component(Component::Mask, OutfitItem::new(14, 0));

        apply_outfit(&mut backend, ped, &outfit, 21);

        assert_eq!(backend.state().components[&(ped, Component::Hair)], (0, 0, 0));
    }

    #[test]
    fn test_outfit_without_mask_leaves_hair() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        backend.set_component_variation(ped, Component::Hair, 21, 3, 0);
        let outfit = Outfit::new().with_component(Component::Legs, OutfitItem::new(1, 0));

        apply_outfit(&mut backend, ped, &outfit, 5);

        assert_eq!(backend.state().components[&(ped, Component::Hair)], (21, 3, 0));
    }

    #[test]
    fn test_cleared_prop_is_removed() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        backend.set_prop_index(ped, Prop::Hat, 12, 1);

        apply_outfit(&mut backend, ped, &Outfit::new().with_prop(Prop::Hat, OutfitItem::cleared()), 0);

        assert_eq!(backend.prop_index(ped, Prop::Hat), -1);
    }

    #[test]
    fn test_capture_ffs_uses_showroom_and_clamps_props() {
        let mut backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        backend.set_prop_index(ped, Prop::Glasses, 4, 0);

        let outfit = capture_ffs(&backend, ped);

        let slots: Vec<Component> = outfit.components.keys().copied().collect();
        let mut showroom = FFS_COMPONENTS.to_vec();
        showroom.sort();
        assert_eq!(slots, showroom);
        assert_eq!(outfit.props[&Prop::Hat].drawable, 0);
        assert_eq!(outfit.props[&Prop::Glasses].drawable, 4);
    }

    #[test]
    fn test_max_options_takes_max_texture_count() {
        let backend = HeadlessBackend::new();
        let ped = backend.player_ped();
        {
            let mut state = backend.state();
            state.drawable_counts.insert(Component::Tops, 3);
            state.texture_counts.insert((Component::Tops, 0), 2);
            state.texture_counts.insert((Component::Tops, 1), 6);
            state.texture_counts.insert((Component::Tops, 2), 4);
            state.prop_drawable_counts.insert(Prop::Hat, 2);
            state.prop_texture_counts.insert((Prop::Hat, 1), 9);
        }

        let entries = max_options(&backend, ped, ComponentCatalog::Standard, PropCatalog::Standard);

        // Только drawable'ы Tops (3) и Hat (2)
        assert_eq!(backend.state().texture_count_queries, 3);
        assert_eq!(backend.state().prop_texture_count_queries, 2);
        let tops = entries.iter().find(|e| e.slot == SlotRef::Component(Component::Tops)).unwrap();
        assert_eq!((tops.max_drawables, tops.max_textures), (3, 6));
        let hat = entries.iter().find(|e| e.slot == SlotRef::Prop(Prop::Hat)).unwrap();
        assert_eq!((hat.max_drawables, hat.max_textures), (2, 9));
    }

    #[test]
    fn test_max_options_skips_accessories_and_handles_empty_slots() {
        let backend = HeadlessBackend::new();
        let ped = backend.player_ped();

        let entries = max_options(&backend, ped, ComponentCatalog::Standard, PropCatalog::Standard);

        assert_eq!(entries.len(), 11 + 5);
        assert!(entries.iter().all(|e| e.slot != SlotRef::Component(Component::Accessories)));
        assert!(entries.iter().all(|e| e.max_drawables == 0 && e.max_textures == 0));
        // Slot без drawable'ов не спрашивает texture count
        assert_eq!(backend.state().texture_count_queries, 0);
        assert_eq!(backend.state().prop_texture_count_queries, 0);
    }
}
