//! Capability and producer identity tests

use std::collections::HashMap;

use wiring_domain::{CapabilityKey, DependencyKind, DependencySlot, ProducerId};

trait Greeter {}
struct English;

fn new_english() {}

#[test]
fn test_capability_key_usable_as_map_key() {
    let mut bindings: HashMap<CapabilityKey, usize> = HashMap::new();
    *bindings.entry(CapabilityKey::of::<dyn Greeter>()).or_default() += 1;
    *bindings.entry(CapabilityKey::of::<dyn Greeter>()).or_default() += 1;
    *bindings.entry(CapabilityKey::of::<English>()).or_default() += 1;

    assert_eq!(bindings[&CapabilityKey::of::<dyn Greeter>()], 2);
    assert_eq!(bindings.len(), 2);
}

#[test]
fn test_capability_key_display_and_debug() {
    let key = CapabilityKey::of::<English>();

    assert!(key.to_string().ends_with("English"));
    assert!(format!("{key:?}").starts_with("CapabilityKey("));
    assert_eq!(key.type_id(), std::any::TypeId::of::<English>());
}

#[test]
fn test_producer_id_names_fn_item() {
    fn id_of<F: 'static>(_: &F) -> ProducerId {
        ProducerId::of::<F>()
    }

    let id = id_of(&new_english);

    assert!(id.name().ends_with("new_english"));
    assert_eq!(id.to_string(), id.name());
    assert_eq!(id, id_of(&new_english));
}

#[test]
fn test_slot_constructors() {
    let single = DependencySlot::single::<dyn Greeter>();
    let all = DependencySlot::all::<dyn Greeter>();
    let optional = DependencySlot::optional::<dyn Greeter>();

    assert_eq!(single.kind, DependencyKind::Single);
    assert_eq!(all.kind, DependencyKind::All);
    assert_eq!(optional.kind, DependencyKind::Optional);
    assert_eq!(single.capability, all.capability);
    assert_ne!(single, all);
}

#[test]
fn test_slot_display_per_kind() {
    let single = DependencySlot::single::<English>().to_string();
    let optional = DependencySlot::optional::<English>().to_string();

    assert!(single.starts_with("Arc<") && single.ends_with("English>"));
    assert!(optional.starts_with("Option<Arc<") && optional.ends_with("English>>"));
}
