//! Recursive resolution: cycles, depth, failures and panics

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use wiring_application::{Dependency, Registry, Resolution, ResolutionPolicy};
use wiring_domain::{CapabilityKey, DependencyKind, DependencySlot, ResolutionError};

use crate::support::*;

#[derive(Debug)]
struct Left;
#[derive(Debug)]
struct Right;

fn new_left(_right: Arc<Right>) -> Arc<Left> {
    Arc::new(Left)
}

fn new_right(_left: Arc<Left>) -> Arc<Right> {
    Arc::new(Right)
}

#[derive(Debug)]
struct Ouroboros;

fn new_ouroboros(_tail: Arc<Ouroboros>) -> Arc<Ouroboros> {
    Arc::new(Ouroboros)
}

#[derive(Debug)]
struct Base;
#[derive(Debug)]
struct Middle;
#[derive(Debug)]
struct Top;

fn new_base() -> Arc<Base> {
    Arc::new(Base)
}

fn new_middle(_base: Arc<Base>) -> Arc<Middle> {
    Arc::new(Middle)
}

fn new_top(_middle: Arc<Middle>) -> Arc<Top> {
    Arc::new(Top)
}

#[derive(Debug)]
struct Reporter {
    primary: Option<Id>,
}

fn new_reporter(primary: Option<Arc<dyn PrimaryIdGiver>>) -> Arc<Reporter> {
    Arc::new(Reporter {
        primary: primary.map(|giver| giver.give_primary_id()),
    })
}

fn failing_primary() -> Result<Arc<TestStruct1>, std::io::Error> {
    Err(std::io::Error::other("disk unavailable"))
}

#[test]
fn test_two_producer_cycle_is_reported() {
    let mut registry = Registry::new();
    registry.bind::<Left, _, _>(new_left).unwrap();
    registry.bind::<Right, _, _>(new_right).unwrap();

    let err = registry.resolve::<Left>().unwrap_err();

    let ResolutionError::CyclicDependency { cycle } = err.root_cause() else {
        panic!("expected a cycle, got {err}");
    };
    assert_eq!(cycle.len(), 3);
    assert_eq!(cycle.first(), cycle.last());
    assert!(cycle[0].name().ends_with("new_left"));
    assert!(cycle[1].name().ends_with("new_right"));
    assert!(err.root_cause().to_string().contains(" -> "));
    assert!(!registry.is_resolved::<Left>());
    assert!(!registry.is_resolved::<Right>());
}

#[test]
fn test_producer_requiring_its_own_capability_is_a_cycle() {
    let mut registry = Registry::new();
    registry.bind::<Ouroboros, _, _>(new_ouroboros).unwrap();

    let err = registry.resolve::<Ouroboros>().unwrap_err();

    match err.root_cause() {
        ResolutionError::CyclicDependency { cycle } => {
            assert_eq!(cycle.len(), 2);
            assert_eq!(cycle[0], cycle[1]);
        }
        other => panic!("expected a cycle, got {other}"),
    }
}

#[test]
fn test_depth_limit_is_enforced() {
    let mut registry = Registry::with_policy(ResolutionPolicy::with_max_depth(2));
    registry.bind::<Base, _, _>(new_base).unwrap();
    registry.bind::<Middle, _, _>(new_middle).unwrap();
    registry.bind::<Top, _, _>(new_top).unwrap();

    let err = registry.resolve::<Top>().unwrap_err();

    match err.root_cause() {
        ResolutionError::DepthExceeded { limit, producer } => {
            assert_eq!(*limit, 2);
            assert!(producer.name().ends_with("new_base"));
        }
        other => panic!("expected depth error, got {other}"),
    }

    // Resolving the shallower part first leaves less to nest
    registry.resolve::<Base>().unwrap();
    assert!(registry.resolve::<Top>().is_ok());
}

#[test]
fn test_failed_input_names_producer_and_slot() {
    let mut registry = Registry::new();
    registry.bind::<Middle, _, _>(new_middle).unwrap();

    let err = registry.resolve::<Middle>().unwrap_err();

    match &err {
        ResolutionError::Dependency {
            producer,
            slot,
            source,
        } => {
            assert!(producer.name().ends_with("new_middle"));
            assert_eq!(slot.kind, DependencyKind::Single);
            assert_eq!(slot.capability, CapabilityKey::of::<Base>());
            assert!(matches!(**source, ResolutionError::NotBound { .. }));
        }
        other => panic!("expected dependency error, got {other}"),
    }
    assert!(err.to_string().contains("new_middle"));
}

#[test]
fn test_producer_error_output_is_reported_with_source() {
    let mut registry = Registry::new();
    registry
        .bind::<dyn PrimaryIdGiver, _, _>(failing_primary)
        .unwrap();

    let Err(err) = registry.resolve::<dyn PrimaryIdGiver>() else {
        panic!("failing producer resolved");
    };

    match err {
        ResolutionError::ProducerFailed { producer, source } => {
            assert!(producer.name().ends_with("failing_primary"));
            let io = source
                .downcast_ref::<std::io::Error>()
                .expect("source keeps the producer's error");
            assert_eq!(io.to_string(), "disk unavailable");
        }
        other => panic!("expected producer failure, got {other}"),
    }
    assert!(!registry.is_resolved::<dyn PrimaryIdGiver>());
}

#[test]
fn test_failure_is_not_cached() {
    let mut registry = Registry::new();
    let attempts = Counter::new();
    let flaky_attempts = attempts.clone();
    registry
        .bind::<TestStruct1, _, _>(move || {
            let attempt = flaky_attempts.next();
            if attempt == 1 {
                Err("not ready yet".to_string())
            } else {
                Ok(Arc::new(TestStruct1 {
                    instance_id: attempt,
                }))
            }
        })
        .unwrap();

    assert!(registry.resolve::<TestStruct1>().is_err());
    let resolved = registry.resolve::<TestStruct1>().unwrap();
    let again = registry.resolve::<TestStruct1>().unwrap();

    assert_eq!(resolved.instance_id, 2);
    assert!(Arc::ptr_eq(&resolved, &again));
    assert_eq!(attempts.get(), 2);
}

#[test]
fn test_partial_resolution_is_kept_after_failure() {
    let mut registry = Registry::new();
    let str1 = Counter::new();
    registry
        .bind::<dyn PrimaryIdGiver, _, _>(struct1_producer(&str1))
        .unwrap();
    registry
        .bind::<dyn PrimaryIdGiver, _, _>(failing_primary)
        .unwrap();

    assert!(registry.resolve_all::<dyn PrimaryIdGiver>().is_err());
    assert!(registry.resolve_all::<dyn PrimaryIdGiver>().is_err());

    // The first producer succeeded once and is never invoked again
    assert_eq!(str1.get(), 1);
    assert!(!registry.is_resolved::<dyn PrimaryIdGiver>());
}

#[test]
fn test_panicking_producer_becomes_error() {
    let mut registry = Registry::new();
    registry
        .bind::<Base, _, _>(|| -> Arc<Base> { panic!("boom") })
        .unwrap();

    let err = registry.resolve::<Base>().unwrap_err();

    match err {
        ResolutionError::ProducerPanicked { message, .. } => assert_eq!(message, "boom"),
        other => panic!("expected panic error, got {other}"),
    }
    assert!(!registry.is_resolved::<Base>());
}

#[test]
fn test_panics_propagate_when_catching_is_disabled() {
    let mut registry = Registry::with_policy(ResolutionPolicy {
        catch_panics: false,
        ..ResolutionPolicy::default()
    });
    registry
        .bind::<Base, _, _>(|| -> Arc<Base> { panic!("boom") })
        .unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| registry.resolve::<Base>()));

    assert!(outcome.is_err());
}

#[test]
fn test_optional_input_absent() {
    let mut registry = Registry::new();
    registry.bind::<Reporter, _, _>(new_reporter).unwrap();

    let reporter = registry.resolve::<Reporter>().unwrap();

    assert!(reporter.primary.is_none());
}

#[test]
fn test_optional_input_present() {
    let mut registry = Registry::new();
    let str2 = Counter::new();
    registry
        .bind::<dyn PrimaryIdGiver, _, _>(struct2_producer(&str2))
        .unwrap();
    registry.bind::<Reporter, _, _>(new_reporter).unwrap();

    let reporter = registry.resolve::<Reporter>().unwrap();

    assert_eq!(
        reporter.primary,
        Some(Id {
            name: TEST_STRUCT_2_NAME,
            number: 1
        })
    );
}

#[test]
fn test_optional_input_failure_propagates() {
    let mut registry = Registry::new();
    registry
        .bind::<dyn PrimaryIdGiver, _, _>(failing_primary)
        .unwrap();
    registry.bind::<Reporter, _, _>(new_reporter).unwrap();

    let err = registry.resolve::<Reporter>().unwrap_err();

    match &err {
        ResolutionError::Dependency { slot, .. } => {
            assert_eq!(slot.kind, DependencyKind::Optional);
        }
        other => panic!("expected dependency error, got {other}"),
    }
    assert!(matches!(
        err.root_cause(),
        ResolutionError::ProducerFailed { .. }
    ));
}

#[test]
fn test_policy_change_applies_to_next_resolution() {
    let mut registry = Registry::new();
    registry.bind::<Base, _, _>(new_base).unwrap();
    registry.bind::<Middle, _, _>(new_middle).unwrap();

    registry.set_policy(ResolutionPolicy::with_max_depth(1));
    assert!(registry.resolve::<Middle>().is_err());

    registry.set_policy(ResolutionPolicy::default());
    assert!(registry.resolve::<Middle>().is_ok());
    assert_eq!(registry.policy(), ResolutionPolicy::default());
}

/// Input that records how many producers were mid-invocation when it was resolved
struct NestingLevel(usize);

impl Dependency for NestingLevel {
    fn slot() -> DependencySlot {
        DependencySlot::single::<NestingLevel>()
    }

    fn resolve(resolution: &mut Resolution<'_>) -> Result<Self, ResolutionError> {
        Ok(Self(resolution.depth()))
    }
}

#[derive(Debug)]
struct Leaf {
    level: usize,
}

#[derive(Debug)]
struct Branch {
    leaf: Arc<Leaf>,
}

fn new_leaf(level: NestingLevel) -> Arc<Leaf> {
    Arc::new(Leaf { level: level.0 })
}

fn new_branch(leaf: Arc<Leaf>) -> Arc<Branch> {
    Arc::new(Branch { leaf })
}

#[test]
fn test_custom_dependency_sees_nesting_depth() {
    let mut direct = Registry::new();
    direct.bind::<Leaf, _, _>(new_leaf).unwrap();
    assert_eq!(direct.resolve::<Leaf>().unwrap().level, 1);

    let mut nested = Registry::new();
    nested.bind::<Leaf, _, _>(new_leaf).unwrap();
    nested.bind::<Branch, _, _>(new_branch).unwrap();
    assert_eq!(nested.resolve::<Branch>().unwrap().leaf.level, 2);
}

struct Link<const N: usize>;

fn new_link_0() -> Arc<Link<0>> {
    Arc::new(Link)
}

macro_rules! chain_link {
    ($name:ident, $n:literal, $prev:literal) => {
        fn $name(_prev: Arc<Link<$prev>>) -> Arc<Link<$n>> {
            Arc::new(Link)
        }
    };
}

chain_link!(new_link_1, 1, 0);
chain_link!(new_link_2, 2, 1);
chain_link!(new_link_3, 3, 2);
chain_link!(new_link_4, 4, 3);
chain_link!(new_link_5, 5, 4);

#[test]
fn test_default_policy_has_no_depth_limit() {
    let mut registry = Registry::new();
    registry.bind::<Link<0>, _, _>(new_link_0).unwrap();
    registry.bind::<Link<1>, _, _>(new_link_1).unwrap();
    registry.bind::<Link<2>, _, _>(new_link_2).unwrap();
    registry.bind::<Link<3>, _, _>(new_link_3).unwrap();
    registry.bind::<Link<4>, _, _>(new_link_4).unwrap();
    registry.bind::<Link<5>, _, _>(new_link_5).unwrap();

    assert_eq!(ResolutionPolicy::default().max_depth, None);
    assert!(registry.resolve::<Link<5>>().is_ok());
}

#[test]
fn test_opt_in_depth_limit_counts_nested_producers() {
    let mut registry = Registry::with_policy(ResolutionPolicy::with_max_depth(3));
    registry.bind::<Link<0>, _, _>(new_link_0).unwrap();
    registry.bind::<Link<1>, _, _>(new_link_1).unwrap();
    registry.bind::<Link<2>, _, _>(new_link_2).unwrap();
    registry.bind::<Link<3>, _, _>(new_link_3).unwrap();

    match registry.resolve::<Link<3>>() {
        Err(ResolutionError::DepthExceeded { limit, .. }) => assert_eq!(limit, 3),
        Err(other) => panic!("expected depth failure, got {other}"),
        Ok(_) => panic!("chain of four resolved under a limit of three"),
    }
    assert!(registry.resolve::<Link<2>>().is_ok());
}
