use super::*;
use crate::{
    foundation::core::MeasuredBox,
    test_support::TestHost,
};

#[test]
fn sources_resolve_through_the_host() {
    let host = TestHost::new();
    let mounted = NodeRef::new();
    host.mount(&mounted, 4, MeasuredBox::new(0.0, 0.0, 10.0, 10.0));

    assert_eq!(HandleSource::Unset.resolve(&*host), None);
    assert_eq!(
        HandleSource::from(TargetHandle(9)).resolve(&*host),
        Some(TargetHandle(9))
    );
    assert_eq!(HandleSource::from(None).resolve(&*host), None);
    assert_eq!(
        HandleSource::from(mounted).resolve(&*host),
        Some(TargetHandle(4))
    );
    assert_eq!(HandleSource::from(NodeRef::new()).resolve(&*host), None);
}

#[test]
fn ref_to_an_unknown_node_resolves_to_nothing() {
    let host = TestHost::new();
    let stale = NodeRef::new();
    stale.set(crate::foundation::core::HostInstance(77));
    assert_eq!(HandleSource::Pending(stale).resolve(&*host), None);
}

#[test]
fn last_registration_wins_and_none_clears() {
    let mut map = TargetMap::default();
    map.set("cart", Some(TargetHandle(1)));
    map.set("cart", Some(TargetHandle(2)));
    assert_eq!(map.get("cart"), Some(TargetHandle(2)));

    map.set("cart", None);
    assert_eq!(map.get("cart"), None);
    assert!(!map.remove("cart"));
}

#[test]
fn names_are_sorted() {
    let mut map = TargetMap::default();
    map.set("wishlist", Some(TargetHandle(3)));
    map.set("bag", Some(TargetHandle(1)));
    map.set("cart", Some(TargetHandle(2)));
    assert_eq!(map.names(), vec!["bag", "cart", "wishlist"]);
    assert!(map.remove("bag"));
    map.clear();
    assert!(map.names().is_empty());
}
