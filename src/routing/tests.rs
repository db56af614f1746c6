//! Routing Table Tests
//!
//! Validates the determinism of owner resolution, the cyclic replica
//! ordering, and how membership changes (registration, status flips)
//! reshape the live set.

#[cfg(test)]
mod tests {
    use crate::routing::{ChildId, ChildInfo, ChildStatus, RoutingTable};
    use std::net::SocketAddr;

    fn child(id: &str, port: u16) -> ChildInfo {
        ChildInfo {
            id: ChildId(id.to_string()),
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            status: ChildStatus::Reachable,
        }
    }

    fn table_with(children: &[ChildInfo], replica_count: usize) -> RoutingTable {
        let table = RoutingTable::new(replica_count);
        for c in children {
            table.register(c.clone());
        }
        table
    }

    #[test]
    fn test_resolve_owner_is_deterministic() {
        let table = table_with(&[child("a", 7001), child("b", 7002), child("c", 7003)], 1);

        for hash in [0u32, 1, 17, 256, u32::MAX] {
            let first = table.resolve_owner(hash).unwrap();
            let second = table.resolve_owner(hash).unwrap();
            assert_eq!(first.0.id, second.0.id);
            let first_replicas: Vec<_> = first.1.iter().map(|c| c.id.clone()).collect();
            let second_replicas: Vec<_> = second.1.iter().map(|c| c.id.clone()).collect();
            assert_eq!(first_replicas, second_replicas);
        }
    }

    #[test]
    fn test_primary_is_hash_mod_live_count_in_id_order() {
        let table = table_with(&[child("b", 7002), child("a", 7001), child("c", 7003)], 0);

        // Sorted order is a, b, c regardless of registration order.
        let (primary, _) = table.resolve_owner(0).unwrap();
        assert_eq!(primary.id, ChildId("a".to_string()));
        let (primary, _) = table.resolve_owner(1).unwrap();
        assert_eq!(primary.id, ChildId("b".to_string()));
        let (primary, _) = table.resolve_owner(5).unwrap();
        assert_eq!(primary.id, ChildId("c".to_string()));
    }

    #[test]
    fn test_replicas_follow_primary_cyclically() {
        let table = table_with(&[child("a", 7001), child("b", 7002), child("c", 7003)], 2);

        let (primary, replicas) = table.resolve_owner(2).unwrap();
        assert_eq!(primary.id, ChildId("c".to_string()));
        assert_eq!(
            replicas.iter().map(|c| c.id.0.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_replica_count_capped_by_live_children() {
        let table = table_with(&[child("a", 7001), child("b", 7002)], 5);

        let (primary, replicas) = table.resolve_owner(42).unwrap();
        assert_eq!(replicas.len(), 1);
        assert_ne!(replicas[0].id, primary.id);
    }

    #[test]
    fn test_single_child_owns_everything_with_no_replicas() {
        let table = table_with(&[child("a", 7001)], 2);

        for hash in [0u32, 99, 12345] {
            let (primary, replicas) = table.resolve_owner(hash).unwrap();
            assert_eq!(primary.id, ChildId("a".to_string()));
            assert!(replicas.is_empty());
        }
    }

    #[test]
    fn test_empty_table_resolves_to_none() {
        let table = RoutingTable::new(1);
        assert!(table.resolve_owner(7).is_none());
    }

    #[test]
    fn test_suspected_child_leaves_rotation_and_returns() {
        let table = table_with(&[child("a", 7001), child("b", 7002)], 0);
        let b = ChildId("b".to_string());

        // hash 1 % 2 -> "b" while both are reachable.
        assert_eq!(table.resolve_owner(1).unwrap().0.id, b);

        table.set_status(&b, ChildStatus::SuspectedDown);
        assert_eq!(table.resolve_owner(1).unwrap().0.id, ChildId("a".to_string()));
        // Still registered, just out of routing.
        assert_eq!(table.members().len(), 2);

        table.set_status(&b, ChildStatus::Reachable);
        assert_eq!(table.resolve_owner(1).unwrap().0.id, b);
    }

    #[test]
    fn test_membership_change_reflected_in_subsequent_calls() {
        let table = table_with(&[child("a", 7001)], 0);
        assert_eq!(table.resolve_owner(1).unwrap().0.id, ChildId("a".to_string()));

        table.register(child("b", 7002));
        assert_eq!(table.resolve_owner(1).unwrap().0.id, ChildId("b".to_string()));

        table.deregister(&ChildId("b".to_string()));
        assert_eq!(table.resolve_owner(1).unwrap().0.id, ChildId("a".to_string()));
    }
}
