//! Upcast hierarchy.
//!
//! Registered upcasts form a directed graph `Derived -> Base`. A type is
//! assignable to another if a path connects them; the shortest path is
//! composed into a single conversion.

use std::any::TypeId;

use petgraph::algo::{astar, has_path_connecting};
use petgraph::graphmap::DiGraphMap;
use rustc_hash::FxHashMap;

use super::{ErasedFn, Registered};

#[derive(Default)]
pub(crate) struct Hierarchy {
    graph: DiGraphMap<TypeId, ()>,
    edges: FxHashMap<(TypeId, TypeId), Registered>,
}

impl Hierarchy {
    /// Add or replace the upcast `derived -> base`.
    pub(crate) fn insert(&mut self, derived: TypeId, base: TypeId, upcast: Registered) {
        self.graph.add_edge(derived, base, ());
        self.edges.insert((derived, base), upcast);
    }

    /// Check whether `derived -> base` is a registered upcast.
    pub(crate) fn contains(&self, derived: TypeId, base: TypeId) -> bool {
        self.edges.contains_key(&(derived, base))
    }

    /// Check whether `source` is `target` or reaches it through upcasts.
    pub(crate) fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if source == target {
            return true;
        }
        self.graph.contains_node(source)
            && self.graph.contains_node(target)
            && has_path_connecting(&self.graph, source, target, None)
    }

    /// The erased steps of the shortest upcast chain from `source` to `target`.
    pub(crate) fn path(&self, source: TypeId, target: TypeId) -> Option<Vec<ErasedFn>> {
        if source == target || !self.graph.contains_node(source) || !self.graph.contains_node(target) {
            return None;
        }

        let (_, nodes) = astar(&self.graph, source, |node| node == target, |_| 1u32, |_| 0)?;
        nodes
            .windows(2)
            .map(|pair| self.edges.get(&(pair[0], pair[1])).map(|edge| edge.erased.clone()))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::operator::Conversion;

    struct Base(u32);
    struct Middle(u32);
    struct Leaf(u32);

    fn hierarchy() -> Hierarchy {
        let mut hierarchy = Hierarchy::default();
        hierarchy.insert(
            TypeId::of::<Leaf>(),
            TypeId::of::<Middle>(),
            Registered::new(Conversion::upcast(1), |leaf: Leaf| Middle(leaf.0 + 1)),
        );
        hierarchy.insert(
            TypeId::of::<Middle>(),
            TypeId::of::<Base>(),
            Registered::new(Conversion::upcast(1), |middle: Middle| Base(middle.0 * 10)),
        );
        hierarchy
    }

    #[test]
    fn assignability_is_transitive_and_directed() {
        let hierarchy = hierarchy();
        assert!(hierarchy.is_assignable(TypeId::of::<Leaf>(), TypeId::of::<Base>()));
        assert!(hierarchy.is_assignable(TypeId::of::<Base>(), TypeId::of::<Base>()));
        assert!(!hierarchy.is_assignable(TypeId::of::<Base>(), TypeId::of::<Leaf>()));
        assert!(!hierarchy.is_assignable(TypeId::of::<u8>(), TypeId::of::<Base>()));
        assert_eq!(hierarchy.len(), 2);
        assert!(hierarchy.contains(TypeId::of::<Leaf>(), TypeId::of::<Middle>()));
        assert!(!hierarchy.contains(TypeId::of::<Leaf>(), TypeId::of::<Base>()));
    }

    #[test]
    fn insert_replaces_the_edge() {
        let mut hierarchy = hierarchy();
        hierarchy.insert(
            TypeId::of::<Leaf>(),
            TypeId::of::<Middle>(),
            Registered::new(Conversion::upcast(1), |_: Leaf| Middle(7)),
        );
        assert_eq!(hierarchy.len(), 2);

        let steps = hierarchy.path(TypeId::of::<Leaf>(), TypeId::of::<Base>()).unwrap();
        let out = steps
            .iter()
            .try_fold(Box::new(Leaf(1)) as Box<dyn Any>, |value, step| step(value))
            .unwrap();
        assert_eq!(out.downcast::<Base>().unwrap().0, 70);
    }

    #[test]
    fn path_composes_in_order() {
        let hierarchy = hierarchy();
        let steps = hierarchy.path(TypeId::of::<Leaf>(), TypeId::of::<Base>()).unwrap();
        assert_eq!(steps.len(), 2);

        let out = steps
            .iter()
            .try_fold(Box::new(Leaf(1)) as Box<dyn Any>, |value, step| step(value))
            .unwrap();
        assert_eq!(out.downcast::<Base>().unwrap().0, 20);
    }

    #[test]
    fn no_path_against_the_edges() {
        let hierarchy = hierarchy();
        assert!(hierarchy.path(TypeId::of::<Base>(), TypeId::of::<Leaf>()).is_none());
        assert!(hierarchy.path(TypeId::of::<Leaf>(), TypeId::of::<Leaf>()).is_none());
    }
}
