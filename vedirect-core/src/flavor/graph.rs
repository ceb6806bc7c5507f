//! Flavor dependency graph

use core::fmt;

use super::{Flavor, FlavorSet};

/// Flavor graph errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlavorError {
    /// The graph loops back through this flavor
    Cycle(Flavor),
}

impl fmt::Display for FlavorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlavorError::Cycle(flavor) => write!(f, "cycle through {}", flavor),
        }
    }
}

/// Directed graph mapping each flavor to the flavors it directly implies
///
/// The graph must be acyclic. Cycles are reported by every traversal
/// instead of recursing forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorGraph {
    edges: [FlavorSet; Flavor::COUNT],
}

impl Default for FlavorGraph {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FlavorGraph {
    /// Graph with no edges
    pub const fn empty() -> Self {
        Self {
            edges: [FlavorSet::empty(); Flavor::COUNT],
        }
    }

    /// The VE.Direct device family hierarchy
    pub const fn builtin() -> Self {
        let mut edges = [FlavorSet::empty(); Flavor::COUNT];
        edges[Flavor::All as usize] = FlavorSet::single(Flavor::MpptBs)
            .with(Flavor::MpptRs)
            .with(Flavor::InvPhnx)
            .with(Flavor::ChgPhnx)
            .with(Flavor::Bmv60)
            .with(Flavor::Bmv70)
            .with(Flavor::Bmv71)
            .with(Flavor::MultiRs);
        edges[Flavor::InvPhnx as usize] = FlavorSet::single(Flavor::Inv);
        edges[Flavor::ChgPhnx as usize] = FlavorSet::single(Flavor::Chg);
        edges[Flavor::MpptBs as usize] = FlavorSet::single(Flavor::Mppt);
        edges[Flavor::MpptRs as usize] = FlavorSet::single(Flavor::Mppt);
        edges[Flavor::Bmv60 as usize] = FlavorSet::single(Flavor::Bmv);
        edges[Flavor::Bmv70 as usize] = FlavorSet::single(Flavor::Bmv);
        edges[Flavor::Bmv71 as usize] = FlavorSet::single(Flavor::Bmv);
        edges[Flavor::MultiRs as usize] = FlavorSet::single(Flavor::Inv).with(Flavor::Chg);
        edges[Flavor::Mppt as usize] = FlavorSet::single(Flavor::Chg);
        edges[Flavor::Bmv as usize] = FlavorSet::single(Flavor::Any);
        edges[Flavor::Chg as usize] = FlavorSet::single(Flavor::Any);
        edges[Flavor::Inv as usize] = FlavorSet::single(Flavor::Any);
        Self { edges }
    }

    /// Build a graph from `(flavor, direct dependencies)` pairs
    pub fn from_edges(edges: &[(Flavor, &[Flavor])]) -> Self {
        let mut graph = Self::empty();
        for (from, targets) in edges {
            for to in targets.iter() {
                graph.add_edge(*from, *to);
            }
        }
        graph
    }

    pub fn add_edge(&mut self, from: Flavor, to: Flavor) {
        self.edges[from as usize].insert(to);
    }

    /// Direct dependencies of `flavor`
    pub fn dependencies(&self, flavor: Flavor) -> FlavorSet {
        self.edges[flavor as usize]
    }

    /// Transitive closure of the dependencies of `flavor`, excluding
    /// `flavor` itself
    pub fn inflate(&self, flavor: Flavor) -> Result<FlavorSet, FlavorError> {
        let mut closure = FlavorSet::empty();
        let mut path = FlavorSet::empty();
        self.visit(flavor, &mut path, &mut closure)?;
        Ok(closure)
    }

    /// Union of `flavors` and their inflations
    pub fn inflate_all(&self, flavors: FlavorSet) -> Result<FlavorSet, FlavorError> {
        let mut closure = flavors;
        for flavor in flavors.iter() {
            closure = closure.union(self.inflate(flavor)?);
        }
        Ok(closure)
    }

    /// Smallest subset of `flavors` whose inflation covers `flavors`
    ///
    /// Drops every flavor implied by another member of the set.
    pub fn deflate(&self, flavors: FlavorSet) -> Result<FlavorSet, FlavorError> {
        let mut implied = FlavorSet::empty();
        for flavor in flavors.iter() {
            implied = implied.union(self.inflate(flavor)?);
        }
        Ok(flavors.iter().filter(|f| !implied.contains(*f)).collect())
    }

    /// Check the whole graph for cycles
    pub fn validate(&self) -> Result<(), FlavorError> {
        for flavor in Flavor::ALL {
            self.inflate(flavor)?;
        }
        Ok(())
    }

    // Depth-first walk; `path` holds the flavors on the current branch
    fn visit(
        &self,
        flavor: Flavor,
        path: &mut FlavorSet,
        closure: &mut FlavorSet,
    ) -> Result<(), FlavorError> {
        path.insert(flavor);
        for dependency in self.dependencies(flavor).iter() {
            if path.contains(dependency) {
                return Err(FlavorError::Cycle(dependency));
            }
            if closure.insert(dependency) {
                self.visit(dependency, path, closure)?;
            }
        }
        path.remove(flavor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(flavors: &[Flavor]) -> FlavorSet {
        flavors.iter().copied().collect()
    }

    #[test]
    fn test_inflate_chain() {
        let graph = FlavorGraph::builtin();
        assert_eq!(
            graph.inflate(Flavor::MpptBs),
            Ok(set(&[Flavor::Mppt, Flavor::Chg, Flavor::Any]))
        );
        assert_eq!(graph.inflate(Flavor::Any), Ok(FlavorSet::empty()));
        assert_eq!(
            graph.inflate(Flavor::MultiRs),
            Ok(set(&[Flavor::Inv, Flavor::Chg, Flavor::Any]))
        );
    }

    #[test]
    fn test_inflate_all_includes_inputs() {
        let graph = FlavorGraph::builtin();
        let all = graph.inflate_all(set(&[Flavor::All])).unwrap();
        assert_eq!(all.len(), Flavor::COUNT);

        let bmv = graph.inflate_all(set(&[Flavor::Bmv])).unwrap();
        assert_eq!(bmv, set(&[Flavor::Bmv, Flavor::Any]));
    }

    #[test]
    fn test_deflate_drops_implied() {
        let graph = FlavorGraph::builtin();
        let input = set(&[
            Flavor::MpptBs,
            Flavor::Mppt,
            Flavor::Chg,
            Flavor::Any,
            Flavor::Bmv,
        ]);
        assert_eq!(
            graph.deflate(input),
            Ok(set(&[Flavor::MpptBs, Flavor::Bmv]))
        );
    }

    #[test]
    fn test_cycle_detected() {
        let graph = FlavorGraph::from_edges(&[
            (Flavor::Mppt, &[Flavor::Chg]),
            (Flavor::Chg, &[Flavor::Any]),
            (Flavor::Any, &[Flavor::Mppt]),
        ]);
        assert!(matches!(
            graph.inflate(Flavor::Mppt),
            Err(FlavorError::Cycle(_))
        ));
        assert!(graph.validate().is_err());
        assert!(FlavorGraph::builtin().validate().is_ok());
    }

    #[test]
    fn test_self_loop_detected() {
        let graph = FlavorGraph::from_edges(&[(Flavor::Inv, &[Flavor::Inv])]);
        assert_eq!(
            graph.inflate(Flavor::Inv),
            Err(FlavorError::Cycle(Flavor::Inv))
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn flavor_set() -> impl Strategy<Value = FlavorSet> {
        proptest::collection::vec(proptest::sample::select(&Flavor::ALL[..]), 0..8)
            .prop_map(|flavors| flavors.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_deflate_inflates_back(flavors in flavor_set()) {
            let graph = FlavorGraph::builtin();
            let minimal = graph.deflate(flavors).unwrap();
            let restored = graph.inflate_all(minimal).unwrap();
            prop_assert!(restored.is_superset(&flavors));
            prop_assert!(flavors.is_superset(&minimal));
        }

        #[test]
        fn prop_deflate_is_minimal(flavors in flavor_set()) {
            let graph = FlavorGraph::builtin();
            let minimal = graph.deflate(flavors).unwrap();
            for flavor in minimal.iter() {
                for other in minimal.iter().filter(|o| *o != flavor) {
                    prop_assert!(!graph.inflate(other).unwrap().contains(flavor));
                }
            }
        }
    }
}
