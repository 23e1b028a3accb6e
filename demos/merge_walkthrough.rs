//! demos/merge_walkthrough.rs
//!
//! 1. Build a small block DAG:   fringe -> b1, b2   (two competing tips)
//! 2. b1 carries d1 (pays 40 into "purse") and d2 (depends on d1)
//! 3. b2 carries d3, which conflicts with d1, and d4 (spends 60)
//! 4. Resolve: the cheaper side of the conflict is rejected, and the
//!    overspending d4 falls to channel arithmetic

use std::collections::{BTreeMap, BTreeSet};

use dagmerge_lib::resolution::catalog::DeployCatalog;
use dagmerge_lib::scope::view::DagView;
use dagmerge_lib::{resolve_dag, ExhaustiveSearch};

type Block = String;
type Deploy = String;
type Channel = String;

struct MemoryDag {
    parents: BTreeMap<Block, Vec<Block>>,
    deploys: BTreeMap<Block, BTreeSet<Deploy>>,
}

impl DagView<Block, Deploy> for MemoryDag {
    fn seen(&self, block: &Block) -> BTreeSet<Block> {
        let mut ancestors = BTreeSet::new();
        let mut frontier = self.parents.get(block).cloned().unwrap_or_default();
        while let Some(current) = frontier.pop() {
            if ancestors.insert(current.clone()) {
                frontier.extend(self.parents.get(&current).cloned().unwrap_or_default());
            }
        }
        ancestors
    }

    fn deploys(&self, block: &Block) -> BTreeSet<Deploy> {
        self.deploys.get(block).cloned().unwrap_or_default()
    }

    fn height(&self, _block: &Block) -> i64 {
        0
    }
}

struct MemoryCatalog {
    conflict_pairs: BTreeSet<(Deploy, Deploy)>,
    depend_pairs: BTreeSet<(Deploy, Deploy)>,
    costs: BTreeMap<Deploy, u64>,
    diffs: BTreeMap<Deploy, BTreeMap<Channel, i64>>,
}

impl DeployCatalog<Deploy, Channel> for MemoryCatalog {
    fn conflicts(&self, a: &Deploy, b: &Deploy) -> bool {
        self.conflict_pairs.contains(&(a.clone(), b.clone()))
            || self.conflict_pairs.contains(&(b.clone(), a.clone()))
    }

    fn depends(&self, a: &Deploy, b: &Deploy) -> bool {
        self.depend_pairs.contains(&(a.clone(), b.clone()))
    }

    fn cost(&self, deploy: &Deploy) -> u64 {
        self.costs.get(deploy).copied().unwrap_or(1)
    }

    fn channel_diffs(&self, deploy: &Deploy) -> BTreeMap<Channel, i64> {
        self.diffs.get(deploy).cloned().unwrap_or_default()
    }
}

fn main() {
    let s = |v: &str| v.to_string();

    let dag = MemoryDag {
        parents: [
            (s("b1"), vec![s("fringe")]),
            (s("b2"), vec![s("fringe")]),
            (s("fringe"), vec![]),
        ]
        .into_iter()
        .collect(),
        deploys: [
            (s("b1"), [s("d1"), s("d2")].into_iter().collect()),
            (s("b2"), [s("d3"), s("d4")].into_iter().collect()),
        ]
        .into_iter()
        .collect(),
    };

    let catalog = MemoryCatalog {
        conflict_pairs: [(s("d1"), s("d3"))].into_iter().collect(),
        depend_pairs: [(s("d2"), s("d1"))].into_iter().collect(),
        costs: [(s("d1"), 10), (s("d2"), 5), (s("d3"), 2), (s("d4"), 1)]
            .into_iter()
            .collect(),
        diffs: [
            (s("d1"), [(s("purse"), 40)].into_iter().collect()),
            (s("d4"), [(s("purse"), -60)].into_iter().collect()),
        ]
        .into_iter()
        .collect(),
    };

    let tips: BTreeSet<Block> = [s("b1"), s("b2")].into_iter().collect();
    let fringe: BTreeSet<Block> = [s("fringe")].into_iter().collect();
    let init: BTreeMap<Channel, i64> = [(s("purse"), 10)].into_iter().collect();

    let outcome = resolve_dag(
        &dag,
        &catalog,
        &tips,
        &fringe,
        &BTreeSet::new(),
        &BTreeSet::new(),
        &init,
        &ExhaustiveSearch,
    )
    .expect("dependency graph is acyclic");

    println!("accepted: {:?}", outcome.accepted);
    println!("rejected: {:?}", outcome.rejected);

    // d3 is the cheap side of the d1/d3 conflict and goes first; d4 would
    // drive the purse to 10 + 40 - 60 < 0 and is rejected by arithmetic
    assert_eq!(
        outcome.accepted,
        [s("d1"), s("d2")].into_iter().collect::<BTreeSet<_>>()
    );
    assert_eq!(
        outcome.rejected,
        [s("d3"), s("d4")].into_iter().collect::<BTreeSet<_>>()
    );
}
