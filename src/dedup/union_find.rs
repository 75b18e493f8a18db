use std::collections::HashMap;

use super::neighbors::NeighborPair;

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Point every node on the path directly at the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets containing `x` and `y`; returns false if already joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] = self.rank[root_x].saturating_add(1);
            }
        }
        true
    }

    /// Group all elements by root.
    ///
    /// Groups are ordered by their smallest member and members are ascending,
    /// so the result depends only on which elements are connected.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for x in 0..self.len() {
            let root = self.find(x);
            let slot = *by_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(x);
        }

        groups
    }
}

/// Cluster `n` documents: every edge with positive similarity at or above
/// `threshold` joins its endpoints, transitively. Singletons are included, so
/// every index appears in exactly one cluster.
///
/// A threshold of 1.0 or more disables merging entirely, even for identical
/// texts. Zero-similarity edges never merge.
pub fn cluster_by_union_find(n: usize, pairs: &[NeighborPair], threshold: f64) -> Vec<Vec<usize>> {
    let mut sets = UnionFind::new(n);
    if threshold < 1.0 {
        for pair in pairs
            .iter()
            .filter(|p| p.similarity > 0.0 && p.similarity >= threshold)
        {
            sets.union(pair.i, pair.j);
        }
    }
    sets.groups()
}
