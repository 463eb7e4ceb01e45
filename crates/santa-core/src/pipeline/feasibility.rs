//! Completion check for partially generated assignment sets.
//!
//! The remaining work after some picks is a bipartite degree-constrained
//! problem: giver `g` still owes `demand[g]` gifts, receiver `v` still needs
//! `need[v]` gifts, and `g -> v` is allowed iff `g != v` and the pair is not
//! used yet. It can be completed iff the max flow
//! `source -> giver -> receiver -> sink` saturates every giver.
//!
//! Sizes are tiny (at most 50 participants, 3 gifts), so a plain
//! breadth-first augmenting path search is enough.

use std::collections::VecDeque;

/// Residual flow network with paired forward/backward edges (`e ^ 1`).
#[derive(Debug, Default)]
struct FlowNetwork {
    adj: Vec<Vec<usize>>,
    to: Vec<usize>,
    cap: Vec<usize>,
}

impl FlowNetwork {
    fn with_nodes(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            to: Vec::new(),
            cap: Vec::new(),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: usize) {
        let e = self.to.len();
        self.to.push(to);
        self.cap.push(cap);
        self.adj[from].push(e);
        self.to.push(from);
        self.cap.push(0);
        self.adj[to].push(e + 1);
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> usize {
        let mut flow = 0;
        let mut prev_edge: Vec<Option<usize>> = vec![None; self.adj.len()];

        loop {
            prev_edge.iter_mut().for_each(|p| *p = None);
            let mut visited = vec![false; self.adj.len()];
            visited[source] = true;

            let mut queue = VecDeque::from([source]);
            while let Some(u) = queue.pop_front() {
                if u == sink {
                    break;
                }
                for &e in &self.adj[u] {
                    let v = self.to[e];
                    if !visited[v] && self.cap[e] > 0 {
                        visited[v] = true;
                        prev_edge[v] = Some(e);
                        queue.push_back(v);
                    }
                }
            }

            if !visited[sink] {
                return flow;
            }

            let mut bottleneck = usize::MAX;
            let mut v = sink;
            while let Some(e) = prev_edge[v] {
                bottleneck = bottleneck.min(self.cap[e]);
                v = self.to[e ^ 1];
            }

            let mut v = sink;
            while let Some(e) = prev_edge[v] {
                self.cap[e] -= bottleneck;
                self.cap[e ^ 1] += bottleneck;
                v = self.to[e ^ 1];
            }

            flow += bottleneck;
        }
    }
}

/// Return true when the outstanding `demand` (per giver) and `need`
/// (per receiver) can be met using only unused, non-self pairs.
///
/// `used[g][v]` marks pairs already assigned. All slices are indexed by
/// participant position and must have the same length.
pub fn completable(demand: &[usize], need: &[usize], used: &[Vec<bool>]) -> bool {
    let n = demand.len();
    debug_assert_eq!(need.len(), n);
    debug_assert_eq!(used.len(), n);

    let total_demand: usize = demand.iter().sum();
    let total_need: usize = need.iter().sum();
    if total_demand != total_need {
        return false;
    }
    if total_demand == 0 {
        return true;
    }

    let allowed = |g: usize, v: usize| g != v && !used[g][v] && need[v] > 0;

    // Singleton Hall checks reject most dead ends without building a network.
    for g in (0..n).filter(|&g| demand[g] > 0) {
        if (0..n).filter(|&v| allowed(g, v)).count() < demand[g] {
            return false;
        }
    }
    for v in (0..n).filter(|&v| need[v] > 0) {
        if (0..n).filter(|&g| demand[g] > 0 && allowed(g, v)).count() < need[v] {
            return false;
        }
    }

    let source = 2 * n;
    let sink = 2 * n + 1;
    let mut net = FlowNetwork::with_nodes(2 * n + 2);

    for g in (0..n).filter(|&g| demand[g] > 0) {
        net.add_edge(source, g, demand[g]);
        for v in (0..n).filter(|&v| allowed(g, v)) {
            net.add_edge(g, n + v, 1);
        }
    }
    for v in (0..n).filter(|&v| need[v] > 0) {
        net.add_edge(n + v, sink, need[v]);
    }

    net.max_flow(source, sink) == total_demand
}
