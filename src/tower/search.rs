//! Path search over the upcast graph.
//!
//! Edges are `(from, to)` pairs in registration order; paths are lists of
//! edge indices, first conversion first.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

fn out_edges<K: Copy + Eq>(edges: &[(K, K)], v: K) -> impl Iterator<Item = (usize, K)> + '_ {
    edges
        .iter()
        .enumerate()
        .filter(move |(_, e)| e.0 == v)
        .map(|(i, e)| (i, e.1))
}

fn trace<K: Copy + Eq + Hash>(mut v: K, edges: &[(K, K)], back: &HashMap<K, usize>) -> Vec<usize> {
    let mut path = Vec::new();
    while let Some(&i) = back.get(&v) {
        path.push(i);
        v = edges[i].0;
    }
    path.reverse();
    path
}

/// Upcast paths from `s` and from `t` to a common type.
///
/// Bidirectional breadth-first search. The two frontiers take turns, one
/// node per turn with `s` first, and the search stops as soon as an edge
/// out of one frontier lands on a node claimed by the other side.
pub(crate) fn joining_paths<K: Copy + Eq + Hash>(
    s: K,
    t: K,
    edges: &[(K, K)],
) -> Option<(Vec<usize>, Vec<usize>)> {
    if s == t {
        return Some((Vec::new(), Vec::new()));
    }

    let mut seen_from = HashMap::from([(s, s), (t, t)]);
    let mut back: HashMap<K, usize> = HashMap::new();
    let mut qs = VecDeque::from([s]);
    let mut qt = VecDeque::from([t]);

    let mut step = |queue: &mut VecDeque<K>, this: K, other: K| -> Option<(Vec<usize>, Vec<usize>)> {
        let v = queue.pop_front()?;

        if let Some((i, w)) = out_edges(edges, v).find(|&(_, w)| seen_from.get(&w) == Some(&other)) {
            let mut near = trace(v, edges, &back);
            near.push(i);
            return Some((near, trace(w, edges, &back)));
        }

        for (i, w) in out_edges(edges, v) {
            if !seen_from.contains_key(&w) {
                seen_from.insert(w, this);
                back.insert(w, i);
                queue.push_back(w);
            }
        }
        None
    };

    while !(qs.is_empty() && qt.is_empty()) {
        if let Some(pair) = step(&mut qs, s, t) {
            return Some(pair);
        }
        if let Some((from_t, from_s)) = step(&mut qt, t, s) {
            return Some((from_s, from_t));
        }
    }
    None
}

/// Upcast path from `start` to the nearest type satisfying `has_op`.
///
/// Empty when `start` itself qualifies. Among the out-edges of a node the
/// first registered one that reaches a qualifying type wins.
pub(crate) fn operation_path<K, F>(start: K, edges: &[(K, K)], has_op: F) -> Option<Vec<usize>>
where
    K: Copy + Eq + Hash,
    F: Fn(K) -> bool,
{
    if has_op(start) {
        return Some(Vec::new());
    }

    let mut back: HashMap<K, usize> = HashMap::new();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        if let Some((i, _)) = out_edges(edges, v).find(|&(_, w)| has_op(w)) {
            let mut path = trace(v, edges, &back);
            path.push(i);
            return Some(path);
        }
        for (i, w) in out_edges(edges, v) {
            if seen.insert(w) {
                back.insert(w, i);
                queue.push_back(w);
            }
        }
    }
    None
}
