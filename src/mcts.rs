//! Monte Carlo Tree Search (MCTS) with plain UCT.
//!
//! Each search builds a fresh tree rooted at the given position and runs a
//! fixed number of iterations of:
//! - selection by UCT, with unvisited children always explored first
//! - expansion of one untried move, chosen by the move heuristic
//! - a heuristic-biased random playout from the new node
//! - backpropagation of +1 / -1 / 0 from the searching side's point of view
//!
//! The tree is an arena of nodes addressed by [`NodeId`]; parent and child
//! links are indices, so walking back up for backpropagation is O(1) per step.
//! The best move is the most-visited child of the root.

use std::cmp::Ordering;

use crate::config::SearchConfig;
use crate::geometry::Point;
use crate::heuristic::select_move;
use crate::playout::rollout;
use crate::position::{Player, Position, apply_move, str_coord, valid_moves};

/// Index of a node in the search arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS search tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// The game position at this node
    pub pos: Position,
    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,
    /// Move that led here from the parent (`None` for the root)
    pub mv: Option<Point>,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout results from the searching side's point of view
    pub score: f64,
    /// Moves not yet expanded; filled lazily on first use
    untried: Option<Vec<Point>>,
}

impl TreeNode {
    fn new(pos: Position, parent: Option<NodeId>, mv: Option<Point>) -> Self {
        Self {
            pos,
            parent,
            mv,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            untried: None,
        }
    }

    /// Mean playout result, in `[-1, 1]`.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.score / self.visits as f64
        } else {
            0.0
        }
    }

    /// Number of moves still waiting to be expanded, if initialised.
    pub fn untried_len(&self) -> Option<usize> {
        self.untried.as_ref().map(Vec::len)
    }
}

/// Selection priority of a child.
///
/// Unvisited children outrank every visited one regardless of statistics.
/// The derived ordering compares the variant first, so `Unvisited` is always
/// greater than any `Visited(_)`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub enum Priority {
    Visited(f64),
    Unvisited,
}

/// UCT priority of a node given its parent's visit count.
pub fn uct_priority(node: &TreeNode, parent_visits: u32, c: f64) -> Priority {
    if node.visits == 0 {
        return Priority::Unvisited;
    }
    let v = node.visits as f64;
    let exploit = node.score / v;
    let explore = c * ((parent_visits as f64).ln() / v).sqrt();
    Priority::Visited(exploit + explore)
}

/// MCTS tree with arena-based node storage.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Create a tree holding only a root for (a clone of) `pos`.
    pub fn new(pos: &Position) -> Self {
        Self {
            nodes: vec![TreeNode::new(pos.clone(), None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every node in creation order, root first.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Untried moves of a node, generating them on first access.
    fn untried(&mut self, id: NodeId) -> &mut Vec<Point> {
        let node = self.get_mut(id);
        if node.untried.is_none() {
            node.untried = Some(valid_moves(&node.pos));
        }
        node.untried.get_or_insert_with(Vec::new)
    }

    /// Child with the highest UCT priority. Ties go to the earliest child.
    pub fn best_child(&self, id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, Priority)> = None;
        for &child in &node.children {
            let pri = uct_priority(self.get(child), node.visits, c);
            let better = match best {
                None => true,
                Some((_, b)) => pri.partial_cmp(&b) == Some(Ordering::Greater),
            };
            if better {
                best = Some((child, pri));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Most visited child of the root. Ties go to the earliest child.
    pub fn most_visited_child(&self) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.get(self.root()).children {
            if best.is_none_or(|b| self.get(child).visits > self.get(b).visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Descend from the root while the current node is fully expanded.
    fn select(&mut self, c: f64) -> NodeId {
        let mut id = self.root();
        while self.untried(id).is_empty() {
            match self.best_child(id, c) {
                Some(child) => id = child,
                None => break,
            }
        }
        id
    }

    /// Expand one untried move of `id`, picked by the heuristic.
    ///
    /// Returns the new child, or `None` if `id` has nothing left to expand.
    fn expand(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> Option<NodeId> {
        self.untried(id);
        let node = self.get_mut(id);
        let untried = node.untried.as_mut()?;
        let mv = select_move(&node.pos, untried, rng)?;
        let i = untried.iter().position(|&m| m == mv)?;
        untried.remove(i);

        let mut child_pos = node.pos.clone();
        apply_move(&mut child_pos, mv);

        let child = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode::new(child_pos, Some(id), Some(mv)));
        self.get_mut(id).children.push(child);
        Some(child)
    }

    /// Add `delta` to the score of every node from `id` up to the root.
    fn backpropagate(&mut self, id: NodeId, delta: f64) {
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = self.get_mut(n);
            node.visits += 1;
            node.score += delta;
            cur = node.parent;
        }
    }
}

/// Playout result from `ai_color`'s point of view.
#[inline]
fn outcome(winner: Option<Player>, ai_color: Player) -> f64 {
    match winner {
        Some(p) if p == ai_color => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// Run MCTS for `iterations` iterations using default settings otherwise.
///
/// See [`tree_search_with`].
pub fn tree_search(
    tree: &mut Tree,
    iterations: usize,
    ai_color: Player,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    tree_search_with(tree, &SearchConfig::with_iterations(iterations), ai_color, rng)
}

/// Run MCTS on `tree` and return the move of the most visited root child.
///
/// Results are scored for `ai_color`. If the root never got a child (zero
/// iterations, or nothing to expand), a uniformly random legal move is
/// returned instead; `None` means the root position has no legal move.
pub fn tree_search_with(
    tree: &mut Tree,
    config: &SearchConfig,
    ai_color: Player,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    for _ in 0..config.iterations {
        let leaf = tree.select(config.exploration);
        let node = tree.expand(leaf, rng).unwrap_or(leaf);

        let mut sim = tree.get(node).pos.clone();
        let w = rollout(&mut sim, config.rollout_depth, config.heuristic_prob, rng);

        tree.backpropagate(node, outcome(w, ai_color));
    }

    let best = match tree.most_visited_child() {
        Some(child) => tree.get(child).mv,
        None => {
            let moves = valid_moves(&tree.get(tree.root()).pos);
            (!moves.is_empty()).then(|| moves[rng.usize(..moves.len())])
        }
    };

    log::debug!(
        "search for {ai_color}: {} iterations, {} nodes, best {}",
        config.iterations,
        tree.len(),
        best.map_or_else(|| "none".to_string(), str_coord)
    );
    if log::log_enabled!(log::Level::Trace) {
        dump_children(tree);
    }
    best
}

/// Search a fresh tree for `pos` and return the chosen move.
///
/// The tree is dropped on return; `pos` is never modified.
pub fn search_move(
    pos: &Position,
    config: &SearchConfig,
    ai_color: Player,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let mut tree = Tree::new(pos);
    tree_search_with(&mut tree, config, ai_color, rng)
}

/// Log statistics for the root's children at trace level.
pub fn dump_children(tree: &Tree) {
    for &child in &tree.get(tree.root()).children {
        let node = tree.get(child);
        log::trace!(
            "move {} v={} score={} wr={:.3}",
            node.mv.map_or_else(|| "-".to_string(), str_coord),
            node.visits,
            node.score,
            node.winrate()
        );
    }
}
