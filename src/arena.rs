use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, debug_span, trace, warn};

use crate::config::TreeConfig;
use crate::edge::Edge;
use crate::edge_bag::EdgeBag;
use crate::error::{Result, TreeError};
use crate::frozen::FrozenArena;
use crate::label::Label;
use crate::node::Node;
use crate::{CharType, DocIndex, NodeID, Offset};

/// What [`SuffixArena::add_ref`] did with a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefOutcome {
    /// The node already held the document index; nothing changed.
    AlreadyPresent,
    /// An existing reference has the same `index + offset` sum; the new one
    /// was dropped and nothing was propagated.
    Duplicate { existing: (DocIndex, Offset) },
    /// Recorded at the node and back-filled into `propagated` nodes along
    /// its suffix chain.
    Inserted { propagated: usize },
}

/// Storage for every node of a generalized suffix tree.
///
/// Node ids index into `node_storage`. The root is always slot 0 and is
/// never removed; nodes are only dropped together with the arena.
///
/// Methods taking a `NodeID` panic if the id was not handed out by this
/// arena.
#[derive(Debug, Clone)]
pub struct SuffixArena {
    node_storage: Vec<Node>,
    config: TreeConfig,
}

impl Default for SuffixArena {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
    }
}

impl SuffixArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena, clamping the config into the addressable range.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        let config = config.clamped();
        let mut node_storage = Vec::with_capacity(config.node_capacity.max(1));
        node_storage.push(Node::with_ref_capacity(config.ref_capacity));
        Self { node_storage, config }
    }

    /// Like [`with_config`](Self::with_config) but rejects an invalid config.
    pub fn try_with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> NodeID {
        NodeID::ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.node_storage.len()
    }

    /// Always false: the root exists from the start.
    pub fn is_empty(&self) -> bool {
        self.node_storage.is_empty()
    }

    /// Appends a fresh node with no references, edges or suffix link.
    ///
    /// # Panics
    ///
    /// Panics once the arena holds [`NodeID::MAX_NODES`] nodes.
    pub fn create_node(&mut self) -> NodeID {
        assert!(self.node_storage.len() < NodeID::MAX_NODES, "node arena is full");
        self.node_storage
            .push(Node::with_ref_capacity(self.config.ref_capacity));
        NodeID::from_index(self.node_storage.len() - 1)
    }

    pub fn node(&self, node_id: NodeID) -> &Node {
        &self.node_storage[node_id.index()]
    }

    pub fn node_mut(&mut self, node_id: NodeID) -> &mut Node {
        &mut self.node_storage[node_id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeID, &Node)> + '_ {
        self.node_storage
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeID::from_index(i), node))
    }

    /// Stores `edge` under `ch` at `parent`, returning the edge it replaced.
    pub fn add_edge(&mut self, parent: NodeID, ch: CharType, edge: Edge) -> Option<Edge> {
        self.node_mut(parent).add_edge(ch, edge)
    }

    /// Adds an edge from `parent` to `child` keyed by the label's leading
    /// character.
    pub fn connect(&mut self, parent: NodeID, label: Label, child: NodeID) -> Result<Option<Edge>> {
        let ch = label.first().ok_or(TreeError::EmptyLabel { parent })?;
        Ok(self.add_edge(parent, ch, Edge::new(label, child)))
    }

    pub fn get_edge(&self, node: NodeID, ch: CharType) -> Option<&Edge> {
        self.node(node).get_edge(ch)
    }

    pub fn edges(&self, node: NodeID) -> &EdgeBag {
        self.node(node).edges()
    }

    /// Follows the edge keyed by `ch`, if any.
    pub fn transition(&self, node: NodeID, ch: CharType) -> Option<NodeID> {
        self.get_edge(node, ch).map(Edge::dest)
    }

    pub fn suffix(&self, node: NodeID) -> Option<NodeID> {
        self.node(node).suffix()
    }

    pub fn set_suffix(&mut self, node: NodeID, suffix: NodeID) {
        self.node_mut(node).set_suffix(suffix);
    }

    pub fn contains(&self, node: NodeID, index: DocIndex) -> bool {
        self.node(node).contains(index)
    }

    /// Records that document `index` occurs on the path ending at `node`,
    /// then back-fills the reference into every node along the suffix chain.
    ///
    /// The walk stops at the first node that already holds `index`, since
    /// an earlier propagation has covered it and everything past it. A node
    /// on the chain whose references collide by `index + offset` sum is
    /// skipped but does not stop the walk. A collision at `node` itself
    /// drops the reference entirely.
    pub fn add_ref(&mut self, node: NodeID, index: DocIndex, offset: Offset) -> RefOutcome {
        let target = self.node_mut(node);
        if target.contains(index) {
            return RefOutcome::AlreadyPresent;
        }
        if let Some(existing) = target.colliding_ref(index, offset) {
            report_duplicate(node, index, offset, existing);
            return RefOutcome::Duplicate { existing };
        }
        target.insert_ref(index, offset);
        let mut iter = target.suffix();

        // An acyclic chain visits fewer nodes than the arena holds.
        let max_steps = self.node_storage.len();
        let mut steps = 0;
        let mut propagated = 0;
        while let Some(id) = iter {
            if steps == max_steps {
                warn!(%node, index, "suffix link cycle, propagation stopped");
                break;
            }
            steps += 1;

            let current = self.node_mut(id);
            if current.contains(index) {
                break;
            }
            match current.colliding_ref(index, offset) {
                Some(existing) => report_duplicate(id, index, offset, existing),
                None => {
                    current.insert_ref(index, offset);
                    propagated += 1;
                }
            }
            iter = current.suffix();
        }

        trace!(%node, index, offset, propagated, "reference added");
        RefOutcome::Inserted { propagated }
    }

    /// Every document index recorded at `node` or any node below it.
    /// Recomputed on each call; suffix links are not followed.
    pub fn data(&self, node: NodeID) -> HashSet<DocIndex> {
        let mut ret = HashSet::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let current = self.node(id);
            ret.extend(current.references().keys().copied());
            stack.extend(current.edges().values().map(Edge::dest));
        }
        ret
    }

    /// Counts the distinct documents below `node`, caching the count at
    /// every node of the subtree, and returns the count for `node`.
    ///
    /// Always a full recount; nothing from a previous call is reused.
    pub fn compute_and_cache_count(&mut self, node: NodeID) -> usize {
        let _span = debug_span!("compute_and_cache_count", %node).entered();

        // Post-order walk. A finished child leaves its document set in
        // `finished` until its parent absorbs it.
        let mut finished: HashMap<NodeID, HashSet<DocIndex>> = HashMap::new();
        let mut stack = vec![(node, false)];
        let mut visited = 0usize;
        while let Some((id, expanded)) = stack.pop() {
            if !expanded {
                stack.push((id, true));
                stack.extend(self.edges(id).values().map(|e| (e.dest(), false)));
                continue;
            }

            let current = self.node(id);
            let mut set: HashSet<DocIndex> = current.references().keys().copied().collect();
            for child in current.edges().values().map(Edge::dest) {
                // Edges form a tree, so each child is absorbed exactly once.
                let child_set = finished.remove(&child).unwrap_or_default();
                if child_set.len() > set.len() {
                    let smaller = std::mem::replace(&mut set, child_set);
                    set.extend(smaller);
                } else {
                    set.extend(child_set);
                }
            }

            self.node_mut(id).set_cached_count(set.len());
            finished.insert(id, set);
            visited += 1;
        }

        let count = finished.get(&node).map_or(0, HashSet::len);
        debug!(visited, count, "subtree counts cached");
        count
    }

    /// The count cached by the last [`compute_and_cache_count`] reaching
    /// `node`. Later mutations are not reflected until the next recount.
    ///
    /// [`compute_and_cache_count`]: Self::compute_and_cache_count
    pub fn result_count(&self, node: NodeID) -> Result<usize> {
        self.node(node).result_count(node)
    }

    /// Ends construction: recounts every subtree and returns a read-only
    /// view in which every node's count is current.
    pub fn freeze(mut self) -> FrozenArena {
        let _span = debug_span!("freeze", nodes = self.len()).entered();

        self.compute_and_cache_count(NodeID::ROOT);

        // Subtrees not hanging off the root still get counted.
        let mut has_parent = vec![false; self.node_storage.len()];
        for node in &self.node_storage {
            for edge in node.edges().values() {
                has_parent[edge.dest().index()] = true;
            }
        }
        let detached: Vec<NodeID> = has_parent
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, &p)| !p)
            .map(|(i, _)| NodeID::from_index(i))
            .collect();
        if !detached.is_empty() {
            debug!(detached = detached.len(), "counting subtrees detached from the root");
        }
        for id in detached {
            self.compute_and_cache_count(id);
        }

        FrozenArena::new(self)
    }
}

fn report_duplicate(node: NodeID, index: DocIndex, offset: Offset, existing: (DocIndex, Offset)) {
    debug!(
        %node,
        index,
        offset,
        existing_index = existing.0,
        existing_offset = existing.1,
        "reference dropped, origin already recorded"
    );
}

impl fmt::Display for SuffixArena {
    /// One line per node, children indented under their parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(NodeID, Option<&Label>, usize)> = vec![(NodeID::ROOT, None, 0)];
        while let Some((id, label, depth)) = stack.pop() {
            let node = self.node(id);
            let mut refs: Vec<_> = node.references().iter().collect();
            refs.sort_unstable();

            write!(f, "{:width$}", "", width = depth * 4)?;
            match label {
                Some(label) => write!(f, "{label:?} ")?,
                None => write!(f, "root ")?,
            }
            write!(f, "{id}")?;
            if let Some(suffix) = node.suffix() {
                write!(f, " -> {suffix}")?;
            }
            if !refs.is_empty() {
                write!(f, " {refs:?}")?;
            }
            writeln!(f)?;

            let mut children: Vec<_> = node.edges().iter().collect();
            children.sort_unstable_by_key(|(&ch, _)| std::cmp::Reverse(ch));
            stack.extend(
                children
                    .into_iter()
                    .map(|(_, edge)| (edge.dest(), Some(edge.label()), depth + 1)),
            );
        }
        Ok(())
    }
}
