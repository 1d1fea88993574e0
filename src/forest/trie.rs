use std::collections::{BTreeMap, BTreeSet};

use crate::models::Exon;

/// Identifier of a node in an [`ExonTrie`]
///
/// Node ids are dense indices into the trie's node arena. They are
/// assigned in creation order, starting at 0, and are never reused.
pub type NodeId = usize;

#[derive(Clone, Debug)]
struct Node {
    exon: Exon,
    children: BTreeMap<Exon, NodeId>,
}

impl Node {
    fn new(exon: Exon) -> Self {
        Node {
            exon,
            children: BTreeMap::new(),
        }
    }
}

/// Prefix tree of exon sequences
///
/// Inserting the exon sequences of several transcripts collapses any
/// common leading sub-sequence onto a single shared path, while a
/// divergence creates a genuine branch. Only *leading* sub-sequences
/// merge: two transcripts sharing a run of exons somewhere in the
/// middle, but starting differently, stay on separate paths. This is
/// intentional, exons must remain in transcription order.
///
/// The trie is a forest: every distinct first exon across all
/// inserted sequences becomes the single root of its own tree.
///
/// Nodes live in an arena indexed by [`NodeId`]; edges are stored as
/// a per-node map from the next exon value to the child node. Edges
/// are never rewired once created, so the structure is acyclic by
/// construction.
///
/// # Examples
///
/// ```rust
/// use spliceforest::forest::ExonTrie;
/// use spliceforest::models::Exon;
///
/// let mut trie = ExonTrie::new();
/// trie.insert(&[Exon::new(20, 25), Exon::new(30, 35), Exon::new(50, 55)]);
/// trie.insert(&[Exon::new(20, 25), Exon::new(30, 35), Exon::new(80, 85)]);
///
/// // the two leading exons are shared, only the last one branches
/// assert_eq!(trie.node_count(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExonTrie {
    nodes: Vec<Node>,
    roots: BTreeMap<Exon, NodeId>,
    all_exons: BTreeSet<Exon>,
}

impl ExonTrie {
    /// Creates a new, empty trie
    pub fn new() -> Self {
        ExonTrie {
            nodes: Vec::new(),
            roots: BTreeMap::new(),
            all_exons: BTreeSet::new(),
        }
    }

    /// Inserts one transcript's exon sequence into the trie
    ///
    /// Walks the trie from the virtual root, following existing edges
    /// where the next exon matches and creating new nodes where it
    /// does not. An empty sequence is a no-op.
    ///
    /// After any number of insertions, walking root to leaf along the
    /// edge labels reproduces every inserted sequence exactly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spliceforest::forest::ExonTrie;
    /// use spliceforest::models::Exon;
    ///
    /// let mut trie = ExonTrie::new();
    /// trie.insert(&[]);
    /// assert!(trie.is_empty());
    ///
    /// trie.insert(&[Exon::new(5, 10)]);
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    pub fn insert(&mut self, exons: &[Exon]) {
        let mut parent: Option<NodeId> = None;
        for &exon in exons {
            let node = match parent {
                None => self.root_for(exon),
                Some(p) => self.child_for(p, exon),
            };
            self.all_exons.insert(exon);
            parent = Some(node);
        }
    }

    /// Returns the root node for `exon`, creating it if necessary
    fn root_for(&mut self, exon: Exon) -> NodeId {
        if let Some(&id) = self.roots.get(&exon) {
            return id;
        }
        let id = self.new_node(exon);
        self.roots.insert(exon, id);
        id
    }

    /// Returns the child of `parent` labeled `exon`, creating it if necessary
    fn child_for(&mut self, parent: NodeId, exon: Exon) -> NodeId {
        if let Some(&id) = self.nodes[parent].children.get(&exon) {
            return id;
        }
        let id = self.new_node(exon);
        self.nodes[parent].children.insert(exon, id);
        id
    }

    fn new_node(&mut self, exon: Exon) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(exon));
        id
    }

    /// Returns the exon value the node represents
    ///
    /// # Panics
    /// Panics if `node` is not a valid id of this trie
    pub fn exon(&self, node: NodeId) -> Exon {
        self.nodes[node].exon
    }

    /// Iterates the root nodes, ascending by their exon value
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.values().copied()
    }

    /// Iterates the children of a node, ascending by their exon value
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[node].children.values().copied()
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node].children.is_empty()
    }

    /// Iterates every distinct exon seen in any inserted sequence,
    /// in ascending order
    pub fn exons(&self) -> impl Iterator<Item = &Exon> {
        self.all_exons.iter()
    }

    /// Returns the total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been inserted yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
