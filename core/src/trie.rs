use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// Handle of a node inside a [`Trie`] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct TrieNode {
    value: Option<char>,
    parent: Option<NodeId>,
    children: SmallVec<[(char, NodeId); 4]>,
    is_end_of_word: bool,
}

impl TrieNode {
    fn new(value: Option<char>, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: SmallVec::new(),
            is_end_of_word: false,
        }
    }

    fn child(&self, ch: char) -> Option<NodeId> {
        self.children
            .iter()
            .find_map(|&(value, id)| (value == ch).then_some(id))
    }
}

/// Append-only prefix tree over lower-cased words.
///
/// Nodes live in a single arena and refer to each other by [`NodeId`], parents own their children through the
/// arena and the parent link is a plain handle.
#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(None, None)],
            len: 0,
        }
    }

    /// Builds a trie from a newline separated word list, skipping blank lines and words shorter than `min_len`
    /// characters.
    pub fn from_word_list(text: &str, min_len: usize) -> Self {
        let mut trie = Self::new();
        for word in text.lines().map(str::trim) {
            if word.chars().count() >= min_len {
                trie.insert(word);
            }
        }
        log::debug!("Loaded {} words (min length {})", trie.len(), min_len);
        trie
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut current = Self::ROOT;
        for ch in word.chars().flat_map(char::to_lowercase) {
            current = match self.nodes[current.index()].child(ch) {
                Some(child) => child,
                None => self.add_child(current, ch),
            };
        }

        let node = &mut self.nodes[current.index()];
        if !node.is_end_of_word {
            node.is_end_of_word = true;
            self.len += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word)
            .is_some_and(|node| self.nodes[node.index()].is_end_of_word)
    }

    /// Whether the whole character path of `word` exists, regardless of it being a complete word.
    pub fn is_prefix(&self, word: &str) -> bool {
        self.find(word).is_some()
    }

    /// Follows one edge from `node`, the character is lower-cased first.
    pub fn step(&self, node: NodeId, ch: char) -> Option<NodeId> {
        let mut current = node;
        for lower in ch.to_lowercase() {
            current = self.nodes[current.index()].child(lower)?;
        }
        Some(current)
    }

    pub fn is_word(&self, node: NodeId) -> bool {
        self.nodes[node.index()].is_end_of_word
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Rebuilds the string spelled from the root down to `node`.
    pub fn word_at(&self, node: NodeId) -> String {
        let mut chars = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let node = &self.nodes[id.index()];
            chars.extend(node.value);
            current = node.parent;
        }
        chars.iter().rev().collect()
    }

    fn find(&self, word: &str) -> Option<NodeId> {
        if word.is_empty() {
            return None;
        }

        word.chars()
            .flat_map(char::to_lowercase)
            .try_fold(Self::ROOT, |node, ch| self.nodes[node.index()].child(ch))
    }

    fn add_child(&mut self, parent: NodeId, ch: char) -> NodeId {
        let id = NodeId(
            self.nodes
                .len()
                .try_into()
                .expect("trie node count exceeds u32"),
        );
        self.nodes.push(TrieNode::new(Some(ch), Some(parent)));
        self.nodes[parent.index()].children.push((ch, id));
        id
    }
}
