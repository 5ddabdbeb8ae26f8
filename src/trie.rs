//! Trie data structure for longest-match lookups.
//!
//! The same structure backs two tables: the lexicon, keyed by sequences of
//! case-folded words, and the romanization rules, keyed by sequences of
//! Latin characters.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A node in the Trie
#[derive(Debug, Clone)]
pub struct TrieNode<K, V> {
    /// Children nodes, keyed by the next path element
    pub children: HashMap<K, TrieNode<K, V>>,
    /// Whether this node marks the end of a valid entry
    pub is_leaf: bool,
    /// Data associated with this entry (if is_leaf is true)
    pub data: Option<V>,
}

impl<K, V> Default for TrieNode<K, V> {
    fn default() -> Self {
        TrieNode {
            children: HashMap::new(),
            is_leaf: false,
            data: None,
        }
    }
}

impl<K, V> TrieNode<K, V> {
    /// Create a new empty node
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Check if this node has any children
    pub fn can_walk(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a valid entry ending
    pub fn is_match(&self) -> bool {
        self.is_leaf
    }
}

/// A Trie mapping key sequences to values
#[derive(Debug, Clone)]
pub struct Trie<K, V> {
    /// The root node
    root: TrieNode<K, V>,
    /// Number of entries in the trie
    word_count: usize,
}

impl<K, V> Default for Trie<K, V> {
    fn default() -> Self {
        Trie {
            root: TrieNode::new(),
            word_count: 0,
        }
    }
}

impl<K: Eq + Hash, V> Trie<K, V> {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie::default()
    }

    /// Get the number of entries in the trie
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Add an entry. Data replaces whatever an existing entry carried.
    pub fn add<I>(&mut self, path: I, data: Option<V>)
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = &mut self.root;

        for key in path {
            current = current.children.entry(key).or_default();
        }

        if !current.is_leaf {
            self.word_count += 1;
        }
        current.is_leaf = true;

        if let Some(d) = data {
            current.data = Some(d);
        }
    }

    /// Walk the trie by one element, returning the next node if it exists
    pub fn walk<'a, Q>(
        &'a self,
        key: &Q,
        current: Option<&'a TrieNode<K, V>>,
    ) -> Option<&'a TrieNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = current.unwrap_or(&self.root);
        node.children.get(key)
    }

    fn find_node<'q, Q, I>(&self, path: I) -> Option<&TrieNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut current = &self.root;
        for key in path {
            current = current.children.get(key)?;
        }
        Some(current)
    }

    /// Check if an entry exists in the trie
    pub fn has_word<'q, Q, I>(&self, path: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        self.find_node(path).map_or(false, |node| node.is_leaf)
    }

    /// Get the data for an entry if it exists
    pub fn get<'q, Q, I>(&self, path: I) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let node = self.find_node(path)?;
        if node.is_leaf {
            node.data.as_ref()
        } else {
            None
        }
    }

    /// Find the longest entry that is a prefix of `path`.
    ///
    /// Returns the number of path elements consumed and the entry's data.
    pub fn longest_prefix<'q, Q, I>(&self, path: I) -> Option<(usize, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut current = &self.root;
        let mut best = None;

        for (depth, key) in path.into_iter().enumerate() {
            match current.children.get(key) {
                Some(node) => current = node,
                None => break,
            }
            if current.is_leaf {
                if let Some(ref data) = current.data {
                    best = Some((depth + 1, data));
                }
            }
            if !current.can_walk() {
                break;
            }
        }

        best
    }

    /// Deactivate an entry (make it not findable)
    pub fn deactivate<'q, Q, I>(&mut self, path: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        let mut current = &mut self.root;

        for key in path {
            match current.children.get_mut(key) {
                Some(node) => current = node,
                None => return false,
            }
        }

        if current.is_leaf {
            current.is_leaf = false;
            current.data = None;
            self.word_count -= 1;
            true
        } else {
            false
        }
    }

    /// Get a reference to the root node (for external traversal)
    pub fn root(&self) -> &TrieNode<K, V> {
        &self.root
    }
}
