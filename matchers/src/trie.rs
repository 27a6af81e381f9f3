use std::collections::{HashMap, VecDeque};

pub(crate) const ROOT: usize = 0;

/// One prefix position in the trie. Nodes live in the arena owned by [`Trie`]
/// and refer to each other by index; `parent` is navigational only.
#[derive(Debug)]
pub struct TrieNode {
    character: Option<char>,
    parent: Option<usize>,
    children: HashMap<char, usize>,
    depth: usize,
    word: Option<String>,
}

impl TrieNode {
    pub fn is_root(&self) -> bool {
        self.character.is_none()
    }

    pub fn is_word(&self) -> bool {
        self.word.is_some()
    }

    pub fn character(&self) -> Option<char> {
        self.character
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub(crate) fn word(&self) -> Option<&String> {
        self.word.as_ref()
    }
}

/// Character trie over an index-addressed node arena. The root sits at index
/// 0; ownership runs root -> children only.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    pattern_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        let root = TrieNode {
            character: None,
            parent: None,
            children: HashMap::new(),
            depth: 0,
            word: None,
        };
        Trie {
            nodes: vec![root],
            pattern_count: 0,
        }
    }

    /// Insert `word`, creating missing nodes along its path. Re-inserting an
    /// existing word is a no-op.
    pub fn insert(&mut self, word: &str) {
        let path: Vec<char> = word.chars().collect();
        self.insert_path(&path, word);
    }

    /// Insert a node path spelled by `path` and mark its final node terminal
    /// with `word`. Commentz-Walter feeds a reversed path here while keeping
    /// the forward pattern as the stored word.
    pub(crate) fn insert_path(&mut self, path: &[char], word: &str) -> usize {
        let mut current = ROOT;
        for &ch in path {
            current = match self.nodes[current].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let id = self.nodes.len();
                    let depth = self.nodes[current].depth + 1;
                    self.nodes.push(TrieNode {
                        character: Some(ch),
                        parent: Some(current),
                        children: HashMap::new(),
                        depth,
                        word: None,
                    });
                    self.nodes[current].children.insert(ch, id);
                    id
                }
            };
        }
        if self.nodes[current].word.is_none() {
            self.nodes[current].word = Some(word.to_string());
            self.pattern_count += 1;
        }
        current
    }

    /// Whether every character of `word` has a corresponding edge from the
    /// root. This is prefix existence, not exact-pattern membership.
    pub fn contains_prefix_path(&self, word: &str) -> bool {
        let mut current = ROOT;
        for ch in word.chars() {
            match self.nodes[current].children.get(&ch) {
                Some(&child) => current = child,
                None => return false,
            }
        }
        true
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub(crate) fn node(&self, id: usize) -> &TrieNode {
        &self.nodes[id]
    }

    pub(crate) fn child(&self, id: usize, ch: char) -> Option<usize> {
        self.nodes[id].children.get(&ch).copied()
    }

    pub(crate) fn children_of(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[id].children.values().copied()
    }
}

/// Failure and dictionary links over a finished trie, plus the BFS order the
/// links were assigned in (depth >= 2 nodes only; root children are fixed to
/// the root before the queue starts).
pub(crate) struct LinkSet {
    pub failure: Vec<usize>,
    pub dictionary: Vec<Option<usize>>,
    pub order: Vec<usize>,
}

/// Single finalize pass shared by the Aho-Corasick and Commentz-Walter
/// builders. BFS guarantees every node's failure link is assigned only after
/// its parent's is known.
pub(crate) fn propagate_links(trie: &Trie) -> LinkSet {
    let mut failure = vec![ROOT; trie.len()];
    let mut dictionary: Vec<Option<usize>> = vec![None; trie.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    for child in trie.children_of(ROOT) {
        failure[child] = ROOT;
        for grandchild in trie.children_of(child) {
            queue.push_back(grandchild);
        }
    }

    while let Some(current) = queue.pop_front() {
        for child in trie.children_of(current) {
            queue.push_back(child);
        }

        let node = trie.node(current);
        let (Some(ch), Some(parent)) = (node.character(), node.parent()) else {
            continue;
        };

        // Longest proper suffix that is also a trie path: walk the parent's
        // failure chain until a node with an edge for `ch` turns up.
        let mut probe = failure[parent];
        loop {
            if let Some(target) = trie.child(probe, ch) {
                failure[current] = target;
                break;
            }
            if probe == ROOT {
                failure[current] = ROOT;
                break;
            }
            probe = failure[probe];
        }

        dictionary[current] = if trie.node(failure[current]).is_word() {
            Some(failure[current])
        } else {
            dictionary[failure[current]]
        };

        order.push(current);
    }

    log::debug!(
        "propagated links over {} nodes ({} below depth 1)",
        trie.len(),
        order.len()
    );

    LinkSet {
        failure,
        dictionary,
        order,
    }
}
