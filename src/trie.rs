//! A prefix tree for longest-match lookup of zone identifiers and names.

/// How characters are compared when matching against a `PrefixTree`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Characters must be equal.
    #[default]
    Exact,
    /// Characters are compared without regard to case.
    CaseInsensitive,
    /// Characters are compared without regard to case, and the separators
    /// space, underscore and slash are skipped on insertion and lookup.
    Lenient,
}

impl MatchPolicy {
    /// Returns the policy for a case sensitivity flag.
    pub const fn of(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Exact
        } else {
            Self::CaseInsensitive
        }
    }

    #[inline]
    fn fold(self, ch: char) -> char {
        match self {
            Self::Exact => ch,
            Self::CaseInsensitive | Self::Lenient => ch.to_lowercase().next().unwrap_or(ch),
        }
    }

    #[inline]
    fn skips(self, ch: char) -> bool {
        self == Self::Lenient && matches!(ch, ' ' | '_' | '/')
    }
}

#[derive(Debug, Clone)]
struct Node<V> {
    value: Option<V>,
    children: Vec<(char, usize)>,
}

impl<V> Node<V> {
    const fn empty() -> Self {
        Self {
            value: None,
            children: Vec::new(),
        }
    }

    fn child(&self, ch: char) -> Option<usize> {
        self.children
            .iter()
            .find_map(|(key, index)| (*key == ch).then_some(*index))
    }
}

/// A trie over candidate strings.
///
/// Matching descends as far as the input allows and returns the value of
/// the deepest node on the matched path which carries a value.
#[derive(Debug, Clone)]
pub struct PrefixTree<V> {
    policy: MatchPolicy,
    nodes: Vec<Node<V>>,
    len: usize,
}

impl<V> PrefixTree<V> {
    /// Creates an empty tree.
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            nodes: vec![Node::empty()],
            len: 0,
        }
    }

    /// The match policy of this tree.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The number of keys held by this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a key, replacing the value of an equal key.
    ///
    /// Returns false when the key is empty under the tree's policy.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        let policy = self.policy;
        let mut node = 0;
        let mut any = false;
        for ch in key.chars().filter(|ch| !policy.skips(*ch)) {
            let ch = policy.fold(ch);
            any = true;
            node = match self.nodes[node].child(ch) {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::empty());
                    self.nodes[node].children.push((ch, child));
                    child
                }
            };
        }
        if !any {
            return false;
        }
        if self.nodes[node].value.replace(value).is_none() {
            self.len += 1;
        }
        true
    }

    /// Finds the longest key matching `text` at `position`.
    ///
    /// Returns the value and the position after the matched characters.
    pub fn longest_match(&self, text: &[char], position: usize) -> Option<(&V, usize)> {
        let mut node = 0;
        let mut pos = position;
        let mut best = None;
        loop {
            if let Some(value) = &self.nodes[node].value {
                best = Some((value, pos));
            }
            let mut next = pos;
            while text.get(next).is_some_and(|ch| self.policy.skips(*ch)) {
                next += 1;
            }
            let Some(ch) = text.get(next) else {
                break;
            };
            match self.nodes[node].child(self.policy.fold(*ch)) {
                Some(child) => {
                    node = child;
                    pos = next + 1;
                }
                None => break,
            }
        }
        best
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for PrefixTree<V> {
    fn from_iter<T: IntoIterator<Item = (&'a str, V)>>(iter: T) -> Self {
        let mut tree = Self::new(MatchPolicy::Exact);
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchPolicy, PrefixTree};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn longest_match_wins() {
        let tree: PrefixTree<&str> = [
            ("EST", "EST"),
            ("EST5EDT", "EST5EDT"),
            ("America/New_York", "America/New_York"),
            ("Europe/Paris", "Europe/Paris"),
        ]
        .into_iter()
        .collect();

        let text = chars("EST5EDT");
        assert_eq!(tree.longest_match(&text, 0), Some((&"EST5EDT", 7)));

        // The deepest value bearing node along the path wins.
        let text = chars("EST5X");
        assert_eq!(tree.longest_match(&text, 0), Some((&"EST", 3)));

        let text = chars("xAmerica/New_York]");
        assert_eq!(
            tree.longest_match(&text, 1),
            Some((&"America/New_York", 17))
        );

        let text = chars("Europe/Pa");
        assert_eq!(tree.longest_match(&text, 0), None);
    }

    #[test]
    fn case_policies() {
        let mut exact = PrefixTree::new(MatchPolicy::Exact);
        exact.insert("Europe/Paris", 1);
        assert!(exact.longest_match(&chars("europe/paris"), 0).is_none());

        let mut insensitive = PrefixTree::new(MatchPolicy::CaseInsensitive);
        insensitive.insert("Europe/Paris", 1);
        assert_eq!(
            insensitive.longest_match(&chars("EUROPE/PARIS"), 0),
            Some((&1, 12))
        );

        let mut lenient = PrefixTree::new(MatchPolicy::Lenient);
        lenient.insert("America/New_York", 2);
        assert_eq!(
            lenient.longest_match(&chars("america new york"), 0),
            Some((&2, 16))
        );
        assert_eq!(
            lenient.longest_match(&chars("AmericaNewYork "), 0),
            Some((&2, 14))
        );
    }

    #[test]
    fn insert_replaces() {
        let mut tree = PrefixTree::new(MatchPolicy::Lenient);
        assert!(tree.insert("Central European Time", "Europe/Berlin"));
        assert!(tree.insert("Central European Time", "Europe/Paris"));
        assert!(!tree.insert(" _/", "nothing"));
        assert_eq!(tree.len(), 1);
        let text = chars("Central European Time");
        assert_eq!(tree.longest_match(&text, 0), Some((&"Europe/Paris", 21)));
    }
}
