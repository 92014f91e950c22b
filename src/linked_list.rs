// Doubly linked list of route records, used as the neighbor list of every vertex.
// Nodes live in an arena (`Vec<Option<Node>>`) and link to each other by slot index,
// so there is no unsafe pointer juggling and freed slots get recycled.

use std::fmt;

// Edge weight (route distance in km). Unweighted edges carry 0.
pub type Weight = u32;

// One adjacency record: the target vertex index and the weight of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: usize,
    pub weight: Weight,
}

impl Edge {
    pub fn new(target: usize, weight: Weight) -> Self {
        Self { target, weight }
    }
}

#[derive(Debug, Clone)]
struct Node {
    edge: Edge,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct LinkedList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    first: Option<usize>,
    last: Option<usize>,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<Node> {
        let node = self.nodes.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node)
    }

    fn node(&self, slot: usize) -> Option<&Node> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.nodes.get_mut(slot).and_then(Option::as_mut)
    }

    /// Appends a record at the tail. Duplicates are not filtered here,
    /// the graph checks for an existing target before calling this.
    pub fn push_back(&mut self, target: usize, weight: Weight) {
        let slot = self.alloc(Node {
            edge: Edge::new(target, weight),
            prev: self.last,
            next: None,
        });

        match self.last.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(slot),
            None => self.first = Some(slot),
        }
        self.last = Some(slot);
        self.len += 1;
    }

    pub fn push_front(&mut self, target: usize, weight: Weight) {
        let slot = self.alloc(Node {
            edge: Edge::new(target, weight),
            prev: None,
            next: self.first,
        });

        match self.first.and_then(|head| self.node_mut(head)) {
            Some(head) => head.prev = Some(slot),
            None => self.last = Some(slot),
        }
        self.first = Some(slot);
        self.len += 1;
    }

    /// Removes the tail record. Returns `None` on an empty list.
    pub fn pop_back(&mut self) -> Option<Edge> {
        let tail = self.last?;
        let node = self.release(tail)?;

        self.last = node.prev;
        match node.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = None,
            None => self.first = None,
        }

        Some(node.edge)
    }

    /// Removes the head record. Returns `None` on an empty list.
    pub fn pop_front(&mut self) -> Option<Edge> {
        let head = self.first?;
        let node = self.release(head)?;

        self.first = node.next;
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = None,
            None => self.last = None,
        }

        Some(node.edge)
    }

    /// Linear scan from the front for the first record whose target is `key`.
    ///
    /// The returned cursor sits on the match, or past the end (`is_end()`
    /// is true) when the whole list was scanned without one.
    pub fn find(&self, key: usize) -> Cursor<'_> {
        let mut cursor = self.cursor_front();
        while let Some(edge) = cursor.current() {
            if edge.target == key {
                break;
            }
            cursor.move_next();
        }
        cursor
    }

    pub fn contains(&self, key: usize) -> bool {
        !self.find(key).is_end()
    }

    pub fn front(&self) -> Option<&Edge> {
        self.first.and_then(|slot| self.node(slot)).map(|n| &n.edge)
    }

    pub fn back(&self) -> Option<&Edge> {
        self.last.and_then(|slot| self.node(slot)).map(|n| &n.edge)
    }

    pub fn cursor_front(&self) -> Cursor<'_> {
        Cursor {
            list: self,
            current: self.first,
        }
    }

    pub fn cursor_back(&self) -> Cursor<'_> {
        Cursor {
            list: self,
            current: self.last,
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            head: self.first,
            tail: self.last,
            remaining: self.len,
        }
    }

    // Visits every (target, weight) pair front to back.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(usize, Weight),
    {
        for edge in self.iter() {
            visit(edge.target, edge.weight);
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.first = None;
        self.last = None;
        self.len = 0;
    }
}

impl fmt::Display for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.iter() {
            write!(f, "{}({})->", edge.target, edge.weight)?;
        }
        write!(f, "Nil")
    }
}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = &'a Edge;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Edge> for LinkedList {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        for edge in iter {
            list.push_back(edge.target, edge.weight);
        }
        list
    }
}

/// A read-only position inside a [`LinkedList`].
///
/// Each cursor is owned by the caller, so any number of traversals of the
/// same list can be in flight at once. `None` from [`Cursor::current`] means
/// the cursor ran past either end.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    list: &'a LinkedList,
    current: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub fn reset_front(&mut self) {
        self.current = self.list.first;
    }

    pub fn reset_back(&mut self) {
        self.current = self.list.last;
    }

    // Returns false once the cursor has stepped off the tail.
    pub fn move_next(&mut self) -> bool {
        self.current = self
            .current
            .and_then(|slot| self.list.node(slot))
            .and_then(|node| node.next);
        self.current.is_some()
    }

    pub fn move_prev(&mut self) -> bool {
        self.current = self
            .current
            .and_then(|slot| self.list.node(slot))
            .and_then(|node| node.prev);
        self.current.is_some()
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&'a Edge> {
        self.current
            .and_then(|slot| self.list.node(slot))
            .map(|node| &node.edge)
    }
}

pub struct Iter<'a> {
    list: &'a LinkedList,
    head: Option<usize>,
    tail: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.head?)?;
        self.head = node.next;
        self.remaining -= 1;
        Some(&node.edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.tail?)?;
        self.tail = node.prev;
        self.remaining -= 1;
        Some(&node.edge)
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
