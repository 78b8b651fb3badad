//! Circular doubly linked list of polygon vertices.
//!
//! Nodes live in a single arena and link to each other by index, so removing a vertex is O(1) and never moves the
//! others. Node `i` stands for the `i`-th vertex of whatever slice the ring was built for.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Node {
  prev: usize,
  next: usize,
  linked: bool,
}

/// A ring over the indices `0..len`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VertexRing {
  nodes: Vec<Node>,
  first: Option<usize>,
  len: usize,
}

impl VertexRing {
  /// Link indices `0..len` in order, the last one linking back to the first one.
  pub fn new(len: usize) -> Self {
    let nodes = (0..len)
      .map(|i| Node {
        prev: (i + len - 1) % len,
        next: (i + 1) % len,
        linked: true,
      })
      .collect();
    let first = if len == 0 { None } else { Some(0) };

    VertexRing { nodes, first, len }
  }

  /// Build a ring over an arbitrary subset of indices, linked in the order given.
  ///
  /// # Panics
  ///
  /// In debug builds, panics if an index appears more than once.
  pub fn from_indices(indices: &[usize]) -> Self {
    let size = indices.iter().max().map_or(0, |&max| max + 1);
    let mut nodes = vec![
      Node {
        prev: 0,
        next: 0,
        linked: false,
      };
      size
    ];

    let n = indices.len();
    for (k, &i) in indices.iter().enumerate() {
      debug_assert!(!nodes[i].linked, "index {} appears twice in the ring", i);

      nodes[i] = Node {
        prev: indices[(k + n - 1) % n],
        next: indices[(k + 1) % n],
        linked: true,
      };
    }

    VertexRing {
      nodes,
      first: indices.first().copied(),
      len: n,
    }
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Entry point of the ring, if not empty.
  pub fn first(&self) -> Option<usize> {
    self.first
  }

  pub fn contains(&self, i: usize) -> bool {
    self.nodes.get(i).map_or(false, |node| node.linked)
  }

  /// Predecessor of `i`.
  ///
  /// # Panics
  ///
  /// Panics if `i` is out of the ring’s bounds.
  pub fn prev(&self, i: usize) -> usize {
    self.nodes[i].prev
  }

  /// Successor of `i`.
  ///
  /// # Panics
  ///
  /// Panics if `i` is out of the ring’s bounds.
  pub fn next(&self, i: usize) -> usize {
    self.nodes[i].next
  }

  /// Unlink `i`, joining its neighbors. Returns `false` if `i` was not linked.
  pub fn remove(&mut self, i: usize) -> bool {
    if !self.contains(i) {
      return false;
    }

    let Node { prev, next, .. } = self.nodes[i];
    self.nodes[prev].next = next;
    self.nodes[next].prev = prev;
    self.nodes[i].linked = false;
    self.len -= 1;

    if self.len == 0 {
      self.first = None;
    } else if self.first == Some(i) {
      self.first = Some(next);
    }

    true
  }

  /// Walk the ring once, starting at [`VertexRing::first`].
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      ring: self,
      cursor: self.first,
      remaining: self.len,
    }
  }
}

/// Iterator over the linked indices of a [`VertexRing`].
#[derive(Debug)]
pub struct Iter<'a> {
  ring: &'a VertexRing,
  cursor: Option<usize>,
  remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
  type Item = usize;

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }

    let current = self.cursor?;
    self.cursor = Some(self.ring.next(current));
    self.remaining -= 1;

    Some(current)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn links_wrap_around() {
    let ring = VertexRing::new(4);

    assert_eq!(ring.len(), 4);
    assert_eq!(ring.first(), Some(0));
    assert_eq!(ring.next(3), 0);
    assert_eq!(ring.prev(0), 3);
    assert_eq!(ring.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
  }

  #[test]
  fn empty_ring() {
    let ring = VertexRing::new(0);

    assert!(ring.is_empty());
    assert_eq!(ring.first(), None);
    assert_eq!(ring.iter().next(), None);
  }

  #[test]
  fn single_node_links_to_itself() {
    let ring = VertexRing::new(1);

    assert_eq!(ring.next(0), 0);
    assert_eq!(ring.prev(0), 0);
  }

  #[test]
  fn remove_joins_neighbors() {
    let mut ring = VertexRing::new(5);

    assert!(ring.remove(2));
    assert!(!ring.contains(2));
    assert_eq!(ring.next(1), 3);
    assert_eq!(ring.prev(3), 1);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);

    // removing twice is a no-op
    assert!(!ring.remove(2));
    assert_eq!(ring.len(), 4);
  }

  #[test]
  fn removing_first_moves_entry_point() {
    let mut ring = VertexRing::new(3);

    ring.remove(0);
    assert_eq!(ring.first(), Some(1));
    assert_eq!(ring.iter().collect::<Vec<_>>(), vec![1, 2]);

    ring.remove(1);
    ring.remove(2);
    assert!(ring.is_empty());
    assert_eq!(ring.first(), None);
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "appears twice")]
  fn from_indices_rejects_duplicates() {
    VertexRing::from_indices(&[0, 2, 0]);
  }

  #[test]
  fn from_indices_skips_missing_ones() {
    let ring = VertexRing::from_indices(&[0, 2, 5]);

    assert_eq!(ring.len(), 3);
    assert!(!ring.contains(1));
    assert!(!ring.contains(42));
    assert_eq!(ring.next(5), 0);
    assert_eq!(ring.prev(2), 0);
    assert_eq!(ring.iter().collect::<Vec<_>>(), vec![0, 2, 5]);
  }
}
