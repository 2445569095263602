//! Parent graph over derived fields.
//!
//! Edges point from a derived field to each of its parents. Stale parent ids (pointing at
//! deleted fields) are kept as leaf nodes.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;

use formbuilder_model::{Field, FieldId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Closed walk along parent edges; the first and last entries are the same field.
    pub path: Vec<FieldId>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circular reference: ")?;
        for (idx, id) in self.path.iter().enumerate() {
            if idx > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CycleError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentGraph {
    parents: BTreeMap<FieldId, Vec<FieldId>>,
}

impl ParentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
        let mut graph = Self::new();
        for field in fields {
            if let Some(derived) = &field.derived {
                graph.set_parents(field.id.clone(), derived.parents.clone());
            }
        }
        graph
    }

    /// Replace a field's parent edges. An empty list removes the field from the graph.
    pub fn set_parents(&mut self, field: FieldId, parents: Vec<FieldId>) {
        if parents.is_empty() {
            self.parents.remove(&field);
        } else {
            self.parents.insert(field, parents);
        }
    }

    pub fn parents_of(&self, field: &FieldId) -> &[FieldId] {
        self.parents.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Derived fields that list `field` as a direct parent, sorted by id.
    pub fn dependents_of(&self, field: &FieldId) -> Vec<FieldId> {
        self.parents
            .iter()
            .filter(|(_, parents)| parents.contains(field))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Shortest walk along parent edges from `from` to `to`, both included.
    pub fn parent_path(&self, from: &FieldId, to: &FieldId) -> Option<Vec<FieldId>> {
        let mut came_from: HashMap<&FieldId, &FieldId> = HashMap::new();
        let mut seen: HashSet<&FieldId> = HashSet::from([from]);
        let mut queue: VecDeque<&FieldId> = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![node.clone()];
                let mut cur = node;
                while let Some(prev) = came_from.get(cur) {
                    path.push((*prev).clone());
                    cur = *prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.parents_of(node) {
                if seen.insert(next) {
                    came_from.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Cycle that would be closed if `field` took `parents` as its parent list.
    pub fn cycle_with(&self, field: &FieldId, parents: &[FieldId]) -> Option<CycleError> {
        parents.iter().find_map(|parent| {
            let back = self.parent_path(parent, field)?;
            let mut path = Vec::with_capacity(back.len() + 1);
            path.push(field.clone());
            path.extend(back);
            Some(CycleError { path })
        })
    }

    /// Find any cycle in the graph, visiting fields in id order.
    pub fn find_cycle(&self) -> Option<CycleError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        struct Frame<'a> {
            node: &'a FieldId,
            neighbors: &'a [FieldId],
            idx: usize,
        }

        let mut color: HashMap<&FieldId, Color> =
            self.parents.keys().map(|id| (id, Color::White)).collect();
        let mut stack: Vec<&FieldId> = Vec::new();

        for start in self.parents.keys() {
            if color.get(start) != Some(&Color::White) {
                continue;
            }

            let mut frames = vec![Frame {
                node: start,
                neighbors: self.parents_of(start),
                idx: 0,
            }];
            stack.push(start);
            color.insert(start, Color::Gray);

            while let Some(frame) = frames.last_mut() {
                if frame.idx >= frame.neighbors.len() {
                    color.insert(frame.node, Color::Black);
                    stack.pop();
                    frames.pop();
                    continue;
                }

                let neighbors = frame.neighbors;
                let next = &neighbors[frame.idx];
                frame.idx += 1;

                // Ids missing from the map are plain (non-derived) fields: leaves.
                match color.get(next).copied().unwrap_or(Color::Black) {
                    Color::White => {
                        color.insert(next, Color::Gray);
                        stack.push(next);
                        frames.push(Frame {
                            node: next,
                            neighbors: self.parents_of(next),
                            idx: 0,
                        });
                    }
                    Color::Gray => {
                        let start_idx = stack.iter().position(|id| *id == next).unwrap_or(0);
                        let mut path: Vec<FieldId> =
                            stack[start_idx..].iter().map(|id| (*id).clone()).collect();
                        path.push(next.clone());
                        return Some(CycleError { path });
                    }
                    Color::Black => {}
                }
            }
        }

        None
    }
}
