//! Circular references in the ancestry graph.
//!
//! Depth-first search over child -> parent edges, driven by an explicit stack
//! so deep pedigrees cannot overflow the call stack.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::domain::{AncestryIndex, Identifier};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("cycle detection cancelled after {visited} of {total} individuals")]
    Cancelled { visited: usize, total: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CyclesResult {
    /// Each cycle repeats its first identifier at the end, e.g. `[A, B, A]`.
    pub cycles: Vec<Vec<Identifier>>,
}

impl CyclesResult {
    pub fn count(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    /// Next parent slot to examine.
    cursor: usize,
}

/// Find cycles, running to completion.
pub fn find_cycles(index: &AncestryIndex) -> CyclesResult {
    let never = AtomicBool::new(false);
    find_cycles_cancellable(index, &never).unwrap_or_default()
}

/// Find cycles, checking `cancel` before each new traversal root.
///
/// Roots are taken in index order. A traversal stops at the first cycle it
/// meets; nodes it had already reached stay visited.
pub fn find_cycles_cancellable(
    index: &AncestryIndex,
    cancel: &AtomicBool,
) -> Result<CyclesResult, CycleError> {
    let total = index.len();
    let mut visited = vec![false; total];
    let mut on_stack = vec![false; total];
    let mut frames: Vec<Frame> = Vec::new();
    let mut cycles = Vec::new();

    for root in 0..total {
        if cancel.load(Ordering::Relaxed) {
            return Err(CycleError::Cancelled {
                visited: visited.iter().filter(|v| **v).count(),
                total,
            });
        }
        if visited[root] {
            continue;
        }

        visited[root] = true;
        on_stack[root] = true;
        frames.push(Frame {
            node: root,
            cursor: 0,
        });

        while let Some(&Frame { node, cursor }) = frames.last() {
            let Some(&parent) = index.parent_indices(node).get(cursor) else {
                on_stack[node] = false;
                frames.pop();
                continue;
            };
            if let Some(top) = frames.last_mut() {
                top.cursor += 1;
            }

            if !visited[parent] {
                visited[parent] = true;
                on_stack[parent] = true;
                frames.push(Frame {
                    node: parent,
                    cursor: 0,
                });
            } else if on_stack[parent] {
                let start = frames
                    .iter()
                    .position(|frame| frame.node == parent)
                    .unwrap_or(0);
                let mut cycle: Vec<Identifier> = frames[start..]
                    .iter()
                    .map(|frame| index.node(frame.node).clone())
                    .collect();
                cycle.push(index.node(parent).clone());
                tracing::debug!(cycle = ?cycle, "circular reference");
                cycles.push(cycle);

                for frame in frames.drain(..) {
                    on_stack[frame.node] = false;
                }
            }
        }
    }

    Ok(CyclesResult { cycles })
}
