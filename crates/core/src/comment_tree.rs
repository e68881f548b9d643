//! Reconstruction of a reply hierarchy from flat comment records.
//!
//! Building happens in two steps. First an index-based adjacency list is
//! computed from the records (identity lookup, then one pass in input
//! order). Then the owned [`Comment`] tree is materialized bottom-up, so no
//! node is ever shared between two parents.
//!
//! Records whose parent is missing, unknown or themselves become roots.
//! Records caught in a parent cycle are unreachable from any root; the cycle
//! member that comes first in input order is promoted to a root, so nothing
//! is lost and replies hanging off the cycle keep their parents.

use crate::config::DuplicatePolicy;
use crate::model::Comment;
use crate::{ForumCtxError, Result};
use std::collections::{HashMap, HashSet};

/// Index form of the forest: root indices and per-record child indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Links {
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

/// Fail on the first identity that appears twice.
pub fn ensure_unique_ids(records: &[Comment]) -> Result<()> {
    let mut seen = HashSet::new();
    match records.iter().find(|r| !seen.insert(r.id.as_str())) {
        Some(duplicate) => Err(ForumCtxError::DuplicateId(duplicate.id.clone())),
        None => Ok(()),
    }
}

fn link(records: &[Comment]) -> Links {
    let n = records.len();

    // Pass 1: identity lookup. A later duplicate replaces an earlier one.
    let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(n);
    for (i, record) in records.iter().enumerate() {
        if let Some(previous) = lookup.insert(record.id.as_str(), i) {
            tracing::warn!(id = %record.id, dropped = previous, kept = i, "duplicate comment identity, keeping the last");
        }
    }

    // Pass 2: attach each surviving record to its parent, in input order.
    let mut roots = Vec::new();
    let mut children = vec![Vec::new(); n];
    let mut parent_of = vec![None; n];
    let mut survivors = Vec::with_capacity(lookup.len());

    for (i, record) in records.iter().enumerate() {
        if lookup.get(record.id.as_str()) != Some(&i) {
            continue;
        }
        survivors.push(i);

        match record.parent_id.as_deref().and_then(|p| lookup.get(p).copied()) {
            Some(parent) if parent != i => {
                children[parent].push(i);
                parent_of[i] = Some(parent);
            }
            _ => {
                if let Some(parent) = &record.parent_id {
                    tracing::debug!(id = %record.id, parent = %parent, "unresolved parent, treating comment as root");
                }
                roots.push(i);
            }
        }
    }

    let mut reached = vec![false; n];
    mark_reached(&roots, &children, &mut reached);

    let mut promoted = false;
    for &i in &survivors {
        if reached[i] {
            continue;
        }
        let entry = cycle_entry(i, &parent_of);
        if let Some(parent) = parent_of[entry].take() {
            children[parent].retain(|&c| c != entry);
        }
        tracing::debug!(id = %records[entry].id, "comment parent chain is cyclic, promoting to root");
        roots.push(entry);
        promoted = true;
        mark_reached(&[entry], &children, &mut reached);
    }

    if promoted {
        roots.sort_unstable();
    }

    Links { roots, children }
}

/// Follow parents from an unreached record until the chain repeats, and
/// return the earliest record (by input index) on the repeating part.
fn cycle_entry(start: usize, parent_of: &[Option<usize>]) -> usize {
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut path = Vec::new();
    let mut current = start;
    loop {
        if let Some(&at) = position.get(&current) {
            return path[at..].iter().copied().min().unwrap_or(current);
        }
        position.insert(current, path.len());
        path.push(current);
        match parent_of[current] {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

fn mark_reached(from: &[usize], children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack: Vec<usize> = from.to_vec();
    while let Some(i) = stack.pop() {
        if !reached[i] {
            reached[i] = true;
            stack.extend(children[i].iter().copied());
        }
    }
}

/// Turn the index forest into owned comments, children before parents.
fn materialize(records: Vec<Comment>, links: Links) -> Vec<Comment> {
    let Links { roots, mut children } = links;

    let mut preorder = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        preorder.push(i);
        stack.extend(children[i].iter().rev().copied());
    }

    let mut slots: Vec<Option<Comment>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<Comment>> = vec![None; slots.len()];

    for &i in preorder.iter().rev() {
        let Some(mut comment) = slots[i].take() else { continue };
        comment.children = std::mem::take(&mut children[i])
            .into_iter()
            .filter_map(|child| built[child].take())
            .collect();
        built[i] = Some(comment);
    }

    roots.into_iter().filter_map(|i| built[i].take()).collect()
}

/// Build the reply forest from flat records.
///
/// Any `children` already present on the input records are discarded. When
/// two records share an identity the last one wins.
pub fn build_comment_tree(records: Vec<Comment>) -> Vec<Comment> {
    let links = link(&records);
    materialize(records, links)
}

/// Build the reply forest with an explicit duplicate identity policy.
pub fn build_comment_tree_with(records: Vec<Comment>, policy: DuplicatePolicy) -> Result<Vec<Comment>> {
    if policy == DuplicatePolicy::Reject {
        ensure_unique_ids(&records)?;
    }
    Ok(build_comment_tree(records))
}
