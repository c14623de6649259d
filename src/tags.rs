//! Tag hierarchy helpers.
//!
//! Tags form a forest: each tag optionally points at a parent. These
//! helpers answer the structural questions the library layer needs
//! without ever materializing a tree type.

use crate::types::Tag;
use std::collections::HashMap;

/// Parent id -> children, each child list sorted by name. Roots live
/// under the `None` key.
pub fn children_map(tags: &[Tag]) -> HashMap<Option<String>, Vec<&Tag>> {
    let mut map: HashMap<Option<String>, Vec<&Tag>> = HashMap::new();
    for tag in tags {
        map.entry(tag.parent_id.clone()).or_default().push(tag);
    }
    for children in map.values_mut() {
        children.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }
    map
}

/// The tag and every tag below it, in no particular order.
pub fn descendant_ids(tags: &[Tag], root_id: &str) -> Vec<String> {
    let children = children_map(tags);
    let mut out = vec![root_id.to_string()];
    let mut stack = vec![root_id.to_string()];
    while let Some(id) = stack.pop() {
        if let Some(kids) = children.get(&Some(id)) {
            for kid in kids {
                out.push(kid.id.clone());
                stack.push(kid.id.clone());
            }
        }
    }
    out
}

/// Would reparenting `tag_id` under `new_parent_id` close a loop?
/// Walks the parent chain upward from the proposed parent.
pub fn would_create_cycle(tags: &[Tag], tag_id: &str, new_parent_id: &str) -> bool {
    if tag_id == new_parent_id {
        return true;
    }
    let by_id: HashMap<&str, &Tag> = tags.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut cursor = Some(new_parent_id.to_string());
    // Bounded by the tag count; a corrupt store with a pre-existing loop
    // must not hang us.
    for _ in 0..=tags.len() {
        match cursor {
            Some(id) if id == tag_id => return true,
            Some(id) => cursor = by_id.get(id.as_str()).and_then(|t| t.parent_id.clone()),
            None => return false,
        }
    }
    true
}

/// Depth-first flattening for list rendering: every tag paired with its
/// depth, siblings alphabetical at each level.
pub fn flatten_tree(tags: &[Tag]) -> Vec<(Tag, usize)> {
    let children = children_map(tags);
    let mut out = Vec::with_capacity(tags.len());
    fn walk(
        parent: Option<String>,
        depth: usize,
        children: &HashMap<Option<String>, Vec<&Tag>>,
        out: &mut Vec<(Tag, usize)>,
    ) {
        if let Some(kids) = children.get(&parent) {
            for kid in kids {
                out.push(((*kid).clone(), depth));
                walk(Some(kid.id.clone()), depth + 1, children, out);
            }
        }
    }
    walk(None, 0, &children, &mut out);
    out
}

pub fn has_children(tags: &[Tag], tag_id: &str) -> bool {
    tags.iter().any(|t| t.parent_id.as_deref() == Some(tag_id))
}
