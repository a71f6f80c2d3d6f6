//! Folder tree building, descendant closure and path resolution.
//!
//! Everything here is a pure function over a flat folder slice. Building
//! a tree indexes children by parent id in one pass and assembles nodes
//! from the roots down, so the whole build is O(n).

use std::collections::{HashMap, HashSet, VecDeque};

use testhub_core::config::folders::OrphanPolicy;
use testhub_core::error::AppError;
use testhub_core::result::AppResult;
use testhub_core::types::FolderId;
use testhub_entity::folder::{Folder, FolderNode, FolderTree};

/// Deepest allowed nesting, counted in levels; a root alone is one level.
pub const MAX_FOLDER_DEPTH: usize = 256;

/// Children of each folder, as indices into the folder slice, in input order.
type ChildIndex<'a> = HashMap<&'a str, Vec<usize>>;

fn child_index(folders: &[Folder]) -> ChildIndex<'_> {
    let mut children: ChildIndex<'_> = HashMap::with_capacity(folders.len());
    for (i, folder) in folders.iter().enumerate() {
        if let Some(parent) = &folder.parent_id {
            children.entry(parent.as_str()).or_default().push(i);
        }
    }
    children
}

/// Builds the folder forest, promoting folders with a dangling parent to roots.
///
/// Assembly recurses once per level, so input is expected to have passed
/// [`validate_collection`], which bounds nesting at [`MAX_FOLDER_DEPTH`].
pub fn build_tree(folders: &[Folder]) -> Vec<FolderNode> {
    let mut visited = vec![false; folders.len()];
    let children = child_index(folders);
    let ids: HashSet<&str> = folders.iter().map(|f| f.id.as_str()).collect();

    let mut roots = Vec::new();
    for (i, folder) in folders.iter().enumerate() {
        let is_root = match &folder.parent_id {
            None => true,
            Some(parent) => !ids.contains(parent.as_str()),
        };
        if is_root && !visited[i] {
            roots.push(assemble(i, 0, folders, &children, &mut visited));
        }
    }

    // Folders caught in a parent cycle never hang below a root.
    for i in 0..folders.len() {
        if !visited[i] {
            roots.push(assemble(i, 0, folders, &children, &mut visited));
        }
    }

    roots
}

/// Builds the folder forest under the given dangling-parent policy.
///
/// With [`OrphanPolicy::Reject`], a folder whose parent does not exist or a
/// parent cycle yields an integrity error instead of a forest.
pub fn build_tree_with_policy(folders: &[Folder], policy: OrphanPolicy) -> AppResult<FolderTree> {
    if policy == OrphanPolicy::Reject {
        validate_collection(folders, policy)?;
    }
    Ok(FolderTree::from_roots(build_tree(folders)))
}

fn assemble(
    index: usize,
    depth: u32,
    folders: &[Folder],
    children: &ChildIndex<'_>,
    visited: &mut [bool],
) -> FolderNode {
    visited[index] = true;
    let folder = &folders[index];
    let mut node = FolderNode::leaf(folder, depth);

    if let Some(kids) = children.get(folder.id.as_str()) {
        for &kid in kids {
            if !visited[kid] {
                node.children
                    .push(assemble(kid, depth + 1, folders, children, visited));
            }
        }
    }

    node
}

/// The folder itself plus every folder below it.
///
/// Returns an empty set when `folder_id` is not in the collection.
pub fn descendant_closure(folders: &[Folder], folder_id: &FolderId) -> HashSet<FolderId> {
    let mut closure = HashSet::new();
    if !folders.iter().any(|f| &f.id == folder_id) {
        return closure;
    }

    let children = child_index(folders);
    let mut queue = VecDeque::from([folder_id.clone()]);
    closure.insert(folder_id.clone());

    while let Some(current) = queue.pop_front() {
        let Some(kids) = children.get(current.as_str()) else {
            continue;
        };
        for &kid in kids {
            let id = &folders[kid].id;
            if closure.insert(id.clone()) {
                queue.push_back(id.clone());
            }
        }
    }

    closure
}

/// Number of levels in the subtree rooted at `folder_id`, itself included.
///
/// Returns 0 when `folder_id` is not in the collection.
pub fn subtree_height(folders: &[Folder], folder_id: &FolderId) -> usize {
    if !folders.iter().any(|f| &f.id == folder_id) {
        return 0;
    }

    let children = child_index(folders);
    let mut seen = HashSet::from([folder_id.as_str()]);
    let mut level = vec![folder_id.as_str()];
    let mut height = 0;

    while !level.is_empty() {
        height += 1;
        let mut next = Vec::new();
        for id in level {
            for &kid in children.get(id).map(Vec::as_slice).unwrap_or_default() {
                let kid_id = folders[kid].id.as_str();
                if seen.insert(kid_id) {
                    next.push(kid_id);
                }
            }
        }
        level = next;
    }

    height
}

/// Folders from the root down to `folder_id`, inclusive.
///
/// The walk stops at a root or at a parent id that matches no folder, in
/// which case the partial path is returned. An unknown `folder_id` yields
/// an empty path.
pub fn folder_path(folders: &[Folder], folder_id: &FolderId) -> Vec<Folder> {
    let by_id: HashMap<&str, &Folder> = folders.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut current = by_id.get(folder_id.as_str()).copied();

    while let Some(folder) = current {
        if !seen.insert(folder.id.as_str()) {
            break;
        }
        path.push(folder.clone());
        current = folder
            .parent_id
            .as_ref()
            .and_then(|parent| by_id.get(parent.as_str()).copied());
    }

    path.reverse();
    path
}

/// Checks the structural invariants of a persisted collection.
///
/// Duplicate ids, parent cycles and chains deeper than [`MAX_FOLDER_DEPTH`]
/// are always rejected; dangling parents only under [`OrphanPolicy::Reject`].
pub fn validate_collection(folders: &[Folder], policy: OrphanPolicy) -> AppResult<()> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(folders.len());
    for (i, folder) in folders.iter().enumerate() {
        if positions.insert(folder.id.as_str(), i).is_some() {
            return Err(AppError::integrity(format!(
                "Duplicate folder id '{}'",
                folder.id
            )));
        }
    }

    if policy == OrphanPolicy::Reject
        && let Some(orphan) = folders.iter().find(|f| {
            f.parent_id
                .as_ref()
                .is_some_and(|p| !positions.contains_key(p.as_str()))
        })
    {
        return Err(AppError::integrity(format!(
            "Folder '{}' refers to missing parent '{}'",
            orphan.id,
            orphan.parent_id.as_ref().map(FolderId::as_str).unwrap_or_default()
        )));
    }

    // 0 = unvisited, 1 = on the current parent chain, 2 = level known.
    let mut state = vec![0u8; folders.len()];
    let mut levels = vec![0usize; folders.len()];
    for start in 0..folders.len() {
        let mut chain = Vec::new();
        let mut current = Some(start);
        let mut above = 0;

        while let Some(i) = current {
            match state[i] {
                2 => {
                    above = levels[i];
                    break;
                }
                1 => {
                    return Err(AppError::integrity(format!(
                        "Folder '{}' is its own ancestor",
                        folders[i].id
                    )));
                }
                _ => {}
            }
            state[i] = 1;
            chain.push(i);
            current = folders[i]
                .parent_id
                .as_ref()
                .and_then(|p| positions.get(p.as_str()).copied());
        }

        // The chain runs from `start` upward; assign levels from the top down.
        for &i in chain.iter().rev() {
            above += 1;
            if above > MAX_FOLDER_DEPTH {
                return Err(AppError::integrity(format!(
                    "Folder '{}' is nested deeper than {MAX_FOLDER_DEPTH} levels",
                    folders[i].id
                )));
            }
            levels[i] = above;
            state[i] = 2;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use testhub_core::error::ErrorKind;

    fn folder(id: &str, parent: Option<&str>) -> Folder {
        Folder::new(id, id.to_uppercase(), parent.map(FolderId::from))
    }

    fn ids(nodes: &[&FolderNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id.to_string()).collect()
    }

    fn sample() -> Vec<Folder> {
        vec![
            folder("a", None),
            folder("b", Some("a")),
            folder("c", Some("b")),
            folder("d", Some("a")),
            folder("e", None),
        ]
    }

    #[test]
    fn test_build_tree_nests_children_in_input_order() {
        let roots = build_tree(&sample());
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].id.as_str(), "a");
        assert_eq!(roots[1].id.as_str(), "e");

        let a = &roots[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].id.as_str(), "b");
        assert_eq!(a.children[1].id.as_str(), "d");
        assert_eq!(a.children[0].children[0].id.as_str(), "c");
        assert_eq!(a.children[0].children[0].depth, 2);
    }

    #[test]
    fn test_pre_order_covers_every_folder_once() {
        let folders = sample();
        let tree = FolderTree::from_roots(build_tree(&folders));
        assert_eq!(tree.total_folders, 5);

        let mut seen = ids(&tree.pre_order());
        seen.sort();
        let mut expected: Vec<String> = folders.iter().map(|f| f.id.to_string()).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let folders = vec![folder("c", Some("p")), folder("p", None)];
        let roots = build_tree(&folders);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].children[0].id.as_str(), "c");
    }

    #[test]
    fn test_dangling_parent_promoted_to_root() {
        let folders = vec![folder("a", None), folder("x", Some("gone"))];
        let roots = build_tree(&folders);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].id.as_str(), "x");
        assert_eq!(roots[1].parent_id, Some(FolderId::from("gone")));
    }

    #[test]
    fn test_dangling_parent_rejected_by_policy() {
        let folders = vec![folder("a", None), folder("x", Some("gone"))];
        let err = build_tree_with_policy(&folders, OrphanPolicy::Reject).unwrap_err();
        assert!(err.is(ErrorKind::Integrity));

        let tree = build_tree_with_policy(&folders, OrphanPolicy::Promote).unwrap();
        assert_eq!(tree.total_folders, 2);
    }

    #[test]
    fn test_cyclic_input_loses_no_folder() {
        let folders = vec![folder("a", Some("b")), folder("b", Some("a")), folder("r", None)];
        let tree = FolderTree::from_roots(build_tree(&folders));
        assert_eq!(tree.total_folders, 3);
    }

    #[test]
    fn test_build_tree_is_deterministic() {
        let folders = sample();
        assert_eq!(build_tree(&folders), build_tree(&folders));
    }

    #[test]
    fn test_empty_collection() {
        assert!(build_tree(&[]).is_empty());
        assert_eq!(
            build_tree_with_policy(&[], OrphanPolicy::Reject).unwrap(),
            FolderTree::empty()
        );
    }

    #[test]
    fn test_descendant_closure() {
        let closure = descendant_closure(&sample(), &FolderId::from("a"));
        let mut got: Vec<&str> = closure.iter().map(FolderId::as_str).collect();
        got.sort();
        assert_eq!(got, vec!["a", "b", "c", "d"]);

        let leaf = descendant_closure(&sample(), &FolderId::from("c"));
        assert_eq!(leaf.len(), 1);

        assert!(descendant_closure(&sample(), &FolderId::from("zz")).is_empty());
    }

    #[test]
    fn test_folder_path_from_root() {
        let path = folder_path(&sample(), &FolderId::from("c"));
        let names: Vec<&str> = path.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_folder_path_of_root_is_single() {
        let path = folder_path(&sample(), &FolderId::from("e"));
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].id.as_str(), "e");
    }

    #[test]
    fn test_folder_path_stops_at_dangling_parent() {
        let folders = vec![folder("x", Some("gone")), folder("y", Some("x"))];
        let path = folder_path(&folders, &FolderId::from("y"));
        let names: Vec<&str> = path.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_folder_path_unknown_is_empty() {
        assert!(folder_path(&sample(), &FolderId::from("nope")).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_cycles() {
        let dup = vec![folder("a", None), folder("a", None)];
        assert!(validate_collection(&dup, OrphanPolicy::Promote)
            .unwrap_err()
            .is(ErrorKind::Integrity));

        let self_parent = vec![folder("a", Some("a"))];
        assert!(validate_collection(&self_parent, OrphanPolicy::Promote)
            .unwrap_err()
            .is(ErrorKind::Integrity));

        let cycle = vec![
            folder("r", None),
            folder("a", Some("c")),
            folder("b", Some("a")),
            folder("c", Some("b")),
        ];
        assert!(validate_collection(&cycle, OrphanPolicy::Promote).is_err());
    }

    fn linear_chain(levels: usize) -> Vec<Folder> {
        (0..levels)
            .map(|i| {
                let parent = (i > 0).then(|| FolderId::from(format!("f{}", i - 1)));
                Folder::new(format!("f{i}"), format!("F{i}"), parent)
            })
            .collect()
    }

    #[test]
    fn test_validate_depth_limit() {
        let at_limit = linear_chain(MAX_FOLDER_DEPTH);
        assert!(validate_collection(&at_limit, OrphanPolicy::Promote).is_ok());

        let tree = FolderTree::from_roots(build_tree(&at_limit));
        assert_eq!(tree.total_folders as usize, MAX_FOLDER_DEPTH);
        assert_eq!(tree.pre_order().last().unwrap().depth as usize, MAX_FOLDER_DEPTH - 1);

        let too_deep = linear_chain(MAX_FOLDER_DEPTH + 1);
        assert!(validate_collection(&too_deep, OrphanPolicy::Promote)
            .unwrap_err()
            .is(ErrorKind::Integrity));
    }

    #[test]
    fn test_validate_depth_counts_from_known_ancestors() {
        // Deepest folder listed first, so its chain is walked before the rest.
        let mut folders = linear_chain(MAX_FOLDER_DEPTH + 1);
        folders.reverse();
        assert!(validate_collection(&folders, OrphanPolicy::Promote).is_err());

        // Chain walked in pieces: every prefix is already levelled.
        let mut folders = linear_chain(MAX_FOLDER_DEPTH);
        let deepest = FolderId::from(format!("f{}", MAX_FOLDER_DEPTH - 1));
        folders.push(Folder::new("extra", "Extra", Some(deepest)));
        assert!(validate_collection(&folders, OrphanPolicy::Reject).is_err());
    }

    #[test]
    fn test_very_deep_chain_is_rejected_not_built() {
        let folders = linear_chain(20_000);
        let err = build_tree_with_policy(&folders, OrphanPolicy::Reject).unwrap_err();
        assert!(err.is(ErrorKind::Integrity));
    }

    #[test]
    fn test_subtree_height() {
        assert_eq!(subtree_height(&sample(), &FolderId::from("a")), 3);
        assert_eq!(subtree_height(&sample(), &FolderId::from("b")), 2);
        assert_eq!(subtree_height(&sample(), &FolderId::from("e")), 1);
        assert_eq!(subtree_height(&sample(), &FolderId::from("zz")), 0);
    }

    #[test]
    fn test_validate_accepts_forest() {
        assert!(validate_collection(&sample(), OrphanPolicy::Reject).is_ok());
        let orphan = vec![folder("x", Some("gone"))];
        assert!(validate_collection(&orphan, OrphanPolicy::Promote).is_ok());
        assert!(validate_collection(&orphan, OrphanPolicy::Reject).is_err());
    }
}
