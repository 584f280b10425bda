use std::collections::{HashMap, HashSet, VecDeque};

/// Transitive descendants of `start_ids`, given `(id, parent_id)` links.
///
/// Starting ids are only part of the result when another starting id
/// reaches them. Each id is expanded at most once, so cyclic links
/// terminate.
pub fn resolve_descendant_ids<I>(links: I, start_ids: &[i64]) -> HashSet<i64>
where
    I: IntoIterator<Item = (i64, Option<i64>)>,
{
    let mut children_by_parent: HashMap<i64, Vec<i64>> = HashMap::new();
    for (id, parent_id) in links {
        if let Some(parent_id) = parent_id {
            children_by_parent.entry(parent_id).or_default().push(id);
        }
    }

    let mut expanded: HashSet<i64> = start_ids.iter().copied().collect();
    let mut queue: VecDeque<i64> = expanded.iter().copied().collect();
    let mut descendants = HashSet::new();

    while let Some(current) = queue.pop_front() {
        let Some(children) = children_by_parent.get(&current) else {
            continue;
        };

        for &child in children {
            descendants.insert(child);
            if expanded.insert(child) {
                queue.push_back(child);
            }
        }
    }

    descendants
}
