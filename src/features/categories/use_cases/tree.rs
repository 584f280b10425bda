use std::collections::HashMap;

use crate::features::categories::models::Category;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Build a forest from a flat list of categories.
///
/// Runs in linear time with no recursion. Children keep their input order.
/// A category becomes a root when its parent is `None`, unknown (orphan) or
/// itself. When parent links form a cycle, the link of the first cycle
/// member reached while walking up is dropped and that member becomes a root.
pub fn build_category_tree(categories: Vec<Category>) -> Vec<Category> {
    let count = categories.len();

    // First occurrence wins when an id is repeated
    let mut index_by_id: HashMap<i64, usize> = HashMap::with_capacity(count);
    for (index, category) in categories.iter().enumerate() {
        if let Some(id) = category.id() {
            index_by_id.entry(id).or_insert(index);
        }
    }

    let mut parent_of: Vec<Option<usize>> = categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let parent_id = category.parent_id()?;
            if category.id() == Some(parent_id) {
                return None;
            }
            index_by_id
                .get(&parent_id)
                .copied()
                .filter(|&parent| parent != index)
        })
        .collect();

    break_cycles(&mut parent_of);

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots = Vec::new();
    for (index, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(index),
            None => roots.push(index),
        }
    }

    // Pre-order from the roots; every parent precedes its children
    let mut order = Vec::with_capacity(count);
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(index) = stack.pop() {
        order.push(index);
        stack.extend(children_of[index].iter().rev().copied());
    }

    // Assemble bottom-up so each subtree is complete before its parent moves it
    let mut built: Vec<Option<Category>> = categories.into_iter().map(Some).collect();
    for &index in order.iter().rev() {
        let children = children_of[index]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = built[index]
            .take()
            .map(|category| category.detached().with_children(children));
    }

    roots
        .into_iter()
        .filter_map(|index| built[index].take())
        .collect()
}

/// Number of levels in the deepest branch of a forest (0 when empty)
pub fn category_tree_depth(forest: &[Category]) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&Category, usize)> = forest.iter().map(|root| (root, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.children().iter().map(|child| (child, depth + 1)));
    }
    deepest
}

fn break_cycles(parent_of: &mut [Option<usize>]) {
    let mut state = vec![Visit::New; parent_of.len()];

    for start in 0..parent_of.len() {
        let mut path = Vec::new();
        let mut current = start;

        loop {
            match state[current] {
                Visit::Done => break,
                Visit::OnPath => {
                    parent_of[current] = None;
                    break;
                }
                Visit::New => {
                    state[current] = Visit::OnPath;
                    path.push(current);
                    match parent_of[current] {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }

        for index in path {
            state[index] = Visit::Done;
        }
    }
}
