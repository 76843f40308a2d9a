//! Build a reply forest out of a flat comment list.
//!
//! Parent links are assigned at random: each parentless comment has a
//! [`PARENT_ASSIGNMENT_PROBABILITY`] chance of being attached to another
//! comment picked uniformly from the list. Only comments that are roots at
//! assignment time can become parents, and a comment that already has replies
//! is never given a parent, so the forest is at most one level deep.
//!
//! The draws come from a [`ParentDraw`] so callers can script them.

use std::collections::HashMap;

use rand::Rng;

use super::comment::{Comment, NestedComment};

/// Chance that a parentless comment attempts to pick a parent.
pub const PARENT_ASSIGNMENT_PROBABILITY: f64 = 0.4;

/// Source of the random decisions made while assigning parents.
pub trait ParentDraw {
    /// Decide whether the current comment attempts to take a parent.
    fn attempt(&mut self) -> bool;

    /// Pick a candidate parent index in `0..len`.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`ParentDraw`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RandomParentDraw<R> {
    rng: R,
    probability: f64,
}

impl<R: Rng> RandomParentDraw<R> {
    /// Draw with the default [`PARENT_ASSIGNMENT_PROBABILITY`].
    pub fn new(rng: R) -> Self {
        Self::with_probability(rng, PARENT_ASSIGNMENT_PROBABILITY)
    }

    /// Draw with an explicit attempt probability, clamped to `[0, 1]`.
    /// `NaN` disables assignment.
    pub fn with_probability(rng: R, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { rng, probability }
    }
}

impl<R: Rng> ParentDraw for RandomParentDraw<R> {
    fn attempt(&mut self) -> bool {
        self.rng.random_bool(self.probability)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Convert a flat comment list into root comments carrying their replies.
///
/// Comments that already carry a `parent_id` keep it. A comment ends up in its
/// parent's `replies` only when the parent id resolves and the parent is
/// itself a root; every other comment is returned as a root. Roots and
/// replies both keep flat-list order.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use user_directory::domain::{Comment, RandomParentDraw, build_comment_tree};
///
/// let flat = (1..=5)
///     .map(|id| Comment {
///         id,
///         post_id: 1,
///         name: format!("comment {id}"),
///         email: "a@b.c".to_owned(),
///         body: String::new(),
///         parent_id: None,
///     })
///     .collect::<Vec<_>>();
/// let mut draw = RandomParentDraw::new(ChaCha8Rng::seed_from_u64(7));
/// let roots = build_comment_tree(flat, &mut draw);
///
/// let total: usize = roots.iter().map(|root| root.node_count()).sum();
/// assert_eq!(total, 5);
/// assert!(roots.iter().all(|root| root.depth() <= 1));
/// ```
pub fn build_comment_tree<D>(flat: Vec<Comment>, draw: &mut D) -> Vec<NestedComment>
where
    D: ParentDraw + ?Sized,
{
    let mut comments = flat;
    let mut index_by_id = HashMap::with_capacity(comments.len());
    for (index, comment) in comments.iter().enumerate() {
        index_by_id.entry(comment.id).or_insert(index);
    }

    assign_parents(&mut comments, &index_by_id, draw);

    let links = comments
        .iter()
        .enumerate()
        .map(|(index, comment)| resolve_link(index, comment, &index_by_id))
        .collect::<Vec<_>>();

    let mut replies_of = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();
    for (index, link) in links.iter().enumerate() {
        match *link {
            Some(parent) if links[parent].is_none() => replies_of[parent].push(index),
            _ => roots.push(index),
        }
    }

    let mut slots = comments.into_iter().map(Some).collect::<Vec<_>>();
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        let Some(comment) = slots[root].take() else {
            continue;
        };
        let replies = replies_of[root]
            .iter()
            .filter_map(|&reply| slots[reply].take())
            .map(NestedComment::leaf)
            .collect();
        forest.push(NestedComment { comment, replies });
    }
    forest
}

fn assign_parents<D>(comments: &mut [Comment], index_by_id: &HashMap<i64, usize>, draw: &mut D)
where
    D: ParentDraw + ?Sized,
{
    let len = comments.len();
    let mut has_replies = vec![false; len];
    for (index, comment) in comments.iter().enumerate() {
        if let Some(parent) = resolve_link(index, comment, index_by_id) {
            has_replies[parent] = true;
        }
    }

    for index in 0..len {
        if comments[index].parent_id.is_some() || !draw.attempt() {
            continue;
        }
        let candidate = draw.pick(len);
        let Some(parent) = comments.get(candidate) else {
            continue;
        };
        let eligible = candidate != index
            && parent.id != comments[index].id
            && parent.parent_id.is_none()
            && !has_replies[index];
        if !eligible {
            continue;
        }
        let parent_id = parent.id;
        comments[index].parent_id = Some(parent_id);
        has_replies[candidate] = true;
    }
}

fn resolve_link(
    index: usize,
    comment: &Comment,
    index_by_id: &HashMap<i64, usize>,
) -> Option<usize> {
    comment
        .parent_id
        .and_then(|parent_id| index_by_id.get(&parent_id).copied())
        .filter(|&parent| parent != index)
}
