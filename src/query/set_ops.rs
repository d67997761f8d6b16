//! Set operations over sorted line-number sequences.
//!
//! Every input is a line-number projection of a postings list: ascending, with
//! a line repeated once per occurrence on that line. Outputs are ascending and
//! free of duplicates.
//!
//! The functions only borrow their inputs and always return a freshly
//! allocated vector; postings shared by the trie are never touched.
//!
//! # Examples
//!
//! ```
//! use concordance::query::set_ops::{difference, intersect, union};
//!
//! let a = vec![1, 4, 7, 10];
//! let b = vec![2, 4, 8, 10];
//! assert_eq!(intersect(&[&a, &b]), vec![4, 10]);
//! assert_eq!(union(&[&a, &b]), vec![1, 2, 4, 7, 8, 10]);
//! assert_eq!(difference(&a, &[&b]), vec![1, 7]);
//! ```

use crate::index::posting::Posting;

/// Line numbers of `postings`, in order, duplicates kept.
pub fn line_numbers(postings: &[Posting]) -> Vec<u32> {
    postings.iter().map(|p| p.line).collect()
}

/// Move `cursor` past every copy of `value`.
fn skip(list: &[u32], mut cursor: usize, value: u32) -> usize {
    while cursor < list.len() && list[cursor] == value {
        cursor += 1;
    }
    cursor
}

/// Lines present in every list (AND).
///
/// One cursor per list. When all cursors agree the value is emitted and every
/// cursor moves past it; otherwise only the cursors on the smallest value
/// move. Each list's last element is compared before the loop gives up,
/// because exhaustion is only checked after a comparison.
///
/// No lists, or any empty list, gives an empty result.
pub fn intersect<L: AsRef<[u32]>>(lists: &[L]) -> Vec<u32> {
    let lists: Vec<&[u32]> = lists.iter().map(AsRef::as_ref).collect();
    let mut result = Vec::new();
    if lists.is_empty() || lists.iter().any(|list| list.is_empty()) {
        return result;
    }

    let mut cursors = vec![0; lists.len()];
    loop {
        let mut min = u32::MAX;
        let mut max = u32::MIN;
        for (list, &cursor) in lists.iter().zip(&cursors) {
            min = min.min(list[cursor]);
            max = max.max(list[cursor]);
        }

        if min == max {
            result.push(min);
        }
        for (list, cursor) in lists.iter().zip(cursors.iter_mut()) {
            if list[*cursor] == min {
                *cursor = skip(list, *cursor, min);
            }
        }

        if lists
            .iter()
            .zip(&cursors)
            .any(|(list, &cursor)| cursor == list.len())
        {
            return result;
        }
    }
}

/// Lines present in any list (OR). Empty lists are ignored.
///
/// A merge sweep: the smallest current value is emitted once and every cursor
/// holding it moves past it. Exhausted lists drop out of the sweep.
pub fn union<L: AsRef<[u32]>>(lists: &[L]) -> Vec<u32> {
    let mut active: Vec<(&[u32], usize)> = lists
        .iter()
        .map(AsRef::as_ref)
        .filter(|list| !list.is_empty())
        .map(|list| (list, 0))
        .collect();
    let mut result = Vec::new();

    while let Some(min) = active.iter().map(|&(list, cursor)| list[cursor]).min() {
        result.push(min);
        for (list, cursor) in active.iter_mut() {
            *cursor = skip(list, *cursor, min);
        }
        active.retain(|&(list, cursor)| cursor < list.len());
    }

    result
}

/// Lines of `required` that appear in none of the `excluded` lists (NOT).
///
/// `required` must be ascending. Each excluded cursor only ever moves
/// forward, so the whole scan is linear in the input sizes. Repeated required
/// lines are reported once.
pub fn difference<L: AsRef<[u32]>>(required: &[u32], excluded: &[L]) -> Vec<u32> {
    let excluded: Vec<&[u32]> = excluded.iter().map(AsRef::as_ref).collect();
    let mut cursors = vec![0; excluded.len()];
    let mut result: Vec<u32> = Vec::with_capacity(required.len());

    for &value in required {
        if result.last() == Some(&value) {
            continue;
        }

        let mut found = false;
        for (list, cursor) in excluded.iter().zip(cursors.iter_mut()) {
            while *cursor < list.len() && list[*cursor] < value {
                *cursor += 1;
            }
            if *cursor < list.len() && list[*cursor] == value {
                found = true;
            }
        }

        if !found {
            result.push(value);
        }
    }

    result
}
