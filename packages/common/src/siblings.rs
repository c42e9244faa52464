//! Sibling-list edits
//!
//! Each function takes an existing list and returns the list that should
//! replace it. Items are `Arc`s; only the list is new, never the items
//! that stay in it.

use crate::error::PathError;
use std::sync::Arc;

fn check(index: usize, len: usize) -> Result<(), PathError> {
    if index < len {
        Ok(())
    } else {
        Err(PathError::IndexOutOfRange { index, len })
    }
}

/// `list` with `item` appended
pub fn pushed<T>(list: &[Arc<T>], item: Arc<T>) -> Vec<Arc<T>> {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend_from_slice(list);
    next.push(item);
    next
}

/// `list` with `item` inserted before `index`; `index == len` appends
pub fn inserted<T>(list: &[Arc<T>], index: usize, item: Arc<T>) -> Result<Vec<Arc<T>>, PathError> {
    if index > list.len() {
        return Err(PathError::IndexOutOfRange { index, len: list.len() });
    }
    let mut next = list.to_vec();
    next.insert(index, item);
    Ok(next)
}

/// `list` without the item at `index`, plus the removed item
pub fn removed<T>(list: &[Arc<T>], index: usize) -> Result<(Vec<Arc<T>>, Arc<T>), PathError> {
    check(index, list.len())?;
    let mut next = list.to_vec();
    let item = next.remove(index);
    Ok((next, item))
}

/// `list` with the item at `index` swapped for `item`
pub fn replaced<T>(list: &[Arc<T>], index: usize, item: Arc<T>) -> Result<Vec<Arc<T>>, PathError> {
    check(index, list.len())?;
    let mut next = list.to_vec();
    next[index] = item;
    Ok(next)
}

/// `list` with one item moved from `from` to `to`, every other item keeping its relative order
pub fn moved<T>(list: &[Arc<T>], from: usize, to: usize) -> Result<Vec<Arc<T>>, PathError> {
    check(from, list.len())?;
    check(to, list.len())?;
    let mut next = list.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    Ok(next)
}

/// Swap with the previous sibling; `None` at the first position
pub fn moved_up<T>(list: &[Arc<T>], index: usize) -> Result<Option<Vec<Arc<T>>>, PathError> {
    check(index, list.len())?;
    if index == 0 {
        return Ok(None);
    }
    moved(list, index, index - 1).map(Some)
}

/// Swap with the next sibling; `None` at the last position
pub fn moved_down<T>(list: &[Arc<T>], index: usize) -> Result<Option<Vec<Arc<T>>>, PathError> {
    check(index, list.len())?;
    if index + 1 == list.len() {
        return Ok(None);
    }
    moved(list, index, index + 1).map(Some)
}

/// `list` with `copy(list[index])` inserted right after the original
pub fn duplicated<T, F>(list: &[Arc<T>], index: usize, copy: F) -> Result<Vec<Arc<T>>, PathError>
where
    F: FnOnce(&T) -> T,
{
    check(index, list.len())?;
    let clone = Arc::new(copy(&list[index]));
    inserted(list, index + 1, clone)
}
