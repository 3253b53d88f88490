use core::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use crate::{
    raw::{self, Handle, RawList, Slot},
    ForwardList,
};

/// Borrowing iterator over a [`ForwardList`], front to back.
#[derive(Debug)]
pub struct Iter<'a, T> {
    raw: &'a RawList<T>,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(raw: &'a RawList<T>) -> Self {
        Self {
            raw,
            next: raw.head(),
            remaining: raw.len(),
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.raw.occupied(handle);
        self.next = node.link.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Mutably borrowing iterator over a [`ForwardList`], front to back.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    slots: NonNull<Slot<T>>,
    next: Option<Handle>,
    remaining: usize,
    _p: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(raw: &'a mut RawList<T>) -> Self {
        Self {
            next: raw.head(),
            remaining: raw.len(),
            slots: raw.slots_ptr(),
            _p: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        // SAFETY: the list is borrowed mutably for 'a and the chain is acyclic,
        // so every handle is visited once and no two items alias.
        let node = unsafe { raw::node_at(self.slots, handle) };
        self.next = node.link.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}
impl<'a, T> FusedIterator for IterMut<'a, T> {}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

/// Owning iterator over a [`ForwardList`], front to back.
#[derive(Debug)]
pub struct IntoIter<T> {
    list: ForwardList<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: ForwardList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
