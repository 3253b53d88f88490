use alloc::vec::Vec;
use core::{
    mem,
    ptr::NonNull,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::error::{ListErrorKind, ListResult};

/// Identifies a sentinel or a node arena for as long as the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListId(usize);

impl ListId {
    fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        ListId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: usize,
    generation: u64,
}

/// The outgoing edge of a node. The sentinel is nothing but a `Link`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Link {
    pub(crate) next: Option<Handle>,
}

impl Link {
    #[inline]
    pub const fn new() -> Self {
        Link { next: None }
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) link: Link,
}

#[derive(Debug)]
enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
pub(crate) struct Slot<T> {
    generation: u64,
    entry: Entry<T>,
}

/// Where a position points: the sentinel, a live node, or past the last node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum At {
    BeforeBegin,
    Node(Handle),
    End,
}

impl At {
    #[inline]
    pub(crate) fn from_next(next: Option<Handle>) -> Self {
        match next {
            Some(handle) => At::Node(handle),
            None => At::End,
        }
    }
}

/// Node storage of a forward list.
///
/// Nodes live in a slot arena. Released slots are threaded onto a free list
/// and get their generation bumped, so a `Handle` taken before the release
/// no longer resolves. A slot whose generation cannot be bumped any further
/// is retired instead of reused.
///
/// `id` names the sentinel and stays with the list; `arena` names the node
/// storage and travels with it on `swap`.
#[derive(Debug)]
pub(crate) struct RawList<T> {
    id: ListId,
    arena: ListId,
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    fresh: u64,
    head: Link,
    len: usize,
}

impl<T> RawList<T> {
    pub fn new() -> Self {
        Self {
            id: ListId::next(),
            arena: ListId::next(),
            slots: Vec::new(),
            free: None,
            fresh: 0,
            head: Link::new(),
            len: 0,
        }
    }

    pub fn collect<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut raw = Self::new();
        raw.slots.reserve(iter.size_hint().0);

        let mut tail = None;
        for value in iter {
            tail = Some(raw.append(tail, value));
        }
        raw
    }

    pub fn try_collect<I>(iter: I) -> ListResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut raw = Self::new();
        raw.slots.try_reserve(iter.size_hint().0)?;

        let mut tail = None;
        for value in iter {
            raw.reserve_node()?;
            tail = Some(raw.append(tail, value));
        }
        Ok(raw)
    }

    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// The id a position at `at` is stamped with.
    #[inline]
    pub fn owner_of(&self, at: At) -> ListId {
        match at {
            At::Node(_) => self.arena,
            At::BeforeBegin | At::End => self.id,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn head(&self) -> Option<Handle> {
        self.head.next
    }

    /// Makes sure the next node allocation will not need to grow the arena.
    pub fn reserve_node(&mut self) -> ListResult<()> {
        if self.free.is_none() {
            self.slots.try_reserve(1)?;
        }
        Ok(())
    }

    fn alloc(&mut self, value: T, next: Option<Handle>) -> Handle {
        let node = Node {
            value,
            link: Link { next },
        };

        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free = match slot.entry {
                    Entry::Vacant { next_free } => next_free,
                    Entry::Occupied(_) => unreachable!("free list points at a live node"),
                };
                slot.entry = Entry::Occupied(node);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: self.fresh,
                    entry: Entry::Occupied(node),
                });
                Handle {
                    index,
                    generation: self.fresh,
                }
            }
        }
    }

    fn release(&mut self, handle: Handle) -> Node<T> {
        let slot = &mut self.slots[handle.index];
        debug_assert_eq!(slot.generation, handle.generation);

        let entry = mem::replace(&mut slot.entry, Entry::Vacant { next_free: None });
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            slot.entry = Entry::Vacant {
                next_free: self.free,
            };
            self.free = Some(handle.index);
        }

        match entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    pub fn node(&self, handle: Handle) -> ListResult<&Node<T>> {
        match self.slots.get(handle.index) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(node),
            }) if *generation == handle.generation => Ok(node),
            _ => Err(ListErrorKind::StalePosition.into()),
        }
    }

    pub fn node_mut(&mut self, handle: Handle) -> ListResult<&mut Node<T>> {
        match self.slots.get_mut(handle.index) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(node),
            }) if *generation == handle.generation => Ok(node),
            _ => Err(ListErrorKind::StalePosition.into()),
        }
    }

    /// Access to a node reached by walking the chain, which is always live.
    pub fn occupied(&self, handle: Handle) -> &Node<T> {
        match &self.slots[handle.index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("chain links to a vacant slot"),
        }
    }

    fn next_mut(&mut self, of: Option<Handle>) -> &mut Option<Handle> {
        match of {
            None => &mut self.head.next,
            Some(handle) => match &mut self.slots[handle.index].entry {
                Entry::Occupied(node) => &mut node.link.next,
                Entry::Vacant { .. } => unreachable!("chain links to a vacant slot"),
            },
        }
    }

    /// Links a fresh node after `tail` (`None` is the sentinel), which must be
    /// the last node of the chain.
    fn append(&mut self, tail: Option<Handle>, value: T) -> Handle {
        debug_assert!(self.next_mut(tail).is_none());
        let handle = self.alloc(value, None);
        *self.next_mut(tail) = Some(handle);
        self.len += 1;
        handle
    }

    /// Checks that `at` was handed out by this storage and still resolves.
    pub fn check(&self, owner: ListId, at: At) -> ListResult<At> {
        if owner != self.owner_of(at) {
            return Err(ListErrorKind::ForeignPosition.into());
        }
        if let At::Node(handle) = at {
            self.node(handle)?;
        }
        Ok(at)
    }

    pub fn link(&self, at: At) -> ListResult<&Link> {
        match at {
            At::BeforeBegin => Ok(&self.head),
            At::Node(handle) => Ok(&self.node(handle)?.link),
            At::End => Err(ListErrorKind::PastEnd.into()),
        }
    }

    pub fn value(&self, at: At) -> ListResult<&T> {
        match at {
            At::Node(handle) => Ok(&self.node(handle)?.value),
            At::BeforeBegin | At::End => Err(ListErrorKind::NotDereferenceable.into()),
        }
    }

    pub fn value_mut(&mut self, at: At) -> ListResult<&mut T> {
        match at {
            At::Node(handle) => Ok(&mut self.node_mut(handle)?.value),
            At::BeforeBegin | At::End => Err(ListErrorKind::NotDereferenceable.into()),
        }
    }

    pub fn successor(&self, at: At) -> ListResult<At> {
        Ok(At::from_next(self.link(at)?.next))
    }

    pub fn push_front(&mut self, value: T) {
        let handle = self.alloc(value, self.head.next);
        self.head.next = Some(handle);
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head.next?;
        let node = self.release(head);
        self.head.next = node.link.next;
        self.len -= 1;
        Some(node.value)
    }

    pub fn insert_after(&mut self, at: At, value: T) -> ListResult<At> {
        let next = self.link(at)?.next;
        let anchor = match at {
            At::Node(handle) => Some(handle),
            _ => None,
        };

        let handle = self.alloc(value, next);
        *self.next_mut(anchor) = Some(handle);
        self.len += 1;
        Ok(At::Node(handle))
    }

    /// Unlinks the node following `at`. Returns `None` when nothing follows,
    /// including when `at` is `End`.
    pub fn remove_after(&mut self, at: At) -> ListResult<Option<(T, At)>> {
        let anchor = match at {
            At::End => return Ok(None),
            At::BeforeBegin => None,
            At::Node(handle) => Some(handle),
        };
        let Some(victim) = self.link(at)?.next else {
            return Ok(None);
        };

        let node = self.release(victim);
        *self.next_mut(anchor) = node.link.next;
        self.len -= 1;
        Ok(Some((node.value, At::from_next(node.link.next))))
    }

    /// Releases every node and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.len;
        while self.pop_front().is_some() {}
        debug_assert!(self.head.next.is_none());
        count
    }

    /// Exchanges node storage, sentinel link and length. The sentinel ids
    /// stay where they are.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.arena, &mut other.arena);
        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.free, &mut other.free);
        mem::swap(&mut self.fresh, &mut other.fresh);
        mem::swap(&mut self.head, &mut other.head);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Drops vacant slots from the end of the arena and gives spare capacity
    /// back to the allocator. Live nodes keep their handles.
    pub fn shrink_to_fit(&mut self) {
        while let Some(slot) = self.slots.last() {
            match slot.entry {
                Entry::Vacant { .. } if slot.generation != u64::MAX => {
                    self.fresh = self.fresh.max(slot.generation);
                    self.slots.pop();
                }
                _ => break,
            }
        }

        self.free = None;
        for index in (0..self.slots.len()).rev() {
            let slot = &mut self.slots[index];
            if let Entry::Vacant { next_free } = &mut slot.entry {
                if slot.generation != u64::MAX {
                    *next_free = self.free;
                    self.free = Some(index);
                }
            }
        }
        self.slots.shrink_to_fit();
    }

    pub(crate) fn slots_ptr(&mut self) -> NonNull<Slot<T>> {
        // SAFETY: a vec's buffer pointer is never null.
        unsafe { NonNull::new_unchecked(self.slots.as_mut_ptr()) }
    }
}

/// # Safety
/// 1. `slots` must be the buffer of a `RawList` mutably borrowed for `'a`.
/// 2. `handle` must be reachable from that list's sentinel.
/// 3. No other reference to the same node may be alive.
pub(crate) unsafe fn node_at<'a, T>(slots: NonNull<Slot<T>>, handle: Handle) -> &'a mut Node<T> {
    let slot = &mut *slots.as_ptr().add(handle.index);
    match &mut slot.entry {
        Entry::Occupied(node) => node,
        Entry::Vacant { .. } => unreachable!("chain links to a vacant slot"),
    }
}

impl<T> Default for RawList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn values<T: Clone>(raw: &RawList<T>) -> Vec<T> {
        let mut out = Vec::new();
        let mut next = raw.head();
        while let Some(handle) = next {
            let node = raw.occupied(handle);
            out.push(node.value.clone());
            next = node.link.next;
        }
        out
    }

    #[test]
    fn released_slots_are_reused_with_new_generation() {
        let mut raw = RawList::new();
        raw.push_front(1);
        let At::Node(first) = At::from_next(raw.head()) else {
            panic!("expected a node");
        };

        assert_eq!(raw.pop_front(), Some(1));
        assert!(raw.node(first).is_err());

        raw.push_front(2);
        let At::Node(second) = At::from_next(raw.head()) else {
            panic!("expected a node");
        };
        assert_eq!(second.index, first.index);
        assert_ne!(second.generation, first.generation);
        assert_eq!(raw.slots.len(), 1);
    }

    #[test]
    fn collect_keeps_order() {
        let raw = RawList::collect([1, 2, 3]);
        assert_eq!(raw.len(), 3);
        assert_eq!(values(&raw), [1, 2, 3]);
    }

    #[test]
    fn insert_and_remove_after_sentinel() {
        let mut raw = RawList::collect([2, 3]);
        let at = raw.insert_after(At::BeforeBegin, 1).unwrap();
        assert_eq!(raw.value(at).unwrap(), &1);
        assert_eq!(values(&raw), [1, 2, 3]);

        let (value, next) = raw.remove_after(At::BeforeBegin).unwrap().unwrap();
        assert_eq!(value, 1);
        assert_eq!(raw.value(next).unwrap(), &2);
        assert_eq!(values(&raw), [2, 3]);
    }

    #[test]
    fn check_rejects_other_storage() {
        let a: RawList<u8> = RawList::new();
        let b: RawList<u8> = RawList::new();
        let err = a.check(b.id(), At::End).unwrap_err();
        assert_eq!(err.kind(), ListErrorKind::ForeignPosition);
    }

    #[test]
    fn exhausted_slot_is_retired() {
        let mut raw = RawList::new();
        raw.push_front(0);
        raw.pop_front();
        raw.slots[0].generation = u64::MAX;

        raw.push_front(1);
        let stale = raw.head().unwrap();
        assert_eq!(stale.generation, u64::MAX);
        assert_eq!(raw.pop_front(), Some(1));
        assert!(raw.free.is_none());

        raw.push_front(2);
        assert_eq!(raw.slots.len(), 2);
        assert!(raw.node(stale).is_err());
        assert_eq!(raw.value(At::from_next(raw.head())).unwrap(), &2);
    }

    #[test]
    fn shrink_keeps_generations_ahead_of_old_handles() {
        let mut raw = RawList::collect([1, 2, 3]);
        let first = raw.head().unwrap();
        raw.clear();
        raw.shrink_to_fit();
        assert_eq!(raw.slots.len(), 0);
        assert!(raw.free.is_none());

        raw.push_front(4);
        let fresh = raw.head().unwrap();
        assert_eq!(fresh.index, first.index);
        assert!(fresh.generation > first.generation);
        assert!(raw.node(first).is_err());
    }

    #[test]
    fn shrink_leaves_live_nodes_alone() {
        let mut raw = RawList::collect([1, 2, 3]);
        let first = raw.head().unwrap();
        raw.remove_after(At::Node(first)).unwrap();
        raw.shrink_to_fit();
        assert_eq!(values(&raw), [1, 3]);
        assert_eq!(raw.node(first).unwrap().value, 1);

        raw.push_front(0);
        assert_eq!(raw.slots.len(), 3);
        assert_eq!(values(&raw), [0, 1, 3]);
    }

    #[test]
    fn swap_keeps_sentinel_ids() {
        let mut a = RawList::collect([1]);
        let mut b = RawList::collect([2, 3]);
        let (a_id, b_id) = (a.id(), b.id());
        let a_arena = a.owner_of(At::from_next(a.head()));

        a.swap(&mut b);
        assert_eq!((a.id(), b.id()), (a_id, b_id));
        assert_eq!(b.owner_of(At::from_next(b.head())), a_arena);
        assert_eq!(values(&a), [2, 3]);
        assert_eq!(values(&b), [1]);
    }

    #[test]
    fn clear_reports_count() {
        let mut raw = RawList::collect(0..5);
        assert_eq!(raw.clear(), 5);
        assert_eq!(raw.len(), 0);
        assert!(raw.head().is_none());
        assert_eq!(raw.clear(), 0);
    }
}
