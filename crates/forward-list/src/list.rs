use core::{
    cmp::Ordering,
    fmt::Debug,
    hash::{Hash, Hasher},
    ptr,
};

use alloc::vec::Vec;

use crate::{
    cursor::CursorMut,
    error::{ListError, ListErrorKind, ListResult},
    iter::{IntoIter, Iter, IterMut},
    position::{Access, ConstPosition, Mut, Position},
    raw::{At, RawList},
};

/// A singly linked list with a sentinel before its first element.
///
/// Elements are reached either by iteration or through [`Position`]s, which
/// are copyable handles to a node (or to the sentinel, or to `end`). All
/// insertion and removal happens *after* a position, so the front of the list
/// is just the slot after [`before_begin`](Self::before_begin).
pub struct ForwardList<T> {
    raw: RawList<T>,
}

impl<T> ForwardList<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            raw: RawList::new(),
        }
    }

    /// Builds a list from `iter`, reporting allocation failure instead of
    /// aborting.
    pub fn try_from_iter<I>(iter: I) -> ListResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        RawList::try_collect(iter)
            .map(|raw| Self { raw })
            .map_err(alloc_failed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn front(&self) -> Option<&T> {
        let head = self.raw.head()?;
        Some(&self.raw.occupied(head).value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.raw.value_mut(At::from_next(self.raw.head())).ok()
    }

    /// Exchanges the contents of both lists without touching any element.
    ///
    /// Element positions follow their nodes: one taken from `self` refers to
    /// `other` afterwards, and the reverse. `before_begin` and `end` belong
    /// to the list itself and stay put.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    #[inline]
    pub fn push_front(&mut self, value: T) {
        self.raw.push_front(value);
    }

    pub fn try_push_front(&mut self, value: T) -> ListResult<()> {
        self.raw.reserve_node().map_err(alloc_failed)?;
        self.raw.push_front(value);
        Ok(())
    }

    /// Removes the first element. Does nothing on an empty list.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.raw.pop_front()
    }

    /// Inserts `value` right after `pos` and returns its position.
    ///
    /// # Panics
    /// If `pos` is `end`, comes from another list, or refers to an erased
    /// node.
    #[track_caller]
    pub fn insert_after(&mut self, pos: impl Into<ConstPosition>, value: T) -> Position {
        unwrap_position(self.try_insert_after(pos, value))
    }

    pub fn try_insert_after(
        &mut self,
        pos: impl Into<ConstPosition>,
        value: T,
    ) -> ListResult<Position> {
        let pos: ConstPosition = pos.into();
        let at = self.check(pos)?;
        self.raw.link(at)?;
        self.raw.reserve_node().map_err(alloc_failed)?;
        let at = self.raw.insert_after(at, value)?;
        Ok(self.position(at))
    }

    /// Removes the element after `pos` and returns the position that now
    /// follows `pos`.
    ///
    /// When nothing follows `pos` (it is the last element, `end`, or the list
    /// is empty) the list is left alone and `end()` is returned.
    ///
    /// # Panics
    /// If `pos` comes from another list or refers to an erased node.
    #[track_caller]
    pub fn erase_after(&mut self, pos: impl Into<ConstPosition>) -> Position {
        unwrap_position(self.try_erase_after(pos))
    }

    pub fn try_erase_after(&mut self, pos: impl Into<ConstPosition>) -> ListResult<Position> {
        let next = match self.unlink_after(pos.into())? {
            Some((_, next)) => next,
            None => At::End,
        };
        Ok(self.position(next))
    }

    /// Like [`erase_after`](Self::erase_after), but hands back the removed
    /// element.
    #[track_caller]
    pub fn remove_after(&mut self, pos: impl Into<ConstPosition>) -> Option<T> {
        unwrap_position(self.unlink_after(pos.into())).map(|(value, _)| value)
    }

    fn unlink_after(&mut self, pos: ConstPosition) -> ListResult<Option<(T, At)>> {
        let at = self.check(pos)?;
        let removed = self.raw.remove_after(at)?;
        if removed.is_none() {
            debug!("erase after {:?}: no successor, list unchanged", at);
        }
        Ok(removed)
    }

    /// Removes every element.
    ///
    /// The node storage keeps its high-water mark so that refilling does not
    /// allocate; call [`shrink_to_fit`](Self::shrink_to_fit) to give it back.
    pub fn clear(&mut self) {
        let released = self.raw.clear();
        trace!("cleared {} nodes", released);
    }

    /// Releases node storage left over from removed elements. Positions of
    /// live elements stay valid.
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    /// Replaces the contents with `iter`.
    ///
    /// The new chain is built on the side and swapped in, so if `iter` panics
    /// the list keeps its old contents. `before_begin` and `end` stay valid;
    /// positions of the old elements do not.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut scratch = Self {
            raw: RawList::collect(iter),
        };
        trace!("swapping in {} freshly built nodes", scratch.len());
        self.swap(&mut scratch);
    }

    #[inline]
    pub fn before_begin(&self) -> Position {
        self.position(At::BeforeBegin)
    }

    #[inline]
    pub fn begin(&self) -> Position {
        self.position(At::from_next(self.raw.head()))
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.position(At::End)
    }

    #[inline]
    pub fn cbefore_begin(&self) -> ConstPosition {
        self.before_begin().as_const()
    }

    #[inline]
    pub fn cbegin(&self) -> ConstPosition {
        self.begin().as_const()
    }

    #[inline]
    pub fn cend(&self) -> ConstPosition {
        self.end().as_const()
    }

    /// The element at `pos`.
    ///
    /// # Panics
    /// If `pos` is `end` or `before-begin`, comes from another list, or refers
    /// to an erased node.
    #[track_caller]
    pub fn get<M: Access>(&self, pos: Position<M>) -> &T {
        unwrap_position(self.try_get(pos))
    }

    pub fn try_get<M: Access>(&self, pos: Position<M>) -> ListResult<&T> {
        let at = self.check(pos)?;
        self.raw.value(at)
    }

    /// The element at `pos`, for writing. Only mutable positions allow this.
    #[track_caller]
    pub fn get_mut(&mut self, pos: Position<Mut>) -> &mut T {
        unwrap_position(self.try_get_mut(pos))
    }

    pub fn try_get_mut(&mut self, pos: Position<Mut>) -> ListResult<&mut T> {
        let at = self.check(pos)?;
        self.raw.value_mut(at)
    }

    /// The position following `pos`.
    ///
    /// # Panics
    /// If `pos` is `end`, comes from another list, or refers to an erased
    /// node.
    #[track_caller]
    pub fn advance<M: Access>(&self, pos: Position<M>) -> Position<M> {
        unwrap_position(self.try_advance(pos))
    }

    pub fn try_advance<M: Access>(&self, pos: Position<M>) -> ListResult<Position<M>> {
        let at = self.check(pos)?;
        let next = self.raw.successor(at)?;
        Ok(Position::new(self.raw.owner_of(next), next))
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.raw)
    }

    /// A cursor parked on the sentinel.
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(&mut self.raw)
    }

    #[inline]
    fn position<M: Access>(&self, at: At) -> Position<M> {
        Position::new(self.raw.owner_of(at), at)
    }

    #[inline]
    fn check<M: Access>(&self, pos: Position<M>) -> ListResult<At> {
        self.raw.check(pos.owner(), pos.at())
    }
}

#[track_caller]
fn unwrap_position<U>(result: ListResult<U>) -> U {
    match result {
        Ok(value) => value,
        Err(err) => panic!("invalid list position: {err}"),
    }
}

fn alloc_failed(err: ListError) -> ListError {
    if err.kind() == ListErrorKind::AllocError {
        warn!("list node allocation failed");
    }
    err
}

/// Exchanges the contents of two lists. See [`ForwardList::swap`].
#[inline]
pub fn swap<T>(a: &mut ForwardList<T>, b: &mut ForwardList<T>) {
    a.swap(b);
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source.iter().cloned());
    }
}

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            raw: RawList::collect(iter),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for ForwardList<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> IntoIterator for ForwardList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Debug> Debug for ForwardList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

impl<T: PartialOrd> PartialOrd for ForwardList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for ForwardList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for ForwardList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}
