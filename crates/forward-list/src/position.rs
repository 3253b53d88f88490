use core::{
    fmt::Debug,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::raw::{At, ListId};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Mut {}
    impl Sealed for super::Const {}
}

/// Access granted through a [`Position`].
pub trait Access: sealed::Sealed {}

/// Marker for positions that may be written through.
#[derive(Debug)]
pub enum Mut {}

/// Marker for read-only positions.
#[derive(Debug)]
pub enum Const {}

impl Access for Mut {}
impl Access for Const {}

/// A non-owning handle to a spot in a [`ForwardList`](crate::ForwardList):
/// the sentinel (`before-begin`), one element, or `end`.
///
/// Positions do not borrow the list. Every operation that takes one checks
/// that it came from that list and that its node has not been erased since,
/// so a stale position is reported instead of silently reading another
/// element.
pub struct Position<M: Access = Mut> {
    owner: ListId,
    at: At,
    _p: PhantomData<fn() -> M>,
}

pub type ConstPosition = Position<Const>;

impl<M: Access> Position<M> {
    #[inline]
    pub(crate) fn new(owner: ListId, at: At) -> Self {
        Self {
            owner,
            at,
            _p: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn owner(&self) -> ListId {
        self.owner
    }

    #[inline]
    pub(crate) fn at(&self) -> At {
        self.at
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.at == At::End
    }

    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.at == At::BeforeBegin
    }

    #[inline]
    pub fn as_const(self) -> ConstPosition {
        Position::new(self.owner, self.at)
    }
}

impl From<Position<Mut>> for ConstPosition {
    #[inline]
    fn from(value: Position<Mut>) -> Self {
        value.as_const()
    }
}

impl<M: Access> Clone for Position<M> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Access> Copy for Position<M> {}

impl<A: Access, B: Access> PartialEq<Position<B>> for Position<A> {
    #[inline]
    fn eq(&self, other: &Position<B>) -> bool {
        self.owner == other.owner && self.at == other.at
    }
}

impl<M: Access> Eq for Position<M> {}

impl<M: Access> Hash for Position<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.at.hash(state);
    }
}

impl<M: Access> Debug for Position<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Position")
            .field("owner", &self.owner)
            .field("at", &self.at)
            .finish()
    }
}
