use crate::{
    position::Position,
    raw::{At, RawList},
};

/// A cursor that holds the list mutably borrowed.
///
/// Because the borrow checker keeps every other handle away while the cursor
/// lives, its spot can never go stale. It starts on the sentinel and only
/// moves forward.
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    raw: &'a mut RawList<T>,
    at: At,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(raw: &'a mut RawList<T>) -> Self {
        Self {
            raw,
            at: At::BeforeBegin,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.raw.value(self.at).ok()
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.raw.value_mut(self.at).ok()
    }

    pub fn peek_next(&self) -> Option<&T> {
        let next = self.raw.successor(self.at).ok()?;
        self.raw.value(next).ok()
    }

    /// Steps to the next spot. Stays put once on `end`.
    pub fn move_next(&mut self) {
        if let Ok(next) = self.raw.successor(self.at) {
            self.at = next;
        }
    }

    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.at == At::BeforeBegin
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.at == At::End
    }

    /// Links `value` after the cursor without moving it. On `end` the value
    /// is handed back.
    pub fn insert_after(&mut self, value: T) -> Result<(), T> {
        if self.is_end() {
            return Err(value);
        }
        match self.raw.insert_after(self.at, value) {
            Ok(_) => Ok(()),
            Err(_) => unreachable!("cursor spot is always live"),
        }
    }

    pub fn remove_after(&mut self) -> Option<T> {
        self.raw
            .remove_after(self.at)
            .ok()
            .flatten()
            .map(|(value, _)| value)
    }

    /// A detached handle to the cursor's spot, usable once the cursor is gone.
    pub fn position(&self) -> Position {
        Position::new(self.raw.owner_of(self.at), self.at)
    }
}
