use alloc::collections::TryReserveError;
use core::{error::Error, fmt::Display};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListErrorKind {
    /// Storage for a new node could not be reserved.
    AllocError,
    /// The position was handed out by a different list.
    ForeignPosition,
    /// The node the position referred to has since been erased.
    StalePosition,
    /// The position is `end` or `before-begin` and has no element.
    NotDereferenceable,
    /// The position is `end`; nothing follows it.
    PastEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListError {
    kind: ListErrorKind,
}

impl ListError {
    pub fn kind(&self) -> ListErrorKind {
        self.kind
    }
}

impl Display for ListError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self.kind {
            ListErrorKind::AllocError => "failed to allocate a list node",
            ListErrorKind::ForeignPosition => "position belongs to a different list",
            ListErrorKind::StalePosition => "position refers to an erased node",
            ListErrorKind::NotDereferenceable => "position does not refer to an element",
            ListErrorKind::PastEnd => "position is past the end of the list",
        };
        f.write_str(msg)
    }
}

impl From<ListErrorKind> for ListError {
    fn from(value: ListErrorKind) -> Self {
        ListError { kind: value }
    }
}

impl From<TryReserveError> for ListError {
    fn from(_: TryReserveError) -> Self {
        ListErrorKind::AllocError.into()
    }
}

impl Error for ListError {}

pub type ListResult<T> = Result<T, ListError>;
