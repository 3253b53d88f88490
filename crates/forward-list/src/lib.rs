//! A singly linked list with a sentinel node and checked positions.
//!
//! ```
//! use forward_list::ForwardList;
//!
//! let mut list = ForwardList::from([2, 3]);
//! let front = list.insert_after(list.before_begin(), 1);
//! assert_eq!(*list.get(front), 1);
//! assert!(list.iter().copied().eq([1, 2, 3]));
//!
//! list.erase_after(list.before_begin());
//! assert_eq!(list, ForwardList::from([2, 3]));
//! ```
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        {
            ::log::trace!($($arg)+);
        }
        #[cfg(not(feature = "log"))]
        {
            let _ = format_args!($($arg)+);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        {
            ::log::debug!($($arg)+);
        }
        #[cfg(not(feature = "log"))]
        {
            let _ = format_args!($($arg)+);
        }
    }};
}

macro_rules! warn {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        {
            ::log::warn!($($arg)+);
        }
        #[cfg(not(feature = "log"))]
        {
            let _ = format_args!($($arg)+);
        }
    }};
}

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
pub mod position;
mod raw;

pub use cursor::CursorMut;
pub use error::{ListError, ListErrorKind, ListResult};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{swap, ForwardList};
pub use position::{Access, Const, ConstPosition, Mut, Position};
