use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use forward_list::ForwardList;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

/// Counts allocations made by the current thread.
struct CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

#[test]
fn swap_does_no_per_element_work() {
    let mut small: ForwardList<u64> = (0..4).collect();
    let mut large: ForwardList<u64> = (0..10_000).collect();

    let before = allocations();
    small.swap(&mut large);
    forward_list::swap(&mut small, &mut large);
    small.swap(&mut large);
    let after = allocations();

    assert_eq!(after, before);
    assert_eq!(small.len(), 10_000);
    assert_eq!(large.len(), 4);
}

#[test]
fn clear_keeps_storage_for_reuse() {
    let mut list: ForwardList<u64> = (0..64).collect();
    list.clear();

    let before = allocations();
    for i in 0..64 {
        list.push_front(i);
    }
    assert_eq!(allocations(), before);
    assert_eq!(list.len(), 64);
}
