use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use ndarray::Array3;
use rectnbhd::access::RandomAccessibleInterval;
use rectnbhd::neighborhood::RectangleShape;
use rectnbhd::source::{ArraySource, BorderMode};

/// Counts the allocations made by the current thread while counting is on.
struct CountingAllocator;

thread_local! {
    static COUNTING: Cell<bool> = const { Cell::new(false) };
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn record() {
    let _ = COUNTING.try_with(|counting| {
        if counting.get() {
            let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
        }
    });
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc_zeroed(layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record();
        System.realloc(ptr, layout, new_size)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

/// Allocations made by `f` on this thread.
fn count_allocations<F: FnOnce()>(f: F) -> usize {
    ALLOCATIONS.with(|n| n.set(0));
    COUNTING.with(|counting| counting.set(true));
    f();
    COUNTING.with(|counting| counting.set(false));
    ALLOCATIONS.with(|n| n.get())
}

#[test]
fn test_moving_windows_does_not_allocate() {
    let array = Array3::<u8>::zeros((10, 10, 10));
    let source = ArraySource::new(array.view())
        .unwrap()
        .with_border(BorderMode::Constant(0));
    let shape = RectangleShape::new(1, false);

    // Every carry into dimensions 1 and 2 happens in this scan.
    let mut scan = shape.neighborhoods(&source).unwrap();
    let mut visited = 0u64;
    let allocations = count_allocations(|| {
        while scan.has_next() {
            scan.fwd();
            visited += 1;
        }
    });
    assert_eq!(visited, 1000);
    assert_eq!(allocations, 0, "scan allocated {} times", allocations);

    scan.reset();
    let allocations = count_allocations(|| {
        scan.jump_fwd(555);
        scan.reset();
    });
    assert_eq!(allocations, 0, "jump and reset allocated {} times", allocations);

    let mut access = shape
        .neighborhoods_random_accessible_within(&source, source.interval().clone())
        .unwrap();
    let allocations = count_allocations(|| {
        access.set_position(&[5, 5, 5]);
        access.set_position_dim(9, 1);
        access.fwd(0);
        access.bck(2);
        access.move_by(&[-3, 2, 1]);
    });
    assert_eq!(allocations, 0, "random access allocated {} times", allocations);
}
