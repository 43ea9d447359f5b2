use parking_lot::{Mutex, MutexGuard};
use std::{
    cell::{RefCell, RefMut},
    ops::DerefMut,
};

/// The backing for the single cache slot of a memoized function.
///
/// The slot is locked for the whole read-compare-compute-write sequence, so a
/// [`SyncStorage`] slot is atomic as a unit when shared between threads.
pub trait Storage: 'static {
    /// The cell that owns the slot.
    type Cell<T>;
    /// The guard returned while the slot is locked.
    type Mut<'a, T: 'a>: DerefMut<Target = T>;

    /// Create a new cell holding `value`.
    fn new_cell<T>(value: T) -> Self::Cell<T>;

    /// Lock the cell for exclusive access.
    ///
    /// Locking a slot that is already locked by the current caller is a re-entrant use of the same
    /// memoized function: [`UnsyncStorage`] panics and [`SyncStorage`] deadlocks.
    fn lock<'a, T: 'a>(cell: &'a Self::Cell<T>) -> Self::Mut<'a, T>;
}

/// A single threaded storage. This is the default storage type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsyncStorage;

impl Storage for UnsyncStorage {
    type Cell<T> = RefCell<T>;
    type Mut<'a, T: 'a> = RefMut<'a, T>;

    fn new_cell<T>(value: T) -> Self::Cell<T> {
        RefCell::new(value)
    }

    #[track_caller]
    fn lock<'a, T: 'a>(cell: &'a Self::Cell<T>) -> Self::Mut<'a, T> {
        cell.borrow_mut()
    }
}

/// A thread safe storage backed by a [`parking_lot::Mutex`].
///
/// Selectors using this storage are `Send + Sync` when their inputs, result function and equality
/// policy are.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStorage;

impl Storage for SyncStorage {
    type Cell<T> = Mutex<T>;
    type Mut<'a, T: 'a> = MutexGuard<'a, T>;

    fn new_cell<T>(value: T) -> Self::Cell<T> {
        Mutex::new(value)
    }

    fn lock<'a, T: 'a>(cell: &'a Self::Cell<T>) -> Self::Mut<'a, T> {
        cell.lock()
    }
}
