use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

use crate::error::{BufferError, Result};

/// Largest capacity a store may be allocated with.
#[cfg(target_pointer_width = "64")]
pub const MAX_LENGTH: usize = 1 << 32;

/// Largest capacity a store may be allocated with.
#[cfg(not(target_pointer_width = "64"))]
pub const MAX_LENGTH: usize = isize::MAX as usize;

/// How a freshly allocated store is initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    /// Every byte is zero
    Zeroed,
    /// Contents are unspecified; the caller overwrites them before reading
    Unspecified,
}

/// A fixed-capacity memory region shared by any number of views.
///
/// Cloning a `ByteStore` takes another reference to the same region;
/// the region is freed when the last reference goes away. The capacity
/// never changes after allocation.
#[derive(Clone)]
pub struct ByteStore {
    region: Rc<RefCell<Box<[u8]>>>,
    capacity: usize,
}

impl ByteStore {
    /// Allocates a new store of `size` bytes.
    ///
    /// # Errors
    ///
    /// - `BufferError::InvalidSize` if `size` exceeds `MAX_LENGTH`
    /// - `BufferError::AllocationFailed` if the allocator refuses the request
    pub fn allocate(size: usize, init: Init) -> Result<Self> {
        if size > MAX_LENGTH {
            tracing::debug!(size, max = MAX_LENGTH, "rejecting oversized allocation");
            return Err(BufferError::InvalidSize {
                requested: size,
                max: MAX_LENGTH,
            });
        }

        let mut region = Vec::new();
        if region.try_reserve_exact(size).is_err() {
            tracing::debug!(size, "allocator refused store");
            return Err(BufferError::AllocationFailed { size });
        }
        // Safe code cannot hand out uninitialized memory, so `Unspecified`
        // still gets a defined (zero) pattern. Callers must not rely on it.
        region.resize(size, 0);
        tracing::trace!(size, ?init, "allocated store");

        Ok(Self::from_vec(region))
    }

    pub(crate) fn from_vec(region: Vec<u8>) -> Self {
        Self {
            capacity: region.len(),
            region: Rc::new(RefCell::new(region.into_boxed_slice())),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live handles (stores and views) referencing the region.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.region)
    }

    /// Drops this reference and returns how many remain.
    ///
    /// A return value of 0 means the region has been deallocated.
    pub fn release(self) -> usize {
        let remaining = Rc::strong_count(&self.region) - 1;
        drop(self);
        remaining
    }

    /// Whether both handles refer to the same region.
    #[must_use]
    pub fn same_region(&self, other: &ByteStore) -> bool {
        Rc::ptr_eq(&self.region, &other.region)
    }

    /// # Panics
    ///
    /// Panics if the region is currently borrowed mutably.
    pub(crate) fn borrow(&self) -> Ref<'_, Box<[u8]>> {
        self.region.borrow()
    }

    /// # Panics
    ///
    /// Panics if the region is currently borrowed.
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, Box<[u8]>> {
        self.region.borrow_mut()
    }
}

impl core::fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ByteStore {{ capacity: {:?}, ref_count: {:?} }}",
            self.capacity(),
            self.ref_count()
        )
    }
}
