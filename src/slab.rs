use std::mem;

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(usize);

// Every node stores three of these, so keep them as small as a plain index
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), mem::size_of::<usize>());
// Using `Option<usize>` directly would use twice the space.
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 2 * mem::size_of::<usize>());

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl Ptr {
    #[inline(always)]
    pub fn new(index: usize) -> Option<Self> {
        if index == usize::MAX {
            None
        } else {
            Some(Ptr(index))
        }
    }

    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    /// Returns `Some(self)` unless this is the null pointer
    ///
    /// Lets tree walks be written as `while let Some(ptr) = current.non_null()`.
    #[inline(always)]
    pub fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// An item in the free list, pointing at the next free entry or `Ptr::null()` if this is the
    /// last entry in the free list
    Free { next: Ptr },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Indexes are not shifted when an individual item is removed. Instead of always pushing items
/// after the previously pushed item, the slab reuses space from previously removed entries when
/// possible. A `Ptr` returned from `push` stays valid until that entry is removed or the slab is
/// cleared.
#[derive(Debug, Clone)]
pub(crate) struct Slab<T> {
    items: Vec<Entry<T>>,
    /// The first entry of the free list or `Ptr::null()` if the free list is empty
    ///
    /// The free list is a linked list threaded through `items` and used as a stack.
    free_list_head: Ptr,
    /// The length of the free list
    free_len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            items: Vec::default(),
            free_list_head: Ptr::null(),
            free_len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab will not allocate until it is first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab able to hold at least `capacity` elements without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    pub fn len(&self) -> usize {
        self.items.len() - self.free_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns a reference to a value in the slab
    ///
    /// Panics if `ptr` is null, out of bounds or was previously removed.
    pub fn get(&self, ptr: Ptr) -> &T {
        match ptr.into_index().and_then(|index| self.items.get(index)) {
            Some(Entry::Occupied(value)) => value,
            _ => panic!("`Slab::get()` - {:?} does not point to a value", ptr),
        }
    }

    /// Returns a mutable reference to a value in the slab
    ///
    /// Panics if `ptr` is null, out of bounds or was previously removed.
    pub fn get_mut(&mut self, ptr: Ptr) -> &mut T {
        let entry = match ptr.into_index() {
            Some(index) => self.items.get_mut(index),
            None => None,
        };
        match entry {
            Some(Entry::Occupied(value)) => value,
            _ => panic!("`Slab::get_mut()` - {:?} does not point to a value", ptr),
        }
    }

    /// Pushes a value into the slab and returns a pointer to where it was inserted
    ///
    /// The item may be placed at the end of the list or in the space of a previously removed item.
    pub fn push(&mut self, value: T) -> Ptr {
        // Check if we can reuse some space from the free list
        if let Some(index) = self.free_list_head.into_index() {
            let entry = mem::replace(&mut self.items[index], Entry::Occupied(value));
            match entry {
                Entry::Free {next} => self.free_list_head = next,
                Entry::Occupied(_) => unreachable!("free list pointed at an occupied entry"),
            }
            self.free_len -= 1;

            return Ptr(index);
        }

        let index = self.items.len();
        // Since we store `Ptr` internally, we can't have usize::MAX as a valid index into the slab
        let ptr = match Ptr::new(index) {
            Some(ptr) => ptr,
            None => panic!("cannot have more than usize::MAX - 1 entries in slab"),
        };
        self.items.push(Entry::Occupied(value));

        ptr
    }

    /// Removes an item from the slab, returning its value.
    ///
    /// The space for the item will be reused in future calls to `push`. No other entries move.
    ///
    /// Panics if `ptr` does not point to a value.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let index = match ptr.into_index() {
            Some(index) if index < self.items.len() => index,
            _ => panic!("`Slab::remove()` - {:?} is out of bounds", ptr),
        };

        let entry = mem::replace(&mut self.items[index], Entry::Free {next: self.free_list_head});
        match entry {
            Entry::Occupied(value) => {
                self.free_list_head = ptr;
                self.free_len += 1;
                value
            },

            Entry::Free {next} => {
                // Put things back the way they were before failing
                self.items[index] = Entry::Free {next};
                panic!("`Slab::remove()` - {:?} was already removed", ptr)
            },
        }
    }

    /// Clears the slab, dropping all values
    ///
    /// Has no effect on the allocated capacity. Invalidates every pointer returned from `push`.
    pub fn clear(&mut self) {
        self.items.clear();
        self.free_list_head = Ptr::null();
        self.free_len = 0;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional)
    }

    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit()
    }
}
