//! Shared ownership helpers.

use std::{
	cell::{Ref, RefCell, RefMut},
	rc::Rc,
};

/// A reference-counted, interior-mutable cell.
///
/// Environment frames live behind this: the block executing in a frame and
/// every closure that captured it each hold one clone, and the frame is dropped
/// when the last of them goes away. Cloning is shallow.
#[derive(Debug, Default)]
pub(crate) struct RcCell<T> {
	inner: Rc<RefCell<T>>,
}

impl<T> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: Rc::clone(&self.inner) } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }

	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// Whether both cells point at the same allocation.
	#[cfg(test)]
	pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }

	/// Number of live handles to this cell.
	#[cfg(test)]
	pub fn strong_count(&self) -> usize { Rc::strong_count(&self.inner) }
}

impl<T> From<T> for RcCell<T> {
	fn from(value: T) -> Self { Self::new(value) }
}
