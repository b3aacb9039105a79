/*! Proxy accessors for packed fields

A packed field has no address, so no true reference to it can exist.
These proxies stand in for references: each pairs a [`TinyType`] kind
with a view of exactly that kind's width, and translates between object
values and field bits on every access. A proxy is created by a field
accessor, used within the access expression, and dropped; it borrows
the backing storage for its whole lifetime, so the borrow checker
prevents it from outliving the cells it reads.

Writes go straight through to the storage — nothing is cached in the
proxy — and compound operations are plain read-modify-write sequences
with no atomicity.
!*/

use core::{
	fmt::{
		self,
		Debug,
		Formatter,
	},
	marker::PhantomData,
};

use tap::Pipe;

use crate::{
	macros::precondition,
	tiny::{
		TinyInteger,
		TinyType,
	},
	view::{
		Bits,
		BitsMut,
	},
};

/** A read-only stand-in for a packed field of kind `T`.

Obtained from the getter accessors of the storage types, or directly
from [`tiny_ref`] over any view of width `T::BITS`.

[`tiny_ref`]: crate::tiny::tiny_ref
**/
pub struct TinyRef<T: TinyType, B: Bits> {
	pub(crate) view: B,
	pub(crate) _kind: PhantomData<fn() -> T>,
}

/** A writable stand-in for a packed field of kind `T`.

Mutation through the proxy commits to the underlying cells immediately.
Integer kinds additionally implement the compound assignment operators;
bind the proxy to use them:

```rust
use tinybits::prelude::*;

let mut cell = 0u8;
let mut field = tiny_mut::<TinyUnsigned<u8, 4>, _>(cell.bits_mut(0 .. 4));
field.set(3);
field += 2;
assert_eq!(field.get(), 5);
```
**/
pub struct TinyMut<T: TinyType, B: BitsMut> {
	pub(crate) view: B,
	pub(crate) _kind: PhantomData<fn() -> T>,
}

impl<T: TinyType, B: Bits> TinyRef<T, B> {
	/// Wraps a view in a read proxy. The view must be exactly
	/// `T::BITS` wide.
	pub fn new(view: B) -> Self {
		precondition!(
			view.len() == T::BITS,
			"a {}-bit view cannot carry a {}-bit field",
			view.len(),
			T::BITS,
		);
		Self {
			view,
			_kind: PhantomData,
		}
	}

	/// Reads the field.
	pub fn get(&self) -> T::Object {
		self.view.load().pipe(T::decode)
	}
}

impl<T: TinyType, B: BitsMut> TinyMut<T, B> {
	/// Wraps a view in a write proxy. The view must be exactly
	/// `T::BITS` wide.
	pub fn new(view: B) -> Self {
		precondition!(
			view.len() == T::BITS,
			"a {}-bit view cannot carry a {}-bit field",
			view.len(),
			T::BITS,
		);
		Self {
			view,
			_kind: PhantomData,
		}
	}

	/// Reads the field.
	pub fn get(&self) -> T::Object {
		self.view.load().pipe(T::decode)
	}

	/// Writes the field. Out-of-range values are a debug-checked
	/// precondition violation.
	pub fn set(&mut self, value: T::Object) {
		self.view.store(T::encode(value));
	}

	/// Writes the field and returns its previous value.
	pub fn replace(&mut self, value: T::Object) -> T::Object {
		let old = self.get();
		self.set(value);
		old
	}

	/// Rewrites the field through a function of its current value.
	pub fn update<F: FnOnce(T::Object) -> T::Object>(&mut self, func: F) {
		let value = self.get().pipe(func);
		self.set(value);
	}
}

impl<T, B> Debug for TinyRef<T, B>
where
	T: TinyType,
	T::Object: Debug,
	B: Bits,
{
	fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
		self.get().fmt(fmt)
	}
}

impl<T, B> Debug for TinyMut<T, B>
where
	T: TinyType,
	T::Object: Debug,
	B: BitsMut,
{
	fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
		self.get().fmt(fmt)
	}
}

impl<T, B> PartialEq<T::Object> for TinyRef<T, B>
where
	T: TinyType,
	T::Object: PartialEq,
	B: Bits,
{
	fn eq(&self, other: &T::Object) -> bool {
		self.get() == *other
	}
}

impl<T, B> PartialEq<T::Object> for TinyMut<T, B>
where
	T: TinyType,
	T::Object: PartialEq,
	B: BitsMut,
{
	fn eq(&self, other: &T::Object) -> bool {
		self.get() == *other
	}
}

impl<T, B1, B2> PartialEq<TinyRef<T, B2>> for TinyRef<T, B1>
where
	T: TinyType,
	T::Object: PartialEq,
	B1: Bits,
	B2: Bits,
{
	fn eq(&self, other: &TinyRef<T, B2>) -> bool {
		self.get() == other.get()
	}
}

/// Routes the compound assignment operators on integer-kind proxies
/// through a read-modify-write of the field.
macro_rules! arithmetic {
	($($assign:ident :: $assign_fn:ident via $base:ident :: $base_fn:ident;)+) => { $(
		impl<T, B> core::ops::$assign<T::Object> for TinyMut<T, B>
		where
			T: TinyInteger,
			T::Object: core::ops::$base<Output = T::Object>,
			B: BitsMut,
		{
			#[inline]
			fn $assign_fn(&mut self, rhs: T::Object) {
				self.update(|value| core::ops::$base::$base_fn(value, rhs));
			}
		}
	)+ };
}

arithmetic! {
	AddAssign::add_assign via Add::add;
	SubAssign::sub_assign via Sub::sub;
	MulAssign::mul_assign via Mul::mul;
	DivAssign::div_assign via Div::div;
	RemAssign::rem_assign via Rem::rem;
}
