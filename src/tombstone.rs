/*! Tombstones

A *tombstone* is a bit pattern that no valid value of a type can ever
produce. A type with `N` tombstones can encode "there is no value here,
and this is absence number `k`" for `k` in `0 .. N` at zero storage
cost — which is everything an `Option` needs, and more: the surplus
indices let wrappers nest without growing.

The [`Tombstone`] trait expresses a type's tombstones over an explicit
[`Storage`] representation, since a Rust value itself cannot hold an
invalid pattern. Every implementation uses the same arithmetic: the
distinguishing bits store `index + 1` for a tombstone and `0` for a
live value, and [`tombstone_index`] subtracts one with wraparound, so a
live value reads as an enormous out-of-range index with no branch.

Sources of tombstones, in the order a type usually prefers them:

1. spare bits, for any `Default + SpareBits` type, via the opt-in
   [`tombstone_via_spare!`] macro;
2. padding bits, for any `Default + Copy + Padding` type, via
   [`tombstone_via_padding!`];
3. a tiny type's own narrow width, via the [`Tiny`] wrapper, which tags
   a sub-byte field with the rest of its byte;
4. invalid pointer alignments, implemented directly for raw pointers
   and [`AlignedPtr`](crate::aligned::AlignedPtr).

The spare-bits route is deliberately *not* a blanket implementation: a
tombstone built on spare bits misreads a live value as absent the
moment any other code stores data in those same spare bits. Opting in
per type is the declaration that nothing else writes them.

[`Storage`]: Tombstone::Storage
[`tombstone_index`]: Tombstone::tombstone_index
!*/

use core::marker::PhantomData;

use crate::{
	macros::precondition,
	mem::mask,
	tiny::TinyType,
};

/** Capability of a type to encode absence in otherwise-unused bit
patterns.

The storage type is a plain `Copy` bag of bits that can represent
every valid value *and* every tombstone; values move in and out of it
through the four conversion functions. The contract:

- `tombstone_index(store_tombstone(k)) == k` for `k < TOMBSTONES`;
- `tombstone_index(store_value(v)) >= TOMBSTONES` for every valid `v`;
- `load_value(store_value(v)) == v`.
**/
pub trait Tombstone: Sized {
	/// The representation holding either a live value or a tombstone.
	type Storage: Copy;

	/// The number of distinct tombstones available.
	const TOMBSTONES: usize;

	/// Encodes a live value.
	fn store_value(value: Self) -> Self::Storage;

	/// Decodes a live value. The storage must hold one.
	fn load_value(storage: &Self::Storage) -> Self;

	/// Encodes tombstone number `index`, which must be below
	/// `TOMBSTONES`.
	fn store_tombstone(index: usize) -> Self::Storage;

	/// Decodes the tombstone number, or an out-of-range index if the
	/// storage holds a live value.
	fn tombstone_index(storage: &Self::Storage) -> usize;

	/// Whether the storage holds a tombstone rather than a live value.
	fn is_tombstone(storage: &Self::Storage) -> bool {
		Self::tombstone_index(storage) < Self::TOMBSTONES
	}
}

/// A boolean occupies one byte but uses only the patterns `0` and `1`;
/// the other 254 split into 127 tombstones under the shift-one
/// encoding.
impl Tombstone for bool {
	type Storage = u8;

	const TOMBSTONES: usize = 127;

	#[inline]
	fn store_value(value: Self) -> u8 {
		value as u8
	}

	#[inline]
	fn load_value(storage: &u8) -> Self {
		precondition!(
			*storage <= 1,
			"storage {:#x} does not hold a boolean",
			storage,
		);
		*storage != 0
	}

	#[inline]
	fn store_tombstone(index: usize) -> u8 {
		precondition!(
			index < Self::TOMBSTONES,
			"tombstone index {} out of range for {}",
			index,
			Self::TOMBSTONES,
		);
		((index as u8) + 1) << 1
	}

	#[inline]
	fn tombstone_index(storage: &u8) -> usize {
		((*storage >> 1) as usize).wrapping_sub(1)
	}
}

/// A pointer to a type of alignment `A` can never carry the raw
/// addresses `1 .. A`, so those serve as `A - 1` tombstones. Pointers
/// to unaligned types get none.
impl<T> Tombstone for *mut T {
	type Storage = *mut T;

	const TOMBSTONES: usize = core::mem::align_of::<T>() - 1;

	#[inline]
	fn store_value(value: Self) -> Self {
		precondition!(
			value as usize % core::mem::align_of::<T>() == 0,
			"pointer {:p} is not aligned for its pointee",
			value,
		);
		value
	}

	#[inline]
	fn load_value(storage: &Self) -> Self {
		*storage
	}

	#[inline]
	fn store_tombstone(index: usize) -> Self {
		precondition!(
			index < Self::TOMBSTONES,
			"tombstone index {} out of range for {}",
			index,
			Self::TOMBSTONES,
		);
		(index + 1) as *mut T
	}

	#[inline]
	fn tombstone_index(storage: &Self) -> usize {
		(*storage as usize % core::mem::align_of::<T>()).wrapping_sub(1)
	}
}

/// As for `*mut T`.
impl<T> Tombstone for *const T {
	type Storage = *const T;

	const TOMBSTONES: usize = core::mem::align_of::<T>() - 1;

	#[inline]
	fn store_value(value: Self) -> Self {
		precondition!(
			value as usize % core::mem::align_of::<T>() == 0,
			"pointer {:p} is not aligned for its pointee",
			value,
		);
		value
	}

	#[inline]
	fn load_value(storage: &Self) -> Self {
		*storage
	}

	#[inline]
	fn store_tombstone(index: usize) -> Self {
		precondition!(
			index < Self::TOMBSTONES,
			"tombstone index {} out of range for {}",
			index,
			Self::TOMBSTONES,
		);
		(index + 1) as *const T
	}

	#[inline]
	fn tombstone_index(storage: &Self) -> usize {
		(*storage as usize % core::mem::align_of::<T>()).wrapping_sub(1)
	}
}

/** A tiny-typed value carrying an implicit absence tag in the rest of
its byte.

A field kind of width `w < 8` leaves `8 - w` bits of its byte unused;
`Tiny<T>` stores the field in the low bits and the shift-one tombstone
tag above it, yielding `2^(8 - w) - 1` tombstones in exactly one byte.
Widths of eight or more bits fail at compile time.
**/
pub struct Tiny<T: TinyType>(pub T::Object);

impl<T: TinyType> Tombstone for Tiny<T> {
	type Storage = u8;

	const TOMBSTONES: usize = (1 << (8 - T::BITS)) - 1;

	fn store_value(value: Self) -> u8 {
		T::encode(value.0) as u8
	}

	fn load_value(storage: &u8) -> Self {
		Tiny(T::decode(*storage as u64 & mask(T::BITS)))
	}

	fn store_tombstone(index: usize) -> u8 {
		precondition!(
			index < Self::TOMBSTONES,
			"tombstone index {} out of range for {}",
			index,
			Self::TOMBSTONES,
		);
		((index + 1) as u8) << T::BITS
	}

	fn tombstone_index(storage: &u8) -> usize {
		((*storage >> T::BITS) as usize).wrapping_sub(1)
	}
}

/** Implements [`Tombstone`] for a type out of its spare bits.

Requires the type to implement [`SpareBits`](crate::spare::SpareBits),
`Default`, and `Copy`. The live encoding is the packed representation,
whose spare bits are zero; tombstone `k` is a default-constructed
representation with `k + 1` in the spare bits.

This is an opt-in macro rather than a blanket implementation on
purpose: invoking it asserts that nothing else ever writes the type's
spare bits, since any such write could make a live value look dead.

```rust
use tinybits::{enumerated, tombstone_via_spare, tombstone::Tombstone};

enumerated! {
	#[derive(Default)]
	pub enum Gear {
		#[default]
		Neutral,
		Forward,
		Reverse,
	}
}

tombstone_via_spare!(Gear);

//  two value bits leave six spare: 63 tombstones in one byte
assert_eq!(<Gear as Tombstone>::TOMBSTONES, 63);
```
**/
#[macro_export]
macro_rules! tombstone_via_spare {
	($type:ty) => {
		impl $crate::tombstone::Tombstone for $type {
			type Storage = <$type as $crate::spare::SpareBits>::Repr;

			const TOMBSTONES: usize = (1usize
				<< $crate::mem::cap_word(
					<$type as $crate::spare::SpareBits>::SPARE_BITS,
				)) - 1;

			fn store_value(value: Self) -> Self::Storage {
				<$type as $crate::spare::SpareBits>::pack(value)
			}

			fn load_value(storage: &Self::Storage) -> Self {
				<$type as $crate::spare::SpareBits>::unpack(*storage)
			}

			fn store_tombstone(index: usize) -> Self::Storage {
				debug_assert!(
					index < Self::TOMBSTONES,
					"tombstone index {} out of range for {}",
					index,
					Self::TOMBSTONES,
				);
				let mut repr = <$type as $crate::spare::SpareBits>::pack(
					<$type as ::core::default::Default>::default(),
				);
				<$type as $crate::spare::SpareBits>::put_spare(
					&mut repr,
					index as u64 + 1,
				);
				repr
			}

			fn tombstone_index(storage: &Self::Storage) -> usize {
				(<$type as $crate::spare::SpareBits>::spare(storage) as usize)
					.wrapping_sub(1)
			}
		}
	};
}

/** Implements [`Tombstone`] for a type out of its padding bits.

Requires the type to implement [`Padding`](crate::padding::Padding),
`Default` in spirit (the zero pattern is used for tombstone carriers),
and `Copy`. Storage is `MaybeUninit<T>`, which preserves padding bytes
across moves where a typed copy would not. Up to `word - 1` padding
bits carry the shift-one tombstone tag; live values are stored with
their padding zeroed.

```rust
use tinybits::{padding, tombstone_via_padding, tombstone::Tombstone};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
	key: u8,
	value: u32,
}

padding! {
	struct Entry {
		key: u8,
		value: u32,
	}
}

tombstone_via_padding!(Entry);

//  three padding bytes yield 2^24 - 1 tombstones
assert_eq!(<Entry as Tombstone>::TOMBSTONES, (1 << 24) - 1);
```
**/
#[macro_export]
macro_rules! tombstone_via_padding {
	($type:ty) => {
		impl $crate::tombstone::Tombstone for $type {
			type Storage = ::core::mem::MaybeUninit<$type>;

			const TOMBSTONES: usize = (1usize
				<< $crate::mem::cap_word(
					<$type as $crate::padding::Padding>::PADDING_BITS,
				)) - 1;

			fn store_value(value: Self) -> Self::Storage {
				let mut storage = ::core::mem::MaybeUninit::new(value);
				unsafe {
					$crate::padding::clear_padding_raw::<$type>(
						storage.as_mut_ptr() as *mut u8,
					);
				}
				storage
			}

			fn load_value(storage: &Self::Storage) -> Self {
				unsafe { storage.assume_init_read() }
			}

			fn store_tombstone(index: usize) -> Self::Storage {
				debug_assert!(
					index < Self::TOMBSTONES,
					"tombstone index {} out of range for {}",
					index,
					Self::TOMBSTONES,
				);
				let mut storage =
					::core::mem::MaybeUninit::<$type>::zeroed();
				let bytes = unsafe {
					::core::slice::from_raw_parts_mut(
						storage.as_mut_ptr() as *mut u8,
						::core::mem::size_of::<$type>(),
					)
				};
				let tag_bits = $crate::mem::cap_word(
					<$type as $crate::padding::Padding>::PADDING_BITS,
				);
				$crate::view::BitsMut::store(
					&mut $crate::view::Bits::subview(
						$crate::padding::PaddingBitsMut::new::<$type>(bytes),
						0,
						tag_bits,
					),
					index as u64 + 1,
				);
				storage
			}

			fn tombstone_index(storage: &Self::Storage) -> usize {
				let bytes = unsafe {
					::core::slice::from_raw_parts(
						storage.as_ptr() as *const u8,
						::core::mem::size_of::<$type>(),
					)
				};
				let tag_bits = $crate::mem::cap_word(
					<$type as $crate::padding::Padding>::PADDING_BITS,
				);
				($crate::view::Bits::load(&$crate::view::Bits::subview(
					$crate::padding::PaddingBits::new::<$type>(bytes),
					0,
					tag_bits,
				)) as usize)
					.wrapping_sub(1)
			}
		}
	};
}

/** An optional that costs no storage beyond its payload.

`TinyOption<T>` reserves the *highest* tombstone of `T` as its own
empty state; every other pattern, live or tombstone, passes through
unchanged. It therefore implements [`Tombstone`] itself with one
tombstone fewer than `T`, so options nest at constant size:
`TinyOption<TinyOption<bool>>` is still a single byte, with 125
tombstones left over.

```rust
use tinybits::tombstone::TinyOption;

let mut slot = TinyOption::<bool>::none();
assert!(slot.is_none());
slot.set(Some(true));
assert_eq!(slot.get(), Some(true));
assert_eq!(slot.take(), Some(true));
assert!(slot.is_none());
assert_eq!(core::mem::size_of::<TinyOption<bool>>(), 1);
```
**/
pub struct TinyOption<T: Tombstone> {
	storage: T::Storage,
	_value: PhantomData<T>,
}

impl<T: Tombstone> TinyOption<T> {
	/// The tombstone index this wrapper claims for its empty state.
	const EMPTY: usize = T::TOMBSTONES - 1;

	/// Creates an empty optional.
	pub fn none() -> Self {
		Self {
			storage: T::store_tombstone(Self::EMPTY),
			_value: PhantomData,
		}
	}

	/// Creates an occupied optional.
	pub fn some(value: T) -> Self {
		Self {
			storage: T::store_value(value),
			_value: PhantomData,
		}
	}

	/// Converts from an ordinary `Option`.
	pub fn new(value: Option<T>) -> Self {
		match value {
			Some(value) => Self::some(value),
			None => Self::none(),
		}
	}

	/// Whether a value is present.
	pub fn is_some(&self) -> bool {
		T::tombstone_index(&self.storage) != Self::EMPTY
	}

	/// Whether the optional is empty.
	pub fn is_none(&self) -> bool {
		!self.is_some()
	}

	/// Reads the value, if present.
	pub fn get(&self) -> Option<T> {
		if self.is_some() {
			Some(T::load_value(&self.storage))
		}
		else {
			None
		}
	}

	/// Overwrites the optional.
	pub fn set(&mut self, value: Option<T>) {
		*self = Self::new(value);
	}

	/// Removes and returns the value, leaving the optional empty.
	pub fn take(&mut self) -> Option<T> {
		let value = self.get();
		*self = Self::none();
		value
	}
}

impl<T: Tombstone> Default for TinyOption<T> {
	fn default() -> Self {
		Self::none()
	}
}

impl<T: Tombstone> Clone for TinyOption<T> {
	fn clone(&self) -> Self {
		Self {
			storage: self.storage,
			_value: PhantomData,
		}
	}
}

impl<T: Tombstone> Copy for TinyOption<T> {
}

impl<T: Tombstone> From<Option<T>> for TinyOption<T> {
	fn from(value: Option<T>) -> Self {
		Self::new(value)
	}
}

impl<T> core::fmt::Debug for TinyOption<T>
where
	T: Tombstone + core::fmt::Debug,
{
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
		core::fmt::Debug::fmt(&self.get(), fmt)
	}
}

/// A `TinyOption` lends out every tombstone of `T` it does not itself
/// claim, which is what lets optionals nest for free.
impl<T: Tombstone> Tombstone for TinyOption<T> {
	type Storage = T::Storage;

	const TOMBSTONES: usize = T::TOMBSTONES - 1;

	fn store_value(value: Self) -> T::Storage {
		value.storage
	}

	fn load_value(storage: &T::Storage) -> Self {
		Self {
			storage: *storage,
			_value: PhantomData,
		}
	}

	fn store_tombstone(index: usize) -> T::Storage {
		precondition!(
			index < Self::TOMBSTONES,
			"tombstone index {} out of range for {}",
			index,
			Self::TOMBSTONES,
		);
		T::store_tombstone(index)
	}

	fn tombstone_index(storage: &T::Storage) -> usize {
		//  the inner empty state reads as index `TOMBSTONES`, which is
		//  out of range here, exactly like a live value
		T::tombstone_index(storage)
	}
}
