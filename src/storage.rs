/*! Packed field storage

[`tiny_storage!`] declares a struct that packs an ordered list of tiny
fields into a byte array of exactly `ceil(total_bits / 8)` bytes (one
byte minimum). Fields pack low-bit-first in declaration order: field
`i` occupies bits `[Σw(0..i), Σw(0..i) + wi)` of the array, counting
from the least significant bit of byte zero, regardless of host byte
order. The offsets are prefix sums computed at compile time.

Fields are addressed by name. Each field gets a getter returning its
object value, a `set_` writer, and a `_mut` accessor returning a
[`TinyMut`](crate::tiny::TinyMut) proxy for compound operations. The
all-zero state is the default, and every field kind reads the all-zero
pattern as a valid object.

Any bits of the final byte beyond the declared fields are *spare*:
[`TinyStorage::spare_bits_mut`] exposes them for collaborators to use
without disturbing the fields.

[`tiny_ptr_storage!`] is a sibling policy that stores its fields inside
the alignment bits of a pointer, spilling into an auxiliary array only
when they do not fit.
!*/

use crate::view::{
	AsBits,
	AsBitsMut,
	BitView,
	BitViewMut,
};

/** Common surface of the structs declared by [`tiny_storage!`].

`TOTAL_BITS` counts the declared fields only; the raw array may carry
up to seven additional spare bits in its final byte.
**/
pub trait TinyStorage {
	/// Number of bits occupied by the declared fields.
	const TOTAL_BITS: usize;

	/// The backing byte array.
	fn raw(&self) -> &[u8];

	/// The backing byte array, mutably. Overwriting field bits through
	/// this view bypasses the kinds' validity checks.
	fn raw_mut(&mut self) -> &mut [u8];

	/// Views the bits of the final byte not claimed by any field.
	fn spare_bits(&self) -> BitView<'_, u8> {
		let capacity = self.raw().len() * 8;
		self.raw().bits(Self::TOTAL_BITS .. capacity)
	}

	/// Exclusively views the bits of the final byte not claimed by any
	/// field. Data stored here survives every field access.
	fn spare_bits_mut(&mut self) -> BitViewMut<'_, u8> {
		let capacity = self.raw().len() * 8;
		self.raw_mut().bits_mut(Self::TOTAL_BITS .. capacity)
	}
}

/** Declares a struct packing an ordered list of tiny fields into a
minimal byte array.

```rust
use tinybits::{tiny_storage, int::TinyIntRange, tiny::TinyBool};

tiny_storage! {
	/// A calendar date in three bytes.
	pub struct Date {
		/// Offset from 1900.
		year: TinyIntRange<1900, 2155>,
		month: TinyIntRange<1, 12>,
		day: TinyIntRange<1, 31>,
		leap: TinyBool,
	}
}

let mut date = Date::new(2024, 2, 29, true);
assert_eq!(date.year(), 2024);
date.set_day(1);
let mut month = date.month_mut();
month += 1;
assert_eq!(date.month(), 3);
```

The generated struct is `Copy`, compares by its bit pattern (spare
bits included), debug-prints its fields by name, and defaults to the
all-zero state.
**/
#[macro_export]
macro_rules! tiny_storage {
	(
		$(#[$attr:meta])*
		$vis:vis struct $name:ident {
			$( $(#[$field_attr:meta])* $field:ident : $kind:ty ),+ $(,)?
		}
	) => {
		$(#[$attr])*
		#[derive(Clone, Copy, PartialEq, Eq)]
		$vis struct $name {
			bits: [u8; $crate::mem::bytes_for(
				0 $(+ <$kind as $crate::tiny::TinyType>::BITS)+
			)],
		}

		impl $name {
			/// Number of bits occupied by the declared fields.
			pub const TOTAL_BITS: usize =
				0 $(+ <$kind as $crate::tiny::TinyType>::BITS)+;
			/// Exact size of the backing byte array.
			pub const BYTES: usize = $crate::mem::bytes_for(Self::TOTAL_BITS);

			/// Constructs the storage from one value per field, in
			/// declaration order.
			pub fn new(
				$($field: <$kind as $crate::tiny::TinyType>::Object),+
			) -> Self {
				let mut this = Self { bits: [0u8; Self::BYTES] };
				$crate::__private::paste! {
					$( this.[<set_ $field>]($field); )+
				}
				this
			}
		}

		impl ::core::default::Default for $name {
			/// The all-zero storage: every field reads as its zero
			/// object.
			fn default() -> Self {
				Self { bits: [0u8; Self::BYTES] }
			}
		}

		impl $crate::storage::TinyStorage for $name {
			const TOTAL_BITS: usize = $name::TOTAL_BITS;

			fn raw(&self) -> &[u8] {
				&self.bits
			}

			fn raw_mut(&mut self) -> &mut [u8] {
				&mut self.bits
			}
		}

		impl ::core::fmt::Debug for $name {
			fn fmt(
				&self,
				fmt: &mut ::core::fmt::Formatter,
			) -> ::core::fmt::Result {
				fmt.debug_struct(::core::stringify!($name))
					$(.field(::core::stringify!($field), &self.$field()))+
					.finish()
			}
		}

		$crate::tiny_storage! {
			@fields $name, (0), $($(#[$field_attr])* $field: $kind,)+
		}
	};

	(@fields $name:ident, ($offset:expr),) => {};

	(
		@fields $name:ident, ($offset:expr),
		$(#[$field_attr:meta])* $field:ident : $kind:ty,
		$($rest:tt)*
	) => {
		$crate::__private::paste! {
			impl $name {
				$(#[$field_attr])*
				pub fn $field(
					&self,
				) -> <$kind as $crate::tiny::TinyType>::Object {
					let begin: usize = $offset;
					$crate::tiny::TinyRef::<$kind, _>::new(
						$crate::view::AsBits::bits(
							&self.bits[..],
							begin
								.. begin
									+ <$kind as $crate::tiny::TinyType>::BITS,
						),
					)
					.get()
				}

				#[doc = "Writes the `" $field "` field."]
				pub fn [<set_ $field>](
					&mut self,
					value: <$kind as $crate::tiny::TinyType>::Object,
				) {
					let mut field = self.[<$field _mut>]();
					field.set(value);
				}

				#[doc = "Borrows the `" $field "` field as a proxy."]
				pub fn [<$field _mut>](
					&mut self,
				) -> $crate::tiny::TinyMut<$kind, $crate::view::BitViewMut<'_, u8>>
				{
					let begin: usize = $offset;
					$crate::tiny::TinyMut::new(
						$crate::view::AsBitsMut::bits_mut(
							&mut self.bits[..],
							begin
								.. begin
									+ <$kind as $crate::tiny::TinyType>::BITS,
						),
					)
				}
			}
		}

		$crate::tiny_storage! {
			@fields $name,
			($offset + <$kind as $crate::tiny::TinyType>::BITS),
			$($rest)*
		}
	};
}

/** Declares a struct packing tiny fields into the alignment bits of a
pointer.

A pointer to a type of alignment `A` always has its low `log2(A)`
address bits clear, so those bits can carry fields at no cost. Fields
beyond that capacity spill into an auxiliary byte array, and the two
regions act as one joined range. `IS_COMPRESSED` reports whether the
spill array is empty.

```rust
use tinybits::{tiny_ptr_storage, tiny::TinyBool, int::TinyUnsigned};

tiny_ptr_storage! {
	/// A node pointer carrying its mark and color inline.
	pub struct MarkedNode(*mut u64) {
		marked: TinyBool,
		color: TinyUnsigned<u8, 2>,
	}
}

let mut slot = 0u64;
let mut node = MarkedNode::new(&mut slot);
node.set_marked(true);
node.set_color(2);
assert!(MarkedNode::IS_COMPRESSED);
assert_eq!(node.ptr(), &mut slot as *mut u64);
```

The pointer must be aligned for its pointee; handing over a misaligned
pointer is a debug-checked precondition violation.
**/
#[macro_export]
macro_rules! tiny_ptr_storage {
	(
		$(#[$attr:meta])*
		$vis:vis struct $name:ident ( *mut $pointee:ty ) {
			$( $(#[$field_attr:meta])* $field:ident : $kind:ty ),+ $(,)?
		}
	) => {
		$(#[$attr])*
		#[derive(Clone, Copy)]
		$vis struct $name {
			addr: usize,
			spill: [u8; $crate::mem::spill_bytes(
				0 $(+ <$kind as $crate::tiny::TinyType>::BITS)+,
				::core::mem::align_of::<$pointee>().trailing_zeros() as usize,
			)],
			_pointee: ::core::marker::PhantomData<*mut $pointee>,
		}

		impl $name {
			/// Number of bits occupied by the declared fields.
			pub const TOTAL_BITS: usize =
				0 $(+ <$kind as $crate::tiny::TinyType>::BITS)+;
			/// Field bits available inside the pointer itself.
			pub const ALIGN_BITS: usize =
				::core::mem::align_of::<$pointee>().trailing_zeros() as usize;
			/// Bytes of spill storage required beyond the pointer.
			pub const SPILL_BYTES: usize =
				$crate::mem::spill_bytes(Self::TOTAL_BITS, Self::ALIGN_BITS);
			/// Whether every field fits inside the pointer.
			pub const IS_COMPRESSED: bool = Self::SPILL_BYTES == 0;

			/// Wraps a pointer with every field zeroed.
			pub fn new(ptr: *mut $pointee) -> Self {
				debug_assert!(
					ptr as usize % ::core::mem::align_of::<$pointee>() == 0,
					"pointer {:p} is not aligned for its pointee",
					ptr,
				);
				Self {
					addr: ptr as usize,
					spill: [0u8; Self::SPILL_BYTES],
					_pointee: ::core::marker::PhantomData,
				}
			}

			/// The stored pointer, with its alignment bits restored.
			pub fn ptr(&self) -> *mut $pointee {
				let align = ::core::mem::align_of::<$pointee>();
				(self.addr & !(align - 1)) as *mut $pointee
			}

			/// Replaces the stored pointer, preserving every field.
			pub fn set_ptr(&mut self, ptr: *mut $pointee) {
				let align = ::core::mem::align_of::<$pointee>();
				debug_assert!(
					ptr as usize % align == 0,
					"pointer {:p} is not aligned for its pointee",
					ptr,
				);
				self.addr = (self.addr & (align - 1)) | ptr as usize;
			}
		}

		impl ::core::fmt::Debug for $name {
			fn fmt(
				&self,
				fmt: &mut ::core::fmt::Formatter,
			) -> ::core::fmt::Result {
				fmt.debug_struct(::core::stringify!($name))
					.field("ptr", &self.ptr())
					$(.field(::core::stringify!($field), &self.$field()))+
					.finish()
			}
		}

		$crate::tiny_ptr_storage! {
			@fields $name, (0), $($(#[$field_attr])* $field: $kind,)+
		}
	};

	(@fields $name:ident, ($offset:expr),) => {};

	(
		@fields $name:ident, ($offset:expr),
		$(#[$field_attr:meta])* $field:ident : $kind:ty,
		$($rest:tt)*
	) => {
		$crate::__private::paste! {
			impl $name {
				$(#[$field_attr])*
				pub fn $field(
					&self,
				) -> <$kind as $crate::tiny::TinyType>::Object {
					let begin: usize = $offset;
					let view = $crate::view::Bits::join(
						$crate::view::AsBits::bits(
							&self.addr,
							0 .. Self::ALIGN_BITS,
						),
						$crate::view::AsBits::bits(&self.spill[..], ..),
					);
					$crate::tiny::TinyRef::<$kind, _>::new(
						$crate::view::Bits::subview(
							view,
							begin,
							begin + <$kind as $crate::tiny::TinyType>::BITS,
						),
					)
					.get()
				}

				#[doc = "Writes the `" $field "` field."]
				pub fn [<set_ $field>](
					&mut self,
					value: <$kind as $crate::tiny::TinyType>::Object,
				) {
					let mut field = self.[<$field _mut>]();
					field.set(value);
				}

				#[doc = "Borrows the `" $field "` field as a proxy."]
				pub fn [<$field _mut>](
					&mut self,
				) -> $crate::tiny::TinyMut<
					$kind,
					$crate::view::JoinedBits<
						$crate::view::BitViewMut<'_, usize>,
						$crate::view::BitViewMut<'_, u8>,
					>,
				> {
					let begin: usize = $offset;
					let view = $crate::view::Bits::join(
						$crate::view::AsBitsMut::bits_mut(
							&mut self.addr,
							0 .. Self::ALIGN_BITS,
						),
						$crate::view::AsBitsMut::bits_mut(&mut self.spill[..], ..),
					);
					$crate::tiny::TinyMut::new($crate::view::Bits::subview(
						view,
						begin,
						begin + <$kind as $crate::tiny::TinyType>::BITS,
					))
				}
			}
		}

		$crate::tiny_ptr_storage! {
			@fields $name,
			($offset + <$kind as $crate::tiny::TinyType>::BITS),
			$($rest)*
		}
	};
}
