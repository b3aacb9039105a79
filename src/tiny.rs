/*! The tiny-type protocol

A *tiny type* is the description of a logical field that occupies fewer
bits than its ordinary Rust representation: a boolean in one bit, an
integer in exactly the bits its bounds require, an enum in the bits its
variant count requires. The description is a zero-sized kind — it is
never instantiated — and carries three facts:

- an object type, the value the field reads and writes as;
- a bit width, fixed at compile time;
- an encoding between the object and the low bits of a word.

All reinterpretation between objects and bit patterns happens inside
[`TinyType::encode`] and [`TinyType::decode`]; nothing else in the
crate, nor in code generated by its macros, touches raw field bits.
Encoding range-checks its input in debug builds. Decoding trusts its
input, because the storage types only ever present bits that a previous
encode produced — an all-zero pattern included, since every kind maps
zero bits to a valid object.

Access to a stored field goes through the proxy types [`TinyRef`] and
[`TinyMut`], which pair a kind with a matching-width view.
!*/

use crate::view::Bits;

pub mod proxy;

pub use self::proxy::{
	TinyRef,
	TinyMut,
};

/** Description of a field kind that packs into a fixed number of bits.

Implementations are zero-sized markers; see the crate-provided kinds
[`TinyBool`], [`TinyUnsigned`], [`TinySigned`], [`TinyIntRange`],
[`TinyEnum`], and [`TinyFlagSet`]. Downstream crates may add their own
kinds; the contract is:

- `encode` accepts every valid object and produces a word with no bits
  set at or above `BITS`;
- `decode` accepts every word `encode` can produce, and maps the
  all-zero word to a valid object;
- the pair round-trips: `decode(encode(x)) == x`.

[`TinyBool`]: self::TinyBool
[`TinyUnsigned`]: crate::int::TinyUnsigned
[`TinySigned`]: crate::int::TinySigned
[`TinyIntRange`]: crate::int::TinyIntRange
[`TinyEnum`]: crate::enums::TinyEnum
[`TinyFlagSet`]: crate::enums::TinyFlagSet
**/
pub trait TinyType {
	/// The value type the field reads and writes as.
	type Object;

	/// The exact number of bits a field of this kind occupies.
	const BITS: usize;

	/// Reconstructs an object from the low `BITS` bits of a word.
	fn decode(raw: u64) -> Self::Object;

	/// Encodes an object into the low `BITS` bits of a word.
	///
	/// Out-of-range objects are a precondition violation, checked in
	/// debug builds.
	fn encode(object: Self::Object) -> u64;
}

/// Marker for tiny types whose proxies support compound arithmetic
/// through read-modify-write.
pub trait TinyInteger: TinyType {}

/// A boolean in a single bit.
pub struct TinyBool;

impl TinyType for TinyBool {
	type Object = bool;

	const BITS: usize = 1;

	#[inline]
	fn decode(raw: u64) -> bool {
		raw != 0
	}

	#[inline]
	fn encode(object: bool) -> u64 {
		object as u64
	}
}

/// Constructs a read proxy of kind `T` over a view.
///
/// The view must be exactly `T::BITS` wide.
pub fn tiny_ref<T: TinyType, B: Bits>(view: B) -> TinyRef<T, B> {
	TinyRef::new(view)
}

/// Constructs a write proxy of kind `T` over a view.
///
/// The view must be exactly `T::BITS` wide.
pub fn tiny_mut<T: TinyType, B: crate::view::BitsMut>(view: B) -> TinyMut<T, B> {
	TinyMut::new(view)
}
