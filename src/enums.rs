/*! Enum and flag-set field kinds

Packing an enum requires knowing its valid range. The [`Enumerated`]
trait records that a fieldless enum's variants occupy the contiguous
range `[0, COUNT)`; the [`enumerated!`] macro declares such an enum and
implements the trait (plus [`SpareBits`], since the bits above the
variant range in a byte are provably unused).

Two kinds build on it:

- [`TinyEnum`] stores one variant in `ceil(log2(COUNT))` bits.
- [`TinyFlagSet`] stores one independent bit per variant, addressed by
  variant, with [`FlagCombo`] as its object type.

[`SpareBits`]: crate::spare::SpareBits
[`enumerated!`]: crate::enumerated
!*/

use core::{
	fmt::{
		self,
		Debug,
		Formatter,
	},
	marker::PhantomData,
};

use crate::{
	macros::precondition,
	mem::{
		ceil_log2,
		mask,
	},
	tiny::{
		TinyMut,
		TinyRef,
		TinyType,
	},
	view::{
		Bits,
		BitsMut,
	},
};

/** A fieldless enum whose variants are exactly the values
`0 .. COUNT`.

Implement via the [`enumerated!`] macro, which guarantees the contract:
`into_raw` returns each variant's position, `from_raw` inverts it for
in-range inputs and returns `None` otherwise, and `COUNT` is at least
one.

[`enumerated!`]: crate::enumerated
**/
pub trait Enumerated: Copy + Eq + Debug {
	/// The number of variants. Variants are numbered `0 .. COUNT`.
	const COUNT: usize;

	/// Recovers the variant at a position.
	fn from_raw(raw: u64) -> Option<Self>;

	/// Returns the variant's position.
	fn into_raw(self) -> u64;
}

/** Declares a fieldless enum and implements [`Enumerated`] and
[`SpareBits`](crate::spare::SpareBits) for it.

```rust
use tinybits::enumerated;

enumerated! {
	/// Cardinal directions.
	pub enum Direction {
		North,
		East,
		South,
		West,
	}
}
```

The variants must carry no explicit discriminants; they are numbered in
declaration order from zero. The enum may have at most 256 variants, so
that a byte representation always suffices.
**/
#[macro_export]
macro_rules! enumerated {
	(
		$(#[$attr:meta])*
		$vis:vis enum $name:ident {
			$( $(#[$variant_attr:meta])* $variant:ident ),+ $(,)?
		}
	) => {
		$(#[$attr])*
		#[derive(Clone, Copy, PartialEq, Eq, Debug)]
		$vis enum $name {
			$( $(#[$variant_attr])* $variant ),+
		}

		impl $crate::enums::Enumerated for $name {
			const COUNT: usize = [$($name::$variant),+].len();

			fn from_raw(raw: u64) -> ::core::option::Option<Self> {
				const ALL: &[$name] = &[$($name::$variant),+];
				ALL.get(raw as usize).copied()
			}

			fn into_raw(self) -> u64 {
				self as u64
			}
		}

		const _: () = assert!(
			<$name as $crate::enums::Enumerated>::COUNT <= 256,
			"enumerated! supports at most 256 variants",
		);

		impl $crate::spare::SpareBits for $name {
			type Repr = u8;

			const SPARE_BITS: usize = 8
				- $crate::mem::ceil_log2(
					<$name as $crate::enums::Enumerated>::COUNT,
				);

			fn pack(self) -> u8 {
				<Self as $crate::enums::Enumerated>::into_raw(self) as u8
			}

			fn unpack(repr: u8) -> Self {
				let raw = repr as u64
					& $crate::mem::mask(8 - Self::SPARE_BITS);
				match <Self as $crate::enums::Enumerated>::from_raw(raw) {
					::core::option::Option::Some(value) => value,
					::core::option::Option::None => {
						::core::unreachable!(
							"bit pattern {} is not a valid enumerator",
							raw,
						)
					},
				}
			}

			fn spare(repr: &u8) -> u64 {
				(*repr as u64) >> (8 - Self::SPARE_BITS)
			}

			fn put_spare(repr: &mut u8, bits: u64) {
				debug_assert!(
					bits & !$crate::mem::mask(Self::SPARE_BITS) == 0,
					"spare bits {:#x} overflow {} bits",
					bits,
					Self::SPARE_BITS,
				);
				let value_bits = 8 - Self::SPARE_BITS;
				let value = *repr as u64 & $crate::mem::mask(value_bits);
				*repr = (value | (bits << value_bits)) as u8;
			}
		}
	};
}

/** An [`Enumerated`] value stored in the fewest bits that index its
variants.

Writes assert the variant is in range; reads convert the stored index
back to the variant.
**/
pub struct TinyEnum<E: Enumerated> {
	_kind: PhantomData<E>,
}

impl<E: Enumerated> TinyType for TinyEnum<E> {
	type Object = E;

	const BITS: usize = ceil_log2(E::COUNT);

	fn decode(raw: u64) -> E {
		match E::from_raw(raw) {
			Some(value) => value,
			None => unreachable!("bit pattern {} is not a valid enumerator", raw),
		}
	}

	fn encode(object: E) -> u64 {
		let raw = object.into_raw();
		precondition!(
			(raw as usize) < E::COUNT,
			"enumerator {} out of range for {} variants",
			raw,
			E::COUNT,
		);
		raw
	}
}

/** An owned combination of flags drawn from an [`Enumerated`] enum.

This is the object type of [`TinyFlagSet`]: a field assignment writes a
whole combination at once. Combinations build up by value:

```rust
use tinybits::{enumerated, enums::FlagCombo};

enumerated! {
	enum Style { Bold, Italic, Underline }
}

let styles = FlagCombo::empty().with(Style::Bold).with(Style::Underline);
assert!(styles.contains(Style::Bold));
assert!(!styles.contains(Style::Italic));
```
**/
pub struct FlagCombo<E: Enumerated> {
	flags: u64,
	_kind: PhantomData<E>,
}

impl<E: Enumerated> FlagCombo<E> {
	/// The combination with no flags set.
	pub const fn empty() -> Self {
		Self {
			flags: 0,
			_kind: PhantomData,
		}
	}

	/// The combination with every flag set.
	pub fn all() -> Self {
		Self {
			flags: mask(E::COUNT),
			_kind: PhantomData,
		}
	}

	/// Adds one flag to the combination.
	#[must_use]
	pub fn with(mut self, flag: E) -> Self {
		self.flags |= 1 << flag.into_raw();
		self
	}

	/// Removes one flag from the combination.
	#[must_use]
	pub fn without(mut self, flag: E) -> Self {
		self.flags &= !(1 << flag.into_raw());
		self
	}

	/// Collects a combination from a list of flags.
	pub fn of(flags: &[E]) -> Self {
		let mut combo = Self::empty();
		for &flag in flags {
			combo = combo.with(flag);
		}
		combo
	}

	/// Whether the combination holds the given flag.
	pub fn contains(&self, flag: E) -> bool {
		self.flags >> flag.into_raw() & 1 != 0
	}

	/// The combination as an integer, one bit per flag.
	pub fn raw(&self) -> u64 {
		self.flags
	}

	pub(crate) fn from_raw(flags: u64) -> Self {
		Self {
			flags,
			_kind: PhantomData,
		}
	}
}

impl<E: Enumerated> Clone for FlagCombo<E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<E: Enumerated> Copy for FlagCombo<E> {
}

impl<E: Enumerated> PartialEq for FlagCombo<E> {
	fn eq(&self, other: &Self) -> bool {
		self.flags == other.flags
	}
}

impl<E: Enumerated> Eq for FlagCombo<E> {
}

impl<E: Enumerated> Default for FlagCombo<E> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<E: Enumerated> Debug for FlagCombo<E> {
	fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
		fmt.debug_set()
			.entries(
				(0 .. E::COUNT as u64)
					.filter(|index| self.flags >> index & 1 != 0)
					.filter_map(E::from_raw),
			)
			.finish()
	}
}

/** A set of independent single-bit flags, one per variant of `E`.

The field is `E::COUNT` bits wide. Assignment writes a [`FlagCombo`];
the proxies expose per-flag and whole-set operations directly.
**/
pub struct TinyFlagSet<E: Enumerated> {
	_kind: PhantomData<E>,
}

impl<E: Enumerated> TinyType for TinyFlagSet<E> {
	type Object = FlagCombo<E>;

	const BITS: usize = E::COUNT;

	fn decode(raw: u64) -> FlagCombo<E> {
		FlagCombo::from_raw(raw)
	}

	fn encode(object: FlagCombo<E>) -> u64 {
		precondition!(
			object.raw() & !mask(E::COUNT) == 0,
			"flag combination holds bits beyond the {} declared flags",
			E::COUNT,
		);
		object.raw()
	}
}

impl<E: Enumerated, B: Bits> TinyRef<TinyFlagSet<E>, B> {
	/// Whether the given flag is set.
	pub fn is_set(&self, flag: E) -> bool {
		self.view.get(flag.into_raw() as usize)
	}

	/// Whether any flag is set.
	pub fn any(&self) -> bool {
		self.view.load() != 0
	}

	/// Whether every flag is set.
	pub fn all(&self) -> bool {
		self.view.load() == mask(E::COUNT)
	}

	/// Whether no flag is set.
	pub fn none(&self) -> bool {
		!self.any()
	}
}

impl<E: Enumerated, B: BitsMut> TinyMut<TinyFlagSet<E>, B> {
	/// Whether the given flag is set.
	pub fn is_set(&self, flag: E) -> bool {
		self.view.get(flag.into_raw() as usize)
	}

	/// Whether any flag is set.
	pub fn any(&self) -> bool {
		self.view.load() != 0
	}

	/// Whether every flag is set.
	pub fn all(&self) -> bool {
		self.view.load() == mask(E::COUNT)
	}

	/// Whether no flag is set.
	pub fn none(&self) -> bool {
		!self.any()
	}

	/// Sets or clears one flag.
	pub fn write(&mut self, flag: E, value: bool) {
		self.view.set(flag.into_raw() as usize, value);
	}

	/// Sets one flag.
	pub fn insert(&mut self, flag: E) {
		self.write(flag, true);
	}

	/// Clears one flag.
	pub fn remove(&mut self, flag: E) {
		self.write(flag, false);
	}

	/// Toggles one flag.
	pub fn toggle(&mut self, flag: E) {
		let state = self.is_set(flag);
		self.write(flag, !state);
	}

	/// Sets or clears every flag at once.
	pub fn write_all(&mut self, value: bool) {
		self.view.store(if value { mask(E::COUNT) } else { 0 });
	}

	/// Toggles every flag at once.
	pub fn toggle_all(&mut self) {
		let flipped = !self.view.load() & mask(E::COUNT);
		self.view.store(flipped);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		tiny::{
			tiny_mut,
			tiny_ref,
		},
		view::{
			AsBits,
			AsBitsMut,
		},
	};

	enumerated! {
		enum Level {
			Trace,
			Debug,
			Info,
			Warn,
			Error,
		}
	}

	#[test]
	fn enum_field() {
		assert_eq!(<TinyEnum<Level> as TinyType>::BITS, 3);
		let mut cell = 0u8;
		let mut level = tiny_mut::<TinyEnum<Level>, _>(cell.bits_mut(2 .. 5));
		assert_eq!(level.get(), Level::Trace);
		level.set(Level::Warn);
		assert_eq!(level.get(), Level::Warn);
		drop(level);
		assert_eq!(cell, 3 << 2);
	}

	#[test]
	fn flag_field() {
		assert_eq!(<TinyFlagSet<Level> as TinyType>::BITS, 5);
		let mut cell = 0u8;
		let mut flags = tiny_mut::<TinyFlagSet<Level>, _>(cell.bits_mut(0 .. 5));
		assert!(flags.none());
		flags.insert(Level::Debug);
		flags.insert(Level::Error);
		assert!(flags.is_set(Level::Debug));
		assert!(!flags.is_set(Level::Info));
		assert!(flags.any() && !flags.all());

		flags.toggle(Level::Debug);
		assert!(!flags.is_set(Level::Debug));

		flags.set(FlagCombo::of(&[Level::Trace, Level::Info]));
		drop(flags);
		assert_eq!(cell, 0b00101);

		let flags = tiny_ref::<TinyFlagSet<Level>, _>(cell.bits(0 .. 5));
		assert!(flags.is_set(Level::Trace));
	}

	#[test]
	fn combos() {
		let combo = FlagCombo::empty()
			.with(Level::Trace)
			.with(Level::Error)
			.without(Level::Trace);
		assert_eq!(combo.raw(), 1 << Level::Error as u64);
		assert_eq!(FlagCombo::<Level>::all().raw(), 0b11111);
	}
}
