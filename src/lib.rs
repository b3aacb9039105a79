/*! `tinybits` – store values in the bits they actually need.

A `bool` occupies eight bits and uses one. A day-of-month occupies a
whole integer and uses five bits. A pointer to an 8-aligned type drags
three guaranteed-zero bits around in every copy. This crate computes
exact bit-level layouts at compile time and gives those wasted bits
back, without runtime bookkeeping:

- [`tiny_storage!`] packs an ordered list of *tiny types* — booleans,
  bounded integers, enums, flag sets — into a byte array of exactly
  `ceil(total_bits / 8)` bytes, with typed, checked accessors for each
  field.
- [`view`] supplies the underlying machinery: borrowed views over any
  bit range of any unsigned cell, including ranges spanning cells and
  *joins* of physically disjoint ranges that read and write as one.
- [`spare`] describes the bits a value provably never uses — a
  boolean's upper seven, a pointer's alignment bits, an enum's slack —
  and lets collaborators stow data there without disturbing the value.
- [`tombstone`] turns unreachable bit patterns into "absent" markers,
  and [`TinyOption`](tombstone::TinyOption) uses them to build
  optionals that cost nothing: an `Option`-alike of `bool` is one byte,
  and so is one of `TinyOption<TinyOption<bool>>`.
- [`padding`] recovers the bytes that layout rules scatter between
  struct members, views them like any other bit range, and
  [`padding_storage!`] packs fields into them.

Field access works through ephemeral *proxies* rather than references,
because a packed field has no address. A proxy reads and writes its
field immediately; it is created by an accessor, used, and dropped. No
operation here allocates, blocks, or synchronizes — and none is atomic:
packing multiple fields into one cell means a write to one field is a
read-modify-write of its neighbors' cell, which is safe within Rust's
borrow rules and a documented caller obligation outside them.

Caller contracts (value ranges, index bounds, alignment promises) are
checked with debug assertions and compiled out of release builds; the
`strict` feature additionally enables internal consistency checks.

```rust
use tinybits::prelude::*;

tinybits::tiny_storage! {
	/// A calendar date in three bytes.
	pub struct Date {
		year: TinyIntRange<1900, 2155>,
		month: TinyIntRange<1, 12>,
		day: TinyIntRange<1, 31>,
	}
}

tinybits::check_size!(Date, 3);

let mut date = Date::new(2018, 10, 22);
assert_eq!(date.month(), 10);
date.set_day(23);
assert_eq!(date.day(), 23);
```
!*/

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate core;

mod macros;

pub mod aligned;
pub mod check;
pub mod enums;
pub mod int;
pub mod mem;
pub mod padding;
pub mod prelude;
pub mod spare;
pub mod storage;
pub mod store;
pub mod tiny;
pub mod tombstone;
pub mod view;

/// Support items for the expansion of the declaration macros. Not
/// public API.
#[doc(hidden)]
pub mod __private {
	pub use paste::paste;
}
