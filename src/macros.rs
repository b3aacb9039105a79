/*! Internal checking macros

The crate distinguishes two levels of runtime checking, mirroring its
two classes of failure:

- `precondition!` guards caller contracts: value overflow on a store,
  an index out of range, a misaligned pointer. These checks are active
  in debug builds and compiled out of release builds, where a violation
  is undefined library behavior by contract.
- `invariant!` guards internal consistency that should be unreachable
  regardless of caller behavior. These are off by default and enabled
  with the `strict` cargo feature, in any build profile.

Neither macro is part of the public API; code generated by the exported
declaration macros uses plain `debug_assert!` so that it never depends
on crate-private items.
!*/

/// Checks a caller contract. Active in debug builds only.
macro_rules! precondition {
	($condition:expr $(,)?) => {
		debug_assert!($condition)
	};
	($condition:expr, $($message:tt)+) => {
		debug_assert!($condition, $($message)+)
	};
}

/// Checks an internal invariant. Active only with the `strict` feature.
macro_rules! invariant {
	($condition:expr, $($message:tt)+) => {
		if cfg!(feature = "strict") {
			assert!($condition, $($message)+);
		}
	};
}

pub(crate) use invariant;
pub(crate) use precondition;
