/*! Layout assertions

When a packed struct comes out larger than intended, the useful error
is the size it *actually* has, not just that a comparison failed. These
macros check size and alignment at compile time by equating two array
types, so that on mismatch the compiler's own diagnostic prints both
the expected and the actual value:

```text
error[E0308]: mismatched types
  = note: expected array `[(); 2]`
             found array `[(); 3]`
```

Both expand to a `const` item and can appear anywhere items can,
typically right after the type definition they guard.
!*/

/** Asserts at compile time that a type has an exact size in bytes.

```rust
use tinybits::{check_size, tiny_storage, tiny::TinyBool, int::TinyUnsigned};

tiny_storage! {
	struct Header {
		version: TinyUnsigned<u8, 7>,
		secure: TinyBool,
		flags: TinyUnsigned<u8, 8>,
	}
}

check_size!(Header, 2);
```
**/
#[macro_export]
macro_rules! check_size {
	($type:ty, $size:expr) => {
		const _: [(); $size] = [(); ::core::mem::size_of::<$type>()];
	};
}

/// Asserts at compile time that a type has an exact alignment.
///
/// The companion of [`check_size!`]; a mismatch reports the actual
/// alignment in the error output.
#[macro_export]
macro_rules! check_align {
	($type:ty, $align:expr) => {
		const _: [(); $align] = [(); ::core::mem::align_of::<$type>()];
	};
}
