/*! Symbol export

This module collects the general public API of the crate into a single
place for bulk import:

```rust
use tinybits::prelude::*;
```
!*/

pub use crate::{
	aligned::AlignedPtr,
	check_align,
	check_size,
	enumerated,
	enums::{
		Enumerated,
		FlagCombo,
		TinyEnum,
		TinyFlagSet,
	},
	int::{
		TinyIntRange,
		TinySigned,
		TinyUnsigned,
	},
	padding,
	padding::{
		clear_padding,
		padding_of,
		padding_of_mut,
		PadRange,
		Padding,
		PaddingBits,
		PaddingBitsMut,
	},
	padding_storage,
	spare::SpareBits,
	spare_bits_members,
	storage::TinyStorage,
	store::{
		BitStore,
		SignedStore,
	},
	tiny::{
		tiny_mut,
		tiny_ref,
		TinyBool,
		TinyInteger,
		TinyMut,
		TinyRef,
		TinyType,
	},
	tiny_ptr_storage,
	tiny_storage,
	tombstone::{
		Tiny,
		TinyOption,
		Tombstone,
	},
	tombstone_via_padding,
	tombstone_via_spare,
	view::{
		copy_bits,
		fill,
		AsBits,
		AsBitsMut,
		Bits,
		BitsMut,
		BitView,
		BitViewMut,
		JoinedBits,
	},
};
