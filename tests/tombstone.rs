//! Behavioral tests of the tombstone extension and the compressed
//! optional built on it.

use tinybits::prelude::*;

#[test]
fn optional_bool_tombstones_are_disjoint_from_values() {
	//  bool has 127 tombstones; the optional claims one and lends 126
	assert_eq!(<bool as Tombstone>::TOMBSTONES, 127);
	assert_eq!(<TinyOption<bool> as Tombstone>::TOMBSTONES, 126);
	check_size!(TinyOption<bool>, 1);

	//  every borrowed tombstone reads as "no value present"
	for index in 0 .. 126 {
		let storage = <TinyOption<bool> as Tombstone>::store_tombstone(index);
		assert!(<TinyOption<bool> as Tombstone>::is_tombstone(&storage));
		assert_eq!(
			<TinyOption<bool> as Tombstone>::tombstone_index(&storage),
			index,
		);
	}

	//  and every real value reads as present
	for value in [false, true] {
		let mut slot = TinyOption::<bool>::none();
		assert!(!slot.is_some());
		slot.set(Some(value));
		assert!(slot.is_some());
		assert_eq!(slot.get(), Some(value));
		let storage = <TinyOption<bool> as Tombstone>::store_value(slot);
		assert!(!<TinyOption<bool> as Tombstone>::is_tombstone(&storage));
	}
}

#[test]
fn optional_pointer_is_pointer_sized() {
	#[cfg(target_pointer_width = "64")]
	check_size!(TinyOption<*mut u64>, 8);

	let mut target = 31u64;
	let mut slot = TinyOption::<*mut u64>::none();
	assert!(slot.is_none());
	slot.set(Some(&mut target));
	let pointer = slot.get().unwrap();
	assert_eq!(unsafe { *pointer }, 31);
	assert_eq!(slot.take().unwrap(), &mut target as *mut u64);
	assert!(slot.is_none());
}

enumerated! {
	#[derive(Default)]
	enum Gear {
		#[default]
		Neutral,
		Forward,
		Reverse,
	}
}

tombstone_via_spare!(Gear);

#[test]
fn spare_based_tombstones() {
	//  two value bits leave six spare bits: 63 tombstones
	assert_eq!(<Gear as Tombstone>::TOMBSTONES, 63);
	check_size!(TinyOption<Gear>, 1);

	for index in 0 .. 63 {
		let storage = <Gear as Tombstone>::store_tombstone(index);
		assert_eq!(<Gear as Tombstone>::tombstone_index(&storage), index);
	}
	for gear in [Gear::Neutral, Gear::Forward, Gear::Reverse] {
		let storage = <Gear as Tombstone>::store_value(gear);
		assert!(!<Gear as Tombstone>::is_tombstone(&storage));
		assert_eq!(<Gear as Tombstone>::load_value(&storage), gear);
	}

	let mut slot = TinyOption::<Gear>::none();
	assert!(slot.is_none());
	slot.set(Some(Gear::Reverse));
	assert_eq!(slot.get(), Some(Gear::Reverse));
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
	key: u8,
	value: u32,
}

tinybits::padding! {
	struct Entry {
		key: u8,
		value: u32,
	}
}

tombstone_via_padding!(Entry);

#[test]
fn padding_based_tombstones() {
	//  three padding bytes carry the tag: the optional adds no size
	assert_eq!(Entry::PADDING_BITS, 24);
	assert_eq!(<Entry as Tombstone>::TOMBSTONES, (1 << 24) - 1);
	check_size!(TinyOption<Entry>, 8);

	let entry = Entry {
		key: 9,
		value: 0xABCD_EF01,
	};
	let storage = <Entry as Tombstone>::store_value(entry);
	assert!(!<Entry as Tombstone>::is_tombstone(&storage));
	assert_eq!(<Entry as Tombstone>::load_value(&storage), entry);

	let dead = <Entry as Tombstone>::store_tombstone(0x1234);
	assert_eq!(<Entry as Tombstone>::tombstone_index(&dead), 0x1234);

	let mut slot = TinyOption::<Entry>::none();
	assert!(slot.is_none());
	slot.set(Some(entry));
	assert_eq!(slot.get(), Some(entry));
}

#[test]
fn tiny_typed_tombstones() {
	//  a 3-bit field leaves a 5-bit tag: 31 tombstones in one byte
	type Small = Tiny<TinyUnsigned<u8, 3>>;
	assert_eq!(<Small as Tombstone>::TOMBSTONES, 31);
	check_size!(TinyOption<Small>, 1);

	for value in 0 .. 8 {
		let storage = <Small as Tombstone>::store_value(Tiny(value));
		assert!(!<Small as Tombstone>::is_tombstone(&storage));
		let Tiny(restored) = <Small as Tombstone>::load_value(&storage);
		assert_eq!(restored, value);
	}

	let mut slot = TinyOption::<Small>::none();
	assert!(slot.is_none());
	slot.set(Some(Tiny(7)));
	let Tiny(value) = slot.get().unwrap();
	assert_eq!(value, 7);
}

#[test]
fn options_nest_without_growing() {
	type Level0 = TinyOption<bool>;
	type Level1 = TinyOption<Level0>;
	type Level2 = TinyOption<Level1>;
	check_size!(Level2, 1);
	assert_eq!(<Level2 as Tombstone>::TOMBSTONES, 124);

	//  all four logical states remain distinguishable in one byte
	let empty = Level2::none();
	assert!(empty.is_none());

	let inner_empty = Level2::some(Level1::none());
	assert!(inner_empty.is_some());
	assert!(inner_empty.get().unwrap().is_none());

	let innermost_empty = Level2::some(Level1::some(Level0::none()));
	let inner = innermost_empty.get().unwrap().get().unwrap();
	assert!(inner.is_none());

	let full = Level2::some(Level1::some(Level0::some(false)));
	let value = full.get().unwrap().get().unwrap().get().unwrap();
	assert!(!value);
}

#[test]
fn aligned_ptr_optional() {
	#[repr(align(16))]
	#[derive(Debug)]
	struct Arena {
		bytes: [u8; 16],
	}

	#[cfg(target_pointer_width = "64")]
	check_size!(TinyOption<AlignedPtr<Arena, 16>>, 8);

	let mut arena = Arena {
		bytes: [3; 16],
	};
	let mut slot = TinyOption::<AlignedPtr<Arena, 16>>::none();
	assert!(slot.is_none());
	slot.set(Some(AlignedPtr::new(&mut arena)));
	let pointer = slot.get().unwrap();
	assert_eq!(unsafe { (*pointer.get()).bytes[15] }, 3);
}
