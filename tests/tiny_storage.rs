//! Behavioral tests of the packed storage declarations: layout
//! guarantees, accessors, and the spare tail.

use tinybits::prelude::*;

tiny_storage! {
	/// The canonical layout probe: 7 + 1 + 1 bits.
	struct Mixed {
		size: TinyUnsigned<u8, 7>,
		dirty: TinyBool,
		locked: TinyBool,
	}
}

check_size!(Mixed, 2);

#[test]
fn offsets_are_prefix_sums() {
	assert_eq!(Mixed::TOTAL_BITS, 9);
	assert_eq!(Mixed::BYTES, 2);

	//  field 0 occupies bits [0, 7), field 1 bit 7, field 2 bit 8
	let mut mixed = Mixed::default();
	mixed.set_size(0b101_0101);
	assert_eq!(mixed.raw(), &[0b0101_0101, 0][..]);
	mixed.set_dirty(true);
	assert_eq!(mixed.raw(), &[0b1101_0101, 0][..]);
	mixed.set_locked(true);
	assert_eq!(mixed.raw(), &[0b1101_0101, 1][..]);
}

#[test]
fn default_is_all_zero() {
	let mixed = Mixed::default();
	assert_eq!(mixed.size(), 0);
	assert!(!mixed.dirty());
	assert!(!mixed.locked());
	assert_eq!(mixed.raw(), &[0, 0][..]);
}

#[test]
fn constructor_matches_setters() {
	let mixed = Mixed::new(42, false, true);
	assert_eq!(mixed.size(), 42);
	assert!(!mixed.dirty());
	assert!(mixed.locked());

	let mut by_hand = Mixed::default();
	by_hand.set_size(42);
	by_hand.set_locked(true);
	assert_eq!(mixed, by_hand);
}

#[test]
fn neighbors_survive_every_write() {
	let mut mixed = Mixed::new(0x7F, true, true);
	mixed.set_size(0);
	assert!(mixed.dirty() && mixed.locked());
	mixed.set_size(0x7F);
	mixed.set_dirty(false);
	assert_eq!(mixed.size(), 0x7F);
	assert!(mixed.locked());
}

#[test]
fn spare_tail_is_independent() {
	let mut mixed = Mixed::new(99, true, false);
	assert_eq!(mixed.spare_bits().len(), 7);
	mixed.spare_bits_mut().store(0x41);
	assert_eq!(mixed.size(), 99);
	assert!(mixed.dirty());
	mixed.set_size(1);
	mixed.set_locked(true);
	assert_eq!(mixed.spare_bits().load(), 0x41);
}

#[test]
fn proxies_do_compound_updates() {
	let mut mixed = Mixed::default();
	let mut size = mixed.size_mut();
	size += 10;
	size *= 3;
	size -= 5;
	assert_eq!(mixed.size(), 25);
}

enumerated! {
	enum Priority {
		Idle,
		Normal,
		High,
	}
}

tiny_storage! {
	struct Task {
		priority: TinyEnum<Priority>,
		flags: TinyFlagSet<Priority>,
		retries: TinyUnsigned<u8, 3>,
	}
}

check_size!(Task, 1);

#[test]
fn enum_and_flag_fields_pack_together() {
	assert_eq!(Task::TOTAL_BITS, 2 + 3 + 3);
	let mut task = Task::default();
	assert_eq!(task.priority(), Priority::Idle);

	task.set_priority(Priority::High);
	let mut flags = task.flags_mut();
	flags.insert(Priority::Normal);
	task.set_retries(5);

	assert_eq!(task.priority(), Priority::High);
	assert!(task.flags().contains(Priority::Normal));
	assert!(!task.flags().contains(Priority::Idle));
	assert_eq!(task.retries(), 5);
}

#[test]
fn debug_prints_fields_by_name() {
	let task = Task::new(
		Priority::Normal,
		FlagCombo::of(&[Priority::Idle]),
		2,
	);
	let rendered = format!("{:?}", task);
	assert_eq!(
		rendered,
		"Task { priority: Normal, flags: {Idle}, retries: 2 }",
	);
}

tiny_storage! {
	struct Single {
		value: TinySigned<i32, 11>,
	}
}

#[test]
fn single_field_storage() {
	check_size!(Single, 2);
	let mut single = Single::default();
	single.set_value(-1024);
	assert_eq!(single.value(), -1024);
	single.set_value(1023);
	assert_eq!(single.value(), 1023);
	assert_eq!(single.spare_bits().len(), 5);
}
