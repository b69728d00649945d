// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac

use ctrlmac::{
	DigestAlgorithm, MacEngine, PacketLayout, RustCryptoApi, StaticKey,
};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha512;

type Engine = MacEngine<RustCryptoApi>;

fn key_bytes() -> Vec<u8> {
	(0..64u8).map(|i| i.wrapping_mul(7).wrapping_add(3)).collect()
}

fn engine(algorithm: DigestAlgorithm) -> Engine {
	Engine::with_key(algorithm, &StaticKey::from_bytes(&key_bytes()))
		.expect("engine")
}

fn sample_packet(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i as u8).wrapping_mul(31) ^ 0x5c).collect()
}

#[test]
fn concrete_sha1_scenario_matches_reordered_hmac() {
	let mut engine = engine(DigestAlgorithm::Sha1);
	let mut packet = sample_packet(30);
	let original = packet.clone();

	assert!(engine.generate(&mut packet, 2, 20, 1));

	let mut reference =
		Hmac::<Sha1>::new_from_slice(&key_bytes()[..20]).unwrap();
	reference.update(&original[22..23]);
	reference.update(&original[0..2]);
	reference.update(&original[23..30]);
	let expected = reference.finalize().into_bytes();

	assert_eq!(&packet[2..22], expected.as_slice());
	assert_eq!(&packet[..2], &original[..2]);
	assert_eq!(&packet[22..], &original[22..]);

	assert!(engine.verify(&packet, 2, 20, 1));
	packet[23] ^= 0x80;
	assert!(!engine.verify(&packet, 2, 20, 1));
}

#[test]
fn tag_region_contents_do_not_affect_generation() {
	let mut engine = engine(DigestAlgorithm::Sha256);
	let layout = PacketLayout::tls_auth(32);
	let mut a = sample_packet(80);
	let mut b = a.clone();
	b[layout.l1..layout.l1 + layout.l2].fill(0xff);
	assert!(engine.generate_layout(&mut a, layout));
	assert!(engine.generate_layout(&mut b, layout));
	assert_eq!(a, b);
}

#[test]
fn sha512_tls_auth_layout_matches_reordered_hmac() {
	let mut engine = engine(DigestAlgorithm::Sha512);
	let layout = PacketLayout::tls_auth(64);
	let mut packet = sample_packet(120);
	let original = packet.clone();
	assert!(engine.generate_layout(&mut packet, layout));

	let mut reference =
		Hmac::<Sha512>::new_from_slice(&key_bytes()).unwrap();
	reference.update(&original[73..81]);
	reference.update(&original[..9]);
	reference.update(&original[81..]);
	assert_eq!(
		hex::encode(&packet[9..73]),
		hex::encode(reference.finalize().into_bytes())
	);
}

#[test]
fn round_trip_for_every_legal_digest() {
	for metadata in ctrlmac::mac::registry::algorithms()
		.filter(|m| m.is_legal_dc_digest())
	{
		let mut engine = engine(metadata.algorithm);
		assert_eq!(engine.output_size(), metadata.output_size);
		let layout = PacketLayout::tls_auth(metadata.output_size);
		let mut packet = sample_packet(layout.total().unwrap() + 40);
		assert!(engine.generate_layout(&mut packet, layout));
		assert!(
			engine.verify_layout(&packet, layout),
			"{} failed to verify",
			metadata.display_name
		);
	}
}

#[test]
fn any_flipped_bit_is_detected() {
	let mut engine = engine(DigestAlgorithm::Sha1);
	let mut packet = sample_packet(30);
	assert!(engine.generate(&mut packet, 2, 20, 1));
	for pos in 0..packet.len() {
		for bit in 0..8 {
			let mut tampered = packet.clone();
			tampered[pos] ^= 1 << bit;
			assert!(
				!engine.verify(&tampered, 2, 20, 1),
				"flip at byte {pos} bit {bit} went unnoticed"
			);
		}
	}
	assert!(engine.verify(&packet, 2, 20, 1));
}

#[test]
fn layout_violations_return_false() {
	let mut engine = engine(DigestAlgorithm::Sha1);
	let mut packet = sample_packet(30);
	assert!(engine.generate(&mut packet, 2, 20, 1));

	assert!(!engine.verify(&packet, 2, 20, 9));
	assert!(!engine.verify(&packet, 2, 16, 1));
	assert!(!engine.verify(&packet, 2, 32, 1));
	assert!(!engine.verify(&packet, usize::MAX, 20, usize::MAX));
	assert!(!engine.verify(&packet[..22], 2, 20, 1));
	assert!(!engine.verify(&[], 0, 20, 0));

	let snapshot = packet.clone();
	assert!(!engine.generate(&mut packet, 10, 20, 1));
	assert!(!engine.generate(&mut packet, 2, 28, 0));
	assert_eq!(packet, snapshot);
}

#[test]
fn empty_regions_are_allowed() {
	let mut engine = engine(DigestAlgorithm::Md5);
	let mut packet = vec![0u8; 16];
	assert!(engine.generate(&mut packet, 0, 16, 0));
	assert!(engine.verify(&packet, 0, 16, 0));
	let mut out = [0u8; 16];
	assert!(engine.hmac(&mut out, &[]));
	assert_eq!(&packet[..], &out[..]);
}

#[test]
fn engines_with_same_key_agree() {
	let mut a = engine(DigestAlgorithm::Sha384);
	let mut b = engine(DigestAlgorithm::Sha384);
	let mut first = sample_packet(100);
	let mut second = first.clone();
	assert!(a.generate(&mut first, 9, 48, 8));
	assert!(b.generate(&mut second, 9, 48, 8));
	assert_eq!(first, second);
	assert!(b.verify(&first, 9, 48, 8));
}

#[test]
fn different_keys_reject_each_other() {
	let mut a = engine(DigestAlgorithm::Sha224);
	let other = StaticKey::from_bytes(&[1; 28]);
	let mut b = Engine::with_key(DigestAlgorithm::Sha224, &other).unwrap();
	let mut packet = sample_packet(64);
	assert!(a.generate(&mut packet, 9, 28, 8));
	assert!(!b.verify(&packet, 9, 28, 8));
}

#[test]
fn every_registered_digest_keys_at_minimum_length() {
	for metadata in ctrlmac::mac::registry::algorithms().filter(|m| m.digest)
	{
		let key = StaticKey::from_bytes(&vec![7; metadata.min_key_size]);
		let mut engine = Engine::new();
		assert!(
			engine.init(metadata.algorithm, &key).is_ok(),
			"{} refused a minimum-length key",
			metadata.display_name
		);
		assert_eq!(engine.output_size(), metadata.output_size);
	}
}
