// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! HMAC authentication for tunnel control channel packets.
//!
//! ```
//! use ctrlmac::{
//! 	CryptoMacFactory, DigestAlgorithm, MacFactory, RustCryptoApi,
//! 	StaticKey,
//! };
//!
//! let factory = CryptoMacFactory::<RustCryptoApi>::shared();
//! let context = factory.new_context(DigestAlgorithm::Sha1).unwrap();
//! let instance = context.new_instance();
//! instance
//! 	.borrow_mut()
//! 	.init(&StaticKey::from_bytes(&[0x11; 20]))
//! 	.unwrap();
//!
//! // [op + session id][tag][packet id][payload]
//! let mut packet = vec![0u8; 2 + 20 + 1 + 7];
//! assert!(instance.borrow_mut().generate(&mut packet, 2, 20, 1));
//! assert!(instance.borrow_mut().verify(&packet, 2, 20, 1));
//! ```

pub mod mac;

pub use mac::config::ControlAuthConfig;
pub use mac::engine::MacEngine;
pub use mac::hmac::RustCryptoApi;
pub use mac::key::{KeyDirection, KeySource, Role, StaticKey};
pub use mac::layout::PacketLayout;
pub use mac::registry::{
	DigestAlgorithm, DigestMetadata, MacError, MacErrorKind, MAX_HMAC_SIZE,
};
pub use mac::selection::{
	CryptoMacFactory, MacContext, MacContextPtr, MacFactory,
	MacFactoryPtr, MacInstance, MacInstancePtr,
};
pub use mac::tls_auth::TlsAuth;
