// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: ctrlmac
// Module: mac (control channel message authentication)
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Control channel packet authentication.
//! Submodules provide the digest registry, the provider interface and its
//! RustCrypto implementation, the packet HMAC engine, and the runtime
//! selection layer that hides the provider from protocol code.

pub mod backend;
pub mod config;
pub mod consttime;
pub mod engine;
pub mod hmac;
pub mod key;
pub mod layout;
pub mod registry;
pub mod selection;
pub mod tls_auth;
