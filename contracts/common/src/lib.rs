//! Shared types, math and cross-contract interfaces for the bounty vault
//! contracts.
//!
//! This crate provides:
//! - [`math`]: basis-point and fixed-point helpers used by payouts and
//!   reward accrual.
//! - [`pausable`]: the registry-wide emergency pause flag.
//! - [`types`]: bounty splits, claims and swap records shared between
//!   contracts.
//! - [`interfaces`]: typed clients for calling the other contracts.
//!
//! # Error code ranges
//!
//! Every contract declares its own error enum but follows one table, so a
//! code alone tells an integrator which class of rejection happened.
//!
//! | Range   | Purpose                                         |
//! |---------|-------------------------------------------------|
//! | 1 – 9   | Lifecycle / initialisation                      |
//! | 10 – 19 | Authorisation (wrong role or caller)            |
//! | 20 – 29 | Resource not found                              |
//! | 30 – 39 | Invariant (malformed configuration or input)    |
//! | 40 – 59 | Contract state (claim, vault, timelock state)   |
//! | 60 – 69 | Time window (safety, challenge, timelock delay) |
//! | 70+     | Arithmetic                                      |

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod interfaces;
pub mod math;
pub mod pausable;
pub mod types;

pub use math::*;
pub use types::*;
