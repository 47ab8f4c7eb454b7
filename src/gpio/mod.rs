//! # GPIO module
//!
//! Symbolic access to the STM32F0 GPIO banks. A pin is declared once, by bank,
//! number and active polarity, and then configured, driven and sensed through
//! a small vocabulary. Every operation compiles to a direct access of the
//! bank's MODER, OTYPER, OSPEEDR, PUPDR, IDR, ODR, BSRR or BRR register.
//!
//! This API provides two different submodules, [`pins`] and [`dynpins`],
//! representing two different ways to handle GPIO pins. The default, [`pins`],
//! is a type-level API where the identity and polarity of each pin are part of
//! its type, so every access is resolved at compile-time. The alternative,
//! [`dynpins`], is a type-erased, value-level API for storing pins of
//! different types together.
//!
//! Clocking the banks and selecting alternate function numbers are left to
//! the surrounding firmware; the banks must be clocked before any pin is
//! used.
//!
//! ## Concurrency
//!
//! - Setting, clearing, activating and deactivating a pin are single stores
//!   to BSRR or BRR. They are safe against any concurrent access to the bank.
//! - Configuration is a read-modify-write of a register shared by the 16
//!   pins of a bank. Callers must keep it from racing with configuration of
//!   the same bank in an interrupt handler, e.g. with `configure_atomic`.
//! - Toggling reads ODR before storing and is not atomic with respect to
//!   other writers of the same pin.
//!
//! ## Examples
//!
//! - Blinky demo: `demos/blinky.rs`
//! - Button demo: `demos/button.rs`
pub mod dynpins;
pub use dynpins::*;

pub mod pins;
pub use pins::*;

mod reg;
