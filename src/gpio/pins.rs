//! # Type-level module for GPIO pins
//!
//! This module provides a type-level API for GPIO pins. A [`Pin`] names one
//! physical pin once, by bank, number and active level, and every operation on
//! it expands to a direct access of that bank's registers. Each [`Pin`] is
//! zero-sized and `Copy`, so there is no data to pass around and no run-time
//! dispatch: the register address, bit shift and polarity are all constants.
//!
//! Type-level [`Pin`]s are parameterized by two type-level enums, [`PinId`] and
//! [`Polarity`].
//!
//! ```ignore
//! pub struct Pin<I, A = ActiveHigh>
//! where
//!     I: PinId,
//!     A: Polarity,
//! {
//!     // ...
//! }
//! ```
//!
//! A `PinId` identifies a pin by its bank (A, B, C, D, F) and pin number. Each
//! `PinId` instance is named according to its datasheet identifier, e.g.
//! [`PA5`]. Pins that do not exist have no `PinId`, so naming one is a
//! compile error. A `Polarity` is either [`ActiveHigh`] or [`ActiveLow`] and
//! describes the wiring: which raw level means "on".
//!
//! Pins are declared as constants, usually in a board module:
//!
//! ```ignore
//! use stm32_pins::gpio::{ActiveLow, Pin, PA5, PB2};
//!
//! pub const LED: Pin<PA5, ActiveLow> = Pin::new();
//! pub const BUTTON: Pin<PB2> = Pin::new();
//!
//! LED.push_pull_output();
//! BUTTON.pull_up_input();
//! if BUTTON.is_active() {
//!     LED.activate();
//! }
//! ```
//!
//! A [`Pin`] does not own its bank and does not track its mode. Configuration
//! is a read-modify-write of registers shared with the other pins of the
//! bank; see [`Pin::configure`] for the rules when interrupts also touch the
//! bank.
//!
//! # Embedded HAL traits
//!
//! This module implements the embedded HAL GPIO traits [`InputPin`],
//! [`OutputPin`], [`StatefulOutputPin`] and [`ToggleableOutputPin`] for every
//! [`Pin`]. They operate on raw levels and never fail.
//!
//! # Type-level features
//!
//! The [`AnyPin`] trait defines an [`AnyKind`] type class for all `Pin`
//! types, so drivers can be written generically over any pin.
//!
//! [`AnyKind`]: https://docs.rs/atsamd-hal/0.13.0/atsamd_hal/typelevel/index.html

use super::dynpins::{DynPinId, DynPolarity, DynPort};
use super::reg::RegisterInterface;
use crate::{typelevel::Is, Sealed};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};
use paste::paste;

//==================================================================================================
//  Errors and Definitions
//==================================================================================================

/// Digital level of a pin
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl PinState {
    #[inline(always)]
    pub fn is_high(&self) -> bool {
        *self == PinState::High
    }

    #[inline(always)]
    pub fn is_low(&self) -> bool {
        *self == PinState::Low
    }
}

impl From<bool> for PinState {
    #[inline(always)]
    fn from(value: bool) -> Self {
        if value {
            PinState::High
        } else {
            PinState::Low
        }
    }
}

impl core::ops::Not for PinState {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            PinState::High => PinState::Low,
            PinState::Low => PinState::High,
        }
    }
}

/// GPIO error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// The [`DynPin`](crate::gpio::DynPin) did not have the ID or polarity of
    /// the requested [`Pin`] type.
    InvalidPinType,
}

//==================================================================================================
//  Polarity
//==================================================================================================

/// Type-level enum for the active level of a pin
///
/// The valid options are [`ActiveHigh`] and [`ActiveLow`].
pub trait Polarity: Sealed {
    /// Corresponding [`DynPolarity`](super::DynPolarity)
    const DYN: DynPolarity;
    /// The opposite polarity
    type Inverse: Polarity;
}

/// Type-level variant of [`Polarity`]: the pin is "on" when driven high
pub enum ActiveHigh {}
/// Type-level variant of [`Polarity`]: the pin is "on" when driven low
pub enum ActiveLow {}

impl Polarity for ActiveHigh {
    const DYN: DynPolarity = DynPolarity::ActiveHigh;
    type Inverse = ActiveLow;
}
impl Polarity for ActiveLow {
    const DYN: DynPolarity = DynPolarity::ActiveLow;
    type Inverse = ActiveHigh;
}

impl Sealed for ActiveHigh {}
impl Sealed for ActiveLow {}

//==================================================================================================
//  Pin IDs
//==================================================================================================

/// Type-level enum for pin IDs
pub trait PinId: Sealed {
    /// Corresponding [`DynPinId`](super::DynPinId)
    const DYN: DynPinId;
}

macro_rules! pin_id {
    ($Port:ident, $Id:ident, $NUM:literal) => {
        // Need paste macro to use ident in doc attribute
        paste! {
            #[doc = "Pin ID representing pin " $Id]
            pub enum $Id {}
            impl Sealed for $Id {}
            impl PinId for $Id {
                const DYN: DynPinId = DynPinId {
                    port: DynPort::$Port,
                    num: $NUM,
                };
            }
        }
    };
}

//==================================================================================================
//  Pin
//==================================================================================================

/// A type-level GPIO pin, parameterized by [`PinId`] and [`Polarity`] types
pub struct Pin<I: PinId, A: Polarity = ActiveHigh> {
    pub(in crate::gpio) regs: Registers<I, A>,
}

impl<I: PinId, A: Polarity> Sealed for Pin<I, A> {}

impl<I: PinId, A: Polarity> AnyPin for Pin<I, A> {
    type Id = I;
    type Polarity = A;
}

impl<I: PinId, A: Polarity> Clone for Pin<I, A> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: PinId, A: Polarity> Copy for Pin<I, A> {}

impl<I: PinId, A: Polarity> core::fmt::Debug for Pin<I, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("Pin")
            .field(&I::DYN.port.letter())
            .field(&I::DYN.num)
            .field(&A::DYN)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<I: PinId, A: Polarity> defmt::Format for Pin<I, A> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Pin({}, {}, {})",
            I::DYN.port.letter(),
            I::DYN.num,
            A::DYN
        )
    }
}

/// Operations shared by [`Pin`] and [`DynPin`](super::DynPin)
///
/// Expects a `regs` field implementing [`RegisterInterface`] to be in scope.
macro_rules! common_pin_functions {
    () => {
        /// Apply one mode, touching only this pin's field of one register
        ///
        /// This is a read-modify-write of a register word shared by every pin
        /// of the bank. If an interrupt handler may reconfigure another pin of
        /// the same bank, use [`configure_cs`](Self::configure_cs) or
        /// [`configure_atomic`](Self::configure_atomic) from thread mode.
        #[inline]
        pub fn configure(&self, mode: impl Into<$crate::gpio::Mode>) {
            self.regs.configure(mode.into());
        }

        /// [`configure`](Self::configure), with proof that interrupts are
        /// masked
        #[inline]
        pub fn configure_cs(
            &self,
            cs: ::critical_section::CriticalSection<'_>,
            mode: impl Into<$crate::gpio::Mode>,
        ) {
            self.regs.configure_cs(cs, mode.into());
        }

        /// [`configure`](Self::configure) inside a critical section
        #[inline]
        pub fn configure_atomic(&self, mode: impl Into<$crate::gpio::Mode>) {
            self.regs.configure_atomic(mode.into());
        }

        /// Configure the pin to operate as a floating input
        #[inline]
        pub fn floating_input(&self) {
            self.configure($crate::gpio::Mode::NoPull);
            self.configure($crate::gpio::Mode::Input);
        }

        /// Configure the pin to operate as a pulled up input
        #[inline]
        pub fn pull_up_input(&self) {
            self.configure($crate::gpio::Mode::PullUp);
            self.configure($crate::gpio::Mode::Input);
        }

        /// Configure the pin to operate as a pulled down input
        #[inline]
        pub fn pull_down_input(&self) {
            self.configure($crate::gpio::Mode::PullDown);
            self.configure($crate::gpio::Mode::Input);
        }

        /// Configure the pin to operate as a push-pull output
        #[inline]
        pub fn push_pull_output(&self) {
            self.configure($crate::gpio::Mode::PushPull);
            self.configure($crate::gpio::Mode::Output);
        }

        /// Configure the pin to operate as an open-drain output
        #[inline]
        pub fn open_drain_output(&self) {
            self.configure($crate::gpio::Mode::OpenDrain);
            self.configure($crate::gpio::Mode::Output);
        }

        /// Hand the pin to a peripheral. The alternate function number is not
        /// touched.
        #[inline]
        pub fn alternate(&self) {
            self.configure($crate::gpio::Mode::Alternate);
        }

        /// Configure the pin for analog use, with the pull resistors off
        #[inline]
        pub fn analog(&self) {
            self.configure($crate::gpio::Mode::NoPull);
            self.configure($crate::gpio::Mode::Analog);
        }

        /// Drive the line high through BSRR
        #[inline]
        pub fn set_high(&self) {
            self.regs.write_pin(true);
        }

        /// Drive the line low through BRR
        #[inline]
        pub fn set_low(&self) {
            self.regs.write_pin(false);
        }

        /// Drive the line to a raw level
        #[inline]
        pub fn write(&self, state: $crate::gpio::PinState) {
            self.regs.write_pin(state.is_high());
        }

        /// Invert the output latch
        ///
        /// The latch is read before the set or reset store, so a write to
        /// this pin from an interrupt in between is lost.
        #[inline]
        pub fn toggle(&self) {
            self.regs.toggle();
        }

        /// Drive the line to its active level
        #[inline]
        pub fn activate(&self) {
            self.regs.write_active(true);
        }

        /// Drive the line to its inactive level
        #[inline]
        pub fn deactivate(&self) {
            self.regs.write_active(false);
        }

        #[inline]
        pub fn set_active(&self, active: bool) {
            self.regs.write_active(active);
        }

        /// Is the output latch (ODR) high?
        #[inline]
        pub fn is_set_high(&self) -> bool {
            self.regs.read_latch()
        }

        /// Is the output latch (ODR) low?
        #[inline]
        pub fn is_set_low(&self) -> bool {
            !self.regs.read_latch()
        }

        #[inline]
        pub fn read_latch(&self) -> $crate::gpio::PinState {
            self.regs.read_latch().into()
        }

        /// Does the output latch hold the active level?
        #[inline]
        pub fn is_set_active(&self) -> bool {
            self.regs.latch_active()
        }

        /// Is the input (IDR) high?
        #[inline]
        pub fn is_high(&self) -> bool {
            self.regs.read_pin()
        }

        /// Is the input (IDR) low?
        #[inline]
        pub fn is_low(&self) -> bool {
            !self.regs.read_pin()
        }

        #[inline]
        pub fn read(&self) -> $crate::gpio::PinState {
            self.regs.read_pin().into()
        }

        /// Is the input at its active level?
        #[inline]
        pub fn is_active(&self) -> bool {
            self.regs.read_active()
        }
    };
}

pub(crate) use common_pin_functions;

impl<I: PinId, A: Polarity> Pin<I, A> {
    /// Create a new [`Pin`]
    ///
    /// Pins do not own their bank, so any number of descriptors may name the
    /// same physical pin.
    #[inline(always)]
    pub const fn new() -> Pin<I, A> {
        Pin {
            regs: Registers {
                id: PhantomData,
                polarity: PhantomData,
            },
        }
    }

    #[inline(always)]
    pub fn id(&self) -> DynPinId {
        I::DYN
    }

    #[inline(always)]
    pub fn polarity(&self) -> DynPolarity {
        A::DYN
    }

    /// Bank letter of this pin
    #[inline(always)]
    pub fn port(&self) -> char {
        I::DYN.port.letter()
    }

    /// Pin number inside its bank
    #[inline(always)]
    pub fn bit(&self) -> u8 {
        I::DYN.num
    }

    /// Single-bit mask of this pin in the data registers
    #[inline(always)]
    pub fn mask(&self) -> u16 {
        1 << I::DYN.num
    }

    /// The same physical pin with the opposite active level
    #[inline(always)]
    pub fn inverted(self) -> Pin<I, A::Inverse> {
        Pin::new()
    }

    /// Erase the pin ID and polarity from the type
    #[inline]
    pub fn downgrade(self) -> super::DynPin {
        self.into()
    }

    common_pin_functions!();
}

impl<I: PinId, A: Polarity> Default for Pin<I, A> {
    #[inline(always)]
    fn default() -> Self {
        Pin::new()
    }
}

pub type SpecificPin<P> = Pin<<P as AnyPin>::Id, <P as AnyPin>::Polarity>;

//==================================================================================================
//  AnyPin
//==================================================================================================

/// Type class for [`Pin`] types
///
/// This trait uses the [`AnyKind`] trait pattern to create a [type class] for
/// [`Pin`] types. A function taking `impl AnyPin` accepts every pin and can
/// recover the concrete [`SpecificPin`] with `into()`.
///
/// [`AnyKind`]: https://docs.rs/atsamd-hal/0.13.0/atsamd_hal/typelevel/index.html
/// [type class]: https://docs.rs/atsamd-hal/0.13.0/atsamd_hal/typelevel/index.html#type-classes
pub trait AnyPin: Is<Type = SpecificPin<Self>> {
    type Id: PinId;
    type Polarity: Polarity;
}

impl<I: PinId, A: Polarity> AsRef<Self> for Pin<I, A> {
    #[inline]
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<I: PinId, A: Polarity> AsMut<Self> for Pin<I, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut Self {
        self
    }
}

//==================================================================================================
//  Embedded HAL traits
//==================================================================================================

impl<I: PinId, A: Polarity> OutputPin for Pin<I, A> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.regs.write_pin(true);
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.regs.write_pin(false);
        Ok(())
    }
}

impl<I: PinId, A: Polarity> StatefulOutputPin for Pin<I, A> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.regs.read_latch())
    }

    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.regs.read_latch())
    }
}

impl<I: PinId, A: Polarity> ToggleableOutputPin for Pin<I, A> {
    type Error = Infallible;

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.regs.toggle();
        Ok(())
    }
}

impl<I: PinId, A: Polarity> InputPin for Pin<I, A> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.regs.read_pin())
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.regs.read_pin())
    }
}

//==================================================================================================
//  Registers
//==================================================================================================

/// Provide a register interface for [`Pin`]s
///
/// The pin ID and polarity are carried in the type only, so every access
/// resolves to a constant address and mask.
pub(in crate::gpio) struct Registers<I: PinId, A: Polarity> {
    id: PhantomData<I>,
    polarity: PhantomData<A>,
}

impl<I: PinId, A: Polarity> Clone for Registers<I, A> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: PinId, A: Polarity> Copy for Registers<I, A> {}

// A [`PinId`] exists only for pins the device provides, so this
// implementation is safe.
unsafe impl<I: PinId, A: Polarity> RegisterInterface for Registers<I, A> {
    #[inline(always)]
    fn id(&self) -> DynPinId {
        I::DYN
    }

    #[inline(always)]
    fn polarity(&self) -> DynPolarity {
        A::DYN
    }
}

//==================================================================================================
//  Pin definitions
//==================================================================================================

macro_rules! declare_pins {
    (
        $Port:ident, [$(($Id:ident, $NUM:literal),)+]
    ) => {
        $(
            pin_id!($Port, $Id, $NUM);
        )+
    }
}

declare_pins!(
    A,
    [
        (PA0, 0),
        (PA1, 1),
        (PA2, 2),
        (PA3, 3),
        (PA4, 4),
        (PA5, 5),
        (PA6, 6),
        (PA7, 7),
        (PA8, 8),
        (PA9, 9),
        (PA10, 10),
        (PA11, 11),
        (PA12, 12),
        (PA13, 13),
        (PA14, 14),
        (PA15, 15),
    ]
);

declare_pins!(
    B,
    [
        (PB0, 0),
        (PB1, 1),
        (PB2, 2),
        (PB3, 3),
        (PB4, 4),
        (PB5, 5),
        (PB6, 6),
        (PB7, 7),
        (PB8, 8),
        (PB9, 9),
        (PB10, 10),
        (PB11, 11),
        (PB12, 12),
        (PB13, 13),
        (PB14, 14),
        (PB15, 15),
    ]
);

declare_pins!(
    C,
    [
        (PC0, 0),
        (PC1, 1),
        (PC2, 2),
        (PC3, 3),
        (PC4, 4),
        (PC5, 5),
        (PC6, 6),
        (PC7, 7),
        (PC8, 8),
        (PC9, 9),
        (PC10, 10),
        (PC11, 11),
        (PC12, 12),
        (PC13, 13),
        (PC14, 14),
        (PC15, 15),
    ]
);

declare_pins!(
    D,
    [
        (PD0, 0),
        (PD1, 1),
        (PD2, 2),
        (PD3, 3),
        (PD4, 4),
        (PD5, 5),
        (PD6, 6),
        (PD7, 7),
        (PD8, 8),
        (PD9, 9),
        (PD10, 10),
        (PD11, 11),
        (PD12, 12),
        (PD13, 13),
        (PD14, 14),
        (PD15, 15),
    ]
);

#[cfg(not(feature = "stm32f0x0"))]
declare_pins!(
    E,
    [
        (PE0, 0),
        (PE1, 1),
        (PE2, 2),
        (PE3, 3),
        (PE4, 4),
        (PE5, 5),
        (PE6, 6),
        (PE7, 7),
        (PE8, 8),
        (PE9, 9),
        (PE10, 10),
        (PE11, 11),
        (PE12, 12),
        (PE13, 13),
        (PE14, 14),
        (PE15, 15),
    ]
);

declare_pins!(
    F,
    [
        (PF0, 0),
        (PF1, 1),
        (PF2, 2),
        (PF3, 3),
        (PF4, 4),
        (PF5, 5),
        (PF6, 6),
        (PF7, 7),
        (PF8, 8),
        (PF9, 9),
        (PF10, 10),
        (PF11, 11),
        (PF12, 12),
        (PF13, 13),
        (PF14, 14),
        (PF15, 15),
    ]
);
