//! # Type-erased, value-level module for GPIO pins
//!
//! Each type-level [`Pin`] is a distinct type, so pins of different banks or
//! polarities cannot be stored in one array. [`DynPin`] erases the
//! [`PinId`] and [`Polarity`] types and keeps the same information as plain
//! values, at the cost of a few bytes per pin and a run-time port dispatch.
//!
//! Instances of [`DynPin`] cannot be created directly. They are created from
//! their type-level equivalents using [`From`]/[`Into`], so every [`DynPin`]
//! still names a pin that exists on the device.
//!
//! ```ignore
//! let leds: [DynPin; 2] = [LED_RED.into(), LED_GREEN.into()];
//! for led in leds.iter() {
//!     led.activate();
//! }
//! ```
//!
//! Converting back to a [`Pin`] is fallible, because the compiler cannot
//! verify the identity and polarity of a [`DynPin`]. Use
//! [`TryFrom`](core::convert::TryFrom) for this conversion.
//!
//! This module also holds the value-level [`Mode`] enumeration consumed by
//! `configure` on both APIs.

use super::{
    pins::{common_pin_functions, Pin, PinError, PinId, PinState, Polarity},
    reg::RegisterInterface,
};
use core::convert::Infallible;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

//==================================================================================================
//  Mode
//==================================================================================================

/// Electrical configuration applied by `configure`
///
/// The variants form four independent axes, each stored in its own register
/// field: direction (MODER), output type (OTYPER), pull (PUPDR) and speed
/// (OSPEEDR). Applying a variant only touches its own field, so a pin is
/// fully configured by one variant per axis. The axis enums [`Direction`],
/// [`OutputType`], [`Pull`] and [`Speed`] convert into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Input,
    Output,
    Alternate,
    Analog,
    PushPull,
    OpenDrain,
    NoPull,
    PullUp,
    PullDown,
    LowSpeed,
    MediumSpeed,
    HighSpeed,
}

impl Mode {
    /// Every mode, in declaration order
    pub const ALL: [Mode; 12] = [
        Mode::Input,
        Mode::Output,
        Mode::Alternate,
        Mode::Analog,
        Mode::PushPull,
        Mode::OpenDrain,
        Mode::NoPull,
        Mode::PullUp,
        Mode::PullDown,
        Mode::LowSpeed,
        Mode::MediumSpeed,
        Mode::HighSpeed,
    ];
}

/// Pin direction and function, stored in MODER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
    /// Routed to a peripheral. The function number is selected elsewhere.
    Alternate,
    Analog,
}

/// Output driver type, stored in OTYPER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

/// Pull resistor, stored in PUPDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Output slew rate, stored in OSPEEDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low,
    Medium,
    High,
}

impl From<Direction> for Mode {
    #[inline(always)]
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Input => Mode::Input,
            Direction::Output => Mode::Output,
            Direction::Alternate => Mode::Alternate,
            Direction::Analog => Mode::Analog,
        }
    }
}

impl From<OutputType> for Mode {
    #[inline(always)]
    fn from(otype: OutputType) -> Self {
        match otype {
            OutputType::PushPull => Mode::PushPull,
            OutputType::OpenDrain => Mode::OpenDrain,
        }
    }
}

impl From<Pull> for Mode {
    #[inline(always)]
    fn from(pull: Pull) -> Self {
        match pull {
            Pull::None => Mode::NoPull,
            Pull::Up => Mode::PullUp,
            Pull::Down => Mode::PullDown,
        }
    }
}

impl From<Speed> for Mode {
    #[inline(always)]
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Low => Mode::LowSpeed,
            Speed::Medium => Mode::MediumSpeed,
            Speed::High => Mode::HighSpeed,
        }
    }
}

//==================================================================================================
//  DynPort, DynPinId & DynPolarity
//==================================================================================================

/// Value-level `enum` for GPIO banks
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DynPort {
    A,
    B,
    C,
    D,
    #[cfg(not(feature = "stm32f0x0"))]
    E,
    F,
}

impl DynPort {
    /// Bank letter as printed in the datasheet
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            DynPort::A => 'A',
            DynPort::B => 'B',
            DynPort::C => 'C',
            DynPort::D => 'D',
            #[cfg(not(feature = "stm32f0x0"))]
            DynPort::E => 'E',
            DynPort::F => 'F',
        }
    }
}

/// Value-level `struct` representing pin IDs
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DynPinId {
    pub port: DynPort,
    pub num: u8,
}

/// Value-level `enum` for the active level of a pin
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DynPolarity {
    ActiveHigh,
    ActiveLow,
}

impl DynPolarity {
    /// Raw level that represents the active state
    #[inline(always)]
    pub const fn active_level(self) -> PinState {
        match self {
            DynPolarity::ActiveHigh => PinState::High,
            DynPolarity::ActiveLow => PinState::Low,
        }
    }

    /// Raw level that represents `active`
    #[inline(always)]
    pub fn level(self, active: bool) -> PinState {
        if active {
            self.active_level()
        } else {
            !self.active_level()
        }
    }

    /// Whether the raw `level` is the active state
    #[inline(always)]
    pub fn is_active(self, level: PinState) -> bool {
        level == self.active_level()
    }

    #[inline(always)]
    pub const fn inverse(self) -> Self {
        match self {
            DynPolarity::ActiveHigh => DynPolarity::ActiveLow,
            DynPolarity::ActiveLow => DynPolarity::ActiveHigh,
        }
    }
}

//==================================================================================================
//  DynRegisters
//==================================================================================================

/// Provide a register interface for [`DynPin`]s
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(in crate::gpio) struct DynRegisters {
    id: DynPinId,
    polarity: DynPolarity,
}

// [`DynRegisters`] is only built from a [`PinId`], which exists only for pins
// that the device provides, so this implementation is safe.
unsafe impl RegisterInterface for DynRegisters {
    #[inline]
    fn id(&self) -> DynPinId {
        self.id
    }

    #[inline]
    fn polarity(&self) -> DynPolarity {
        self.polarity
    }
}

//==================================================================================================
//  DynPin
//==================================================================================================

/// A value-level pin, parameterized by [`DynPinId`] and [`DynPolarity`]
///
/// This type acts as a type-erased version of [`Pin`]. Every pin is represented
/// by the same type, and pins are tracked and distinguished at run-time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DynPin {
    pub(in crate::gpio) regs: DynRegisters,
}

impl DynPin {
    #[inline]
    pub(in crate::gpio) const fn new(id: DynPinId, polarity: DynPolarity) -> Self {
        DynPin {
            regs: DynRegisters { id, polarity },
        }
    }

    /// Return a copy of the pin ID
    #[inline]
    pub fn id(&self) -> DynPinId {
        self.regs.id
    }

    /// Return a copy of the pin polarity
    #[inline]
    pub fn polarity(&self) -> DynPolarity {
        self.regs.polarity
    }

    #[inline]
    pub fn port(&self) -> char {
        self.regs.id.port.letter()
    }

    /// Pin number inside its bank
    #[inline]
    pub fn bit(&self) -> u8 {
        self.regs.id.num
    }

    /// Single-bit mask of this pin in the data registers
    #[inline]
    pub fn mask(&self) -> u16 {
        1 << self.regs.id.num
    }

    /// The same physical pin with the opposite active level
    #[inline]
    pub fn inverted(self) -> Self {
        DynPin::new(self.regs.id, self.regs.polarity.inverse())
    }

    common_pin_functions!();
}

//==================================================================================================
//  Conversions
//==================================================================================================

impl<I: PinId, A: Polarity> From<Pin<I, A>> for DynPin {
    #[inline]
    fn from(_pin: Pin<I, A>) -> Self {
        DynPin::new(I::DYN, A::DYN)
    }
}

impl<I: PinId, A: Polarity> TryFrom<DynPin> for Pin<I, A> {
    type Error = PinError;

    #[inline]
    fn try_from(pin: DynPin) -> Result<Self, Self::Error> {
        if pin.id() == I::DYN && pin.polarity() == A::DYN {
            Ok(Pin::new())
        } else {
            Err(PinError::InvalidPinType)
        }
    }
}

//==================================================================================================
//  Embedded HAL traits
//==================================================================================================

impl OutputPin for DynPin {
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

impl StatefulOutputPin for DynPin {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.regs.read_latch())
    }

    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.regs.read_latch())
    }
}

impl ToggleableOutputPin for DynPin {
    type Error = Infallible;

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.regs.toggle();
        Ok(())
    }
}

impl InputPin for DynPin {
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
