use super::dynpins::{DynPinId, DynPolarity, DynPort, Mode};
#[cfg(not(test))]
use crate::pac;
use critical_section::CriticalSection;
use vcell::VolatileCell;

//==================================================================================================
//  Register block
//==================================================================================================

/// Memory layout shared by every STM32F0 GPIO bank
///
/// The device crate only provides the base address of each bank. Its register
/// blocks expose one named field per pin, so the pointer is cast to this
/// layout and fields are addressed by shift instead.
#[repr(C)]
pub(super) struct RegisterBlock {
    pub(super) moder: VolatileCell<u32>,
    pub(super) otyper: VolatileCell<u32>,
    pub(super) ospeedr: VolatileCell<u32>,
    pub(super) pupdr: VolatileCell<u32>,
    pub(super) idr: VolatileCell<u32>,
    pub(super) odr: VolatileCell<u32>,
    pub(super) bsrr: VolatileCell<u32>,
    _lckr: VolatileCell<u32>,
    _afr: [VolatileCell<u32>; 2],
    pub(super) brr: VolatileCell<u32>,
}

impl RegisterBlock {
    /// Register block with every register at zero, used as a simulated bank
    #[cfg(test)]
    pub(super) const fn zeroed() -> Self {
        RegisterBlock {
            moder: VolatileCell::new(0),
            otyper: VolatileCell::new(0),
            ospeedr: VolatileCell::new(0),
            pupdr: VolatileCell::new(0),
            idr: VolatileCell::new(0),
            odr: VolatileCell::new(0),
            bsrr: VolatileCell::new(0),
            _lckr: VolatileCell::new(0),
            _afr: [VolatileCell::new(0), VolatileCell::new(0)],
            brr: VolatileCell::new(0),
        }
    }

    #[inline(always)]
    pub(super) fn config(&self, reg: ConfigReg) -> &VolatileCell<u32> {
        match reg {
            ConfigReg::Moder => &self.moder,
            ConfigReg::Otyper => &self.otyper,
            ConfigReg::Ospeedr => &self.ospeedr,
            ConfigReg::Pupdr => &self.pupdr,
        }
    }
}

impl DynPort {
    /// Base address of the bank, taken from the device crate
    #[cfg(not(test))]
    #[inline(always)]
    pub(super) fn ptr(self) -> *const RegisterBlock {
        match self {
            DynPort::A => pac::GPIOA::ptr() as *const _,
            DynPort::B => pac::GPIOB::ptr() as *const _,
            DynPort::C => pac::GPIOC::ptr() as *const _,
            DynPort::D => pac::GPIOD::ptr() as *const _,
            #[cfg(not(feature = "stm32f0x0"))]
            DynPort::E => pac::GPIOE::ptr() as *const _,
            DynPort::F => pac::GPIOF::ptr() as *const _,
        }
    }

    /// Simulated bank of the calling thread
    ///
    /// Host tests run on many threads at once, so each thread gets its own
    /// set of banks in RAM.
    #[cfg(test)]
    pub(super) fn ptr(self) -> *const RegisterBlock {
        SIM_BANKS.with(|banks| &banks[self as usize] as *const _)
    }
}

#[cfg(test)]
std::thread_local! {
    static SIM_BANKS: [RegisterBlock; 6] = {
        const BANK: RegisterBlock = RegisterBlock::zeroed();
        [BANK; 6]
    };
}

//==================================================================================================
//  Field layout
//==================================================================================================

/// Configuration registers touched by a [`Mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ConfigReg {
    Moder,
    Otyper,
    Ospeedr,
    Pupdr,
}

impl ConfigReg {
    /// Bits per pin. OTYPER uses one, MODER, OSPEEDR and PUPDR use two.
    #[inline(always)]
    pub(super) const fn width(self) -> u32 {
        match self {
            ConfigReg::Otyper => 1,
            _ => 2,
        }
    }

    /// Position of the field for pin `num`
    #[inline(always)]
    pub(super) const fn shift(self, num: u8) -> u32 {
        self.width() * num as u32
    }
}

/// Mask of pin `num` in the one-bit-per-pin registers (IDR, ODR, BSRR, BRR)
#[inline(always)]
pub(super) const fn mask_1(num: u8) -> u32 {
    1 << num
}

//==================================================================================================
//  ModeFields
//==================================================================================================

/// The read-modify-write that establishes one [`Mode`]
///
/// `clear` and `set` are field values, unshifted. Moving a field to `00` only
/// clears and moving it to all ones only sets; every other value clears the
/// whole field before setting, so leftovers of a previous mode cannot survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ModeFields {
    pub(super) reg: ConfigReg,
    pub(super) clear: u32,
    pub(super) set: u32,
}

impl From<Mode> for ModeFields {
    #[inline(always)]
    fn from(mode: Mode) -> Self {
        use ConfigReg::*;
        let (reg, clear, set) = match mode {
            Mode::Input => (Moder, 0b11, 0b00),
            Mode::Output => (Moder, 0b11, 0b01),
            Mode::Alternate => (Moder, 0b11, 0b10),
            Mode::Analog => (Moder, 0b00, 0b11),
            Mode::PushPull => (Otyper, 0b1, 0b0),
            Mode::OpenDrain => (Otyper, 0b0, 0b1),
            Mode::NoPull => (Pupdr, 0b11, 0b00),
            Mode::PullUp => (Pupdr, 0b11, 0b01),
            Mode::PullDown => (Pupdr, 0b11, 0b10),
            // x0 is low speed, the high bit is left alone
            Mode::LowSpeed => (Ospeedr, 0b01, 0b00),
            Mode::MediumSpeed => (Ospeedr, 0b11, 0b01),
            Mode::HighSpeed => (Ospeedr, 0b00, 0b11),
        };
        ModeFields { reg, clear, set }
    }
}

//==================================================================================================
// Register Interface
//==================================================================================================

/// Register operations for a single pin
///
/// Implementers supply the pin identity through [`id`] and its wiring through
/// [`polarity`]. Every other function is provided and compiles down to one or
/// two accesses of the bank's registers.
///
/// Descriptors do not own their bank, so nothing here serializes access:
///
/// - [`configure`] is a read-modify-write of a register word shared by all
///   16 pins of the bank. A mode change interrupted by another mode change on
///   the same bank loses one of the two. Use [`configure_cs`] or
///   [`configure_atomic`] when an interrupt handler may also reconfigure pins
///   of the bank.
/// - [`write_pin`] is a single store to BSRR or BRR and only affects this
///   pin, so it is safe against any other writer.
/// - [`toggle`] reads ODR before storing, and is not atomic with respect to
///   another writer of this pin.
///
/// # Safety
///
/// [`id`] must name a bank that exists on the device, is clocked and is
/// mapped at the address the device crate reports. Implementers overriding
/// [`port_reg`] must return a valid register block.
///
/// [`id`]: Self::id
/// [`polarity`]: Self::polarity
/// [`port_reg`]: Self::port_reg
/// [`configure`]: Self::configure
/// [`configure_cs`]: Self::configure_cs
/// [`configure_atomic`]: Self::configure_atomic
/// [`write_pin`]: Self::write_pin
/// [`toggle`]: Self::toggle
pub(super) unsafe trait RegisterInterface {
    /// Provide a [`DynPinId`] identifying the set of registers controlled by
    /// this type.
    fn id(&self) -> DynPinId;

    /// Electrical level that counts as "active" for this pin
    fn polarity(&self) -> DynPolarity;

    #[inline(always)]
    fn port_reg(&self) -> &RegisterBlock {
        // Safety: the bank is mapped per the trait contract, and all access
        // goes through volatile cells
        unsafe { &*self.id().port.ptr() }
    }

    #[inline(always)]
    fn mask_32(&self) -> u32 {
        mask_1(self.id().num)
    }

    /// Apply one mode to this pin's field
    #[inline]
    fn configure(&self, mode: Mode) {
        let ModeFields { reg, clear, set } = mode.into();
        let shift = reg.shift(self.id().num);
        let cell = self.port_reg().config(reg);
        cell.set((cell.get() & !(clear << shift)) | (set << shift));
    }

    /// Apply one mode while the caller holds a critical section
    #[inline]
    fn configure_cs(&self, _cs: CriticalSection<'_>, mode: Mode) {
        self.configure(mode);
    }

    /// Apply one mode inside a freshly acquired critical section
    #[inline]
    fn configure_atomic(&self, mode: Mode) {
        critical_section::with(|cs| self.configure_cs(cs, mode));
    }

    /// Drive the line through the atomic set/reset registers
    #[inline]
    fn write_pin(&self, bit: bool) {
        let portreg = self.port_reg();
        let mask = self.mask_32();
        if bit {
            portreg.bsrr.set(mask);
        } else {
            portreg.brr.set(mask);
        }
    }

    /// Read the input data register
    #[inline]
    fn read_pin(&self) -> bool {
        self.port_reg().idr.get() & self.mask_32() != 0
    }

    /// Read back the output latch
    #[inline]
    fn read_latch(&self) -> bool {
        self.port_reg().odr.get() & self.mask_32() != 0
    }

    /// Invert the output latch. One load and one store, not atomic.
    #[inline]
    fn toggle(&self) {
        self.write_pin(!self.read_latch());
    }

    #[inline]
    fn write_active(&self, active: bool) {
        self.write_pin(self.polarity().level(active).is_high());
    }

    #[inline]
    fn read_active(&self) -> bool {
        self.polarity().is_active(self.read_pin().into())
    }

    #[inline]
    fn latch_active(&self) -> bool {
        self.polarity().is_active(self.read_latch().into())
    }
}
