//! The compiler context: language standard, dialect flags, warning
//! masks, and target parameters consulted by the keyword table and the
//! literal decoders.

/// The C standard revision targeted by a compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LangStd {
    C89,
    C99,
    C11,
    C17,
    C23,
}

impl LangStd {
    /// Ordinal used for `std_at_least` comparisons.
    const fn rank(self) -> u8 {
        match self {
            LangStd::C89 => 0,
            LangStd::C99 => 1,
            LangStd::C11 => 2,
            LangStd::C17 => 3,
            LangStd::C23 => 4,
        }
    }
}

/// Width, in bits, of the target's wide-character unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WideCharWidth {
    Bits8,
    Bits16,
    Bits32,
}

impl WideCharWidth {
    pub const fn bits(self) -> u32 {
        match self {
            WideCharWidth::Bits8 => 8,
            WideCharWidth::Bits16 => 16,
            WideCharWidth::Bits32 => 32,
        }
    }

    pub const fn max_value(self) -> u32 {
        match self {
            WideCharWidth::Bits8 => 0xFF,
            WideCharWidth::Bits16 => 0xFFFF,
            WideCharWidth::Bits32 => 0xFFFF_FFFF,
        }
    }
}

/// Whether floating-point literals are accepted, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatMode {
    Full,
    Soft,
    Disabled,
}

/// Individually suppressible/escalatable warning categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Warning {
    Pedantic = 1 << 0,
    Trigraphs = 1 << 1,
    MultiCharChar = 1 << 2,
    StringWidthPromotion = 1 << 3,
    IntegerOverflow = 1 << 4,
    FloatRange = 1 << 5,
}

/// A bitmask over [`Warning`] categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarningMask(u32);

impl WarningMask {
    pub const NONE: WarningMask = WarningMask(0);
    pub const ALL: WarningMask = WarningMask(
        Warning::Pedantic as u32
            | Warning::Trigraphs as u32
            | Warning::MultiCharChar as u32
            | Warning::StringWidthPromotion as u32
            | Warning::IntegerOverflow as u32
            | Warning::FloatRange as u32,
    );

    pub fn with(mut self, w: Warning) -> Self {
        self.0 |= w as u32;
        self
    }

    pub fn contains(&self, w: Warning) -> bool {
        self.0 & (w as u32) != 0
    }
}

/// Language/dialect configuration consumed by the keyword table and the
/// literal decoders. Plain data; constructed once per compilation.
#[derive(Clone, Debug)]
pub struct Context {
    pub lang_std: LangStd,
    pub gnu_extensions: bool,
    pub pedantic: bool,
    pub enable_trigraphs: bool,
    pub wchar_bits: WideCharWidth,
    pub float_mode: FloatMode,
    pub warnings_as_errors: bool,
    pub warning_enabled_mask: WarningMask,
    pub warning_error_mask: WarningMask,
    pub max_errors: Option<usize>,
}

impl Context {
    pub fn new(lang_std: LangStd) -> Self {
        Self {
            lang_std,
            gnu_extensions: false,
            pedantic: false,
            enable_trigraphs: false,
            wchar_bits: WideCharWidth::Bits32,
            float_mode: FloatMode::Full,
            warnings_as_errors: false,
            warning_enabled_mask: WarningMask::ALL,
            warning_error_mask: WarningMask::NONE,
            max_errors: None,
        }
    }

    pub fn gnu(mut self, enabled: bool) -> Self {
        self.gnu_extensions = enabled;
        self
    }

    pub fn pedantic(mut self, enabled: bool) -> Self {
        self.pedantic = enabled;
        self
    }

    pub fn trigraphs(mut self, enabled: bool) -> Self {
        self.enable_trigraphs = enabled;
        self
    }

    pub fn wchar_bits(mut self, width: WideCharWidth) -> Self {
        self.wchar_bits = width;
        self
    }

    pub fn std_at_least(&self, std: LangStd) -> bool {
        self.lang_std.rank() >= std.rank()
    }

    pub fn warning_enabled(&self, w: Warning) -> bool {
        self.warning_enabled_mask.contains(w)
    }

    pub fn warning_as_error(&self, w: Warning) -> bool {
        self.warning_enabled(w) && (self.warnings_as_errors || self.warning_error_mask.contains(w))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(LangStd::C17)
    }
}
