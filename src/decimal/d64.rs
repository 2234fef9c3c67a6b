use std::fmt;
use std::marker::PhantomData;
use std::ops;

use num;
use num::{One, Zero};

use bit_ops;
use digit_ops;
use layout::{Layout, Standard};
use zero_pad::pad_left;

const NUM_DIGITS: usize = 16;

const SIGN_SHIFT: usize = 63;
const SIGN_BIT: u64 = 1 << SIGN_SHIFT;

const EXPONENT_SHIFT: usize = 53;
const EXPONENT_OFFSET: i32 = 512;

const SIGNIFICAND_MASK: u64 = 0x001f_ffff_ffff_ffff;
const SIGNIFICAND_OFFSET: u64 = 1_000_000_000_000_000;
const SIGNIFICAND_MAX: u64 = 9_999_999_999_999_999;
const UNIT_DIGIT: u64 = 1_000_000_000_000_000;

/// The biased exponent reported for every subnormal word. The subnormal block
/// shares this scale with the bottom of the normal range, which is what makes
/// underflow gradual.
const SUBNORMAL_EXPONENT: i32 = 1;

/// Represents a 64-bit decimal number: `sign * significand * 10^exponent`
/// with a sixteen-decimal-digit significand and an exponent offset of 512.
///
/// The word layout is `sign(1) | exponent(10) | significand(53)`. A normal
/// significand runs from 1,000,000,000,000,000 to 9,999,999,999,999,999 and
/// is stored with the leading digit's 10^15 removed; the all-zero exponent
/// block holds subnormal numbers and the all-one block holds infinity and
/// NaN. `L` fixes the layout variant per type, never per value; the default
/// `Standard` layout has gradual underflow and the standard special patterns.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy)]
pub struct d64<L: Layout = Standard> {
    bits: u64,
    layout: PhantomData<L>,
}

impl<L: Layout> d64<L> {
    /// Biased exponent of the smallest normal encoding.
    const MIN_NORMAL_EXPONENT: i32 = if !L::GRADUAL_UNDERFLOW {
        0
    } else if L::SHARED_BOUNDARY {
        2
    } else {
        1
    };

    /// Lowest biased exponent arithmetic may produce.
    const EXPONENT_FLOOR: i32 = if L::GRADUAL_UNDERFLOW { SUBNORMAL_EXPONENT } else { 0 };

    /// Largest logical exponent of a finite number.
    const EXPONENT_MAX: i32 = if L::EXTENDED_SPECIALS { 511 } else { 510 };

    /// Smallest logical exponent; the exponent every subnormal formats with.
    const EXPONENT_MIN: i32 = Self::EXPONENT_FLOOR - EXPONENT_OFFSET;

    /// Largest significand a subnormal word may carry.
    const SUBNORMAL_MAX: u64 = if L::SHARED_BOUNDARY {
        SIGNIFICAND_MAX
    } else {
        SIGNIFICAND_MAX / 10
    };

    const INFINITY_BITS: u64 = if L::EXTENDED_SPECIALS {
        0x7ffffc00_00000000
    } else {
        0x7ff00000_00000000
    };

    const NAN_BITS: u64 = if L::EXTENDED_SPECIALS {
        0x7ffffe00_00000001
    } else {
        0x7ff80000_00000001
    };

    const MAX_FINITE_BITS: u64 = (((EXPONENT_OFFSET + Self::EXPONENT_MAX) as u64)
        << EXPONENT_SHIFT)
        | (SIGNIFICAND_MAX - SIGNIFICAND_OFFSET);

    pub const ZERO: d64<L> = d64 { bits: 0, layout: PhantomData };
    pub const ONE: d64<L> = d64 {
        bits: (EXPONENT_OFFSET as u64) << EXPONENT_SHIFT,
        layout: PhantomData,
    };

    pub const MAX_VALUE: d64<L> = d64 { bits: Self::MAX_FINITE_BITS, layout: PhantomData };
    pub const MIN_VALUE: d64<L> = d64 {
        bits: SIGN_BIT | Self::MAX_FINITE_BITS,
        layout: PhantomData,
    };

    pub const INFINITY: d64<L> = d64 { bits: Self::INFINITY_BITS, layout: PhantomData };
    pub const NEG_INFINITY: d64<L> = d64 {
        bits: SIGN_BIT | Self::INFINITY_BITS,
        layout: PhantomData,
    };
    pub const NAN: d64<L> = d64 { bits: Self::NAN_BITS, layout: PhantomData };

    /// Creates and initializes a d64 representation of zero.
    pub fn new() -> d64<L> {
        d64::zero()
    }

    /// Creates a decimal from `units + decimals * 10^-15`, scaled by
    /// `10^exponent`. `decimals` holds the fifteen fraction digits as an
    /// integer and the sign is taken from `units`.
    ///
    /// This and `from_bin` are the only construction paths; there is no
    /// string parser. The parts are not validated.
    pub fn from_parts(units: i32, decimals: u64, exponent: i32) -> d64<L> {
        let significand = decimals + num::abs(units) as u64 * UNIT_DIGIT;
        Self::pack(units < 0, exponent + EXPONENT_OFFSET, significand)
    }

    /// Returns a d64 with the exact bits passed in through `data`.
    pub fn from_bin(data: u64) -> d64<L> {
        d64 { bits: data, layout: PhantomData }
    }

    /// Returns the exact bits of this decimal.
    pub fn to_bin(&self) -> u64 {
        self.bits
    }

    /// Returns the three defining pieces of the decimal - the sign (true if
    /// negative), the logical exponent, and the sixteen-digit significand,
    /// respectively. A subnormal word reports the minimum exponent and its
    /// raw digits, without a restored leading digit.
    ///
    /// Do not expect well-behaved results if this decimal is NaN or infinity.
    pub fn get_data(&self) -> (bool, i32, u64) {
        let (is_negative, expn, significand) = self.unpack();
        (is_negative, expn - EXPONENT_OFFSET, significand)
    }

    /// Returns true if this decimal is the infinity pattern of either sign.
    pub fn is_infinity(&self) -> bool {
        bit_ops::clear_bit(self.bits, SIGN_SHIFT) == Self::INFINITY_BITS
    }

    pub fn is_pos_infinity(&self) -> bool {
        self.is_infinity() && self.bits & SIGN_BIT == 0
    }

    pub fn is_neg_infinity(&self) -> bool {
        self.is_infinity() && self.bits & SIGN_BIT != 0
    }

    /// Returns true for every bit pattern above the infinity pattern.
    pub fn is_nan(&self) -> bool {
        bit_ops::clear_bit(self.bits, SIGN_SHIFT) > Self::INFINITY_BITS
    }

    /// Returns true if this decimal is a nonzero number from the subnormal
    /// block. Always false in layouts without gradual underflow.
    pub fn is_subnormal(&self) -> bool {
        let positive = bit_ops::clear_bit(self.bits, SIGN_SHIFT);
        L::GRADUAL_UNDERFLOW
            && positive != 0
            && positive < (Self::MIN_NORMAL_EXPONENT as u64) << EXPONENT_SHIFT
    }

    /// Returns the absolute value of this decimal, by returning a copy of
    /// this decimal with the sign bit turned off.
    pub fn abs(&self) -> d64<L> {
        d64::from_bin(bit_ops::clear_bit(self.bits, SIGN_SHIFT))
    }

    /// Returns the sign of this decimal as a decimal.
    ///
    /// - ±1 if the decimal is a nonzero finite number or an infinity.
    /// - the decimal itself if it is a zero.
    /// - NaN if the decimal is NaN.
    pub fn signum(&self) -> d64<L> {
        if self.is_nan() {
            Self::NAN
        } else if self.is_zero() {
            *self
        } else if self.bits & SIGN_BIT != 0 {
            -Self::ONE
        } else {
            Self::ONE
        }
    }

    /// Returns true if this decimal is positive.
    ///
    /// Note: Zero and NaN are neither positive nor negative.
    pub fn is_positive(&self) -> bool {
        !self.is_nan() && !self.is_zero() && self.bits & SIGN_BIT == 0
    }

    /// Returns true if this decimal is negative.
    ///
    /// Note: Zero and NaN are neither positive nor negative.
    pub fn is_negative(&self) -> bool {
        !self.is_nan() && !self.is_zero() && self.bits & SIGN_BIT != 0
    }

    /// Splits the word into the sign, the biased exponent and the significand
    /// with its leading digit restored. Subnormal words report
    /// `SUBNORMAL_EXPONENT` and their raw digits, so the exponents of any two
    /// finite words compare and subtract at a common scale. Purely
    /// structural; nothing is validated.
    fn unpack(&self) -> (bool, i32, u64) {
        let is_negative = bit_ops::get_bits(self.bits, SIGN_SHIFT, 64) == 1;
        let positive = bit_ops::clear_bit(self.bits, SIGN_SHIFT);
        if L::GRADUAL_UNDERFLOW
            && positive < (Self::MIN_NORMAL_EXPONENT as u64) << EXPONENT_SHIFT
        {
            return (is_negative, SUBNORMAL_EXPONENT, positive);
        }
        let expn = bit_ops::get_bits(self.bits, EXPONENT_SHIFT, SIGN_SHIFT) as i32;
        let significand = (self.bits & SIGNIFICAND_MASK) + SIGNIFICAND_OFFSET;
        (is_negative, expn, significand)
    }

    /// Packs a normalized `(sign, biased exponent, significand)` triple into
    /// a word. At the exponent floor the significand is stored raw
    /// (subnormal); everywhere else it must carry sixteen digits and is
    /// stored with the leading digit's 10^15 removed. Not validated.
    fn pack(is_negative: bool, expn: i32, significand: u64) -> d64<L> {
        let sign_field = if is_negative { SIGN_BIT } else { 0 };
        if L::GRADUAL_UNDERFLOW
            && expn <= SUBNORMAL_EXPONENT
            && (L::SHARED_BOUNDARY || significand < SIGNIFICAND_OFFSET)
        {
            return d64::from_bin(sign_field | significand);
        }
        let mut bits = sign_field | ((expn as u64) << EXPONENT_SHIFT);
        // Without subnormal support, a significand at or below the implicit
        // unit can only be the bottom-of-range case, which clips to zero.
        if L::GRADUAL_UNDERFLOW || significand > SIGNIFICAND_OFFSET {
            bits |= significand - SIGNIFICAND_OFFSET;
        }
        d64::from_bin(bits)
    }

    /// Brings a combined significand back into the sixteen-digit range and
    /// encodes it. A seventeenth digit, or an exponent below the smallest
    /// normal scale, shifts digits out to the right - overflowing to infinity
    /// when the exponent would pass the ceiling and vanishing to a signed
    /// zero when the digits run out. A short significand shifts left, down to
    /// the exponent floor, where the result tapers off subnormally.
    fn normalize(is_negative: bool, expn: i32, significand: u128) -> d64<L> {
        let mut expn = expn;
        let mut significand = significand;
        while expn < Self::EXPONENT_FLOOR || significand > SIGNIFICAND_MAX as u128 {
            if expn >= EXPONENT_OFFSET + Self::EXPONENT_MAX {
                // Too large, return infinity
                return if is_negative { Self::NEG_INFINITY } else { Self::INFINITY };
            }
            if significand == 0 {
                // Too small, return zero
                return d64::from_bin(sign_word(is_negative));
            }
            significand /= 10;
            expn += 1;
        }
        if expn > EXPONENT_OFFSET + Self::EXPONENT_MAX {
            // A sixteen-digit significand can arrive past the ceiling with
            // nothing left to shift out.
            return if is_negative { Self::NEG_INFINITY } else { Self::INFINITY };
        }
        let mut significand = significand as u64;
        while expn > Self::EXPONENT_FLOOR && significand < UNIT_DIGIT {
            significand *= 10;
            expn -= 1;
        }
        Self::pack(is_negative, expn, significand)
    }
}

fn sign_word(is_negative: bool) -> u64 {
    if is_negative {
        SIGN_BIT
    } else {
        0
    }
}

impl<L: Layout> Default for d64<L> {
    fn default() -> d64<L> {
        d64::zero()
    }
}

impl<L: Layout> Zero for d64<L> {
    fn zero() -> d64<L> {
        Self::ZERO
    }

    /// Both signed zero words are zero.
    fn is_zero(&self) -> bool {
        bit_ops::clear_bit(self.bits, SIGN_SHIFT) == 0
    }
}

impl<L: Layout> One for d64<L> {
    fn one() -> d64<L> {
        Self::ONE
    }
}

impl<L: Layout> ops::Neg for d64<L> {
    type Output = d64<L>;

    /// Flips the sign bit only. Structurally valid on every bit pattern,
    /// the specials included.
    fn neg(self) -> d64<L> {
        d64::from_bin(bit_ops::toggle_bit(self.bits, SIGN_SHIFT))
    }
}

impl<L: Layout> ops::Add<d64<L>> for d64<L> {
    type Output = d64<L>;

    fn add(self, other: d64<L>) -> d64<L> {
        if self.is_nan() || other.is_nan() {
            // NaN + anything = NaN
            return Self::NAN;
        }
        if self.is_infinity() {
            if other.is_infinity() && (self.bits ^ other.bits) & SIGN_BIT != 0 {
                // Infinity + -Infinity = NaN
                return Self::NAN;
            }
            // Infinity + finite values keeps the infinity
            return self;
        }
        if other.is_infinity() {
            return other;
        }

        let (sign_a, exp_a, m_a) = self.unpack();
        let (sign_b, exp_b, m_b) = other.unpack();
        let mut expn = if exp_a > exp_b { exp_a } else { exp_b };

        let is_negative;
        let sum;
        if exp_a == exp_b {
            // Same scale
            is_negative = (sign_a && m_a > m_b) || (sign_b && m_b > m_a);
            sum = if sign_a == sign_b {
                m_a + m_b
            } else {
                num::abs(m_a as i64 - m_b as i64) as u64
            };
        } else {
            // Different scales
            is_negative = (sign_a && exp_a == expn) || (sign_b && exp_b == expn);
            let mut exp_diff = num::abs(exp_a - exp_b);
            let mut large = if exp_a == expn { m_a } else { m_b };
            let small = if exp_a == expn { m_b } else { m_a };
            if sign_a != sign_b && large < 2 * UNIT_DIGIT {
                // The difference could lose its leading digit to
                // cancellation: widen the larger operand by one digit first.
                large *= 10;
                expn -= 1;
                exp_diff -= 1;
            }
            let small = digit_ops::shift_digits(small, -exp_diff);
            sum = if sign_a == sign_b {
                large + small
            } else {
                num::abs(large as i64 - small as i64) as u64
            };
        }
        Self::normalize(is_negative, expn, sum as u128)
    }
}

impl<L: Layout> ops::Sub<d64<L>> for d64<L> {
    type Output = d64<L>;

    fn sub(self, other: d64<L>) -> d64<L> {
        self + (-other)
    }
}

impl<L: Layout> ops::Mul<d64<L>> for d64<L> {
    type Output = d64<L>;

    fn mul(self, other: d64<L>) -> d64<L> {
        if self.is_nan() || other.is_nan() {
            // NaN * anything = NaN
            return Self::NAN;
        }
        let is_negative = (self.bits ^ other.bits) & SIGN_BIT != 0;
        if self.is_infinity() || other.is_infinity() {
            if self.is_zero() || other.is_zero() {
                // Infinity * 0 = NaN
                return Self::NAN;
            }
            return if is_negative { Self::NEG_INFINITY } else { Self::INFINITY };
        }

        let (_, exp_a, m_a) = self.unpack();
        let (_, exp_b, m_b) = other.unpack();
        let expn = exp_a + exp_b - EXPONENT_OFFSET;
        if expn > EXPONENT_OFFSET + Self::EXPONENT_MAX {
            // Too large, return infinity
            return if is_negative { Self::NEG_INFINITY } else { Self::INFINITY };
        }
        // Each operand carries sixteen digits, so the raw product has up to
        // thirty-two; rescale by the unit digit in a double-width product.
        let product = m_a as u128 * m_b as u128 / UNIT_DIGIT as u128;
        Self::normalize(is_negative, expn, product)
    }
}

impl<L: Layout> ops::Div<d64<L>> for d64<L> {
    type Output = d64<L>;

    fn div(self, other: d64<L>) -> d64<L> {
        if self.is_nan() || other.is_nan() {
            // NaN / anything = NaN
            return Self::NAN;
        }
        let is_negative = (self.bits ^ other.bits) & SIGN_BIT != 0;
        if self.is_infinity() {
            if other.is_infinity() {
                // Infinity / Infinity = NaN
                return Self::NAN;
            }
            return if is_negative { Self::NEG_INFINITY } else { Self::INFINITY };
        }
        if other.is_infinity() {
            // finite / Infinity = zero
            return d64::from_bin(sign_word(is_negative));
        }
        if other.is_zero() {
            // finite / 0 = NaN
            return Self::NAN;
        }

        let (_, exp_a, m_a) = self.unpack();
        let (_, exp_b, m_b) = other.unpack();
        let expn = exp_a - exp_b + EXPONENT_OFFSET;
        // Scale the dividend up by the significand width so the integer
        // quotient keeps sixteen significant digits before truncation.
        let quotient = m_a as u128 * UNIT_DIGIT as u128 / m_b as u128;
        Self::normalize(is_negative, expn, quotient)
    }
}

impl<L: Layout> fmt::Display for d64<L> {
    /// Formats as `±D.FFFFFFFFFFFFFFFe±EEE`, or as the tokens `+Infinity`,
    /// `-Infinity` and `NaN`. Malformed words format as `NaN`.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.bits & SIGN_BIT != 0 { '-' } else { '+' };
        let positive = bit_ops::clear_bit(self.bits, SIGN_SHIFT);
        if positive == Self::INFINITY_BITS {
            return write!(formatter, "{}Infinity", sign);
        }
        if positive > Self::INFINITY_BITS {
            return write!(formatter, "NaN");
        }

        // Starting as subnormal
        let mut expn = Self::EXPONENT_MIN;
        let mut significand = positive;
        let is_normal = if L::GRADUAL_UNDERFLOW {
            positive >= (Self::MIN_NORMAL_EXPONENT as u64) << EXPONENT_SHIFT
        } else {
            positive != 0
        };
        if is_normal {
            expn = bit_ops::get_bits(positive, EXPONENT_SHIFT, SIGN_SHIFT) as i32
                - EXPONENT_OFFSET;
            significand = (positive & SIGNIFICAND_MASK) + SIGNIFICAND_OFFSET;
            if significand > SIGNIFICAND_MAX {
                // Over sixteen digits in a nominally normal word
                return write!(formatter, "NaN");
            }
        } else if L::GRADUAL_UNDERFLOW && significand > Self::SUBNORMAL_MAX {
            return write!(formatter, "NaN");
        }

        let digits = significand.to_string();
        let digits = pad_left(&digits, NUM_DIGITS - digits.len());
        write!(formatter, "{}{}.{}e{:+}", sign, &digits[0..1], &digits[1..], expn)
    }
}

impl<L: Layout> fmt::Debug for d64<L> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let debug_str = if self.is_infinity() {
            if self.bits & SIGN_BIT == 0 {
                "d64::INFINITY".to_string()
            } else {
                "d64::NEG_INFINITY".to_string()
            }
        } else if self.is_nan() {
            "d64::NAN".to_string()
        } else {
            let (is_negative, exponent, significand) = self.get_data();
            format!("d64 {{ is_negative: {}, exponent: {}, significand: {} }}",
                    is_negative,
                    exponent,
                    significand)
        };

        write!(formatter, "{}", debug_str)
    }
}
