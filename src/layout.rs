/// Selects one of the 64-bit word layouts at compile time.
///
/// The three axes are independent, except that the shared-boundary split only
/// makes sense together with gradual underflow; `SHARED_BOUNDARY` without
/// `GRADUAL_UNDERFLOW` is unsupported.
pub trait Layout: Clone + Copy {
    /// Whether magnitudes below the smallest normal number taper off through
    /// subnormal encodings instead of truncating straight to zero.
    const GRADUAL_UNDERFLOW: bool = true;

    /// Moves the infinity and NaN patterns to the top of the highest exponent
    /// block, reclaiming the rest of that block for one more exponent of
    /// normal range.
    const EXTENDED_SPECIALS: bool = false;

    /// Reads bit 53 as exponent for normal numbers but as significand for
    /// subnormal numbers, widening subnormals to the full sixteen digits.
    const SHARED_BOUNDARY: bool = false;
}

/// Gradual underflow, standard special patterns, fixed field boundary.
#[derive(Debug, Clone, Copy)]
pub struct Standard;

impl Layout for Standard {}

/// Truncates everything below the smallest normal number to a signed zero.
#[derive(Debug, Clone, Copy)]
pub struct NoSubnormals;

impl Layout for NoSubnormals {
    const GRADUAL_UNDERFLOW: bool = false;
}

/// One extra exponent of range, bought by packing the special patterns into
/// the top of the highest exponent block.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedRange;

impl Layout for ExtendedRange {
    const EXTENDED_SPECIALS: bool = true;
}

/// Sixteen-digit subnormals through the shared boundary bit.
#[derive(Debug, Clone, Copy)]
pub struct SharedBoundary;

impl Layout for SharedBoundary {
    const SHARED_BOUNDARY: bool = true;
}
