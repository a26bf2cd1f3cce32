//! Inflate configuration.

/// How the trailing Adler-32 checksum of a zlib stream is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumMode {
    /// Never read the trailer.
    Ignore,
    /// Verify the trailer when at least four bytes follow the final block.
    ///
    /// Some FBX writers store array payloads without the trailer, so its
    /// absence is accepted.
    #[default]
    VerifyIfPresent,
    /// The trailer must be present and must match.
    Require,
}

/// Inflate configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateConfig {
    /// Adler-32 trailer handling.
    pub checksum: ChecksumMode,
    /// Largest output the decoder may produce, in bytes.
    pub max_output: Option<usize>,
    /// Expected output size, used to pre-reserve the output buffer.
    pub size_hint: Option<usize>,
}

impl InflateConfig {
    /// Default configuration.
    ///
    /// - Checksum verified when present
    /// - No output ceiling
    /// - No size hint
    pub const DEFAULT: Self = Self {
        checksum: ChecksumMode::VerifyIfPresent,
        max_output: None,
        size_hint: None,
    };

    /// Strict configuration: the Adler-32 trailer is mandatory.
    pub const STRICT: Self = Self {
        checksum: ChecksumMode::Require,
        max_output: None,
        size_hint: None,
    };

    /// Lenient configuration: the trailer is never inspected.
    pub const LENIENT: Self = Self {
        checksum: ChecksumMode::Ignore,
        max_output: None,
        size_hint: None,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the checksum mode.
    pub fn with_checksum(mut self, checksum: ChecksumMode) -> Self {
        self.checksum = checksum;
        self
    }

    /// Cap the decoded output at `max_output` bytes.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = Some(max_output);
        self
    }

    /// Pre-reserve `size_hint` bytes of output.
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = Some(size_hint);
        self
    }

    /// Configuration for an FBX array property whose uncompressed size is
    /// known up front: reserve exactly that much and refuse anything larger.
    pub fn for_expected_len(expected_len: usize) -> Self {
        Self::DEFAULT
            .with_size_hint(expected_len)
            .with_max_output(expected_len)
    }
}

impl Default for InflateConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
