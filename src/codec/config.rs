/// Decode-time limits.
///
/// Encoding ignores these; they only bound what a decoder is willing to
/// allocate for an untrusted buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest accepted `NODE_COUNT` header value.
    pub max_node_count: u32,
    /// Largest accepted per-record `SIG_LEN`.
    pub max_signature_len: u32,
    /// Accept bytes after the final record instead of failing.
    pub allow_trailing_bytes: bool,
}

impl CodecConfig {
    /// Set the node count limit.
    pub fn with_max_node_count(mut self, max_node_count: u32) -> Self {
        self.max_node_count = max_node_count;
        self
    }

    /// Set the per-record signature length limit.
    pub fn with_max_signature_len(mut self, max_signature_len: u32) -> Self {
        self.max_signature_len = max_signature_len;
        self
    }

    /// Tolerate trailing bytes (e.g. when the tree is embedded in a larger envelope).
    pub fn with_trailing_bytes(mut self, allowed: bool) -> Self {
        self.allow_trailing_bytes = allowed;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_node_count: u32::MAX,
            max_signature_len: u32::MAX,
            allow_trailing_bytes: false,
        }
    }
}
