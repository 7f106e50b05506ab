//! Core type definitions.

/// Compression ratio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionRatio {
    /// Original text size in bytes.
    pub original_size: usize,
    /// Packed stream size in bytes.
    pub compressed_size: usize,
}

impl CompressionRatio {
    /// Create new ratio from sizes.
    pub fn new(original: usize, compressed: usize) -> Self {
        CompressionRatio {
            original_size: original,
            compressed_size: compressed,
        }
    }

    /// Calculate ratio (original / compressed).
    /// Higher is better (more compression).
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Calculate space savings as percentage (0-100).
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - (self.compressed_size as f64 / self.original_size as f64)) * 100.0
    }

    /// Check if compression was effective (saved space).
    pub fn is_effective(&self) -> bool {
        self.compressed_size < self.original_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let r = CompressionRatio::new(100, 25);
        assert_eq!(r.ratio(), 4.0);
        assert_eq!(r.savings_percent(), 75.0);
        assert!(r.is_effective());
    }

    #[test]
    fn test_ratio_degenerate() {
        assert_eq!(CompressionRatio::new(10, 0).ratio(), 0.0);
        assert_eq!(CompressionRatio::new(0, 1).savings_percent(), 0.0);
        assert!(!CompressionRatio::new(1, 2).is_effective());
    }
}
