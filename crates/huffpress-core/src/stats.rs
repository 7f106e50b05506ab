//! Statistics for encode/decode operations.

use crate::types::CompressionRatio;

/// Statistics from a compression operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStats {
    /// Original text size in bytes.
    pub original_size: usize,

    /// Packed stream size in bytes (header byte included).
    pub compressed_size: usize,

    /// Number of distinct symbols in the code table.
    pub table_entries: usize,

    /// Payload bits before padding.
    pub payload_bits: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Average code length in bits per symbol.
    pub fn bits_per_symbol(&self, symbol_count: usize) -> f64 {
        if symbol_count == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / symbol_count as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.time_us as f64
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }
}

/// Metrics collector for aggregate statistics across operations.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Total operations performed.
    pub total_operations: u64,

    /// Total text bytes compressed.
    pub total_bytes_in: u64,

    /// Total packed bytes produced.
    pub total_bytes_out: u64,

    /// Total time spent in microseconds.
    pub total_time_us: u64,

    /// Number of errors encountered.
    pub error_count: u64,
}

impl Metrics {
    /// Create new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed operation.
    pub fn record(&mut self, stats: &CompressionStats) {
        self.total_operations += 1;
        self.total_bytes_in += stats.original_size as u64;
        self.total_bytes_out += stats.compressed_size as u64;
        self.total_time_us += stats.time_us;
    }

    /// Record an error.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Get average compression ratio.
    pub fn average_ratio(&self) -> f64 {
        if self.total_bytes_out == 0 {
            return 1.0;
        }
        self.total_bytes_in as f64 / self.total_bytes_out as f64
    }

    /// Get metrics summary as string.
    pub fn summary(&self) -> String {
        format!(
            "Operations: {}, Bytes: {} -> {} (ratio: {:.2}x), Errors: {}",
            self.total_operations,
            self.total_bytes_in,
            self.total_bytes_out,
            self.average_ratio(),
            self.error_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_symbol() {
        let stats = CompressionStats {
            original_size: 6,
            compressed_size: 3,
            table_entries: 3,
            payload_bits: 9,
            time_us: 0,
        };
        assert_eq!(stats.bits_per_symbol(6), 1.5);
        assert_eq!(stats.bits_per_symbol(0), 0.0);
        assert_eq!(stats.savings_percent(), 50.0);
    }

    #[test]
    fn test_metrics_record() {
        let mut metrics = Metrics::new();
        let stats = CompressionStats {
            original_size: 100,
            compressed_size: 50,
            ..Default::default()
        };
        metrics.record(&stats);
        metrics.record(&stats);
        metrics.record_error();

        assert_eq!(metrics.total_operations, 2);
        assert_eq!(metrics.average_ratio(), 2.0);
        assert!(metrics.summary().contains("Errors: 1"));
    }
}
