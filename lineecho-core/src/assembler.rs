//! Line assembly for task-based echo
//!
//! The receive side of an async echo: bytes are collected until a
//! terminator arrives, then handed over as a finished [`Line`] that a
//! separate transmit task writes out. With [`OverflowPolicy::Report`] every
//! rejected byte is returned as an error so the receiver can push back.

use heapless::Vec;

use crate::config::{EchoConfig, OverflowPolicy, TerminatorEcho};
use crate::error::EchoError;
use crate::stats::EchoStats;

/// A completed, already transformed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<const N: usize> {
    bytes: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> Line<N> {
    /// Bytes to transmit
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check whether input was lost while this line was collected
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Collects received bytes into lines
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize> {
    pending: Vec<u8, N>,
    truncated: bool,
    config: EchoConfig,
    stats: EchoStats,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new(EchoConfig::new())
    }
}

impl<const N: usize> LineAssembler<N> {
    pub const fn new(config: EchoConfig) -> Self {
        Self {
            pending: Vec::new(),
            truncated: false,
            config,
            stats: EchoStats::new(),
        }
    }

    /// Feed a single received byte
    ///
    /// Returns `Ok(Some(line))` when the byte ends a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err(Overflow)` when the
    /// byte was rejected under [`OverflowPolicy::Report`]. A terminator
    /// always completes the line, even if there was no room to store it.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line<N>>, EchoError> {
        let stored = self.pending.push(byte).is_ok();
        self.stats.record_rx(stored);
        if !stored {
            self.truncated = true;
        }

        if self.config.terminators.contains(byte) && !self.pending.is_empty() {
            return Ok(Some(self.finish()));
        }

        if !stored && self.config.overflow == OverflowPolicy::Report {
            return Err(EchoError::Overflow);
        }

        Ok(None)
    }

    /// Number of bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Counters; `transmitted` counts bytes handed out in lines
    pub fn stats(&self) -> EchoStats {
        self.stats
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Discard the partial line
    pub fn reset(&mut self) {
        self.pending.clear();
        self.truncated = false;
    }

    fn finish(&mut self) -> Line<N> {
        let keep = match self.config.terminator_echo {
            TerminatorEcho::Echo => self.pending.len(),
            TerminatorEcho::Withhold => self.pending.len() - 1,
        };

        let mut bytes = Vec::new();
        for &byte in &self.pending[..keep] {
            // Cannot fail: same capacity as `pending`
            let _ = bytes.push(self.config.transform.apply(byte));
            self.stats.record_tx();
        }
        self.stats.record_line();

        let line = Line {
            bytes,
            truncated: self.truncated,
        };
        self.reset();
        line
    }
}
