//! Phase timing
//!
//! The scene and driver bracket each frame phase with `begin`/`end`
//! calls on a [`ProfileSink`]. The sink is purely observational: a
//! [`NullProfiler`] is always a valid choice, and the bundled
//! [`Profiler`] keeps a sliding per-section history for overlays and
//! log reports.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::warn;

/// Frames of history kept per section
const HISTORY_FRAMES: usize = 60;

/// Named bracketing calls around frame phases. Implementations must
/// tolerate arbitrary section names and may no-op everything.
pub trait ProfileSink {
    fn begin(&mut self, section: &'static str);

    fn end(&mut self, section: &'static str);

    /// Frame boundary marker; sinks that aggregate per-frame data hook
    /// this, everyone else ignores it.
    fn end_frame(&mut self) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProfiler;

impl ProfileSink for NullProfiler {
    fn begin(&mut self, _section: &'static str) {}

    fn end(&mut self, _section: &'static str) {}
}

/// Per-section timing statistics over the history window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStats {
    pub last: Duration,
    pub avg: Duration,
    pub min: Duration,
    pub max: Duration,
}

/// Wall-clock profiler with a sliding 60-frame history per section
pub struct Profiler {
    enabled: bool,
    open: FxHashMap<&'static str, Instant>,
    frame: Vec<(&'static str, Duration)>,
    history: FxHashMap<&'static str, VecDeque<Duration>>,
    stats: FxHashMap<&'static str, SectionStats>,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            open: FxHashMap::default(),
            frame: Vec::new(),
            history: FxHashMap::default(),
            stats: FxHashMap::default(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Statistics for a section, if it has completed at least one frame
    pub fn stats(&self, section: &str) -> Option<SectionStats> {
        self.stats.get(section).copied()
    }

    /// Formatted multi-line report, slowest sections first
    pub fn report(&self) -> String {
        let mut entries: Vec<_> = self.stats.iter().collect();
        entries.sort_by(|a, b| b.1.avg.cmp(&a.1.avg));
        let total: Duration = entries.iter().map(|(_, stats)| stats.avg).sum();

        let mut out = String::from("=== Performance Profile ===\n");
        for (section, stats) in &entries {
            let share = if total > Duration::ZERO {
                stats.avg.as_secs_f64() / total.as_secs_f64() * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{:<20}: {:.3}ms ({:.1}%) [last: {:.3}ms, min: {:.3}ms, max: {:.3}ms]",
                section,
                stats.avg.as_secs_f64() * 1000.0,
                share,
                stats.last.as_secs_f64() * 1000.0,
                stats.min.as_secs_f64() * 1000.0,
                stats.max.as_secs_f64() * 1000.0,
            );
        }
        let _ = writeln!(out, "Total: {:.3}ms", total.as_secs_f64() * 1000.0);
        out
    }

    /// Drop all recorded data, keeping the enabled flag
    pub fn reset(&mut self) {
        self.open.clear();
        self.frame.clear();
        self.history.clear();
        self.stats.clear();
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileSink for Profiler {
    fn begin(&mut self, section: &'static str) {
        if !self.enabled {
            return;
        }
        self.open.insert(section, Instant::now());
    }

    fn end(&mut self, section: &'static str) {
        if !self.enabled {
            return;
        }
        let Some(started) = self.open.remove(section) else {
            warn!(section, "profiler end without matching begin");
            return;
        };
        let duration = started.elapsed();
        self.frame.push((section, duration));

        let history = self.history.entry(section).or_default();
        history.push_back(duration);
        if history.len() > HISTORY_FRAMES {
            history.pop_front();
        }
    }

    fn end_frame(&mut self) {
        if !self.enabled {
            return;
        }
        for (section, duration) in self.frame.drain(..) {
            let Some(history) = self.history.get(section) else {
                continue;
            };
            let mut min = Duration::MAX;
            let mut max = Duration::ZERO;
            let mut sum = Duration::ZERO;
            for &sample in history {
                min = min.min(sample);
                max = max.max(sample);
                sum += sample;
            }
            let avg = sum / history.len() as u32;
            self.stats.insert(
                section,
                SectionStats {
                    last: duration,
                    avg,
                    min,
                    max,
                },
            );
        }
    }
}
