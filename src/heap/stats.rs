use property::Property;
use std::time::Duration;

/// Outcome of one collection round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Property)]
#[property(get(public), set(disable), mut(disable))]
pub struct GcStats {
  #[property(get(type = "copy"))]
  round: u32,
  #[property(get(type = "copy"))]
  elapsed: Duration,
  #[property(get(type = "copy"))]
  live_bytes: usize,
  #[property(get(type = "copy"))]
  reclaimed_bytes: usize,
}

impl GcStats {
  pub fn new(round: u32, elapsed: Duration, live_bytes: usize, reclaimed_bytes: usize) -> GcStats {
    return GcStats {
      round,
      elapsed,
      live_bytes,
      reclaimed_bytes,
    };
  }
}

impl std::fmt::Display for GcStats {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(
      f,
      "{} round of GC: {:.6}s, {} live bytes, {} bytes reclaimed",
      self.round,
      self.elapsed.as_secs_f64(),
      self.live_bytes,
      self.reclaimed_bytes
    );
  }
}
