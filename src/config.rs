/// Settings fixed when a runtime is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
  /// Total heap budget in bytes, split evenly into the two semi-spaces.
  pub heap_size: usize,
  /// Zero the evacuated semi-space after every flip.
  pub zero_on_flip: bool,
  /// Log a diagnostic line for every collection round.
  pub report_rounds: bool,
}

impl RuntimeConfig {
  pub fn new(heap_size: usize) -> RuntimeConfig {
    return RuntimeConfig {
      heap_size,
      ..RuntimeConfig::default()
    };
  }

  pub fn with_heap_size(mut self, heap_size: usize) -> RuntimeConfig {
    self.heap_size = heap_size;
    return self;
  }

  pub fn with_zero_on_flip(mut self, zero_on_flip: bool) -> RuntimeConfig {
    self.zero_on_flip = zero_on_flip;
    return self;
  }

  pub fn with_report_rounds(mut self, report_rounds: bool) -> RuntimeConfig {
    self.report_rounds = report_rounds;
    return self;
  }
}

impl Default for RuntimeConfig {
  fn default() -> RuntimeConfig {
    return RuntimeConfig {
      heap_size: mb!(1),
      zero_on_flip: true,
      report_rounds: true,
    };
  }
}
