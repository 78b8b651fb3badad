//! Frame timing.

/// Turns absolute frame timestamps into the duration of each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
  last: Option<f32>,
}

impl FrameClock {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seconds elapsed since the previous tick.
  ///
  /// The very first tick returns 0, as does a timestamp older than the previous one.
  pub fn tick(&mut self, now: f32) -> f32 {
    let dt = self.last.map_or(0., |last| (now - last).max(0.));
    self.last = Some(now);
    dt
  }
}

/// Frames-per-second counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsCounter {
  since: f64,
  frames: u32,
}

impl FpsCounter {
  /// Minimum time between two reports, in seconds.
  pub const REPORT_INTERVAL: f64 = 0.25;

  pub fn new(now: f64) -> Self {
    FpsCounter {
      since: now,
      frames: 0,
    }
  }

  /// Account for a frame rendered at `now`.
  ///
  /// Once at least [`FpsCounter::REPORT_INTERVAL`] seconds have elapsed since the last report, the frame rate over
  /// that period is returned and counting starts over.
  pub fn tick(&mut self, now: f64) -> Option<f64> {
    let elapsed = now - self.since;

    if elapsed >= Self::REPORT_INTERVAL {
      let fps = f64::from(self.frames) / elapsed;
      self.since = now;
      self.frames = 1;
      Some(fps)
    } else {
      self.frames += 1;
      None
    }
  }
}

/// Window title decorated with a frame rate.
pub fn fps_title(title: &str, fps: f64) -> String {
  format!("{} @ fps: {:.2}", title, fps)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_frame_has_no_duration() {
    let mut clock = FrameClock::new();

    assert_eq!(clock.tick(3.), 0.);
    assert_eq!(clock.tick(3.5), 0.5);
    assert_eq!(clock.tick(3.75), 0.25);
  }

  #[test]
  fn time_going_backwards_is_ignored() {
    let mut clock = FrameClock::new();

    clock.tick(2.);
    assert_eq!(clock.tick(1.), 0.);
    assert_eq!(clock.tick(1.5), 0.5);
  }

  #[test]
  fn fps_is_reported_after_interval() {
    let mut counter = FpsCounter::new(0.);

    // 10 frames, one every 0.02s
    for i in 0..10u32 {
      assert_eq!(counter.tick(f64::from(i) * 0.02), None);
    }

    let fps = counter.tick(0.3).unwrap();
    assert!((fps - 10. / 0.3).abs() < 1e-9);

    // counting restarted with the frame that triggered the report
    assert_eq!(counter.tick(0.4), None);
  }

  #[test]
  fn fps_is_reported_on_interval_boundary() {
    let mut counter = FpsCounter::new(0.);

    assert_eq!(counter.tick(0.125), None);
    assert_eq!(counter.tick(FpsCounter::REPORT_INTERVAL), Some(1. / FpsCounter::REPORT_INTERVAL));
  }

  #[test]
  fn fps_title_format() {
    assert_eq!(fps_title("shapes", 59.9412), "shapes @ fps: 59.94");
  }
}
