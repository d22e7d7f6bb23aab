//! Time-driven visibility gate for display blinking.

/// Conventional half-second blink period.
const DEFAULT_BLINK_INTERVAL_MS: u64 = 500;

/// Two-state visibility gate toggled on a fixed period.
///
/// The gate never touches the stored segment patterns: the render task
/// consults [`Self::is_visible`] each tick and simply drives nothing while
/// hidden. Toggling is advanced by the low-frequency blink task, decoupled
/// from the multiplexing tick rate. While disabled the gate always resolves
/// to visible.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone)]
pub(crate) struct BlinkGate {
    enabled: bool,
    visible: bool,
    interval_ms: u64,
    last_toggle_ms: u64,
}

impl BlinkGate {
    pub(crate) const fn new() -> Self {
        Self {
            enabled: false,
            visible: true,
            interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            last_toggle_ms: 0,
        }
    }

    /// Enables blinking and restarts the toggle timer in the visible phase.
    pub(crate) fn start(&mut self, interval_ms: u64, now_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        self.enabled = true;
        self.visible = true;
        self.last_toggle_ms = now_ms;
    }

    /// Disables blinking; the display is left visible regardless of phase.
    pub(crate) fn stop(&mut self) {
        self.enabled = false;
        self.visible = true;
    }

    pub(crate) const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Visibility as seen by the render task.
    pub(crate) const fn is_visible(&self) -> bool {
        !self.enabled || self.visible
    }

    /// Deadline of the next toggle in monotonic milliseconds, if blinking.
    pub(crate) fn next_toggle_ms(&self) -> Option<u64> {
        self.enabled
            .then(|| self.last_toggle_ms.saturating_add(self.interval_ms))
    }

    /// Advances the gate, toggling visibility once the interval has elapsed.
    pub(crate) fn tick(&mut self, now_ms: u64) {
        if self.enabled && now_ms.saturating_sub(self.last_toggle_ms) >= self.interval_ms {
            self.visible = !self.visible;
            self.last_toggle_ms = now_ms;
        }
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_gate_is_visible() {
        let gate = BlinkGate::new();
        assert!(!gate.is_enabled());
        assert!(gate.is_visible());
        assert_eq!(gate.next_toggle_ms(), None);
    }

    #[test]
    fn test_toggles_on_the_period() {
        let mut gate = BlinkGate::new();
        gate.start(500, 1000);
        assert!(gate.is_visible());
        assert_eq!(gate.next_toggle_ms(), Some(1500));

        gate.tick(1499);
        assert!(gate.is_visible(), "not yet due");

        gate.tick(1500);
        assert!(!gate.is_visible());

        gate.tick(2000);
        assert!(gate.is_visible());
    }

    #[test]
    fn test_stop_always_leaves_the_display_visible() {
        let mut gate = BlinkGate::new();
        gate.start(100, 0);
        gate.tick(100);
        assert!(!gate.is_visible(), "hidden phase");

        gate.stop();
        assert!(gate.is_visible());
        assert!(!gate.is_enabled());
        // A stale tick after stopping must not re-hide the display.
        gate.tick(10_000);
        assert!(gate.is_visible());
    }

    #[test]
    fn test_start_restarts_the_phase() {
        let mut gate = BlinkGate::new();
        gate.start(100, 0);
        gate.tick(100);
        assert!(!gate.is_visible());

        gate.start(100, 150);
        assert!(gate.is_visible(), "restart resets to visible");
        assert_eq!(gate.next_toggle_ms(), Some(250));
    }

    #[test]
    fn test_zero_interval_is_floored() {
        let mut gate = BlinkGate::new();
        gate.start(0, 0);
        assert_eq!(gate.next_toggle_ms(), Some(1));
    }
}
