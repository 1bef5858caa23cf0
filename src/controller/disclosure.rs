use std::time::Duration;

/// Default reveal/hide duration of an expandable section.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Indicator rotation when fully expanded, in degrees.
pub const INDICATOR_EXPANDED_DEG: f32 = 180.0;

/// Quadratic ease-in-out.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureState {
    Collapsed,
    Expanded,
}

impl DisclosureState {
    fn target(self) -> f32 {
        match self {
            DisclosureState::Collapsed => 0.0,
            DisclosureState::Expanded => 1.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            DisclosureState::Collapsed => DisclosureState::Expanded,
            DisclosureState::Expanded => DisclosureState::Collapsed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Interpolation between two values over a fixed duration.
struct Transition {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Transition {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    fn value(&self) -> f32 {
        self.from + (self.to - self.from) * ease_in_out(self.progress())
    }

    fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone)]
/// Collapsible section header state.
///
/// The logical state flips the moment the header is activated. Only the
/// visual parameter (0 = hidden, 1 = revealed) moves over time, and it can be
/// redirected mid-flight by another activation.
pub struct Disclosure {
    state: DisclosureState,
    settled: f32,
    transition: Option<Transition>,
    duration: Duration,
}

impl Disclosure {
    pub fn new(expanded: bool, duration: Duration) -> Self {
        let state = if expanded {
            DisclosureState::Expanded
        } else {
            DisclosureState::Collapsed
        };
        Self {
            state,
            settled: state.target(),
            transition: None,
            duration,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.state == DisclosureState::Expanded
    }

    /// Header activation. Starts (or redirects) the interpolation from
    /// wherever the parameter currently is toward the new target.
    pub fn toggle(&mut self) -> DisclosureState {
        let from = self.value();
        self.state = self.state.flipped();
        self.transition = Some(Transition {
            from,
            to: self.state.target(),
            elapsed: Duration::ZERO,
            duration: self.duration,
        });
        self.state
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(ref mut t) = self.transition {
            t.tick(dt);
            if t.is_complete() {
                self.settled = t.to;
                self.transition = None;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Visual parameter in [0, 1].
    pub fn value(&self) -> f32 {
        match self.transition {
            Some(ref t) => t.value().clamp(0.0, 1.0),
            None => self.settled,
        }
    }

    pub fn indicator_rotation(&self) -> f32 {
        self.value() * INDICATOR_EXPANDED_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn collapsed() -> Disclosure {
        Disclosure::new(false, DEFAULT_TRANSITION)
    }

    #[test]
    fn starts_collapsed_and_settled() {
        let d = collapsed();
        assert!(!d.is_expanded());
        assert_eq!(d.value(), 0.0);
        assert!(!d.is_animating());
    }

    #[test]
    fn can_start_expanded() {
        let d = Disclosure::new(true, DEFAULT_TRANSITION);
        assert!(d.is_expanded());
        assert_eq!(d.value(), 1.0);
        assert_eq!(d.indicator_rotation(), 180.0);
    }

    #[test]
    fn expand_flips_state_immediately_and_trends_up() {
        let mut d = collapsed();
        assert_eq!(d.toggle(), DisclosureState::Expanded);
        assert!(d.is_expanded());
        assert_eq!(d.value(), 0.0);

        d.tick(ms(100));
        let early = d.value();
        d.tick(ms(100));
        let later = d.value();
        assert!(early > 0.0 && later > early && later < 1.0);

        d.tick(ms(100));
        assert_eq!(d.value(), 1.0);
        assert!(!d.is_animating());
        assert_eq!(d.indicator_rotation(), INDICATOR_EXPANDED_DEG);
    }

    #[test]
    fn midpoint_is_half() {
        let mut d = collapsed();
        d.toggle();
        d.tick(ms(150));
        assert!((d.value() - 0.5).abs() < 1e-4);
        assert!((d.indicator_rotation() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn reactivation_mid_flight_redirects_to_zero() {
        let mut d = collapsed();
        d.toggle();
        d.tick(ms(150));
        let mid = d.value();

        assert_eq!(d.toggle(), DisclosureState::Collapsed);
        assert!((d.value() - mid).abs() < 1e-6);

        d.tick(ms(100));
        assert!(d.value() < mid);
        d.tick(ms(200));
        assert_eq!(d.value(), 0.0);
        assert!(!d.is_animating());
    }

    #[test]
    fn rapid_toggling_stays_in_range() {
        let mut d = collapsed();
        for i in 0..25 {
            d.toggle();
            d.tick(ms(7 * i));
            let v = d.value();
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
        d.tick(ms(1000));
        assert_eq!(d.value(), if d.is_expanded() { 1.0 } else { 0.0 });
    }

    #[test]
    fn zero_duration_jumps() {
        let mut d = Disclosure::new(false, Duration::ZERO);
        d.toggle();
        assert_eq!(d.value(), 1.0);
        d.tick(Duration::ZERO);
        assert!(!d.is_animating());
    }
}
