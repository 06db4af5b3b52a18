use std::time::{Duration, Instant};

/// Distance, in pixels, a hidden section is shifted away from its resting position
const HIDDEN_OFFSET: f32 = 50.0;

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn intersection(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

/// Fraction of `element` that lies inside `viewport`, between 0 and 1
pub fn intersection_ratio(element: &Rect, viewport: &Rect) -> f32 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    (element.intersection(viewport).area() / area).clamp(0.0, 1.0)
}

/// Where a section slides in from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealState {
    Hidden,
    Pending { since: Instant },
    Visible,
}

/// How a section should be drawn right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Length of the fade/slide transition towards this style
    pub transition: Duration,
}

/// One-shot fade and slide-in of a page section once it scrolls into view.
///
/// A section becomes visible `delay` after it is first observed intersecting the viewport by at
/// least `threshold`, and never hides again.
#[derive(Debug, Clone)]
pub struct Reveal {
    direction: Direction,
    delay: Duration,
    duration: Duration,
    threshold: f32,
    state: RevealState,
}

impl Reveal {
    pub const DEFAULT_THRESHOLD: f32 = 0.1;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            delay: Duration::ZERO,
            duration: Self::DEFAULT_DURATION,
            threshold: Self::DEFAULT_THRESHOLD,
            state: RevealState::Hidden,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Feed the latest layout. Returns whether the section changed state.
    pub fn observe(&mut self, element: &Rect, viewport: &Rect, now: Instant) -> bool {
        if self.state != RevealState::Hidden {
            return false;
        }
        let ratio = intersection_ratio(element, viewport);
        if ratio <= 0.0 || ratio < self.threshold {
            return false;
        }
        self.state = RevealState::Pending { since: now };
        self.poll(now);
        true
    }

    /// Promote a pending section once its delay has elapsed. Returns whether it became visible.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            RevealState::Pending { since } if now.saturating_duration_since(since) >= self.delay => {
                self.state = RevealState::Visible;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state == RevealState::Visible
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RevealState::Pending { .. })
    }

    pub fn style(&self) -> RevealStyle {
        if self.is_visible() {
            return RevealStyle { opacity: 1.0, offset_x: 0.0, offset_y: 0.0, transition: self.duration };
        }
        let (offset_x, offset_y) = match self.direction {
            Direction::Up => (0.0, HIDDEN_OFFSET),
            Direction::Down => (0.0, -HIDDEN_OFFSET),
            Direction::Left => (-HIDDEN_OFFSET, 0.0),
            Direction::Right => (HIDDEN_OFFSET, 0.0),
        };
        RevealStyle { opacity: 0.0, offset_x, offset_y, transition: self.duration }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[rstest]
    #[case::fully_inside(Rect::new(10.0, 10.0, 100.0, 100.0), 1.0)]
    #[case::outside(Rect::new(0.0, 900.0, 100.0, 100.0), 0.0)]
    #[case::half_below(Rect::new(0.0, 750.0, 100.0, 100.0), 0.5)]
    #[case::empty(Rect::new(0.0, 0.0, 0.0, 100.0), 0.0)]
    fn ratio(#[case] element: Rect, #[case] expected: f32) {
        assert!((intersection_ratio(&element, &viewport()) - expected).abs() < f32::EPSILON);
    }

    #[test]
    fn below_threshold_stays_hidden() {
        let mut reveal = Reveal::new(Direction::Up);
        // 5% of the element peeks into the viewport
        let element = Rect::new(0.0, 795.0, 100.0, 100.0);
        assert!(!reveal.observe(&element, &viewport(), Instant::now()));
        assert!(!reveal.is_visible());
        assert_eq!(reveal.style().opacity, 0.0);
    }

    #[test]
    fn reveals_immediately_without_delay() {
        let mut reveal = Reveal::new(Direction::Left);
        assert!(reveal.observe(&Rect::new(0.0, 0.0, 10.0, 10.0), &viewport(), Instant::now()));
        assert!(reveal.is_visible());
        let style = reveal.style();
        assert_eq!((style.opacity, style.offset_x, style.offset_y), (1.0, 0.0, 0.0));
    }

    #[test]
    fn delay_is_honoured() {
        let start = Instant::now();
        let mut reveal = Reveal::new(Direction::Up).delay(Duration::from_millis(200));
        assert!(reveal.observe(&Rect::new(0.0, 0.0, 10.0, 10.0), &viewport(), start));
        assert!(reveal.is_pending());
        assert!(!reveal.poll(start + Duration::from_millis(199)));
        assert!(reveal.poll(start + Duration::from_millis(200)));
        assert!(reveal.is_visible());
    }

    #[test]
    fn once_visible_never_hides() {
        let now = Instant::now();
        let mut reveal = Reveal::new(Direction::Down);
        reveal.observe(&Rect::new(0.0, 0.0, 10.0, 10.0), &viewport(), now);
        assert!(!reveal.observe(&Rect::new(0.0, 5000.0, 10.0, 10.0), &viewport(), now));
        assert!(reveal.is_visible());
    }

    #[rstest]
    #[case(Direction::Up, 0.0, 50.0)]
    #[case(Direction::Down, 0.0, -50.0)]
    #[case(Direction::Left, -50.0, 0.0)]
    #[case(Direction::Right, 50.0, 0.0)]
    fn hidden_offsets(#[case] direction: Direction, #[case] x: f32, #[case] y: f32) {
        let style = Reveal::new(direction).style();
        assert_eq!((style.offset_x, style.offset_y), (x, y));
        assert_eq!(style.transition, Reveal::DEFAULT_DURATION);
    }

    #[test]
    fn direction_parses_from_lowercase() {
        assert_eq!("right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(Direction::Up.to_string(), "up");
    }
}
