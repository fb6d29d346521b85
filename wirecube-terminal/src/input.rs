/// Translation of crossterm events into surface events
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use wirecube_core::{Key, SurfaceEvent};

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report releases
pub const DEFAULT_HOLD: Duration = Duration::from_millis(150);

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Key::W,
        KeyCode::Char('s') | KeyCode::Char('S') => Key::S,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => Key::Other,
    }
}

/// q, Esc and Ctrl-C end the session
pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Queues surface events and synthesizes key releases when needed
pub struct InputMapper {
    reports_release: bool,
    hold: Duration,
    held: Vec<(Key, Instant)>,
    queue: VecDeque<SurfaceEvent>,
}

impl InputMapper {
    /// `reports_release` tells whether the terminal sends release events
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            hold: DEFAULT_HOLD,
            held: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Feed one terminal event observed at `now`
    pub fn push(&mut self, event: &Event, now: Instant) {
        let Event::Key(key) = event else {
            return;
        };

        if key.kind != KeyEventKind::Release && is_quit(key) {
            self.queue.push_back(SurfaceEvent::Quit);
            return;
        }

        let mapped = map_key(key.code);
        if mapped == Key::Other {
            return;
        }

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(mapped, now),
            KeyEventKind::Release => self.release(mapped),
        }
    }

    /// Emit releases for keys whose hold window has lapsed
    pub fn expire(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        let hold = self.hold;
        let mut released = Vec::new();
        self.held.retain(|&(key, since)| {
            let keep = now.duration_since(since) < hold;
            if !keep {
                released.push(key);
            }
            keep
        });
        self.queue.extend(released.into_iter().map(SurfaceEvent::KeyUp));
    }

    pub fn next(&mut self) -> Option<SurfaceEvent> {
        self.queue.pop_front()
    }

    fn press(&mut self, key: Key, now: Instant) {
        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = now;
            return;
        }
        self.held.push((key, now));
        self.queue.push_back(SurfaceEvent::KeyDown(key));
    }

    fn release(&mut self, key: Key) {
        let before = self.held.len();
        self.held.retain(|(k, _)| *k != key);
        if self.held.len() != before {
            self.queue.push_back(SurfaceEvent::KeyUp(key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn drain(mapper: &mut InputMapper) -> Vec<SurfaceEvent> {
        std::iter::from_fn(|| mapper.next()).collect()
    }

    #[test]
    fn test_quit_keys() {
        let mut mapper = InputMapper::new(true);
        let now = Instant::now();
        mapper.push(&key(KeyCode::Char('q'), KeyEventKind::Press), now);
        mapper.push(&key(KeyCode::Esc, KeyEventKind::Press), now);
        mapper.push(
            &Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            now,
        );
        assert_eq!(drain(&mut mapper), vec![SurfaceEvent::Quit; 3]);
    }

    #[test]
    fn test_press_and_release() {
        let mut mapper = InputMapper::new(true);
        let now = Instant::now();
        mapper.push(&key(KeyCode::Up, KeyEventKind::Press), now);
        mapper.push(&key(KeyCode::Up, KeyEventKind::Repeat), now);
        mapper.push(&key(KeyCode::Up, KeyEventKind::Release), now);
        assert_eq!(
            drain(&mut mapper),
            vec![SurfaceEvent::KeyDown(Key::Up), SurfaceEvent::KeyUp(Key::Up)]
        );
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut mapper = InputMapper::new(true);
        mapper.push(&key(KeyCode::Char('x'), KeyEventKind::Press), Instant::now());
        mapper.push(&Event::FocusLost, Instant::now());
        assert!(drain(&mut mapper).is_empty());
    }

    #[test]
    fn test_synthesized_release_after_hold() {
        let mut mapper = InputMapper::new(false).with_hold(Duration::from_millis(100));
        let start = Instant::now();
        mapper.push(&key(KeyCode::Char('w'), KeyEventKind::Press), start);
        assert_eq!(drain(&mut mapper), vec![SurfaceEvent::KeyDown(Key::W)]);

        // A repeat inside the window extends the hold
        mapper.push(
            &key(KeyCode::Char('w'), KeyEventKind::Press),
            start + Duration::from_millis(80),
        );
        mapper.expire(start + Duration::from_millis(150));
        assert!(drain(&mut mapper).is_empty());

        mapper.expire(start + Duration::from_millis(181));
        assert_eq!(drain(&mut mapper), vec![SurfaceEvent::KeyUp(Key::W)]);
    }

    #[test]
    fn test_no_synthesized_release_when_terminal_reports_it() {
        let mut mapper = InputMapper::new(true).with_hold(Duration::from_millis(1));
        let start = Instant::now();
        mapper.push(&key(KeyCode::Down, KeyEventKind::Press), start);
        mapper.expire(start + Duration::from_secs(1));
        assert_eq!(drain(&mut mapper), vec![SurfaceEvent::KeyDown(Key::Down)]);
    }
}
