//! Recording backend for tests: no audio device, every command observable.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::types::{MediaBackend, MediaError, MediaHandle};

#[derive(Debug, Default)]
pub struct FakeState {
    pub path: PathBuf,
    pub play_calls: u32,
    pub pause_calls: u32,
    pub gain: f32,
    pub looping: bool,
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub released: bool,
    pub fail_play: bool,
    pub fail_pause: bool,
}

pub type FakeSpy = Rc<RefCell<FakeState>>;

/// Opens fake handles and keeps a spy on each one.
#[derive(Clone, Default)]
pub struct FakeBackend {
    opened: Rc<RefCell<Vec<FakeSpy>>>,
    unreadable: Rc<RefCell<Vec<PathBuf>>>,
    fail_play: Rc<RefCell<bool>>,
    duration: Option<Duration>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn mark_unreadable(&self, path: impl Into<PathBuf>) {
        self.unreadable.borrow_mut().push(path.into());
    }

    /// Handles opened from now on reject `play`.
    pub fn fail_play(&self, fail: bool) {
        *self.fail_play.borrow_mut() = fail;
    }

    pub fn spies(&self) -> Vec<FakeSpy> {
        self.opened.borrow().clone()
    }

    pub fn spy_for(&self, file_name: &str) -> FakeSpy {
        self.opened
            .borrow()
            .iter()
            .find(|p| p.borrow().path.file_name().and_then(|n| n.to_str()) == Some(file_name))
            .cloned()
            .unwrap_or_else(|| panic!("no handle opened for {file_name}"))
    }

    pub fn boxed(&self) -> Box<dyn MediaBackend> {
        Box::new(self.clone())
    }
}

impl MediaBackend for FakeBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn MediaHandle>, MediaError> {
        if self.unreadable.borrow().iter().any(|p| p == path) {
            return Err(MediaError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "unreadable"),
            });
        }
        let state = Rc::new(RefCell::new(FakeState {
            path: path.to_path_buf(),
            gain: 1.0,
            duration: self.duration,
            fail_play: *self.fail_play.borrow(),
            ..FakeState::default()
        }));
        self.opened.borrow_mut().push(Rc::clone(&state));
        Ok(Box::new(FakeHandle { state }))
    }
}

pub struct FakeHandle {
    state: FakeSpy,
}

impl MediaHandle for FakeHandle {
    fn play(&mut self) -> Result<(), MediaError> {
        let mut s = self.state.borrow_mut();
        s.play_calls += 1;
        if s.released {
            return Err(MediaError::Released);
        }
        if s.fail_play {
            return Err(MediaError::Read {
                path: s.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Unsupported, "codec"),
            });
        }
        s.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        let mut s = self.state.borrow_mut();
        s.pause_calls += 1;
        s.playing = false;
        if s.fail_pause {
            return Err(MediaError::Released);
        }
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) {
        self.state.borrow_mut().gain = gain;
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.state.borrow_mut().position = position;
        Ok(())
    }

    fn refresh(&mut self) {}

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.borrow().duration
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn release(&mut self) {
        let mut s = self.state.borrow_mut();
        s.playing = false;
        s.released = true;
    }
}
