use std::{
    cell::Cell,
    env, fs,
    path::{Path, PathBuf},
    process,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use chrono::NaiveDateTime;

use crate::clock::Clock;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

// A lazy persons tmp dir which is removed as soon as it goes out of scope
pub(crate) struct TmpDir {
    path: PathBuf,
}

impl TmpDir {
    pub(crate) fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let path = env::temp_dir().join(format!("feedtimer-test-{}-{id}", process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TmpDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// Shared handle so a test can move time while the actor owns the clock
pub(crate) struct FakeClock {
    pub(crate) now: Rc<Cell<NaiveDateTime>>,
}

impl Clock for FakeClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
