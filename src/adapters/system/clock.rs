use crate::ports::Clock;
use chrono::{Datelike, Utc};

/// システム時計（UTC）から現在年を返すClock実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}
