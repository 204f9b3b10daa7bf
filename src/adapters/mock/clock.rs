use crate::ports::Clock;

/// 固定の年を返すClockのモック実装
///
/// 出版年の範囲検証を現在日付に依存せずにテストするために使う。
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    year: i32,
}

impl FixedClock {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.year
    }
}
